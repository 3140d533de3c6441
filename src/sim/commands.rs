use crate::model::{BattleState, CombatantDefinition, CombatantState, Command, Distance, Side};

/// Commands `side` may currently choose, in canonical order.
///
/// Advisory only: the turn processor accepts any command, a WeaponAttack
/// outside Near simply misses.
pub fn valid_commands(state: &BattleState, side: Side, def: &CombatantDefinition) -> Vec<Command> {
    commands_for(state.combatant(side), state.current_distance, def)
}

pub fn is_valid_command(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    command: Command,
) -> bool {
    valid_commands(state, side, def).contains(&command)
}

pub(crate) fn commands_for(
    combatant: &CombatantState,
    distance: Distance,
    def: &CombatantDefinition,
) -> Vec<Command> {
    Command::ALL
        .into_iter()
        .filter(|cmd| match cmd {
            Command::WeaponAttack => distance == Distance::Near,
            Command::Reflect => combatant.used_reflect_count < def.reflector.max_reflect_count,
            _ => true,
        })
        .collect()
}
