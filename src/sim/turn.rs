//! Turn resolution. A turn is two sequential sub-phases; the second one
//! starts from exactly the state the first one produced.

use crate::model::{
    BattleState, CombatantDefinition, Command, CommandPair, CommandPhaseResult, DamageInfo, Outcome,
    Side, TurnResult,
};
use crate::sim::damage::{reflect_damage, roll_evasion, special_damage, weapon_damage};
use crate::sim::interaction::{is_guaranteed_hit, resolve_command_interaction};
use crate::sim::transitions::{calculate_distance, next_stance};
use rand::Rng;
use tracing::{debug, trace};

#[derive(Clone, Copy)]
struct Definitions<'a> {
    def1: &'a CombatantDefinition,
    def2: &'a CombatantDefinition,
}

impl<'a> Definitions<'a> {
    fn get(&self, side: Side) -> &'a CombatantDefinition {
        match side {
            Side::Player1 => self.def1,
            Side::Player2 => self.def2,
        }
    }
}

/// Damage produced by one side's attack: what the defender takes and what
/// bounces back onto the attacker.
#[derive(Default)]
struct Strike {
    to_defender: DamageInfo,
    to_attacker: DamageInfo,
}

/// Resolve one full turn. `state` is left untouched; the next state is returned.
pub fn process_turn<R: Rng + ?Sized>(
    state: &BattleState,
    def1: &CombatantDefinition,
    def2: &CombatantDefinition,
    commands1: CommandPair,
    commands2: CommandPair,
    rng: &mut R,
) -> (BattleState, TurnResult) {
    let defs = Definitions { def1, def2 };
    let (after_first, first_phase) =
        resolve_phase(state, defs, commands1.first, commands2.first, rng);
    let (mut next, second_phase) =
        resolve_phase(&after_first, defs, commands1.second, commands2.second, rng);

    let turn_number = state.current_turn;
    next.current_turn = state.current_turn.saturating_add(1);

    let result = TurnResult {
        turn_number,
        commands1,
        commands2,
        distance_before: state.current_distance,
        distance_after: next.current_distance,
        damage1: first_phase.damage1.merge(second_phase.damage1),
        damage2: first_phase.damage2.merge(second_phase.damage2),
        stance1_after: next.combatant1.current_stance,
        stance2_after: next.combatant2.current_stance,
        first_phase,
        second_phase,
    };
    debug!(
        turn = turn_number,
        distance = ?result.distance_after,
        damage1 = result.damage1.damage,
        damage2 = result.damage2.damage,
        hp1 = next.combatant1.current_hp,
        hp2 = next.combatant2.current_hp,
        "turn resolved"
    );
    (next, result)
}

fn resolve_phase<R: Rng + ?Sized>(
    state: &BattleState,
    defs: Definitions<'_>,
    command1: Command,
    command2: Command,
    rng: &mut R,
) -> (BattleState, CommandPhaseResult) {
    let mut next = state.clone();
    let distance = calculate_distance(state.current_distance, command1, command2);
    next.current_distance = distance;
    next.combatant1.current_stance = next_stance(state.combatant1.current_stance, command1);
    next.combatant2.current_stance = next_stance(state.combatant2.current_stance, command2);

    let (outcome1, outcome2) = resolve_command_interaction(distance, command1, command2);
    let guaranteed = is_guaranteed_hit(distance, command1, command2);

    let strike1 = resolve_strike(&mut next, defs, Side::Player1, command1, outcome1, guaranteed, rng);
    let strike2 = resolve_strike(&mut next, defs, Side::Player2, command2, outcome2, guaranteed, rng);

    let received1 = strike2.to_defender.merge(strike1.to_attacker);
    let received2 = strike1.to_defender.merge(strike2.to_attacker);
    apply_damage(&mut next, defs, Side::Player1, received1.damage);
    apply_damage(&mut next, defs, Side::Player2, received2.damage);

    trace!(
        ?command1,
        ?command2,
        ?distance,
        ?outcome1,
        ?outcome2,
        damage1 = received1.damage,
        damage2 = received2.damage,
        "phase resolved"
    );

    let result = CommandPhaseResult {
        command1,
        command2,
        distance_after: distance,
        outcome1,
        outcome2,
        damage1: received1,
        damage2: received2,
        stance1_after: next.combatant1.current_stance,
        stance2_after: next.combatant2.current_stance,
    };
    (next, result)
}

fn resolve_strike<R: Rng + ?Sized>(
    next: &mut BattleState,
    defs: Definitions<'_>,
    attacker_side: Side,
    command: Command,
    outcome: Outcome,
    guaranteed: bool,
    rng: &mut R,
) -> Strike {
    let defender_side = attacker_side.opponent();
    let attacker_def = defs.get(attacker_side);
    let defender_def = defs.get(defender_side);
    let attacker_stance = next.combatant(attacker_side).current_stance;
    let defender_stance = next.combatant(defender_side).current_stance;
    let mut strike = Strike::default();

    match (command, outcome) {
        (Command::WeaponAttack, Outcome::Hit) => {
            if !guaranteed && roll_evasion(defender_def.stats.speed, rng) {
                strike.to_defender.is_evaded = true;
            } else {
                strike.to_defender.damage =
                    weapon_damage(attacker_def, attacker_stance, defender_def, defender_stance);
            }
        }
        (Command::SpecialAttack, Outcome::Hit) => {
            let remaining = spend_special(next, attacker_side);
            if !guaranteed && roll_evasion(defender_def.stats.speed, rng) {
                strike.to_defender.is_evaded = true;
            } else {
                strike.to_defender.damage = special_damage(attacker_def, attacker_stance, remaining);
            }
        }
        (Command::SpecialAttack, Outcome::Cancelled) => {
            spend_special(next, attacker_side);
        }
        (Command::SpecialAttack, Outcome::Countered) => {
            let remaining = spend_special(next, attacker_side);
            let defender = next.combatant_mut(defender_side);
            if defender.remaining_reflects(defender_def) > 0 {
                defender.used_reflect_count += 1;
                let incoming = special_damage(attacker_def, attacker_stance, remaining);
                strike.to_attacker = DamageInfo {
                    damage: reflect_damage(incoming, defender_def.reflector.reflect_rate),
                    is_evaded: false,
                    is_reflected: true,
                };
            }
        }
        _ => {}
    }
    strike
}

/// Spend one special use and return the count in effect when the attack started.
fn spend_special(next: &mut BattleState, side: Side) -> u32 {
    let combatant = next.combatant_mut(side);
    let before = combatant.remaining_special_count;
    combatant.remaining_special_count = before.saturating_sub(1);
    before
}

fn apply_damage(next: &mut BattleState, defs: Definitions<'_>, side: Side, damage: u32) {
    let max_hp = defs.get(side).max_hp();
    let combatant = next.combatant_mut(side);
    combatant.current_hp = combatant.current_hp.saturating_sub(damage).min(max_hp);
}
