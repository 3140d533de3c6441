use crate::model::{Command, Distance, Stance};

pub fn move_closer(distance: Distance) -> Distance {
    match distance {
        Distance::Far => Distance::Mid,
        Distance::Mid | Distance::Near => Distance::Near,
    }
}

pub fn move_farther(distance: Distance) -> Distance {
    match distance {
        Distance::Near => Distance::Mid,
        Distance::Mid | Distance::Far => Distance::Far,
    }
}

/// Distance after both sides' simultaneous commands.
pub fn calculate_distance(current: Distance, a: Command, b: Command) -> Distance {
    match (a, b) {
        (Command::Advance, Command::Advance) => move_closer(move_closer(current)),
        (Command::Retreat, Command::Retreat) => move_farther(move_farther(current)),
        (Command::Advance, Command::Retreat) | (Command::Retreat, Command::Advance) => current,
        (Command::Advance, _) | (_, Command::Advance) => move_closer(current),
        (Command::Retreat, _) | (_, Command::Retreat) => move_farther(current),
        _ => current,
    }
}

pub fn next_stance(current: Stance, command: Command) -> Stance {
    match (current, command) {
        (Stance::Normal, Command::StanceA) => Stance::Offensive,
        (Stance::Normal, Command::StanceB) => Stance::Defensive,
        (Stance::Offensive, Command::StanceA) => Stance::Normal,
        (Stance::Offensive, Command::StanceB) => Stance::Defensive,
        (Stance::Defensive, Command::StanceA) => Stance::Normal,
        (Stance::Defensive, Command::StanceB) => Stance::Offensive,
        (stance, _) => stance,
    }
}

/// The stance command that moves `current` into `target`, if one exists.
pub fn stance_command_towards(current: Stance, target: Stance) -> Option<Command> {
    [Command::StanceA, Command::StanceB]
        .into_iter()
        .find(|cmd| current != target && next_stance(current, *cmd) == target)
}
