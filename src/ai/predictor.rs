use crate::model::{Command, Distance, Stance};
use crate::sim::transitions::{move_closer, move_farther, next_stance};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PredictedState {
    pub distance: Distance,
    pub stance: Stance,
}

/// Where the acting side ends up after `command`, ignoring whatever the
/// opponent does in the same phase.
pub fn predict(distance: Distance, stance: Stance, command: Command) -> PredictedState {
    let distance = match command {
        Command::Advance => move_closer(distance),
        Command::Retreat => move_farther(distance),
        _ => distance,
    };
    PredictedState {
        distance,
        stance: next_stance(stance, command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movement_shifts_a_single_step() {
        assert_eq!(predict(Distance::Far, Stance::Normal, Command::Advance).distance, Distance::Mid);
        assert_eq!(predict(Distance::Near, Stance::Normal, Command::Retreat).distance, Distance::Mid);
        assert_eq!(predict(Distance::Near, Stance::Normal, Command::Advance).distance, Distance::Near);
    }

    #[test]
    fn stance_commands_follow_the_table() {
        let predicted = predict(Distance::Mid, Stance::Offensive, Command::StanceB);
        assert_eq!(
            predicted,
            PredictedState {
                distance: Distance::Mid,
                stance: Stance::Defensive
            }
        );
        let unchanged = predict(Distance::Mid, Stance::Offensive, Command::SpecialAttack);
        assert_eq!(unchanged.stance, Stance::Offensive);
        assert_eq!(unchanged.distance, Distance::Mid);
    }
}
