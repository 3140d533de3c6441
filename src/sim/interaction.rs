use crate::model::{Command, Distance, Outcome};

/// Outcome of `attacker` against `defender` at `distance`, from the attacker's side.
pub fn attack_outcome(distance: Distance, attacker: Command, defender: Command) -> Outcome {
    match attacker {
        Command::WeaponAttack => {
            if distance == Distance::Near {
                Outcome::Hit
            } else {
                Outcome::Miss
            }
        }
        Command::SpecialAttack => match defender {
            Command::Reflect => Outcome::Countered,
            Command::WeaponAttack if distance == Distance::Near => Outcome::Cancelled,
            _ => Outcome::Hit,
        },
        Command::Advance
        | Command::Retreat
        | Command::Reflect
        | Command::StanceA
        | Command::StanceB => Outcome::NoEffect,
    }
}

/// Per-side outcomes of one exchange. The first element belongs to the side playing `a`.
pub fn resolve_command_interaction(distance: Distance, a: Command, b: Command) -> (Outcome, Outcome) {
    (attack_outcome(distance, a, b), attack_outcome(distance, b, a))
}

/// Mutual weapon clashes at Near cannot be evaded.
pub fn is_guaranteed_hit(distance: Distance, a: Command, b: Command) -> bool {
    distance == Distance::Near && a == Command::WeaponAttack && b == Command::WeaponAttack
}
