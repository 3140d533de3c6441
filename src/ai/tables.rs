//! Static weight tables. Every vector is indexed by [`Command::index`].

use crate::model::{Command, Distance};
use phf::phf_map;

pub type CommandWeights = [f64; 7];

pub const NEUTRAL_WEIGHTS: CommandWeights = [1.0; 7];

//                                         Adv  Ret  Weap Spec Refl StA  StB
static SPECIES_TENDENCIES: phf::Map<&'static str, CommandWeights> = phf_map! {
    "beast" =>     [1.4, 0.7, 1.6, 0.8, 0.6, 1.0, 0.6],
    "knight" =>    [1.2, 0.8, 1.5, 0.9, 1.0, 0.9, 0.9],
    "mage" =>      [0.7, 1.3, 0.6, 1.8, 1.1, 0.9, 1.0],
    "guardian" =>  [0.9, 0.9, 1.0, 0.8, 1.6, 0.7, 1.4],
    "assassin" =>  [1.5, 1.0, 1.4, 1.0, 0.6, 1.2, 0.5],
    "berserker" => [1.6, 0.4, 1.8, 0.7, 0.3, 1.5, 0.3],
    "trickster" => [1.0, 1.2, 0.9, 1.2, 1.3, 1.1, 1.1],
    "sentinel" =>  [0.8, 1.0, 1.1, 1.3, 1.3, 0.8, 1.2],
};

/// Rows follow [`Distance::index`]. Mid stays below 2.0 everywhere.
const DISTANCE_WEIGHTS: [CommandWeights; 3] = [
    // Near: weapons connect, closing in further is pointless
    [0.2, 1.0, 3.0, 1.0, 1.2, 0.8, 0.8],
    // Mid
    [1.3, 1.0, 0.5, 1.5, 1.1, 1.0, 1.0],
    // Far: only specials reach
    [2.5, 0.2, 0.1, 2.5, 1.0, 0.9, 0.9],
];

pub fn species_tendency(archetype: &str) -> CommandWeights {
    SPECIES_TENDENCIES
        .get(archetype.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(NEUTRAL_WEIGHTS)
}

pub fn is_known_archetype(archetype: &str) -> bool {
    SPECIES_TENDENCIES.contains_key(archetype.to_ascii_lowercase().as_str())
}

pub fn distance_weights(distance: Distance) -> CommandWeights {
    DISTANCE_WEIGHTS[distance.index()]
}

/// Overrides applied when the opponent keeps repeating `observed` at `distance`.
/// Commands that are not listed stay at 1.0.
pub fn counter_overrides(distance: Distance, observed: Command) -> &'static [(Command, f64)] {
    use Command::*;
    match (distance, observed) {
        (Distance::Near, WeaponAttack) => &[(Retreat, 2.0), (Reflect, 0.5)],
        (Distance::Near, SpecialAttack) => &[(Reflect, 2.0), (WeaponAttack, 2.0)],
        (Distance::Near, Reflect) => &[(WeaponAttack, 2.0), (SpecialAttack, 0.3)],
        (Distance::Near, Retreat) => &[(Advance, 1.5), (SpecialAttack, 1.5)],
        (Distance::Near, Advance) => &[(Retreat, 1.5)],
        (Distance::Mid, WeaponAttack) => &[(Retreat, 1.5)],
        (Distance::Mid, SpecialAttack) => &[(Reflect, 2.0), (Advance, 1.3)],
        (Distance::Mid, Advance) => &[(Retreat, 1.5), (SpecialAttack, 1.2)],
        (Distance::Mid, Reflect) => &[(Advance, 1.5), (SpecialAttack, 0.3)],
        (Distance::Mid, Retreat) => &[(Advance, 1.5), (SpecialAttack, 1.3)],
        (Distance::Far, SpecialAttack) => &[(Reflect, 2.0)],
        (Distance::Far, Advance) => &[(Retreat, 1.5), (SpecialAttack, 1.3)],
        (Distance::Far, Reflect) => &[(Advance, 2.0), (SpecialAttack, 0.3)],
        _ => &[],
    }
}

pub fn counter_weights(distance: Distance, observed: Command) -> CommandWeights {
    let mut weights = NEUTRAL_WEIGHTS;
    for (command, factor) in counter_overrides(distance, observed) {
        weights[command.index()] = *factor;
    }
    weights
}

pub fn multiply(lhs: CommandWeights, rhs: CommandWeights) -> CommandWeights {
    let mut out = lhs;
    for (value, factor) in out.iter_mut().zip(rhs) {
        *value *= factor;
    }
    out
}
