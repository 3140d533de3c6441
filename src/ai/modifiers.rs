//! Situational multipliers shared by the upper AI tiers.

use crate::ai::tables::{
    counter_weights, distance_weights, multiply, species_tendency, CommandWeights, NEUTRAL_WEIGHTS,
};
use crate::model::{BattleState, CombatantDefinition, Command, Distance, Side, Stance};
use crate::sim::transitions::stance_command_towards;

pub const LOW_HP_RATIO: f64 = 0.3;

const OWN_LOW_HP_BOOST: f64 = 1.6;
const OWN_LOW_HP_ADVANCE: f64 = 0.5;
const OPPONENT_LOW_HP_BOOST: f64 = 1.5;
const OPPONENT_LOW_HP_ADVANCE: f64 = 1.3;
const STANCE_RESPONSE_BOOST: f64 = 1.5;
const STANCE_RESPONSE_ATTACK: f64 = 1.3;
const REFLECT_READY_SPECIAL: f64 = 0.5;
const REFLECT_READY_WEAPON: f64 = 1.3;
const REFLECT_SPENT_SPECIAL: f64 = 1.6;

/// Everything the modifier stack reads about the acting side's situation.
#[derive(Clone, Debug, PartialEq)]
pub struct Situation {
    pub archetype: String,
    pub own_hp_ratio: f64,
    pub opponent_hp_ratio: f64,
    pub own_stance: Stance,
    pub opponent_stance: Stance,
    /// `None` when the opponent's definition is unknown.
    pub opponent_reflects_left: Option<u32>,
}

impl Situation {
    pub fn from_state(
        state: &BattleState,
        side: Side,
        def: &CombatantDefinition,
        opponent_def: Option<&CombatantDefinition>,
    ) -> Self {
        let own = state.combatant(side);
        let opponent = state.combatant(side.opponent());
        let own_hp_ratio = own.hp_ratio(def);
        Self {
            archetype: def.archetype.clone(),
            own_hp_ratio,
            // without the opponent's definition its max HP is unknown; reuse ours as a neutral guess
            opponent_hp_ratio: opponent_def
                .map(|od| opponent.hp_ratio(od))
                .unwrap_or(own_hp_ratio),
            own_stance: own.current_stance,
            opponent_stance: opponent.current_stance,
            opponent_reflects_left: opponent_def.map(|od| opponent.remaining_reflects(od)),
        }
    }

    /// The same situation after the acting side changed its own stance.
    pub fn with_own_stance(&self, stance: Stance) -> Self {
        Self {
            own_stance: stance,
            ..self.clone()
        }
    }
}

pub fn hp_modifier(own_hp_ratio: f64, opponent_hp_ratio: f64) -> CommandWeights {
    let mut weights = NEUTRAL_WEIGHTS;
    if own_hp_ratio < LOW_HP_RATIO {
        weights[Command::Retreat.index()] *= OWN_LOW_HP_BOOST;
        weights[Command::Reflect.index()] *= OWN_LOW_HP_BOOST;
        weights[Command::Advance.index()] *= OWN_LOW_HP_ADVANCE;
    }
    if opponent_hp_ratio < LOW_HP_RATIO {
        weights[Command::WeaponAttack.index()] *= OPPONENT_LOW_HP_BOOST;
        weights[Command::SpecialAttack.index()] *= OPPONENT_LOW_HP_BOOST;
        weights[Command::Advance.index()] *= OPPONENT_LOW_HP_ADVANCE;
    }
    weights
}

pub fn stance_response_modifier(own_stance: Stance, opponent_stance: Stance) -> CommandWeights {
    let mut weights = NEUTRAL_WEIGHTS;
    match opponent_stance {
        Stance::Offensive => {
            weights[Command::Reflect.index()] *= STANCE_RESPONSE_BOOST;
            if let Some(cmd) = stance_command_towards(own_stance, Stance::Defensive) {
                weights[cmd.index()] *= STANCE_RESPONSE_BOOST;
            }
        }
        Stance::Defensive => {
            weights[Command::WeaponAttack.index()] *= STANCE_RESPONSE_ATTACK;
            weights[Command::SpecialAttack.index()] *= STANCE_RESPONSE_ATTACK;
            if let Some(cmd) = stance_command_towards(own_stance, Stance::Offensive) {
                weights[cmd.index()] *= STANCE_RESPONSE_BOOST;
            }
        }
        Stance::Normal => {}
    }
    weights
}

pub fn reflect_depletion_modifier(opponent_reflects_left: Option<u32>) -> CommandWeights {
    let mut weights = NEUTRAL_WEIGHTS;
    match opponent_reflects_left {
        Some(0) => {
            weights[Command::SpecialAttack.index()] *= REFLECT_SPENT_SPECIAL;
        }
        Some(_) => {
            weights[Command::SpecialAttack.index()] *= REFLECT_READY_SPECIAL;
            weights[Command::WeaponAttack.index()] *= REFLECT_READY_WEAPON;
        }
        None => {}
    }
    weights
}

/// Tendency × distance weights only.
pub fn base_weights(archetype: &str, distance: Distance) -> CommandWeights {
    multiply(species_tendency(archetype), distance_weights(distance))
}

/// The full multiplicative stack: tendency, distance, HP, stance response,
/// reflect depletion and, when an opponent habit is known, its counter.
pub fn situational_weights(
    situation: &Situation,
    distance: Distance,
    observed: Option<Command>,
) -> CommandWeights {
    let mut weights = base_weights(&situation.archetype, distance);
    weights = multiply(weights, hp_modifier(situation.own_hp_ratio, situation.opponent_hp_ratio));
    weights = multiply(
        weights,
        stance_response_modifier(situation.own_stance, situation.opponent_stance),
    );
    weights = multiply(weights, reflect_depletion_modifier(situation.opponent_reflects_left));
    if let Some(observed) = observed {
        weights = multiply(weights, counter_weights(distance, observed));
    }
    weights
}
