//! Five-tier command selection.
//!
//! Tier 1 draws uniformly, tier 2 weighs archetype and distance, tier 3 adds
//! the situational modifier stack and a one-step lookahead, tier 4 mines the
//! opponent's recent habits and samples whole command pairs, tier 5 takes the
//! deterministic optimum of the same stack.

pub mod modifiers;
pub mod pattern;
pub mod predictor;
pub mod selector;
pub mod tables;
mod tiers;

use crate::model::{BattleState, CombatantDefinition, CommandPair, Side, TurnResult};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;
use thiserror::Error;
use tracing::trace;

pub use selector::SelectionError;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum AiTier {
    Random,
    Weighted,
    Situational,
    Adaptive,
    Optimal,
}

impl AiTier {
    pub const ALL: [AiTier; 5] = [
        AiTier::Random,
        AiTier::Weighted,
        AiTier::Situational,
        AiTier::Adaptive,
        AiTier::Optimal,
    ];

    pub fn level(self) -> u8 {
        match self {
            AiTier::Random => 1,
            AiTier::Weighted => 2,
            AiTier::Situational => 3,
            AiTier::Adaptive => 4,
            AiTier::Optimal => 5,
        }
    }
}

impl TryFrom<u8> for AiTier {
    type Error = AiError;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(AiTier::Random),
            2 => Ok(AiTier::Weighted),
            3 => Ok(AiTier::Situational),
            4 => Ok(AiTier::Adaptive),
            5 => Ok(AiTier::Optimal),
            other => Err(AiError::InvalidTier(other)),
        }
    }
}

impl fmt::Display for AiTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier {}", self.level())
    }
}

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AiError {
    #[error("{0} requires the opponent's combatant definition")]
    MissingOpponent(AiTier),

    #[error("{0} requires the turn history")]
    MissingHistory(AiTier),

    #[error("AI tier must be between 1 and 5, got {0}")]
    InvalidTier(u8),

    #[error("command selection failed: {0}")]
    Selection(#[from] SelectionError),
}

/// Pick both commands for `side` this turn.
pub fn select_commands<R: Rng + ?Sized>(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    tier: AiTier,
    rng: &mut R,
    opponent_def: Option<&CombatantDefinition>,
    history: Option<&[TurnResult]>,
) -> Result<CommandPair, AiError> {
    let pair = match tier {
        AiTier::Random => tiers::random_pair(state, side, def, rng)?,
        AiTier::Weighted => tiers::weighted_pair(state, side, def, rng)?,
        AiTier::Situational => tiers::situational_pair(state, side, def, opponent_def, rng)?,
        AiTier::Adaptive => {
            let opponent_def = opponent_def.ok_or(AiError::MissingOpponent(tier))?;
            let history = history.ok_or(AiError::MissingHistory(tier))?;
            tiers::adaptive_pair(state, side, def, opponent_def, history, rng)?
        }
        AiTier::Optimal => {
            let opponent_def = opponent_def.ok_or(AiError::MissingOpponent(tier))?;
            let history = history.ok_or(AiError::MissingHistory(tier))?;
            tiers::optimal_pair(state, side, def, opponent_def, history)?
        }
    };
    trace!(%side, %tier, first = %pair.first, second = %pair.second, "commands selected");
    Ok(pair)
}

pub trait BattleAI {
    fn choose_commands(
        &mut self,
        state: &BattleState,
        side: Side,
        def: &CombatantDefinition,
        opponent_def: &CombatantDefinition,
        history: &[TurnResult],
    ) -> Result<CommandPair, AiError>;
}

/// A fixed-tier opponent that owns its random stream.
pub struct TieredAI {
    tier: AiTier,
    rng: SmallRng,
}

impl TieredAI {
    pub fn new(tier: AiTier, seed: u64) -> Self {
        Self {
            tier,
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl BattleAI for TieredAI {
    fn choose_commands(
        &mut self,
        state: &BattleState,
        side: Side,
        def: &CombatantDefinition,
        opponent_def: &CombatantDefinition,
        history: &[TurnResult],
    ) -> Result<CommandPair, AiError> {
        select_commands(
            state,
            side,
            def,
            self.tier,
            &mut self.rng,
            Some(opponent_def),
            Some(history),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Distance;
    use crate::roster::find_definition;
    use rand::rngs::mock::StepRng;

    #[test]
    fn tier_levels_round_trip() {
        for tier in AiTier::ALL {
            assert_eq!(AiTier::try_from(tier.level()), Ok(tier));
        }
        assert_eq!(AiTier::try_from(0), Err(AiError::InvalidTier(0)));
        assert_eq!(AiTier::try_from(6), Err(AiError::InvalidTier(6)));
    }

    #[test]
    fn upper_tiers_reject_missing_inputs() {
        let def = find_definition("warden").expect("bundled");
        let state = BattleState::new(def, def, Distance::Mid, 300);
        let mut rng = StepRng::new(0, 0);
        for tier in [AiTier::Adaptive, AiTier::Optimal] {
            let no_opponent = select_commands(&state, Side::Player1, def, tier, &mut rng, None, Some(&[]));
            assert_eq!(no_opponent, Err(AiError::MissingOpponent(tier)));
            let no_history = select_commands(&state, Side::Player1, def, tier, &mut rng, Some(def), None);
            assert_eq!(no_history, Err(AiError::MissingHistory(tier)));
        }
    }

    #[test]
    fn lower_tiers_work_without_opponent_or_history() {
        let def = find_definition("warden").expect("bundled");
        let state = BattleState::new(def, def, Distance::Mid, 300);
        let mut rng = StepRng::new(1 << 60, 1 << 58);
        for tier in [AiTier::Random, AiTier::Weighted, AiTier::Situational] {
            assert!(select_commands(&state, Side::Player2, def, tier, &mut rng, None, None).is_ok());
        }
    }
}
