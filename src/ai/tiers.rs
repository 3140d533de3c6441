use super::modifiers::{base_weights, situational_weights, Situation};
use super::pattern::{PatternAnalysis, DEFAULT_LOOKBACK};
use super::predictor::predict;
use super::selector::{
    select_max, tie_break_rank, uniform_select, weighted_candidates, weighted_select,
};
use super::AiError;
use crate::model::{BattleState, CombatantDefinition, Command, CommandPair, Side, TurnResult};
use crate::sim::commands::{commands_for, valid_commands};
use rand::Rng;
use std::collections::BTreeMap;
use tracing::trace;

/// Chance that tier 4 plays a tier 3 turn instead, to stay unpredictable.
pub(crate) const ADAPTIVE_NOISE_CHANCE: f64 = 0.2;

pub(super) fn random_pair<R: Rng + ?Sized>(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    rng: &mut R,
) -> Result<CommandPair, AiError> {
    let legal = valid_commands(state, side, def);
    let first = uniform_select(&legal, rng)?;
    let second = uniform_select(&legal, rng)?;
    Ok(CommandPair::new(first, second))
}

/// Both slots are drawn against the current distance; no lookahead.
pub(super) fn weighted_pair<R: Rng + ?Sized>(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    rng: &mut R,
) -> Result<CommandPair, AiError> {
    let legal = valid_commands(state, side, def);
    let weights = base_weights(&def.archetype, state.current_distance);
    let candidates = weighted_candidates(&legal, &weights);
    let first = weighted_select(&candidates, rng)?;
    let second = weighted_select(&candidates, rng)?;
    Ok(CommandPair::new(first, second))
}

pub(super) fn situational_pair<R: Rng + ?Sized>(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    opponent_def: Option<&CombatantDefinition>,
    rng: &mut R,
) -> Result<CommandPair, AiError> {
    let own = state.combatant(side);
    let situation = Situation::from_state(state, side, def, opponent_def);

    let legal = commands_for(own, state.current_distance, def);
    let weights = situational_weights(&situation, state.current_distance, None);
    let first = weighted_select(&weighted_candidates(&legal, &weights), rng)?;

    let predicted = predict(state.current_distance, own.current_stance, first);
    let next_situation = situation.with_own_stance(predicted.stance);
    let next_legal = commands_for(own, predicted.distance, def);
    let next_weights = situational_weights(&next_situation, predicted.distance, None);
    let second = weighted_select(&weighted_candidates(&next_legal, &next_weights), rng)?;

    Ok(CommandPair::new(first, second))
}

pub(super) fn adaptive_pair<R: Rng + ?Sized>(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    opponent_def: &CombatantDefinition,
    history: &[TurnResult],
    rng: &mut R,
) -> Result<CommandPair, AiError> {
    if rng.gen::<f64>() < ADAPTIVE_NOISE_CHANCE {
        trace!(%side, "adaptive AI falls back to situational play");
        return situational_pair(state, side, def, Some(opponent_def), rng);
    }

    let analysis = PatternAnalysis::analyze(history, side.opponent(), DEFAULT_LOOKBACK);
    let frequent = analysis.most_frequent(state.current_distance);
    let observed = match frequent.as_slice() {
        [] => None,
        [only] => Some(*only),
        tied => Some(uniform_select(tied, rng)?),
    };

    let situation = Situation::from_state(state, side, def, Some(opponent_def));
    let space = pair_space(state, side, def, &situation, observed);
    let candidates: Vec<((Command, Command), f64)> = space.into_iter().collect();
    let (first, second) = weighted_select(&candidates, rng)?;
    Ok(CommandPair::new(first, second))
}

/// Every legal (first, second) pair scored as w(first) × w(second), with the
/// second slot evaluated at the state predicted from the first.
fn pair_space(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    situation: &Situation,
    observed: Option<Command>,
) -> BTreeMap<(Command, Command), f64> {
    let own = state.combatant(side);
    let weights = situational_weights(situation, state.current_distance, observed);
    let mut space = BTreeMap::new();
    for first in commands_for(own, state.current_distance, def) {
        let first_weight = weights[first.index()];
        if first_weight <= 0.0 {
            continue;
        }
        let predicted = predict(state.current_distance, own.current_stance, first);
        let next_weights = situational_weights(
            &situation.with_own_stance(predicted.stance),
            predicted.distance,
            observed,
        );
        for second in commands_for(own, predicted.distance, def) {
            space.insert((first, second), first_weight * next_weights[second.index()]);
        }
    }
    space
}

pub(super) fn optimal_pair(
    state: &BattleState,
    side: Side,
    def: &CombatantDefinition,
    opponent_def: &CombatantDefinition,
    history: &[TurnResult],
) -> Result<CommandPair, AiError> {
    let analysis = PatternAnalysis::analyze(history, side.opponent(), DEFAULT_LOOKBACK);
    let observed = analysis
        .most_frequent(state.current_distance)
        .into_iter()
        .min_by_key(|cmd| tie_break_rank(*cmd));

    let situation = Situation::from_state(state, side, def, Some(opponent_def));
    let weights = situational_weights(&situation, state.current_distance, observed);
    let legal = valid_commands(state, side, def);
    let best = select_max(&weighted_candidates(&legal, &weights))?;
    Ok(CommandPair::new(best, best))
}
