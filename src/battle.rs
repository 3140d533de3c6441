//! AI-versus-AI battle driver: selection, resolution and victory checks in a loop.

use crate::ai::{AiError, AiTier, BattleAI, TieredAI};
use crate::battle_logger::BattleLogger;
use crate::config::BattleConfig;
use crate::model::{
    BattleResult, BattleState, CombatantDefinition, Command, CommandPair, Side, TurnResult,
};
use crate::sim::{check_after_turn, check_on_timeout, process_turn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::info;

#[derive(Clone, Debug)]
pub struct BattleOutcome {
    pub result: BattleResult,
    pub log: BattleLogger,
}

/// Plays a fixed list of command pairs, then the timeout default once the script runs out.
#[derive(Clone, Debug)]
pub struct ScriptedAI {
    script: Vec<CommandPair>,
    cursor: usize,
}

impl ScriptedAI {
    pub fn new(script: Vec<CommandPair>) -> Self {
        Self { script, cursor: 0 }
    }

    /// Parses `"advance,weaponattack;reflect,stancea"`: turns split on `;`, slots on `,`.
    pub fn parse(script: &str) -> anyhow::Result<Self> {
        let mut pairs = Vec::new();
        for turn in script.split(';').map(str::trim).filter(|t| !t.is_empty()) {
            let commands: Vec<&str> = turn.split(',').map(str::trim).collect();
            let [first, second] = commands.as_slice() else {
                anyhow::bail!("Script turn '{turn}' must name exactly two commands");
            };
            let first = Command::parse(first)
                .ok_or_else(|| anyhow::anyhow!("Unknown command '{first}' in script"))?;
            let second = Command::parse(second)
                .ok_or_else(|| anyhow::anyhow!("Unknown command '{second}' in script"))?;
            pairs.push(CommandPair::new(first, second));
        }
        Ok(Self::new(pairs))
    }
}

impl BattleAI for ScriptedAI {
    fn choose_commands(
        &mut self,
        _state: &BattleState,
        _side: Side,
        _def: &CombatantDefinition,
        _opponent_def: &CombatantDefinition,
        _history: &[TurnResult],
    ) -> Result<CommandPair, AiError> {
        let pair = self
            .script
            .get(self.cursor)
            .copied()
            .unwrap_or_else(CommandPair::timeout_default);
        self.cursor += 1;
        Ok(pair)
    }
}

pub fn simulate_battle(
    def1: &CombatantDefinition,
    def2: &CombatantDefinition,
    tier1: AiTier,
    tier2: AiTier,
    config: &BattleConfig,
    seed: u64,
) -> Result<BattleOutcome, AiError> {
    let mut ai1 = TieredAI::new(tier1, mix_seed(seed, 1, 0));
    let mut ai2 = TieredAI::new(tier2, mix_seed(seed, 2, 0));
    simulate_battle_with(def1, def2, &mut ai1, &mut ai2, config, seed)
}

/// Runs until a knock-out, the turn cap or the battle clock ends the battle.
pub fn simulate_battle_with(
    def1: &CombatantDefinition,
    def2: &CombatantDefinition,
    ai1: &mut dyn BattleAI,
    ai2: &mut dyn BattleAI,
    config: &BattleConfig,
    seed: u64,
) -> Result<BattleOutcome, AiError> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut state = BattleState::new(def1, def2, config.initial_distance, config.time_limit);
    let mut history: Vec<TurnResult> = Vec::new();
    let mut log = BattleLogger::new();
    log.log_start(&state, def1, def2);

    let result = loop {
        if state.current_turn > config.max_turns || state.remaining_time == 0 {
            break check_on_timeout(&state, &history);
        }
        let commands1 = ai1.choose_commands(&state, Side::Player1, def1, def2, &history)?;
        let commands2 = ai2.choose_commands(&state, Side::Player2, def2, def1, &history)?;
        let (mut next, turn) = process_turn(&state, def1, def2, commands1, commands2, &mut rng);
        next.remaining_time = next.remaining_time.saturating_sub(config.seconds_per_turn);
        log.log_turn_result(&turn, &state, def1, def2);
        history.push(turn);
        state = next;
        if let Some(result) = check_after_turn(&state, &history) {
            break result;
        }
    };

    log.log_result(&result, def1, def2);
    info!(
        p1 = %def1.id,
        p2 = %def2.id,
        result = ?result.result_type,
        turns = result.turn_history.len(),
        reason = %result.reason,
        "battle complete"
    );
    Ok(BattleOutcome { result, log })
}

fn mix_seed(base: u64, a: u64, b: u64) -> u64 {
    let mut x = base ^ a.wrapping_mul(0x9E3779B97F4A7C15);
    x ^= b.wrapping_mul(0xC2B2AE3D27D4EB4F);
    x ^= x >> 33;
    x = x.wrapping_mul(0xff51afd7ed558ccd);
    x ^= x >> 33;
    x = x.wrapping_mul(0xc4ceb9fe1a85ec53);
    x ^ (x >> 33)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ResultType;
    use crate::roster::find_definition;

    #[test]
    fn script_parsing() {
        let ai = ScriptedAI::parse("advance, weaponattack; reflect,stancea;").expect("valid script");
        assert_eq!(ai.script.len(), 2);
        assert_eq!(ai.script[1], CommandPair::new(Command::Reflect, Command::StanceA));
        assert!(ScriptedAI::parse("advance").is_err());
        assert!(ScriptedAI::parse("advance,jump").is_err());
    }

    #[test]
    fn exhausted_script_submits_timeout_default() {
        let def = find_definition("fang").expect("bundled");
        let state = BattleState::new(def, def, crate::model::Distance::Far, 300);
        let mut ai = ScriptedAI::new(vec![CommandPair::new(Command::Reflect, Command::Reflect)]);
        let first = ai.choose_commands(&state, Side::Player1, def, def, &[]).expect("scripted");
        let second = ai.choose_commands(&state, Side::Player1, def, def, &[]).expect("scripted");
        assert_eq!(first, CommandPair::new(Command::Reflect, Command::Reflect));
        assert_eq!(second, CommandPair::timeout_default());
    }

    #[test]
    fn idle_scripts_end_on_the_turn_cap() {
        let def = find_definition("bulwark").expect("bundled");
        let config = BattleConfig {
            max_turns: 4,
            ..BattleConfig::default()
        };
        let idle = vec![CommandPair::new(Command::StanceA, Command::StanceA); 10];
        let mut ai1 = ScriptedAI::new(idle.clone());
        let mut ai2 = ScriptedAI::new(idle);
        let outcome = simulate_battle_with(def, def, &mut ai1, &mut ai2, &config, 3).expect("battle");
        assert_eq!(outcome.result.result_type, ResultType::Draw);
        assert_eq!(outcome.result.turn_history.len(), 4);
        assert_eq!(outcome.result.final_state.remaining_time, 0);
        assert_eq!(outcome.log.log_lines().last().map(String::as_str), Some("|tie|"));
    }

    #[test]
    fn same_seed_replays_identically() {
        let fang = find_definition("fang").expect("bundled");
        let witch = find_definition("emberwitch").expect("bundled");
        let config = BattleConfig::default();
        let a = simulate_battle(fang, witch, AiTier::Adaptive, AiTier::Situational, &config, 77).expect("battle");
        let b = simulate_battle(fang, witch, AiTier::Adaptive, AiTier::Situational, &config, 77).expect("battle");
        assert_eq!(a.result, b.result);
        assert_eq!(a.log.log_lines(), b.log.log_lines());
    }
}
