//! Rules engine and tiered AI for 1v1 turn-based creature duels.
//!
//! The pure entry points live in [`sim`] (legality, resolution, victory) and
//! [`ai`] (command selection). [`battle`] strings them together into a
//! complete AI-versus-AI battle.

pub mod ai;
pub mod battle;
pub mod battle_logger;
pub mod config;
pub mod model;
pub mod roster;
pub mod sim;

use crate::ai::{AiTier, BattleAI, TieredAI};
use crate::battle::{simulate_battle, simulate_battle_with, BattleOutcome, ScriptedAI};
use crate::config::BattleConfig;
use crate::model::{CombatantDefinition, ResultType};
use crate::roster::{builtin_roster, load_roster};
use anyhow::Context;
use std::path::PathBuf;

/// Commonly used exports for external consumers.
pub mod prelude {
    pub use crate::ai::{select_commands, AiError, AiTier, BattleAI, TieredAI};
    pub use crate::model::{
        BattleResult, BattleState, CombatantDefinition, CombatantState, Command, CommandPair,
        DamageInfo, Distance, Outcome, ResultType, Side, Stance, TurnResult,
    };
    pub use crate::sim::{
        check_after_turn, check_on_give_up, check_on_timeout, process_turn,
        resolve_command_interaction, valid_commands,
    };
}

#[derive(Debug, Clone)]
pub enum Controller {
    Ai(AiTier),
    Script(String),
}

#[derive(Debug, Clone)]
pub struct CliOptions {
    pub roster_path: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
    pub p1: String,
    pub p2: String,
    pub controller1: Controller,
    pub controller2: Controller,
    pub seed: u64,
    pub log_json: Option<PathBuf>,
    pub list: bool,
}

fn controller_ai(controller: &Controller, seed: u64) -> anyhow::Result<Box<dyn BattleAI>> {
    Ok(match controller {
        Controller::Ai(tier) => Box::new(TieredAI::new(*tier, seed)),
        Controller::Script(script) => Box::new(ScriptedAI::parse(script)?),
    })
}

fn find<'a>(roster: &'a [CombatantDefinition], id: &str) -> anyhow::Result<&'a CombatantDefinition> {
    roster
        .iter()
        .find(|def| def.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| anyhow::anyhow!("Unknown combatant '{id}' (use --list to see the roster)"))
}

pub fn run(opts: CliOptions) -> anyhow::Result<()> {
    let roster = match &opts.roster_path {
        Some(path) => load_roster(path)?,
        None => builtin_roster().to_vec(),
    };
    if opts.list {
        for def in &roster {
            println!(
                "{:<12} {:<14} {:<10} hp={} str={} spc={} spd={} tgh={}",
                def.id,
                def.name,
                def.archetype,
                def.stats.hp,
                def.stats.strength,
                def.stats.special,
                def.stats.speed,
                def.stats.toughness
            );
        }
        return Ok(());
    }
    let config = match &opts.config_path {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    let def1 = find(&roster, &opts.p1)?;
    let def2 = find(&roster, &opts.p2)?;

    let outcome: BattleOutcome = match (&opts.controller1, &opts.controller2) {
        (Controller::Ai(tier1), Controller::Ai(tier2)) => {
            simulate_battle(def1, def2, *tier1, *tier2, &config, opts.seed)?
        }
        (c1, c2) => {
            let mut ai1 = controller_ai(c1, opts.seed ^ 1)?;
            let mut ai2 = controller_ai(c2, opts.seed ^ 2)?;
            simulate_battle_with(def1, def2, ai1.as_mut(), ai2.as_mut(), &config, opts.seed)?
        }
    };

    for line in outcome.log.log_lines() {
        println!("{line}");
    }
    let verdict = match outcome.result.result_type {
        ResultType::Player1Win => format!("{} wins", def1.name),
        ResultType::Player2Win => format!("{} wins", def2.name),
        ResultType::Draw => "Draw".to_string(),
    };
    println!("{verdict}: {}", outcome.result.reason);

    if let Some(path) = &opts.log_json {
        let mut value = outcome.log.to_json();
        value["result"] = serde_json::to_value(&outcome.result)?;
        let out = serde_json::to_string_pretty(&value)?;
        std::fs::write(path, out)
            .with_context(|| format!("Failed to write battle log to {}", path.display()))?;
        println!("Wrote battle log to {}", path.display());
    }
    Ok(())
}
