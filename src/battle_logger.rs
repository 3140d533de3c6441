use crate::model::{
    BattleResult, BattleState, CombatantDefinition, CommandPair, CommandPhaseResult, DamageInfo,
    ResultType, Side, TurnResult,
};
use serde_json::json;

/// Line-oriented replay log (`|turn|3`, `|move|p1: Fang|advance|weaponattack`, ...).
#[derive(Clone, Debug, Default)]
pub struct BattleLogger {
    formatid: String,
    log: Vec<String>,
}

impl BattleLogger {
    pub fn new() -> Self {
        Self {
            formatid: "duel1v1".to_string(),
            log: Vec::new(),
        }
    }

    pub fn new_with_format(formatid: impl Into<String>) -> Self {
        Self {
            formatid: formatid.into(),
            log: Vec::new(),
        }
    }

    pub fn log_start(&mut self, state: &BattleState, def1: &CombatantDefinition, def2: &CombatantDefinition) {
        self.log.push(format!(
            "|switch|{}|{}|{}/{}",
            side_ident(Side::Player1, &def1.name),
            def1.archetype,
            state.combatant1.current_hp,
            def1.max_hp()
        ));
        self.log.push(format!(
            "|switch|{}|{}|{}/{}",
            side_ident(Side::Player2, &def2.name),
            def2.archetype,
            state.combatant2.current_hp,
            def2.max_hp()
        ));
        self.log
            .push(format!("|distance|{:?}", state.current_distance).to_ascii_lowercase());
    }

    pub fn log_turn(&mut self, turn: u32) {
        self.log.push(format!("|turn|{turn}"));
    }

    pub fn log_commands(&mut self, source: &str, pair: CommandPair) {
        self.log
            .push(format!("|move|{source}|{}|{}", pair.first, pair.second));
    }

    pub fn log_damage(&mut self, target: &str, hp: u32, max_hp: u32) {
        self.log.push(format!("|-damage|{target}|{hp}/{max_hp}"));
    }

    pub fn log_evade(&mut self, target: &str) {
        self.log.push(format!("|-miss|{target}|evaded"));
    }

    pub fn log_reflect(&mut self, target: &str, damage: u32) {
        self.log.push(format!("|-reflect|{target}|{damage}"));
    }

    pub fn log_phase(&mut self, label: &str, phase: &CommandPhaseResult) {
        self.log.push(format!(
            "|phase|{label}|{:?}|{:?}|{:?}",
            phase.distance_after, phase.outcome1, phase.outcome2
        ).to_ascii_lowercase());
    }

    /// Commands and both phases of one resolved turn. `before` is the state the
    /// turn started from; HP is tracked forward phase by phase.
    pub fn log_turn_result(
        &mut self,
        turn: &TurnResult,
        before: &BattleState,
        def1: &CombatantDefinition,
        def2: &CombatantDefinition,
    ) {
        let p1 = side_ident(Side::Player1, &def1.name);
        let p2 = side_ident(Side::Player2, &def2.name);
        let mut hp1 = before.combatant1.current_hp;
        let mut hp2 = before.combatant2.current_hp;
        self.log_turn(turn.turn_number);
        self.log_commands(&p1, turn.commands1);
        self.log_commands(&p2, turn.commands2);
        for (label, phase) in [("first", &turn.first_phase), ("second", &turn.second_phase)] {
            self.log_phase(label, phase);
            self.log_damage_info(&p1, phase.damage1, &mut hp1, def1.max_hp());
            self.log_damage_info(&p2, phase.damage2, &mut hp2, def2.max_hp());
        }
    }

    fn log_damage_info(&mut self, target: &str, info: DamageInfo, hp: &mut u32, max_hp: u32) {
        if info.is_evaded {
            self.log_evade(target);
        }
        if info.damage == 0 {
            return;
        }
        *hp = hp.saturating_sub(info.damage);
        if info.is_reflected {
            self.log_reflect(target, info.damage);
        }
        self.log_damage(target, *hp, max_hp);
    }

    pub fn log_result(&mut self, result: &BattleResult, def1: &CombatantDefinition, def2: &CombatantDefinition) {
        match result.result_type {
            ResultType::Player1Win => self.log_win(&def1.name),
            ResultType::Player2Win => self.log_win(&def2.name),
            ResultType::Draw => self.log_tie(),
        }
    }

    pub fn log_win(&mut self, winner: &str) {
        self.log.push(format!("|win|{winner}"));
    }

    pub fn log_tie(&mut self) {
        self.log.push("|tie|".to_string());
    }

    pub fn log_lines(&self) -> &[String] {
        &self.log
    }

    pub fn to_json(&self) -> serde_json::Value {
        json!({
            "formatid": self.formatid,
            "log": self.log,
        })
    }
}

pub fn side_ident(side: Side, name: &str) -> String {
    format!("{side}: {name}")
}
