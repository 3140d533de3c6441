use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Command {
    Advance,
    Retreat,
    WeaponAttack,
    SpecialAttack,
    Reflect,
    StanceA,
    StanceB,
}

impl Command {
    /// Canonical order. Weight vectors and legal command lists follow it.
    pub const ALL: [Command; 7] = [
        Command::Advance,
        Command::Retreat,
        Command::WeaponAttack,
        Command::SpecialAttack,
        Command::Reflect,
        Command::StanceA,
        Command::StanceB,
    ];

    pub fn index(self) -> usize {
        match self {
            Command::Advance => 0,
            Command::Retreat => 1,
            Command::WeaponAttack => 2,
            Command::SpecialAttack => 3,
            Command::Reflect => 4,
            Command::StanceA => 5,
            Command::StanceB => 6,
        }
    }

    pub fn parse(name: &str) -> Option<Command> {
        let normalized: String = name
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "advance" => Some(Command::Advance),
            "retreat" => Some(Command::Retreat),
            "weaponattack" | "weapon" => Some(Command::WeaponAttack),
            "specialattack" | "special" => Some(Command::SpecialAttack),
            "reflect" => Some(Command::Reflect),
            "stancea" => Some(Command::StanceA),
            "stanceb" => Some(Command::StanceB),
            _ => None,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Command::Advance => "advance",
            Command::Retreat => "retreat",
            Command::WeaponAttack => "weaponattack",
            Command::SpecialAttack => "specialattack",
            Command::Reflect => "reflect",
            Command::StanceA => "stancea",
            Command::StanceB => "stanceb",
        };
        f.write_str(label)
    }
}

/// The two commands one combatant submits for a turn.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CommandPair {
    pub first: Command,
    pub second: Command,
}

impl CommandPair {
    pub fn new(first: Command, second: Command) -> Self {
        Self { first, second }
    }

    /// Pair submitted on behalf of a player who let the selection clock run out.
    pub fn timeout_default() -> Self {
        Self::new(Command::Advance, Command::Advance)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Distance {
    Near,
    Mid,
    Far,
}

impl Distance {
    pub const ALL: [Distance; 3] = [Distance::Near, Distance::Mid, Distance::Far];

    pub fn index(self) -> usize {
        match self {
            Distance::Near => 0,
            Distance::Mid => 1,
            Distance::Far => 2,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stance {
    #[default]
    Normal,
    Offensive,
    Defensive,
}

impl Stance {
    pub fn attack_multiplier(self) -> f64 {
        match self {
            Stance::Normal => 1.0,
            Stance::Offensive => 1.3,
            Stance::Defensive => 0.7,
        }
    }

    pub fn defense_multiplier(self) -> f64 {
        match self {
            Stance::Normal => 1.0,
            Stance::Offensive => 0.7,
            Stance::Defensive => 1.3,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player1,
    Player2,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player1 => Side::Player2,
            Side::Player2 => Side::Player1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Player1 => f.write_str("p1"),
            Side::Player2 => f.write_str("p2"),
        }
    }
}

fn default_special_attack_count() -> u32 {
    3
}

fn default_weapon_multiplier() -> f64 {
    1.0
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BaseStats {
    pub hp: u32,
    pub strength: u32,
    pub special: u32,
    pub speed: u32,
    pub toughness: u32,
    #[serde(default = "default_special_attack_count")]
    pub special_attack_count: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reflector {
    pub max_reflect_count: u32,
    pub reflect_rate: f64,
}

/// Static description of a combatant. Never mutated during a battle.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantDefinition {
    pub id: String,
    pub name: String,
    pub archetype: String,
    pub stats: BaseStats,
    #[serde(default = "default_weapon_multiplier")]
    pub weapon_multiplier: f64,
    pub reflector: Reflector,
}

impl CombatantDefinition {
    pub fn max_hp(&self) -> u32 {
        self.stats.hp
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatantState {
    pub definition_id: String,
    pub current_hp: u32,
    pub current_stance: Stance,
    pub remaining_special_count: u32,
    pub used_reflect_count: u32,
}

impl CombatantState {
    pub fn new(def: &CombatantDefinition) -> Self {
        Self {
            definition_id: def.id.clone(),
            current_hp: def.max_hp(),
            current_stance: Stance::Normal,
            remaining_special_count: def.stats.special_attack_count,
            used_reflect_count: 0,
        }
    }

    pub fn remaining_reflects(&self, def: &CombatantDefinition) -> u32 {
        def.reflector
            .max_reflect_count
            .saturating_sub(self.used_reflect_count)
    }

    pub fn hp_ratio(&self, def: &CombatantDefinition) -> f64 {
        if def.max_hp() == 0 {
            return 0.0;
        }
        self.current_hp as f64 / def.max_hp() as f64
    }

    pub fn is_down(&self) -> bool {
        self.current_hp == 0
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleState {
    pub combatant1: CombatantState,
    pub combatant2: CombatantState,
    pub current_distance: Distance,
    pub current_turn: u32,
    /// Seconds left on the battle clock.
    pub remaining_time: u32,
    pub is_finished: bool,
}

impl BattleState {
    pub fn new(
        def1: &CombatantDefinition,
        def2: &CombatantDefinition,
        initial_distance: Distance,
        time_limit: u32,
    ) -> Self {
        Self {
            combatant1: CombatantState::new(def1),
            combatant2: CombatantState::new(def2),
            current_distance: initial_distance,
            current_turn: 1,
            remaining_time: time_limit,
            is_finished: false,
        }
    }

    pub fn combatant(&self, side: Side) -> &CombatantState {
        match side {
            Side::Player1 => &self.combatant1,
            Side::Player2 => &self.combatant2,
        }
    }

    pub fn combatant_mut(&mut self, side: Side) -> &mut CombatantState {
        match side {
            Side::Player1 => &mut self.combatant1,
            Side::Player2 => &mut self.combatant2,
        }
    }
}

/// Damage one side received, either for a single phase or a whole turn.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageInfo {
    pub damage: u32,
    pub is_evaded: bool,
    /// The damage bounced back from this side's own countered special attack.
    pub is_reflected: bool,
}

impl DamageInfo {
    pub fn merge(self, other: DamageInfo) -> DamageInfo {
        DamageInfo {
            damage: self.damage.saturating_add(other.damage),
            is_evaded: self.is_evaded || other.is_evaded,
            is_reflected: self.is_reflected || other.is_reflected,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Hit,
    Miss,
    Cancelled,
    Countered,
    NoEffect,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandPhaseResult {
    pub command1: Command,
    pub command2: Command,
    pub distance_after: Distance,
    pub outcome1: Outcome,
    pub outcome2: Outcome,
    pub damage1: DamageInfo,
    pub damage2: DamageInfo,
    pub stance1_after: Stance,
    pub stance2_after: Stance,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnResult {
    pub turn_number: u32,
    pub commands1: CommandPair,
    pub commands2: CommandPair,
    pub distance_before: Distance,
    pub distance_after: Distance,
    pub damage1: DamageInfo,
    pub damage2: DamageInfo,
    pub stance1_after: Stance,
    pub stance2_after: Stance,
    pub first_phase: CommandPhaseResult,
    pub second_phase: CommandPhaseResult,
}

impl TurnResult {
    pub fn commands(&self, side: Side) -> CommandPair {
        match side {
            Side::Player1 => self.commands1,
            Side::Player2 => self.commands2,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultType {
    Player1Win,
    Player2Win,
    Draw,
}

impl ResultType {
    pub fn winner(side: Side) -> ResultType {
        match side {
            Side::Player1 => ResultType::Player1Win,
            Side::Player2 => ResultType::Player2Win,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleResult {
    pub result_type: ResultType,
    pub final_state: BattleState,
    pub turn_history: Vec<TurnResult>,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_index_matches_canonical_order() {
        for (idx, cmd) in Command::ALL.iter().enumerate() {
            assert_eq!(cmd.index(), idx);
        }
    }

    #[test]
    fn command_parse_accepts_display_form_and_loose_spelling() {
        for cmd in Command::ALL {
            assert_eq!(Command::parse(&cmd.to_string()), Some(cmd));
        }
        assert_eq!(Command::parse("Weapon-Attack"), Some(Command::WeaponAttack));
        assert_eq!(Command::parse("dodge"), None);
    }

    #[test]
    fn stance_multipliers() {
        assert_eq!(Stance::Normal.attack_multiplier(), 1.0);
        assert_eq!(Stance::Offensive.attack_multiplier(), 1.3);
        assert_eq!(Stance::Offensive.defense_multiplier(), 0.7);
        assert_eq!(Stance::Defensive.attack_multiplier(), 0.7);
        assert_eq!(Stance::Defensive.defense_multiplier(), 1.3);
    }

    #[test]
    fn damage_info_merge_sums_and_ors() {
        let a = DamageInfo {
            damage: 4,
            is_evaded: false,
            is_reflected: true,
        };
        let b = DamageInfo {
            damage: 0,
            is_evaded: true,
            is_reflected: false,
        };
        let merged = a.merge(b);
        assert_eq!(merged.damage, 4);
        assert!(merged.is_evaded);
        assert!(merged.is_reflected);
    }

    #[test]
    fn definition_deserializes_with_defaults() {
        let raw = r#"{
            "id": "x",
            "name": "X",
            "archetype": "beast",
            "stats": {"hp": 50, "strength": 10, "special": 12, "speed": 20, "toughness": 5},
            "reflector": {"maxReflectCount": 2, "reflectRate": 0.5}
        }"#;
        let def: CombatantDefinition = serde_json::from_str(raw).expect("valid definition");
        assert_eq!(def.stats.special_attack_count, 3);
        assert_eq!(def.weapon_multiplier, 1.0);
        let state = CombatantState::new(&def);
        assert_eq!(state.current_hp, 50);
        assert_eq!(state.remaining_reflects(&def), 2);
    }
}
