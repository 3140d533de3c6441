use crate::model::CombatantDefinition;
use anyhow::Context;
use once_cell::sync::Lazy;
use std::collections::HashSet;
use std::path::Path;

static BUILTIN_ROSTER: Lazy<Vec<CombatantDefinition>> = Lazy::new(|| {
    let json_str = include_str!("../data/roster.json");
    serde_json::from_str(json_str).expect("Failed to parse data/roster.json")
});

/// The definitions shipped with the crate, one per archetype.
pub fn builtin_roster() -> &'static [CombatantDefinition] {
    &BUILTIN_ROSTER
}

pub fn find_definition(id: &str) -> Option<&'static CombatantDefinition> {
    BUILTIN_ROSTER.iter().find(|def| def.id.eq_ignore_ascii_case(id))
}

pub fn load_roster(path: &Path) -> anyhow::Result<Vec<CombatantDefinition>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read roster file at {}", path.display()))?;
    let parsed: Vec<CombatantDefinition> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse JSON from {}", path.display()))?;
    validate_roster(&parsed)?;
    Ok(parsed)
}

pub fn validate_roster(roster: &[CombatantDefinition]) -> anyhow::Result<()> {
    if roster.is_empty() {
        anyhow::bail!("Roster must contain at least one combatant");
    }
    let mut seen = HashSet::new();
    for def in roster {
        if def.id.trim().is_empty() {
            anyhow::bail!("Combatant '{}' has an empty id", def.name);
        }
        if def.stats.hp == 0 {
            anyhow::bail!("Combatant '{}' must have hp > 0", def.id);
        }
        if def.reflector.reflect_rate < 0.0 {
            anyhow::bail!("Combatant '{}' has a negative reflect rate", def.id);
        }
        if !seen.insert(def.id.to_ascii_lowercase()) {
            anyhow::bail!("Duplicate combatant id '{}'", def.id);
        }
    }
    Ok(())
}
