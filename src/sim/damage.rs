use crate::model::{CombatantDefinition, Stance};
use rand::Rng;

/// Evasion is capped at this percentage regardless of speed.
pub const MAX_EVASION_RATE: f64 = 25.0;

const SPECIAL_BASE_MULTIPLIER: f64 = 1.0;
const EXCEEDED_SPECIAL_MULTIPLIER: f64 = 0.5;

pub fn weapon_damage(
    attacker: &CombatantDefinition,
    attacker_stance: Stance,
    defender: &CombatantDefinition,
    defender_stance: Stance,
) -> u32 {
    let offense = attacker.stats.strength as f64
        * attacker_stance.attack_multiplier()
        * attacker.weapon_multiplier;
    let defense = defender.stats.toughness as f64 * defender_stance.defense_multiplier();
    (offense - defense).floor().max(1.0) as u32
}

/// `remaining_special` is the attacker's count before this attack spends one.
pub fn special_damage(attacker: &CombatantDefinition, attacker_stance: Stance, remaining_special: u32) -> u32 {
    let exceed = if remaining_special == 0 {
        EXCEEDED_SPECIAL_MULTIPLIER
    } else {
        1.0
    };
    let base = attacker.stats.special as f64
        * attacker_stance.attack_multiplier()
        * SPECIAL_BASE_MULTIPLIER
        * exceed;
    base.floor().max(1.0) as u32
}

pub fn reflect_damage(incoming_special: u32, reflect_rate: f64) -> u32 {
    (incoming_special as f64 * reflect_rate).floor().max(1.0) as u32
}

/// Evasion chance in percent.
pub fn evasion_rate(speed: u32) -> f64 {
    (speed as f64 * 0.5).min(MAX_EVASION_RATE)
}

pub fn roll_evasion<R: Rng + ?Sized>(defender_speed: u32, rng: &mut R) -> bool {
    let sample = rng.gen::<f64>() * 100.0;
    sample < evasion_rate(defender_speed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BaseStats, Reflector};
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;

    fn make_def(strength: u32, special: u32, speed: u32, toughness: u32) -> CombatantDefinition {
        CombatantDefinition {
            id: "probe".to_string(),
            name: "Probe".to_string(),
            archetype: "beast".to_string(),
            stats: BaseStats {
                hp: 100,
                strength,
                special,
                speed,
                toughness,
                special_attack_count: 2,
            },
            weapon_multiplier: 1.2,
            reflector: Reflector {
                max_reflect_count: 2,
                reflect_rate: 0.5,
            },
        }
    }

    #[test]
    fn weapon_damage_applies_stances() {
        let attacker = make_def(20, 10, 10, 5);
        let defender = make_def(10, 10, 10, 10);
        // 20 * 1.0 * 1.2 - 10 * 1.0 = 14
        assert_eq!(weapon_damage(&attacker, Stance::Normal, &defender, Stance::Normal), 14);
        // 20 * 1.3 * 1.2 - 10 * 0.7 = 24.2
        assert_eq!(weapon_damage(&attacker, Stance::Offensive, &defender, Stance::Offensive), 24);
    }

    #[test]
    fn weapon_damage_floors_at_one() {
        let weak = make_def(1, 1, 1, 1);
        let wall = make_def(1, 1, 1, 200);
        assert_eq!(weapon_damage(&weak, Stance::Defensive, &wall, Stance::Defensive), 1);
    }

    #[test]
    fn special_damage_halves_once_exhausted() {
        let caster = make_def(10, 30, 10, 10);
        assert_eq!(special_damage(&caster, Stance::Normal, 2), 30);
        assert_eq!(special_damage(&caster, Stance::Normal, 0), 15);
        assert_eq!(special_damage(&caster, Stance::Offensive, 1), 39);
    }

    #[test]
    fn reflect_damage_scales_incoming() {
        assert_eq!(reflect_damage(30, 0.5), 15);
        assert_eq!(reflect_damage(1, 0.1), 1);
    }

    #[test]
    fn evasion_rate_is_capped() {
        assert_eq!(evasion_rate(10), 5.0);
        assert_eq!(evasion_rate(50), 25.0);
        assert_eq!(evasion_rate(400), 25.0);
    }

    #[test]
    fn evasion_roll_compares_against_rate() {
        let mut low = StepRng::new(0, 0);
        assert!(roll_evasion(10, &mut low));
        assert!(!roll_evasion(0, &mut low));
        let mut high = StepRng::new(u64::MAX, 0);
        assert!(!roll_evasion(400, &mut high));
    }

    proptest! {
        #[test]
        fn damage_never_below_one(
            strength in 0u32..300,
            special in 0u32..300,
            toughness in 0u32..300,
            remaining in 0u32..4,
            rate in 0.0f64..2.0,
        ) {
            let attacker = make_def(strength, special, 10, 10);
            let defender = make_def(10, 10, 10, toughness);
            for atk in [Stance::Normal, Stance::Offensive, Stance::Defensive] {
                for def in [Stance::Normal, Stance::Offensive, Stance::Defensive] {
                    prop_assert!(weapon_damage(&attacker, atk, &defender, def) >= 1);
                }
                let incoming = special_damage(&attacker, atk, remaining);
                prop_assert!(incoming >= 1);
                prop_assert!(reflect_damage(incoming, rate) >= 1);
            }
        }

        #[test]
        fn evasion_rate_monotone_and_capped(speed in 0u32..1000) {
            prop_assert!(evasion_rate(speed) <= evasion_rate(speed + 1));
            prop_assert!(evasion_rate(speed) <= MAX_EVASION_RATE);
        }
    }
}
