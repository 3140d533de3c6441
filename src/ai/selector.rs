use crate::ai::tables::CommandWeights;
use crate::model::Command;
use rand::Rng;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum SelectionError {
    #[error("no candidate with a positive weight")]
    NoCandidates,
}

/// Deterministic tie-break, strongest first.
pub const TIE_BREAK_ORDER: [Command; 7] = [
    Command::WeaponAttack,
    Command::SpecialAttack,
    Command::Reflect,
    Command::Advance,
    Command::Retreat,
    Command::StanceA,
    Command::StanceB,
];

pub fn tie_break_rank(command: Command) -> usize {
    TIE_BREAK_ORDER
        .iter()
        .position(|c| *c == command)
        .unwrap_or(TIE_BREAK_ORDER.len())
}

/// Pair each legal command with its weight.
pub fn weighted_candidates(legal: &[Command], weights: &CommandWeights) -> Vec<(Command, f64)> {
    legal.iter().map(|cmd| (*cmd, weights[cmd.index()])).collect()
}

/// Cumulative-weight draw. Non-positive weights never win.
pub fn weighted_select<K: Copy, R: Rng + ?Sized>(
    candidates: &[(K, f64)],
    rng: &mut R,
) -> Result<K, SelectionError> {
    let positive: Vec<(K, f64)> = candidates
        .iter()
        .copied()
        .filter(|(_, weight)| *weight > 0.0)
        .collect();
    let (last, _) = *positive.last().ok_or(SelectionError::NoCandidates)?;
    if positive.len() == 1 {
        return Ok(last);
    }
    let total: f64 = positive.iter().map(|(_, weight)| weight).sum();
    let target = rng.gen::<f64>() * total;
    let mut cumulative = 0.0;
    for (key, weight) in &positive {
        cumulative += weight;
        if target < cumulative {
            return Ok(*key);
        }
    }
    // floating-point drift left the target past the final bucket
    Ok(last)
}

/// Highest weight wins; equal weights resolve through [`TIE_BREAK_ORDER`].
pub fn select_max(candidates: &[(Command, f64)]) -> Result<Command, SelectionError> {
    candidates
        .iter()
        .filter(|(_, weight)| *weight > 0.0)
        .fold(None::<(Command, f64)>, |best, &(cmd, weight)| match best {
            None => Some((cmd, weight)),
            Some((best_cmd, best_weight)) => {
                if weight > best_weight
                    || (weight == best_weight && tie_break_rank(cmd) < tie_break_rank(best_cmd))
                {
                    Some((cmd, weight))
                } else {
                    Some((best_cmd, best_weight))
                }
            }
        })
        .map(|(cmd, _)| cmd)
        .ok_or(SelectionError::NoCandidates)
}

/// Uniform pick over `candidates`, indexed by `floor(u * len)`.
pub fn uniform_select<K: Copy, R: Rng + ?Sized>(candidates: &[K], rng: &mut R) -> Result<K, SelectionError> {
    if candidates.is_empty() {
        return Err(SelectionError::NoCandidates);
    }
    let idx = (rng.gen::<f64>() * candidates.len() as f64) as usize;
    Ok(candidates[idx.min(candidates.len() - 1)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn empty_and_non_positive_maps_fail() {
        let mut rng = StepRng::new(0, 0);
        let empty: [(Command, f64); 0] = [];
        assert_eq!(weighted_select(&empty, &mut rng), Err(SelectionError::NoCandidates));
        let dead = [(Command::Advance, 0.0), (Command::Retreat, -1.0)];
        assert_eq!(weighted_select(&dead, &mut rng), Err(SelectionError::NoCandidates));
        assert_eq!(select_max(&dead), Err(SelectionError::NoCandidates));
    }

    #[test]
    fn single_positive_candidate_short_circuits() {
        let mut rng = StepRng::new(u64::MAX, 0);
        let one = [(Command::Advance, 0.0), (Command::Reflect, 0.4)];
        assert_eq!(weighted_select(&one, &mut rng), Ok(Command::Reflect));
    }

    #[test]
    fn draw_walks_the_cumulative_weights() {
        let candidates = [(Command::Advance, 1.0), (Command::Retreat, 3.0)];
        assert_eq!(weighted_select(&candidates, &mut StepRng::new(0, 0)), Ok(Command::Advance));
        assert_eq!(
            weighted_select(&candidates, &mut StepRng::new(u64::MAX, 0)),
            Ok(Command::Retreat)
        );
    }

    #[test]
    fn draw_frequencies_follow_weights() {
        let candidates = [(Command::Advance, 1.0), (Command::Retreat, 3.0)];
        let mut rng = SmallRng::seed_from_u64(42);
        let retreats = (0..4000)
            .filter(|_| weighted_select(&candidates, &mut rng) == Ok(Command::Retreat))
            .count();
        let rate = retreats as f64 / 4000.0;
        assert!((rate - 0.75).abs() < 0.05, "expected ~0.75, got {rate}");
    }

    #[test]
    fn max_uses_tie_break_order() {
        let tied = [
            (Command::StanceB, 2.0),
            (Command::Advance, 2.0),
            (Command::SpecialAttack, 2.0),
            (Command::Retreat, 1.0),
        ];
        assert_eq!(select_max(&tied), Ok(Command::SpecialAttack));
        let clear = [(Command::WeaponAttack, 1.0), (Command::StanceA, 1.5)];
        assert_eq!(select_max(&clear), Ok(Command::StanceA));
    }

    #[test]
    fn uniform_select_ends() {
        let legal = [Command::Advance, Command::Retreat, Command::SpecialAttack];
        assert_eq!(uniform_select(&legal, &mut StepRng::new(0, 0)), Ok(Command::Advance));
        assert_eq!(
            uniform_select(&legal, &mut StepRng::new(u64::MAX, 0)),
            Ok(Command::SpecialAttack)
        );
    }
}
