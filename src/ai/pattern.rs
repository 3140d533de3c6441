//! Opponent habit mining over recent turn history.

use crate::model::{Command, Distance, Side, TurnResult};

pub const DEFAULT_LOOKBACK: usize = 3;

/// Command counts of one side, bucketed by the distance in effect before each turn.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PatternAnalysis {
    counts: [[u32; 7]; 3],
}

impl PatternAnalysis {
    /// Looks at the last `lookback` turns. The oldest turn of that window is
    /// left out, so at most `lookback - 1` turns are counted.
    pub fn analyze(history: &[TurnResult], target: Side, lookback: usize) -> Self {
        let mut analysis = PatternAnalysis::default();
        let start = history.len().saturating_sub(lookback);
        for turn in history[start..].iter().skip(1) {
            let bucket = &mut analysis.counts[turn.distance_before.index()];
            let pair = turn.commands(target);
            bucket[pair.first.index()] += 1;
            bucket[pair.second.index()] += 1;
        }
        analysis
    }

    pub fn count(&self, distance: Distance, command: Command) -> u32 {
        self.counts[distance.index()][command.index()]
    }

    pub fn has_data(&self, distance: Distance) -> bool {
        self.counts[distance.index()].iter().any(|c| *c > 0)
    }

    /// Most frequent commands at `distance`, every tied command included, in
    /// canonical order. Empty when nothing was observed there.
    pub fn most_frequent(&self, distance: Distance) -> Vec<Command> {
        let bucket = &self.counts[distance.index()];
        let best = bucket.iter().copied().max().unwrap_or(0);
        if best == 0 {
            return Vec::new();
        }
        Command::ALL
            .into_iter()
            .filter(|cmd| bucket[cmd.index()] == best)
            .collect()
    }
}
