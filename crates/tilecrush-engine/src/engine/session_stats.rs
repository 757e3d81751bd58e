use serde::{Deserialize, Serialize};

use crate::core::{SpecialTier, Tile};

use super::elimination::EliminationReport;

/// Running statistics for a game session.
///
/// Tracks:
///
/// - **Score**: never decreases until the session is reset
/// - **Eliminated tiles**: every tile removed by a group or the tool
/// - **Eliminations by tier**: how many group clears had each nominal tier
/// - **Spawns by tier**: special tiles produced by the promotion chain
/// - **Tool uses**
///
/// # Example
///
/// ```
/// use tilecrush_engine::SessionStats;
///
/// let stats = SessionStats::new();
/// assert_eq!(stats.score(), 0);
/// assert_eq!(stats.eliminated_tiles(), 0);
/// ```
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStats {
    score: u64,
    eliminated_tiles: usize,
    group_eliminations: usize,
    tool_uses: usize,
    eliminations_by_tier: [usize; 5],
    spawns_by_tier: [usize; 5],
}

/// Index into the per-tier counters: 0 for base colors, otherwise the special tier.
fn tier_index(tile: Tile) -> usize {
    tile.special_tier().map_or(0, SpecialTier::as_index)
}

impl SessionStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            score: 0,
            eliminated_tiles: 0,
            group_eliminations: 0,
            tool_uses: 0,
            eliminations_by_tier: [0; 5],
            spawns_by_tier: [0; 5],
        }
    }

    #[must_use]
    pub const fn score(&self) -> u64 {
        self.score
    }

    #[must_use]
    pub const fn eliminated_tiles(&self) -> usize {
        self.eliminated_tiles
    }

    #[must_use]
    pub const fn group_eliminations(&self) -> usize {
        self.group_eliminations
    }

    #[must_use]
    pub const fn tool_uses(&self) -> usize {
        self.tool_uses
    }

    /// Group clears by nominal tier.
    ///
    /// - `[0]`: base colors
    /// - `[1]`..`[4]`: Bonus, Super, Wildcard, Ultimate
    #[must_use]
    pub const fn eliminations_by_tier(&self) -> &[usize; 5] {
        &self.eliminations_by_tier
    }

    /// Special tiles spawned, indexed like [`Self::eliminations_by_tier`]
    /// (`[0]` is always zero).
    #[must_use]
    pub const fn spawns_by_tier(&self) -> &[usize; 5] {
        &self.spawns_by_tier
    }

    pub(crate) fn record_elimination(&mut self, report: &EliminationReport) {
        self.record_common(report);
        self.group_eliminations += 1;
        self.eliminations_by_tier[tier_index(report.nominal)] += 1;
        if let Some((_, tier)) = report.spawned {
            self.spawns_by_tier[tier.as_index()] += 1;
        }
    }

    pub(crate) fn record_tool_use(&mut self, report: &EliminationReport) {
        self.record_common(report);
        self.tool_uses += 1;
    }

    fn record_common(&mut self, report: &EliminationReport) {
        self.score = self.score.saturating_add(report.points);
        self.eliminated_tiles += report.cleared.len();
    }
}
