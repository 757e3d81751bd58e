use std::collections::BTreeSet;

use log::{debug, info};
use rand::{Rng, seq::IndexedRandom as _};
use serde::{Deserialize, Serialize};

use crate::core::{Grid, Position, SpecialTier, Tile};

use super::connectivity::Group;

/// Flat score for removing a tile with the tool.
pub const TOOL_POINTS: u64 = 50;

/// Minimum number of Super tiles (group size) needed to promote to a Wildcard.
const SUPER_PROMOTION_MIN_SIZE: usize = 3;

/// Scoring and promotion outcome of eliminating a group, computed without
/// touching the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assessment {
    /// Tile at the first (row-major) non-empty position of the group.
    pub nominal: Tile,
    /// Number of tiles that would be removed.
    pub size: usize,
    pub points: u64,
    /// Special tier spawned next to the cleared region, if any.
    pub promotion: Option<SpecialTier>,
}

/// What happened when tiles were removed from the grid.
///
/// `cleared` doubles as the list of clear events for the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EliminationReport {
    pub cleared: Vec<(Position, Tile)>,
    pub nominal: Tile,
    pub points: u64,
    /// Special tile placed next to the cleared region. [`eliminate`] reports
    /// the cell it was placed in; session outcomes report where it rests
    /// after settling.
    pub spawned: Option<(Position, SpecialTier)>,
}

#[derive(Debug, Default, Clone, Copy)]
struct TierPresence {
    bonus: bool,
    super_: bool,
    wildcard: bool,
    ultimate: bool,
}

impl TierPresence {
    fn mark(&mut self, tile: Tile) {
        match tile.special_tier() {
            None => {}
            Some(SpecialTier::Bonus) => self.bonus = true,
            Some(SpecialTier::Super) => self.super_ = true,
            Some(SpecialTier::Wildcard) => self.wildcard = true,
            Some(SpecialTier::Ultimate) => self.ultimate = true,
        }
    }

    /// Promotion chain, checked in order: wildcard, super (3+), bonus, plain.
    fn promotion(self, size: usize) -> Option<SpecialTier> {
        if self.wildcard {
            Some(SpecialTier::Ultimate)
        } else if self.super_ && size >= SUPER_PROMOTION_MIN_SIZE {
            Some(SpecialTier::Wildcard)
        } else if self.bonus {
            Some(SpecialTier::Super)
        } else if self.super_ || self.ultimate {
            None
        } else {
            Some(SpecialTier::Bonus)
        }
    }
}

/// Evaluates what eliminating `group` would score and spawn.
///
/// Returns `None` if the group holds no tiles.
///
/// The reward is `size × points_per_tile(nominal)`. Groups built by
/// [`resolve`](super::resolve) are homogeneous apart from embedded wildcards,
/// so the nominal tile is the group's color unless a wildcard comes first in
/// row-major order.
#[must_use]
pub fn assess(grid: &Grid, group: &Group) -> Option<Assessment> {
    let mut tiles = group.iter().filter_map(|&pos| grid.get(pos));
    let nominal = tiles.next()?;
    let mut presence = TierPresence::default();
    presence.mark(nominal);
    let mut size = 1;
    for tile in tiles {
        presence.mark(tile);
        size += 1;
    }
    Some(Assessment {
        nominal,
        size,
        points: size as u64 * nominal.points_per_tile(),
        promotion: presence.promotion(size),
    })
}

/// Removes every tile of `group`, then spawns the promoted special tile (if
/// any) next to the cleared region.
///
/// Cleared cells are left empty; call [`settle`](super::settle) afterwards to
/// restore a full grid. Returns `None` and leaves the grid untouched if the
/// group holds no tiles.
pub fn eliminate<R>(grid: &mut Grid, group: &Group, rng: &mut R) -> Option<EliminationReport>
where
    R: Rng + ?Sized,
{
    let assessment = assess(grid, group)?;
    let cleared: Vec<_> = group
        .iter()
        .filter_map(|&pos| grid.take(pos).map(|tile| (pos, tile)))
        .collect();
    info!(
        "eliminated {} {} tile(s) for {} points",
        assessment.size,
        assessment.nominal.name(),
        assessment.points
    );

    let spawned = assessment.promotion.and_then(|tier| {
        spawn_special_near(grid, group, tier, rng).map(|pos| (pos, tier))
    });

    Some(EliminationReport {
        cleared,
        nominal: assessment.nominal,
        points: assessment.points,
        spawned,
    })
}

/// Removes the single tile at `pos` (the tool action).
///
/// Awards [`TOOL_POINTS`] and never spawns a special tile. Returns `None` if
/// the cell is already empty.
pub fn remove_single(grid: &mut Grid, pos: Position) -> Option<EliminationReport> {
    let tile = grid.take(pos)?;
    info!("tool removed {} tile at {pos}", tile.name());
    Some(EliminationReport {
        cleared: vec![(pos, tile)],
        nominal: tile,
        points: TOOL_POINTS,
        spawned: None,
    })
}

/// Cells eligible to receive a spawned special tile.
///
/// The 8-neighborhood of every cell in `region`, minus the region itself and
/// minus cells already holding a special tile. Sorted row-major.
#[must_use]
pub fn spawn_candidates(grid: &Grid, region: &Group) -> Vec<Position> {
    region
        .iter()
        .flat_map(|pos| pos.neighbors8())
        .filter(|pos| !region.contains(pos))
        .filter(|&pos| !grid.get(pos).is_some_and(Tile::is_special))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Places a tile of `tier` on a uniformly chosen spawn candidate next to `region`.
///
/// The candidate's current tile is overwritten. Returns the chosen position,
/// or `None` when there is no candidate (not an error).
pub fn spawn_special_near<R>(
    grid: &mut Grid,
    region: &Group,
    tier: SpecialTier,
    rng: &mut R,
) -> Option<Position>
where
    R: Rng + ?Sized,
{
    let candidates = spawn_candidates(grid, region);
    let Some(&pos) = candidates.choose(rng) else {
        debug!("no room to spawn a {tier} tile");
        return None;
    };
    grid.set(pos, Some(tier.tile()));
    info!("spawned {tier} tile at {pos}");
    Some(pos)
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const FILL: [&str; 10] = [
        "GBOPGBOPGB",
        "BOPGBOPGBO",
        "OPGBOPGBOP",
        "PGBOPGBOPG",
        "GBOPGBOPGB",
        "BOPGBOPGBO",
        "OPGBOPGBOP",
        "PGBOPGBOPG",
        "GBOPGBOPGB",
        "BOPGBOPGBO",
    ];

    fn grid_with(edits: &[(usize, &str)]) -> Grid {
        let mut rows = FILL;
        for &(row, line) in edits {
            rows[row] = line;
        }
        Grid::from_rows(&rows).unwrap()
    }

    fn group(cells: &[(usize, usize)]) -> Group {
        cells.iter().map(|&(r, c)| Position::new(r, c)).collect()
    }

    fn rng() -> Pcg32 {
        Pcg32::seed_from_u64(0x5eed)
    }

    fn neighborhood(region: &Group) -> BTreeSet<Position> {
        region
            .iter()
            .flat_map(|p| p.neighbors8())
            .filter(|p| !region.contains(p))
            .collect()
    }

    #[test]
    fn test_base_group_scores_ten_per_tile_and_spawns_bonus() {
        let mut grid = grid_with(&[(0, "RRRPGBOPGB")]);
        let region = group(&[(0, 0), (0, 1), (0, 2)]);
        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();

        assert_eq!(report.nominal, Tile::Red);
        assert_eq!(report.points, 30);
        assert_eq!(report.cleared.len(), 3);
        for pos in &region {
            assert_eq!(grid.get(*pos), None);
        }
        let (spawn_pos, tier) = report.spawned.unwrap();
        assert_eq!(tier, SpecialTier::Bonus);
        assert!(neighborhood(&region).contains(&spawn_pos));
        assert_eq!(grid.get(spawn_pos), Some(Tile::Bonus));
        assert_eq!(grid.special_count(), 1);
    }

    #[test]
    fn test_four_bonus_tiles_score_4000_and_spawn_super() {
        let mut grid = grid_with(&[(5, "$$$$BOPGBO")]);
        let region = group(&[(5, 0), (5, 1), (5, 2), (5, 3)]);
        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();
        assert_eq!(report.points, 4000);
        assert_eq!(report.spawned.map(|(_, tier)| tier), Some(SpecialTier::Super));
        assert_eq!(grid.count(Tile::Super), 1);
        assert_eq!(grid.count(Tile::Bonus), 0);
    }

    #[test]
    fn test_two_wildcards_score_10000_and_spawn_ultimate() {
        let mut grid = grid_with(&[(9, "BOPGBOPG**")]);
        let region = group(&[(9, 8), (9, 9)]);
        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();
        assert_eq!(report.nominal, Tile::Wildcard);
        assert_eq!(report.points, 10_000);
        assert_eq!(
            report.spawned.map(|(_, tier)| tier),
            Some(SpecialTier::Ultimate)
        );
        assert_eq!(grid.special_count(), 1);
    }

    #[test]
    fn test_three_super_tiles_spawn_exactly_one_wildcard() {
        let mut grid = grid_with(&[(4, "GDDDGBOPGB")]);
        let region = group(&[(4, 1), (4, 2), (4, 3)]);
        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();
        assert_eq!(report.points, 30_000);
        assert_eq!(
            report.spawned.map(|(_, tier)| tier),
            Some(SpecialTier::Wildcard)
        );
        assert_eq!(grid.count(Tile::Wildcard), 1);
        assert_eq!(grid.special_count(), 1);
    }

    #[test]
    fn test_two_super_tiles_spawn_nothing() {
        let mut grid = grid_with(&[(4, "GDDPGBOPGB")]);
        let region = group(&[(4, 1), (4, 2)]);
        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();
        assert_eq!(report.points, 20_000);
        assert_eq!(report.spawned, None);
        assert_eq!(grid.special_count(), 0);
    }

    #[test]
    fn test_ultimate_group_scores_and_spawns_nothing() {
        let mut grid = grid_with(&[(1, "B@@GBOPGBO")]);
        let region = group(&[(1, 1), (1, 2)]);
        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();
        assert_eq!(report.points, 30_000);
        assert_eq!(report.spawned, None);
    }

    #[test]
    fn test_embedded_wildcard_promotes_to_ultimate() {
        // Red group with a wildcard in the middle; the first tile in row-major
        // order is red, so it scores as red.
        let mut grid = grid_with(&[(0, "R*RPGBOPGB")]);
        let region = group(&[(0, 0), (0, 1), (0, 2)]);
        let assessment = assess(&grid, &region).unwrap();
        assert_eq!(assessment.nominal, Tile::Red);
        assert_eq!(assessment.points, 30);
        assert_eq!(assessment.promotion, Some(SpecialTier::Ultimate));

        let report = eliminate(&mut grid, &region, &mut rng()).unwrap();
        assert_eq!(grid.get(report.spawned.unwrap().0), Some(Tile::Ultimate));
    }

    #[test]
    fn test_assess_does_not_modify_grid() {
        let grid = grid_with(&[(0, "RRRPGBOPGB")]);
        let before = grid.clone();
        let region = group(&[(0, 0), (0, 1), (0, 2)]);
        let assessment = assess(&grid, &region).unwrap();
        assert_eq!(assessment.size, 3);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_empty_group_is_rejected() {
        let mut grid = Grid::EMPTY;
        let region = group(&[(0, 0), (0, 1)]);
        assert_eq!(assess(&grid, &region), None);
        assert_eq!(eliminate(&mut grid, &region, &mut rng()), None);
    }

    #[test]
    fn test_spawn_candidates_exclude_region_and_specials() {
        let grid = grid_with(&[(0, "RR$PGBOPGB"), (1, "D*@GBOPGBO")]);
        let region = group(&[(0, 0), (0, 1)]);
        // Neighbors of (0,0)-(0,1): (0,2) bonus, (1,0) super, (1,1) wildcard,
        // (1,2) ultimate. All are special.
        assert!(spawn_candidates(&grid, &region).is_empty());
    }

    #[test]
    fn test_spawn_without_candidates_is_a_no_op() {
        let mut grid = grid_with(&[(0, "RR$PGBOPGB"), (1, "D*@GBOPGBO")]);
        let mut emptied = grid.clone();
        for pos in &group(&[(0, 0), (0, 1)]) {
            emptied.set(*pos, None);
            grid.set(*pos, None);
        }
        let spawned = spawn_special_near(
            &mut grid,
            &group(&[(0, 0), (0, 1)]),
            SpecialTier::Bonus,
            &mut rng(),
        );
        assert_eq!(spawned, None);
        assert_eq!(grid, emptied);
    }

    #[test]
    fn test_spawn_choice_is_deterministic_for_a_seed() {
        let region = group(&[(4, 4), (4, 5)]);
        let pick = |seed| {
            let mut grid = Grid::from_rows(&FILL).unwrap();
            spawn_special_near(
                &mut grid,
                &region,
                SpecialTier::Super,
                &mut Pcg32::seed_from_u64(seed),
            )
        };
        assert_eq!(pick(42), pick(42));
        assert!(pick(42).is_some_and(|pos| neighborhood(&region).contains(&pos)));
    }

    #[test]
    fn test_remove_single() {
        let mut grid = Grid::from_rows(&FILL).unwrap();
        let pos = Position::new(3, 3);
        let report = remove_single(&mut grid, pos).unwrap();
        assert_eq!(report.cleared, vec![(pos, Tile::Orange)]);
        assert_eq!(report.points, TOOL_POINTS);
        assert_eq!(report.spawned, None);
        assert_eq!(grid.get(pos), None);
        assert_eq!(remove_single(&mut grid, pos), None);
    }
}
