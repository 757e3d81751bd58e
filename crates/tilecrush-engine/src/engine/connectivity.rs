use std::collections::BTreeSet;

use crate::core::{Grid, Position, Tile};

/// A set of grid positions eliminated together.
pub type Group = BTreeSet<Position>;

/// Computes the group that clicking `seed` would eliminate.
///
/// - Empty seed: the empty set.
/// - Wildcard seed: the wildcard plus, for each of its four direct neighbors,
///   the same-color cluster containing that neighbor (a neighboring wildcard
///   contributes only itself).
/// - Any other seed: a 4-directional flood fill over cells equal to the seed
///   tile or holding a wildcard. Wildcards are absorbed and the fill continues
///   past them with the seed's tile.
///
/// The result always contains `seed` unless the seed cell is empty. Whether a
/// group is large enough to eliminate is the caller's decision.
///
/// # Example
///
/// ```
/// use tilecrush_engine::{Grid, Position, resolve};
///
/// let grid = Grid::from_rows(&[
///     "RR*RGBOPGB",
///     "GBOPGBOPGB",
///     "BOPGBOPGBO",
///     "OPGBOPGBOP",
///     "PGBOPGBOPG",
///     "GBOPGBOPGB",
///     "BOPGBOPGBO",
///     "OPGBOPGBOP",
///     "PGBOPGBOPG",
///     "GBOPGBOPGB",
/// ])
/// .unwrap();
/// let group = resolve(&grid, Position::new(0, 0));
/// assert_eq!(group.len(), 4);
/// ```
///
/// # Panics
///
/// Panics if `seed` is outside the grid.
#[must_use]
pub fn resolve(grid: &Grid, seed: Position) -> Group {
    match grid.get(seed) {
        None => Group::new(),
        Some(Tile::Wildcard) => wildcard_cross(grid, seed),
        Some(tile) => flood_fill(grid, seed, |t| t == tile || t.is_wildcard()),
    }
}

fn wildcard_cross(grid: &Grid, seed: Position) -> Group {
    let mut group = Group::from([seed]);
    for neighbor in seed.neighbors4() {
        match grid.get(neighbor) {
            None => {}
            Some(Tile::Wildcard) => {
                group.insert(neighbor);
            }
            Some(tile) => group.extend(flood_fill(grid, neighbor, |t| t == tile)),
        }
    }
    group
}

fn flood_fill<F>(grid: &Grid, start: Position, mut accepts: F) -> Group
where
    F: FnMut(Tile) -> bool,
{
    let mut group = Group::new();
    let mut to_visit = vec![start];
    while let Some(pos) = to_visit.pop() {
        if group.contains(&pos) || !grid.get(pos).is_some_and(&mut accepts) {
            continue;
        }
        group.insert(pos);
        to_visit.extend(
            pos.neighbors4()
                .into_iter()
                .filter(|neighbor| !group.contains(neighbor)),
        );
    }
    group
}
