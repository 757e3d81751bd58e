use rand::{Rng, distr::Distribution};
use serde::{Deserialize, Serialize};

/// A tile occupying one grid cell.
///
/// Five interchangeable base colors plus four special tiers. Special tiles are
/// only ever produced by the promotion chain
/// (Bonus → Super → Wildcard → Ultimate); refill draws base colors only.
///
/// An empty cell is represented as `None` in an `Option<Tile>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Tile {
    Red = 0,
    Green = 1,
    Blue = 2,
    Orange = 3,
    Pink = 4,
    /// Tier 1 special tile.
    Bonus = 5,
    /// Tier 2 special tile.
    Super = 6,
    /// Tier 3 special tile; connects to any adjacent tile.
    Wildcard = 7,
    /// Tier 4 special tile.
    Ultimate = 8,
}

/// Tier of a special tile, ordered from least to most valuable.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[repr(u8)]
pub enum SpecialTier {
    Bonus = 1,
    Super = 2,
    Wildcard = 3,
    Ultimate = 4,
}

impl SpecialTier {
    pub const ALL: [SpecialTier; 4] = [
        SpecialTier::Bonus,
        SpecialTier::Super,
        SpecialTier::Wildcard,
        SpecialTier::Ultimate,
    ];

    /// Returns the tile carrying this tier.
    #[must_use]
    pub const fn tile(self) -> Tile {
        match self {
            SpecialTier::Bonus => Tile::Bonus,
            SpecialTier::Super => Tile::Super,
            SpecialTier::Wildcard => Tile::Wildcard,
            SpecialTier::Ultimate => Tile::Ultimate,
        }
    }

    #[must_use]
    pub const fn as_index(self) -> usize {
        self as usize
    }
}

impl Tile {
    /// Number of tile variants (5 base + 4 special).
    pub const LEN: usize = 9;

    pub const BASE: [Tile; 5] = [Tile::Red, Tile::Green, Tile::Blue, Tile::Orange, Tile::Pink];

    #[must_use]
    pub const fn special_tier(self) -> Option<SpecialTier> {
        match self {
            Tile::Red | Tile::Green | Tile::Blue | Tile::Orange | Tile::Pink => None,
            Tile::Bonus => Some(SpecialTier::Bonus),
            Tile::Super => Some(SpecialTier::Super),
            Tile::Wildcard => Some(SpecialTier::Wildcard),
            Tile::Ultimate => Some(SpecialTier::Ultimate),
        }
    }

    #[must_use]
    pub const fn is_base(self) -> bool {
        self.special_tier().is_none()
    }

    #[must_use]
    pub const fn is_special(self) -> bool {
        self.special_tier().is_some()
    }

    #[must_use]
    pub const fn is_wildcard(self) -> bool {
        matches!(self, Tile::Wildcard)
    }

    /// Points awarded per tile when a group of this nominal type is eliminated.
    #[must_use]
    pub const fn points_per_tile(self) -> u64 {
        match self.special_tier() {
            None => 10,
            Some(SpecialTier::Bonus) => 1_000,
            Some(SpecialTier::Super) => 10_000,
            Some(SpecialTier::Wildcard) => 5_000,
            Some(SpecialTier::Ultimate) => 15_000,
        }
    }

    /// Returns the single character notation of this tile.
    ///
    /// # Examples
    ///
    /// ```
    /// use tilecrush_engine::Tile;
    ///
    /// assert_eq!(Tile::Red.as_char(), 'R');
    /// assert_eq!(Tile::Wildcard.as_char(), '*');
    /// ```
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Tile::Red => 'R',
            Tile::Green => 'G',
            Tile::Blue => 'B',
            Tile::Orange => 'O',
            Tile::Pink => 'P',
            Tile::Bonus => '$',
            Tile::Super => 'D',
            Tile::Wildcard => '*',
            Tile::Ultimate => '@',
        }
    }

    /// Parses the single character notation produced by [`Self::as_char`].
    ///
    /// Lowercase letters are accepted for base colors only.
    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        let tile = match c {
            'R' | 'r' => Tile::Red,
            'G' | 'g' => Tile::Green,
            'B' | 'b' => Tile::Blue,
            'O' | 'o' => Tile::Orange,
            'P' | 'p' => Tile::Pink,
            '$' => Tile::Bonus,
            'D' => Tile::Super,
            '*' => Tile::Wildcard,
            '@' => Tile::Ultimate,
            _ => return None,
        };
        Some(tile)
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Tile::Red => "red",
            Tile::Green => "green",
            Tile::Blue => "blue",
            Tile::Orange => "orange",
            Tile::Pink => "pink",
            Tile::Bonus => "bonus",
            Tile::Super => "super",
            Tile::Wildcard => "wildcard",
            Tile::Ultimate => "ultimate",
        }
    }
}

/// Uniform distribution over the five base colors.
///
/// Used for the initial fill and for refilling vacated cells.
///
/// ```
/// use rand::Rng as _;
/// use tilecrush_engine::{BaseTile, Tile};
///
/// let tile: Tile = rand::rng().sample(BaseTile);
/// assert!(tile.is_base());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BaseTile;

impl Distribution<Tile> for BaseTile {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Tile {
        Tile::BASE[rng.random_range(0..Tile::BASE.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;

    const ALL: [Tile; Tile::LEN] = [
        Tile::Red,
        Tile::Green,
        Tile::Blue,
        Tile::Orange,
        Tile::Pink,
        Tile::Bonus,
        Tile::Super,
        Tile::Wildcard,
        Tile::Ultimate,
    ];

    #[test]
    fn test_char_notation_is_unique_and_parses_back() {
        for tile in ALL {
            assert_eq!(Tile::from_char(tile.as_char()), Some(tile));
        }
        let mut chars: Vec<_> = ALL.iter().map(|t| t.as_char()).collect();
        chars.sort_unstable();
        chars.dedup();
        assert_eq!(chars.len(), Tile::LEN);
        assert_eq!(Tile::from_char('.'), None);
        assert_eq!(Tile::from_char('x'), None);
    }

    #[test]
    fn test_lowercase_only_for_base_colors() {
        for tile in Tile::BASE {
            assert_eq!(Tile::from_char(tile.as_char().to_ascii_lowercase()), Some(tile));
        }
        assert_eq!(Tile::from_char('d'), None);
    }

    #[test]
    fn test_special_tier_round_trip() {
        for tier in SpecialTier::ALL {
            assert_eq!(tier.tile().special_tier(), Some(tier));
        }
        for tile in Tile::BASE {
            assert!(tile.is_base());
            assert_eq!(tile.special_tier(), None);
        }
    }

    #[test]
    fn test_points_per_tile() {
        assert_eq!(Tile::Pink.points_per_tile(), 10);
        assert_eq!(Tile::Bonus.points_per_tile(), 1_000);
        assert_eq!(Tile::Super.points_per_tile(), 10_000);
        assert_eq!(Tile::Wildcard.points_per_tile(), 5_000);
        assert_eq!(Tile::Ultimate.points_per_tile(), 15_000);
    }

    #[test]
    fn test_base_tile_distribution_covers_only_base_colors() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; Tile::LEN];
        for _ in 0..1000 {
            let tile = rng.sample(BaseTile);
            assert!(tile.is_base(), "refill must never produce {tile:?}");
            seen[tile as usize] = true;
        }
        assert!(seen[..Tile::BASE.len()].iter().all(|s| *s));
    }
}
