use std::{fmt, str::FromStr};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::ParseSeedError;

/// Seed for a session's random number generator.
///
/// A 128-bit seed that drives the initial fill, every refill and every
/// special-tile placement. Two sessions created from the same seed and fed the
/// same clicks evolve identically, which makes games replayable and tests
/// exact.
///
/// Serialized and displayed as 32 lowercase hex digits.
///
/// # Example
///
/// ```
/// use rand::Rng as _;
/// use tilecrush_engine::{GameSession, SessionSeed};
///
/// let seed: SessionSeed = rand::rng().random();
/// let a = GameSession::with_seed(seed);
/// let b = GameSession::with_seed(seed);
/// assert_eq!(a.grid(), b.grid());
///
/// let parsed: SessionSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionSeed([u8; 16]);

impl SessionSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

impl fmt::Display for SessionSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SessionSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseSeedError::new(s));
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| ParseSeedError::new(s))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for SessionSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SessionSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random seeds with `rng.random()`.
impl Distribution<SessionSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SessionSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SessionSeed(seed)
    }
}
