use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::SeedParseError;

/// Random source used for round generation.
///
/// Generators accept any [`Rng`], so tests may inject their own source; the
/// game itself always uses this PCG generator seeded from a [`RoundSeed`].
pub type RoundRng = Pcg32;

/// Seed for deterministic round generation.
///
/// A 128-bit seed that initializes a [`RoundRng`]. Sessions created with the
/// same seed generate the same sequence of rounds, which makes games
/// reproducible for debugging and lets exported rounds be regenerated.
///
/// Seeds are written as 32 hexadecimal characters, both in JSON and on the
/// command line.
///
/// # Example
///
/// ```
/// use gabor_engine::RoundSeed;
/// use rand::Rng as _;
///
/// let seed: RoundSeed = rand::rng().random();
/// let parsed: RoundSeed = seed.to_string().parse().unwrap();
///
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RoundSeed([u8; 16]);

impl RoundSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }

    /// Creates the random source for this seed.
    #[must_use]
    pub fn rng(self) -> RoundRng {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for RoundSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for RoundSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 {
            return Err(SeedParseError::new(format!(
                "invalid hex: expected 32 characters, got {}",
                s.len()
            )));
        }
        // from_str_radix tolerates a leading '+', which is not hex
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SeedParseError::new(format!("invalid hex: {s}")));
        }
        let num = u128::from_str_radix(s, 16)
            .map_err(|e| SeedParseError::new(format!("invalid hex: {s} ({e})")))?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for RoundSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for RoundSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `RoundSeed` values with `rng.random()`.
impl Distribution<RoundSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RoundSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        RoundSeed(seed)
    }
}
