//! Short random keys for query and form parameters.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::{CalcError, CalcResult};

/// Lowest base-36 digit drawn (`a`)
const DIGIT_MIN: u32 = 10;
/// Highest base-36 digit drawn (`z`)
const DIGIT_MAX: u32 = 35;

/// Number of distinct two-letter keys
pub const KEY_SPACE: usize = ((DIGIT_MAX - DIGIT_MIN + 1) * (DIGIT_MAX - DIGIT_MIN + 1)) as usize;

/// Source of candidate parameter keys. Duplicates are allowed; callers
/// filter them with [`unique_ids`].
pub trait IdSource {
    /// Returns the next candidate key
    fn next_id(&mut self) -> String;
}

impl<F> IdSource for F
where
    F: FnMut() -> String,
{
    fn next_id(&mut self) -> String {
        self()
    }
}

/// Two base-36 digits, each drawn from `[10, 35]`, so always two
/// lowercase letters.
#[derive(Debug, Clone)]
pub struct RandomIds {
    rng: StdRng,
}

impl Default for RandomIds {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomIds {
    /// Creates a generator seeded from the OS
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a reproducible generator
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn next_digit(&mut self) -> char {
        let n = self.rng.random_range(DIGIT_MIN..=DIGIT_MAX);
        char::from_digit(n, 36).unwrap_or('z')
    }
}

impl IdSource for RandomIds {
    fn next_id(&mut self) -> String {
        let mut id = String::with_capacity(2);
        id.push(self.next_digit());
        id.push(self.next_digit());
        id
    }
}

/// Draws `count` pairwise distinct keys, redrawing on every collision.
///
/// Fails when `count` exceeds [`KEY_SPACE`]; a source that never yields a
/// fresh key keeps this looping.
pub fn unique_ids<S>(count: usize, source: &mut S) -> CalcResult<Vec<String>>
where
    S: IdSource + ?Sized,
{
    if count > KEY_SPACE {
        return Err(CalcError::TooManyOperands {
            count,
            max: KEY_SPACE,
        });
    }
    let mut ids: Vec<String> = Vec::with_capacity(count);
    while ids.len() < count {
        let id = source.next_id();
        if ids.contains(&id) {
            tracing::trace!(%id, "request key collision, drawing again");
            continue;
        }
        ids.push(id);
    }
    Ok(ids)
}
