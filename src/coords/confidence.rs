//! Confidence intervals around imprecise positions
//!
//! VCF describes structural variant breakpoints with `CIPOS` / `CIEND`
//! offsets such as `-10,25`, meaning the true position lies between 10
//! bases before and 25 bases after the reported one.

use crate::error::FerroError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Signed offset range around a position, `lower <= 0 <= upper`
///
/// `(0, 0)` means the position is precise.
///
/// # Examples
///
/// ```
/// use ferro_coords::ConfidenceInterval;
///
/// let ci = ConfidenceInterval::new(-10, 25).unwrap();
/// assert_eq!(ci.length(), 35);
/// assert_eq!(ci.invert(), ConfidenceInterval::new(-25, 10).unwrap());
/// assert!(ConfidenceInterval::new(5, 10).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "(i32, i32)", into = "(i32, i32)")]
pub struct ConfidenceInterval {
    lower: i32,
    upper: i32,
}

impl ConfidenceInterval {
    /// Create a confidence interval, checking `lower <= 0 <= upper`
    pub fn new(lower: i32, upper: i32) -> Result<Self, FerroError> {
        if lower > 0 || upper < 0 {
            return Err(FerroError::InvalidConfidenceInterval {
                lower,
                upper,
                msg: "lower bound must be <= 0 and upper bound >= 0".to_string(),
            });
        }
        // keeps invert() from overflowing
        if lower == i32::MIN {
            return Err(FerroError::InvalidConfidenceInterval {
                lower,
                upper,
                msg: "lower bound out of range".to_string(),
            });
        }
        Ok(Self { lower, upper })
    }

    /// The `(0, 0)` interval
    #[inline]
    pub const fn precise() -> Self {
        Self { lower: 0, upper: 0 }
    }

    #[inline]
    pub const fn lower_bound(&self) -> i32 {
        self.lower
    }

    #[inline]
    pub const fn upper_bound(&self) -> i32 {
        self.upper
    }

    #[inline]
    pub const fn is_precise(&self) -> bool {
        self.lower == 0 && self.upper == 0
    }

    /// Width of the interval
    #[inline]
    pub const fn length(&self) -> i64 {
        self.upper as i64 - self.lower as i64
    }

    /// The same uncertainty seen from the opposite strand
    #[inline]
    pub const fn invert(&self) -> Self {
        Self {
            lower: -self.upper,
            upper: -self.lower,
        }
    }

    /// Lowest position compatible with this interval around `pos`
    #[inline]
    pub const fn min_pos(&self, pos: i64) -> i64 {
        pos.saturating_add(self.lower as i64)
    }

    /// Highest position compatible with this interval around `pos`
    #[inline]
    pub const fn max_pos(&self, pos: i64) -> i64 {
        pos.saturating_add(self.upper as i64)
    }
}

/// Narrower (more precise) intervals sort first
impl PartialOrd for ConfidenceInterval {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ConfidenceInterval {
    fn cmp(&self, other: &Self) -> Ordering {
        self.length()
            .cmp(&other.length())
            .then_with(|| self.lower.cmp(&other.lower))
    }
}

impl TryFrom<(i32, i32)> for ConfidenceInterval {
    type Error = FerroError;

    fn try_from((lower, upper): (i32, i32)) -> Result<Self, Self::Error> {
        Self::new(lower, upper)
    }
}

impl From<ConfidenceInterval> for (i32, i32) {
    fn from(ci: ConfidenceInterval) -> Self {
        (ci.lower, ci.upper)
    }
}

impl fmt::Display for ConfidenceInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.lower, self.upper)
    }
}
