//! DNA strand of a region or variant

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Strand on which a region or variant is expressed
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub enum Strand {
    #[serde(rename = "+")]
    #[default]
    Positive,
    #[serde(rename = "-")]
    Negative,
}

impl Strand {
    /// The other strand
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Strand::Positive => Strand::Negative,
            Strand::Negative => Strand::Positive,
        }
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        matches!(self, Strand::Positive)
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        matches!(self, Strand::Negative)
    }

    /// `+` or `-`
    pub const fn symbol(self) -> char {
        match self {
            Strand::Positive => '+',
            Strand::Negative => '-',
        }
    }
}

impl fmt::Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "positive" | "POSITIVE" => Ok(Strand::Positive),
            "-" | "negative" | "NEGATIVE" => Ok(Strand::Negative),
            _ => Err(format!("Invalid strand: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_is_involution() {
        assert_eq!(Strand::Positive.opposite(), Strand::Negative);
        assert_eq!(Strand::Negative.opposite(), Strand::Positive);
        assert_eq!(Strand::Positive.opposite().opposite(), Strand::Positive);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Strand::Positive.to_string(), "+");
        assert_eq!(Strand::Negative.to_string(), "-");
        assert_eq!("+".parse::<Strand>().unwrap(), Strand::Positive);
        assert_eq!("negative".parse::<Strand>().unwrap(), Strand::Negative);
        assert!(".".parse::<Strand>().is_err());
    }

    #[test]
    fn test_default_is_positive() {
        assert!(Strand::default().is_positive());
    }
}
