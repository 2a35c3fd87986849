//! Coordinate systems and interval algebra
//!
//! Bioinformatics formats disagree on whether the first base of a sequence
//! is numbered 0 or 1, and on whether interval boundaries are open or
//! closed. This module models the two systems in use as a pair of boundary
//! kinds and provides the arithmetic to compare intervals across them.
//!
//! # Coordinate Systems in Bioinformatics
//!
//! | System | Start | End | Use Cases |
//! |--------|-------|-----|-----------|
//! | [`CoordinateSystem::OneBased`] | closed | closed | HGVS, VCF, GFF/GTF, SAM |
//! | [`CoordinateSystem::ZeroBased`] | open | closed | BED, SPDI, array slicing |
//!
//! Both systems close their end boundary, so only the start of an interval
//! ever moves when converting between them. Every operation below first
//! normalizes its operands to an open start and a closed end, which is the
//! same as a 0-based half-open interval.
//!
//! # Examples
//!
//! ```
//! use ferro_coords::coords::{self, CoordinateSystem};
//!
//! // VCF position 100 is BED start 99
//! let bed = CoordinateSystem::OneBased.convert_start(CoordinateSystem::ZeroBased, 100);
//! assert_eq!(bed, 99);
//!
//! // [1, 10] and (0, 10] are the same ten bases
//! assert_eq!(coords::length(CoordinateSystem::OneBased, 1, 10), 10);
//! assert_eq!(coords::length(CoordinateSystem::ZeroBased, 0, 10), 10);
//! ```

mod confidence;
mod coordinates;

pub use confidence::ConfidenceInterval;
pub use coordinates::Coordinates;

use crate::contig::Contig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Boundary kind of one end of an interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Bound {
    /// Excludes the coordinate
    Open,
    /// Includes the coordinate
    Closed,
}

/// The two supported coordinate systems
///
/// Each is defined by the boundary kinds of its start and end.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum CoordinateSystem {
    /// Fully closed, first base is 1: `[start, end]`
    #[default]
    OneBased,
    /// Half open, first base is 0: `(start, end]` in boundary terms
    ZeroBased,
}

impl CoordinateSystem {
    #[inline]
    pub const fn start_bound(self) -> Bound {
        match self {
            CoordinateSystem::OneBased => Bound::Closed,
            CoordinateSystem::ZeroBased => Bound::Open,
        }
    }

    #[inline]
    pub const fn end_bound(self) -> Bound {
        Bound::Closed
    }

    #[inline]
    pub const fn is_one_based(self) -> bool {
        matches!(self, CoordinateSystem::OneBased)
    }

    #[inline]
    pub const fn is_zero_based(self) -> bool {
        matches!(self, CoordinateSystem::ZeroBased)
    }

    /// Delta to add to a start position to express it in `target`
    ///
    /// Zero when both systems share a start boundary kind, +1 when moving
    /// from an open to a closed start and -1 the reverse.
    #[inline]
    pub const fn start_delta(self, target: CoordinateSystem) -> i64 {
        match (self.start_bound(), target.start_bound()) {
            (Bound::Open, Bound::Closed) => 1,
            (Bound::Closed, Bound::Open) => -1,
            _ => 0,
        }
    }

    /// Delta to add to an end position to express it in `target`
    ///
    /// Always zero: both supported systems close their end boundary.
    #[inline]
    pub const fn end_delta(self, _target: CoordinateSystem) -> i64 {
        0
    }

    /// Constant added when reflecting a position across a contig
    ///
    /// A closed start shifts the reflection by one base.
    #[inline]
    pub const fn length_delta(self) -> i64 {
        match self.start_bound() {
            Bound::Closed => 1,
            Bound::Open => 0,
        }
    }

    /// Re-express a start position in `target`
    ///
    /// Saturates at the ends of the `i64` range; such positions never pass
    /// coordinate validation.
    #[inline]
    pub const fn convert_start(self, target: CoordinateSystem, pos: i64) -> i64 {
        pos.saturating_add(self.start_delta(target))
    }

    /// Re-express an end position in `target`
    #[inline]
    pub const fn convert_end(self, target: CoordinateSystem, pos: i64) -> i64 {
        pos.saturating_add(self.end_delta(target))
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            CoordinateSystem::OneBased => "one-based",
            CoordinateSystem::ZeroBased => "zero-based",
        }
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CoordinateSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "one-based" | "one_based" | "1" | "1-based" => Ok(CoordinateSystem::OneBased),
            "zero-based" | "zero_based" | "0" | "0-based" => Ok(CoordinateSystem::ZeroBased),
            _ => Err(format!("Invalid coordinate system: {}", s)),
        }
    }
}

// ============================================================================
// Interval algebra on raw positions
// ============================================================================

/// Start position normalized to an open boundary (0-based start)
#[inline]
pub const fn open_start(system: CoordinateSystem, start: i64) -> i64 {
    system.convert_start(CoordinateSystem::ZeroBased, start)
}

/// End position normalized to a closed boundary
#[inline]
pub const fn closed_end(system: CoordinateSystem, end: i64) -> i64 {
    system.convert_end(CoordinateSystem::ZeroBased, end)
}

/// Number of bases covered by an interval
///
/// Zero for an empty interval (an insertion point between two bases).
///
/// ```
/// use ferro_coords::coords::{length, CoordinateSystem};
///
/// assert_eq!(length(CoordinateSystem::OneBased, 5, 5), 1);
/// assert_eq!(length(CoordinateSystem::OneBased, 6, 5), 0);
/// assert_eq!(length(CoordinateSystem::ZeroBased, 5, 5), 0);
/// ```
#[inline]
pub const fn length(system: CoordinateSystem, start: i64, end: i64) -> i64 {
    closed_end(system, end).saturating_sub(open_start(system, start))
}

/// Whether two intervals overlap
///
/// Non-empty intervals overlap when they share at least one base. An empty
/// interval overlaps another interval when it lies on or between that
/// interval's boundaries, so two empty intervals overlap only when they
/// mark the same point. The relation is symmetric.
pub fn overlap(
    a_system: CoordinateSystem,
    a_start: i64,
    a_end: i64,
    b_system: CoordinateSystem,
    b_start: i64,
    b_end: i64,
) -> bool {
    let a_open = open_start(a_system, a_start);
    let a_closed = closed_end(a_system, a_end);
    let b_open = open_start(b_system, b_start);
    let b_closed = closed_end(b_system, b_end);

    if a_open == a_closed {
        return b_open <= a_open && a_closed <= b_closed;
    }
    if b_open == b_closed {
        return a_open <= b_open && b_closed <= a_closed;
    }
    a_open < b_closed && b_open < a_closed
}

/// Whether interval A contains interval B
pub fn contains(
    a_system: CoordinateSystem,
    a_start: i64,
    a_end: i64,
    b_system: CoordinateSystem,
    b_start: i64,
    b_end: i64,
) -> bool {
    open_start(a_system, a_start) <= open_start(b_system, b_start)
        && closed_end(b_system, b_end) <= closed_end(a_system, a_end)
}

/// Signed gap between two intervals
///
/// Zero when the intervals overlap or abut, positive when B lies
/// downstream of A and negative when it lies upstream.
pub fn distance(
    a_system: CoordinateSystem,
    a_start: i64,
    a_end: i64,
    b_system: CoordinateSystem,
    b_start: i64,
    b_end: i64,
) -> i64 {
    if overlap(a_system, a_start, a_end, b_system, b_start, b_end) {
        return 0;
    }
    let a_open = open_start(a_system, a_start);
    let a_closed = closed_end(a_system, a_end);
    let b_open = open_start(b_system, b_start);
    let b_closed = closed_end(b_system, b_end);

    if b_open >= a_closed {
        b_open.saturating_sub(a_closed)
    } else {
        b_closed.saturating_sub(a_open)
    }
}

/// Reflect a position across a contig
///
/// `p` maps to `contig length + length delta - p`. Reflecting a start yields
/// the end of the inverted interval and vice versa. Applying it twice
/// returns the original position.
#[inline]
pub fn invert_position(system: CoordinateSystem, contig: &Contig, pos: i64) -> i64 {
    (contig.extent() + system.length_delta()).saturating_sub(pos)
}
