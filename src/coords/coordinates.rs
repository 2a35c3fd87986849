//! The `Coordinates` value type
//!
//! A coordinate-system tag, a start, an end and (for imprecise positions)
//! a confidence interval per end. Precise and imprecise coordinates share
//! one type; [`Coordinates::of`] picks the representation.

use super::{closed_end, open_start, ConfidenceInterval, CoordinateSystem};
use crate::contig::Contig;
use crate::error::FerroError;
use crate::region::{HasCoordinateSystem, Interval};
use crate::Result;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
enum Precision {
    Precise,
    Imprecise {
        start_ci: ConfidenceInterval,
        end_ci: ConfidenceInterval,
    },
}

/// An interval expressed in one coordinate system
///
/// Immutable: converting, inverting and extending all return new values.
///
/// # Examples
///
/// ```
/// use ferro_coords::{Coordinates, CoordinateSystem, HasCoordinateSystem, Interval};
///
/// let vcf = Coordinates::precise(CoordinateSystem::OneBased, 3, 4).unwrap();
/// let bed = vcf.with_coordinate_system(CoordinateSystem::ZeroBased);
/// assert_eq!((bed.start(), bed.end()), (2, 4));
/// assert_eq!(vcf.length(), bed.length());
/// assert!(vcf.overlaps(&bed));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Coordinates {
    system: CoordinateSystem,
    start: i64,
    end: i64,
    precision: Precision,
}

impl Coordinates {
    /// Create coordinates, choosing the precise form when both intervals are `(0, 0)`
    ///
    /// Fails with [`FerroError::InvalidCoordinates`] when the start lies before
    /// the first base or after the end.
    pub fn of(
        system: CoordinateSystem,
        start: i64,
        start_ci: ConfidenceInterval,
        end: i64,
        end_ci: ConfidenceInterval,
    ) -> Result<Self> {
        validate(system, start, end)?;
        let precision = if start_ci.is_precise() && end_ci.is_precise() {
            Precision::Precise
        } else {
            Precision::Imprecise { start_ci, end_ci }
        };
        Ok(Self {
            system,
            start,
            end,
            precision,
        })
    }

    /// Create precise coordinates
    pub fn precise(system: CoordinateSystem, start: i64, end: i64) -> Result<Self> {
        validate(system, start, end)?;
        Ok(Self {
            system,
            start,
            end,
            precision: Precision::Precise,
        })
    }

    /// Precise coordinates already known to be well formed
    #[inline]
    pub(crate) const fn precise_unchecked(system: CoordinateSystem, start: i64, end: i64) -> Self {
        Self {
            system,
            start,
            end,
            precision: Precision::Precise,
        }
    }

    /// Start in this value's own coordinate system
    #[inline]
    pub fn start(&self) -> i64 {
        self.start
    }

    /// End in this value's own coordinate system
    #[inline]
    pub fn end(&self) -> i64 {
        self.end
    }

    pub fn start_ci(&self) -> ConfidenceInterval {
        match self.precision {
            Precision::Precise => ConfidenceInterval::precise(),
            Precision::Imprecise { start_ci, .. } => start_ci,
        }
    }

    pub fn end_ci(&self) -> ConfidenceInterval {
        match self.precision {
            Precision::Precise => ConfidenceInterval::precise(),
            Precision::Imprecise { end_ci, .. } => end_ci,
        }
    }

    #[inline]
    pub fn is_precise(&self) -> bool {
        matches!(self.precision, Precision::Precise)
    }

    pub fn start_min(&self) -> i64 {
        self.start_ci().min_pos(self.start)
    }

    pub fn start_max(&self) -> i64 {
        self.start_ci().max_pos(self.start)
    }

    pub fn end_min(&self) -> i64 {
        self.end_ci().min_pos(self.end)
    }

    pub fn end_max(&self) -> i64 {
        self.end_ci().max_pos(self.end)
    }

    /// Reflect onto the opposite strand of `contig`
    ///
    /// Start and end swap roles, as do the two confidence intervals, which
    /// are also negated. Inverting twice on the same contig returns the
    /// original value.
    pub fn invert(&self, contig: &Contig) -> Coordinates {
        let precision = match self.precision {
            Precision::Precise => Precision::Precise,
            Precision::Imprecise { start_ci, end_ci } => Precision::Imprecise {
                start_ci: end_ci.invert(),
                end_ci: start_ci.invert(),
            },
        };
        Coordinates {
            system: self.system,
            start: super::invert_position(self.system, contig, self.end),
            end: super::invert_position(self.system, contig, self.start),
            precision,
        }
    }

    /// Widen by `upstream` bases before the start and `downstream` after the end
    ///
    /// Negative values shrink the interval; the result is re-validated.
    pub fn extend(&self, upstream: i64, downstream: i64) -> Result<Coordinates> {
        if upstream == 0 && downstream == 0 {
            return Ok(*self);
        }
        let (start, end) = match (
            self.start.checked_sub(upstream),
            self.end.checked_add(downstream),
        ) {
            (Some(start), Some(end)) => (start, end),
            _ => {
                return Err(FerroError::invalid_coordinates(format!(
                    "extending {} by ({}, {}) overflows",
                    self, upstream, downstream
                )))
            }
        };
        Coordinates::of(self.system, start, self.start_ci(), end, self.end_ci())
    }

    /// Check that these coordinates fit on `contig`
    ///
    /// Empty intervals are legal right up to either end of the contig.
    pub fn validate_on(&self, contig: &Contig) -> Result<()> {
        let open = open_start(self.system, self.start);
        let closed = closed_end(self.system, self.end);
        if open < 0 || closed > contig.extent() {
            return Err(out_of_bounds(contig, self.start, self.end));
        }
        Ok(())
    }

    /// Precise coordinates covering `len` bases from `start` on `contig`
    ///
    /// A start before the first base is [`FerroError::InvalidCoordinates`];
    /// an end past the contig, including one too large to represent, is
    /// [`FerroError::CoordinatesOutOfBounds`].
    pub(crate) fn spanning(
        contig: &Contig,
        system: CoordinateSystem,
        start: i64,
        len: usize,
    ) -> Result<Coordinates> {
        let open = open_start(system, start);
        let end = i64::try_from(len).ok().and_then(|len| open.checked_add(len));
        match end {
            Some(end) if open < 0 || end <= contig.extent() => {
                let coordinates = Coordinates::precise(system, start, end)?;
                coordinates.validate_on(contig)?;
                Ok(coordinates)
            }
            Some(end) => Err(out_of_bounds(contig, start, end)),
            None => Err(out_of_bounds(contig, start, i64::MAX)),
        }
    }
}

fn out_of_bounds(contig: &Contig, start: i64, end: i64) -> FerroError {
    FerroError::CoordinatesOutOfBounds {
        contig: contig.name().to_string(),
        length: contig.length(),
        start,
        end,
    }
}

fn validate(system: CoordinateSystem, start: i64, end: i64) -> Result<()> {
    let open = open_start(system, start);
    if open < 0 {
        return Err(FerroError::invalid_coordinates(format!(
            "{} start {} lies before the first base",
            system, start
        )));
    }
    let closed = closed_end(system, end);
    if open > closed {
        return Err(FerroError::invalid_coordinates(format!(
            "{} start {} is after end {}",
            system, start, end
        )));
    }
    if closed == i64::MAX {
        return Err(FerroError::invalid_coordinates(format!(
            "{} end {} is past the last addressable position",
            system, end
        )));
    }
    Ok(())
}

impl Interval for Coordinates {
    #[inline]
    fn coordinates(&self) -> Coordinates {
        *self
    }
}

impl HasCoordinateSystem for Coordinates {
    #[inline]
    fn coordinate_system(&self) -> CoordinateSystem {
        self.system
    }

    fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        if system == self.system {
            return *self;
        }
        Coordinates {
            system,
            start: self.system.convert_start(system, self.start),
            end: self.system.convert_end(system, self.end),
            precision: self.precision,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = match self.system {
            CoordinateSystem::OneBased => '[',
            CoordinateSystem::ZeroBased => '(',
        };
        match self.precision {
            Precision::Precise => write!(f, "{}{},{}]", open, self.start, self.end),
            Precision::Imprecise { start_ci, end_ci } => write!(
                f,
                "{}{}{},{}{}]",
                open, self.start, start_ci, self.end, end_ci
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateSystem::{OneBased, ZeroBased};

    fn ci(lower: i32, upper: i32) -> ConfidenceInterval {
        ConfidenceInterval::new(lower, upper).unwrap()
    }

    #[test]
    fn test_smart_constructor_selects_precise() {
        let precise = Coordinates::of(
            OneBased,
            1,
            ConfidenceInterval::precise(),
            10,
            ConfidenceInterval::precise(),
        )
        .unwrap();
        assert!(precise.is_precise());
        assert_eq!(precise, Coordinates::precise(OneBased, 1, 10).unwrap());

        let imprecise = Coordinates::of(OneBased, 1, ci(-1, 1), 10, ConfidenceInterval::precise())
            .unwrap();
        assert!(!imprecise.is_precise());
        assert_eq!(imprecise.start_ci(), ci(-1, 1));
        assert!(imprecise.end_ci().is_precise());
    }

    #[test]
    fn test_rejects_malformed_intervals() {
        assert!(matches!(
            Coordinates::precise(OneBased, 0, 5),
            Err(FerroError::InvalidCoordinates { .. })
        ));
        assert!(Coordinates::precise(ZeroBased, -1, 5).is_err());
        assert!(Coordinates::precise(ZeroBased, 6, 5).is_err());
        assert!(Coordinates::precise(OneBased, 7, 5).is_err());
    }

    #[test]
    fn test_empty_intervals_are_legal() {
        let one = Coordinates::precise(OneBased, 6, 5).unwrap();
        let zero = Coordinates::precise(ZeroBased, 5, 5).unwrap();
        assert_eq!(one.length(), 0);
        assert_eq!(zero.length(), 0);
        assert!(one.is_empty());
        assert_eq!(one.with_coordinate_system(ZeroBased), zero);
    }

    #[test]
    fn test_start_end_with_system() {
        let coords = Coordinates::precise(OneBased, 3, 4).unwrap();
        assert_eq!(coords.start_with(ZeroBased), 2);
        assert_eq!(coords.end_with(ZeroBased), 4);
        assert_eq!(coords.open_start(), 2);
        assert_eq!(coords.closed_end(), 4);
    }

    #[test]
    fn test_invert_zero_based() {
        let contig = Contig::new(1, "1", 5);
        let coords = Coordinates::precise(ZeroBased, 2, 4).unwrap();
        let inverted = coords.invert(&contig);
        assert_eq!((inverted.start(), inverted.end()), (1, 3));
        assert_eq!(inverted.invert(&contig), coords);
    }

    #[test]
    fn test_invert_one_based() {
        let contig = Contig::new(1, "1", 5);
        let coords = Coordinates::precise(OneBased, 3, 4).unwrap();
        let inverted = coords.invert(&contig);
        assert_eq!((inverted.start(), inverted.end()), (2, 3));
        assert_eq!(inverted.invert(&contig), coords);
    }

    #[test]
    fn test_invert_swaps_confidence_intervals() {
        let contig = Contig::new(1, "1", 100);
        let coords = Coordinates::of(OneBased, 10, ci(-5, 2), 20, ci(-1, 8)).unwrap();
        let inverted = coords.invert(&contig);
        assert_eq!(inverted.start_ci(), ci(-8, 1));
        assert_eq!(inverted.end_ci(), ci(-2, 5));
        assert_eq!(inverted.invert(&contig), coords);
    }

    #[test]
    fn test_extend() {
        let coords = Coordinates::precise(OneBased, 10, 20).unwrap();
        assert_eq!(coords.extend(0, 0).unwrap(), coords);
        let padded = coords.extend(5, 3).unwrap();
        assert_eq!((padded.start(), padded.end()), (5, 23));
        assert!(coords.extend(10, 0).is_err());
    }

    #[test]
    fn test_validate_on_contig() {
        let contig = Contig::new(1, "1", 10);
        assert!(Coordinates::precise(OneBased, 1, 10)
            .unwrap()
            .validate_on(&contig)
            .is_ok());
        // insertion point after the last base
        assert!(Coordinates::precise(OneBased, 11, 10)
            .unwrap()
            .validate_on(&contig)
            .is_ok());
        let err = Coordinates::precise(OneBased, 5, 11)
            .unwrap()
            .validate_on(&contig)
            .unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_extreme_positions_are_errors() {
        assert!(matches!(
            Coordinates::precise(OneBased, i64::MIN, 0),
            Err(FerroError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            Coordinates::precise(ZeroBased, 0, i64::MAX),
            Err(FerroError::InvalidCoordinates { .. })
        ));
        let near_end = Coordinates::precise(ZeroBased, i64::MAX - 1, i64::MAX - 1).unwrap();
        let one = near_end.with_coordinate_system(OneBased);
        assert_eq!((one.start(), one.end()), (i64::MAX, i64::MAX - 1));

        let coords = Coordinates::precise(OneBased, 10, 20).unwrap();
        assert!(matches!(
            coords.extend(i64::MIN, 0),
            Err(FerroError::InvalidCoordinates { .. })
        ));
        assert!(matches!(
            coords.extend(0, i64::MAX),
            Err(FerroError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_spanning() {
        let contig = Contig::new(1, "1", 10);
        let coords = Coordinates::spanning(&contig, OneBased, 9, 2).unwrap();
        assert_eq!((coords.start(), coords.end()), (9, 10));
        assert!(Coordinates::spanning(&contig, OneBased, 10, 2)
            .unwrap_err()
            .is_out_of_bounds());
        assert!(Coordinates::spanning(&contig, ZeroBased, i64::MAX, 2)
            .unwrap_err()
            .is_out_of_bounds());
        assert!(Coordinates::spanning(&contig, ZeroBased, i64::MAX, 0)
            .unwrap_err()
            .is_out_of_bounds());
        assert!(matches!(
            Coordinates::spanning(&contig, OneBased, i64::MIN, 2),
            Err(FerroError::InvalidCoordinates { .. })
        ));
    }

    #[test]
    fn test_invert_on_huge_contig() {
        let contig = Contig::new(1, "1", u64::MAX);
        let coords = Coordinates::precise(OneBased, 1, 10).unwrap();
        assert_eq!(coords.invert(&contig).invert(&contig), coords);
        assert!(coords.validate_on(&contig).is_ok());
    }

    #[test]
    fn test_min_max_positions() {
        let coords = Coordinates::of(OneBased, 10, ci(-5, 2), 20, ci(-1, 8)).unwrap();
        assert_eq!(coords.start_min(), 5);
        assert_eq!(coords.start_max(), 12);
        assert_eq!(coords.end_min(), 19);
        assert_eq!(coords.end_max(), 28);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Coordinates::precise(OneBased, 3, 4).unwrap().to_string(),
            "[3,4]"
        );
        assert_eq!(
            Coordinates::precise(ZeroBased, 2, 4).unwrap().to_string(),
            "(2,4]"
        );
        let imprecise = Coordinates::of(OneBased, 3, ci(-1, 1), 4, ConfidenceInterval::precise())
            .unwrap();
        assert_eq!(imprecise.to_string(), "[3(-1,1),4(0,0)]");
    }
}
