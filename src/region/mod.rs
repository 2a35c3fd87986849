//! Capability traits for positioned values and the concrete [`Region`]
//!
//! Positioned values are described by three small, independent traits:
//!
//! - [`Interval`]: has coordinates, so has a start, end and length and can
//!   be compared with other intervals
//! - [`HasCoordinateSystem`]: can be re-expressed in another coordinate system
//! - [`Stranded`]: lies on a strand and can be flipped onto the other one
//!
//! [`GenomicRegion`] composes all three with a [`Contig`], which is what
//! strand flipping needs and what makes cross-strand comparison possible.

mod genomic;

pub use genomic::Region;

use crate::contig::Contig;
use crate::coords::{self, CoordinateSystem, Coordinates};
use crate::error::FerroError;
use crate::strand::Strand;
use crate::Result;

/// A value that occupies an interval
///
/// All comparisons normalize both operands first, so intervals in different
/// coordinate systems compare correctly. They do not know about strands;
/// use [`GenomicRegion`] for that.
pub trait Interval {
    /// The coordinates of this value in its own coordinate system
    fn coordinates(&self) -> Coordinates;

    fn start(&self) -> i64 {
        self.coordinates().start()
    }

    fn end(&self) -> i64 {
        self.coordinates().end()
    }

    /// Start re-expressed in `system`
    fn start_with(&self, system: CoordinateSystem) -> i64 {
        let c = self.coordinates();
        c.coordinate_system().convert_start(system, c.start())
    }

    /// End re-expressed in `system`
    fn end_with(&self, system: CoordinateSystem) -> i64 {
        let c = self.coordinates();
        c.coordinate_system().convert_end(system, c.end())
    }

    /// 0-based start
    fn open_start(&self) -> i64 {
        self.start_with(CoordinateSystem::ZeroBased)
    }

    /// End as a closed boundary
    fn closed_end(&self) -> i64 {
        self.end_with(CoordinateSystem::ZeroBased)
    }

    /// Number of bases covered; never negative
    fn length(&self) -> i64 {
        let c = self.coordinates();
        coords::length(c.coordinate_system(), c.start(), c.end())
    }

    /// True for an insertion point between two bases
    fn is_empty(&self) -> bool {
        self.length() == 0
    }

    fn overlaps<I: Interval + ?Sized>(&self, other: &I) -> bool {
        let a = self.coordinates();
        let b = other.coordinates();
        coords::overlap(
            a.coordinate_system(),
            a.start(),
            a.end(),
            b.coordinate_system(),
            b.start(),
            b.end(),
        )
    }

    fn contains<I: Interval + ?Sized>(&self, other: &I) -> bool {
        let a = self.coordinates();
        let b = other.coordinates();
        coords::contains(
            a.coordinate_system(),
            a.start(),
            a.end(),
            b.coordinate_system(),
            b.start(),
            b.end(),
        )
    }

    /// Signed gap to `other`: positive downstream, negative upstream, zero when touching
    fn distance_to<I: Interval + ?Sized>(&self, other: &I) -> i64 {
        let a = self.coordinates();
        let b = other.coordinates();
        coords::distance(
            a.coordinate_system(),
            a.start(),
            a.end(),
            b.coordinate_system(),
            b.start(),
            b.end(),
        )
    }
}

/// A value that can be re-expressed in another coordinate system
pub trait HasCoordinateSystem {
    fn coordinate_system(&self) -> CoordinateSystem;

    /// The same value in `system`; returns an equal value when already there
    fn with_coordinate_system(&self, system: CoordinateSystem) -> Self
    where
        Self: Sized;

    fn to_zero_based(&self) -> Self
    where
        Self: Sized,
    {
        self.with_coordinate_system(CoordinateSystem::ZeroBased)
    }

    fn to_one_based(&self) -> Self
    where
        Self: Sized,
    {
        self.with_coordinate_system(CoordinateSystem::OneBased)
    }

    fn is_zero_based(&self) -> bool {
        self.coordinate_system().is_zero_based()
    }

    fn is_one_based(&self) -> bool {
        self.coordinate_system().is_one_based()
    }
}

/// A value that lies on a strand
pub trait Stranded {
    fn strand(&self) -> Strand;

    /// The same value seen from `strand`; returns an equal value when already there
    fn with_strand(&self, strand: Strand) -> Self
    where
        Self: Sized;

    fn to_opposite_strand(&self) -> Self
    where
        Self: Sized,
    {
        self.with_strand(self.strand().opposite())
    }

    fn to_positive_strand(&self) -> Self
    where
        Self: Sized,
    {
        self.with_strand(Strand::Positive)
    }

    fn to_negative_strand(&self) -> Self
    where
        Self: Sized,
    {
        self.with_strand(Strand::Negative)
    }
}

/// An interval on a stranded contig
///
/// Comparisons bring `other` onto this region's strand before delegating to
/// the [`Interval`] algebra, so regions on different strands and in
/// different coordinate systems compare correctly.
pub trait GenomicRegion: Interval + HasCoordinateSystem + Stranded {
    fn contig(&self) -> &Contig;

    fn contig_id(&self) -> u32 {
        self.contig().id()
    }

    /// Coordinates of this region as seen from `strand`
    fn coordinates_on_strand(&self, strand: Strand) -> Coordinates {
        if strand == self.strand() {
            self.coordinates()
        } else {
            self.coordinates().invert(self.contig())
        }
    }

    fn start_on_strand(&self, strand: Strand) -> i64 {
        self.coordinates_on_strand(strand).start()
    }

    fn end_on_strand(&self, strand: Strand) -> i64 {
        self.coordinates_on_strand(strand).end()
    }

    /// Whether the regions share a contig and overlap on it
    fn overlaps_with<R: GenomicRegion + ?Sized>(&self, other: &R) -> bool {
        self.contig_id() == other.contig_id()
            && self
                .coordinates()
                .overlaps(&other.coordinates_on_strand(self.strand()))
    }

    /// Whether `other` lies entirely within this region
    fn contains_region<R: GenomicRegion + ?Sized>(&self, other: &R) -> bool {
        self.contig_id() == other.contig_id()
            && self
                .coordinates()
                .contains(&other.coordinates_on_strand(self.strand()))
    }

    /// Whether a single position on `strand` in `system` lies within this region
    fn contains_position(&self, strand: Strand, system: CoordinateSystem, pos: i64) -> bool {
        let open = coords::open_start(system, pos);
        let Some(closed) = open.checked_add(1) else {
            return false;
        };
        let point = match Coordinates::precise(CoordinateSystem::ZeroBased, open, closed) {
            Ok(point) if strand == self.strand() => point,
            Ok(point) => point.invert(self.contig()),
            Err(_) => return false,
        };
        self.coordinates().contains(&point)
    }

    /// Signed distance to `other`, measured on this region's strand
    ///
    /// Fails with [`FerroError::ContigMismatch`] when the regions are on
    /// different contigs.
    fn distance_to_region<R: GenomicRegion + ?Sized>(&self, other: &R) -> Result<i64> {
        if self.contig_id() != other.contig_id() {
            return Err(FerroError::ContigMismatch {
                expected: self.contig().name().to_string(),
                found: other.contig().name().to_string(),
            });
        }
        Ok(self
            .coordinates()
            .distance_to(&other.coordinates_on_strand(self.strand())))
    }
}
