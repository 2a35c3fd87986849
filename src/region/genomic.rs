//! A plain stranded region on a contig

use super::{GenomicRegion, HasCoordinateSystem, Interval, Stranded};
use crate::contig::Contig;
use crate::coords::{CoordinateSystem, Coordinates};
use crate::strand::Strand;
use crate::Result;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Contig, strand and coordinates, validated to lie on the contig
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ferro_coords::{Contig, CoordinateSystem, GenomicRegion, Region, Strand, Stranded};
///
/// let contig = Arc::new(Contig::new(1, "1", 5));
/// let region = Region::precise(contig, Strand::Positive, CoordinateSystem::ZeroBased, 2, 4).unwrap();
/// let flipped = region.to_opposite_strand();
/// assert_eq!(flipped.start_on_strand(Strand::Negative), 1);
/// assert_eq!(flipped.end_on_strand(Strand::Negative), 3);
/// assert!(region.overlaps_with(&flipped));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Region {
    contig: Arc<Contig>,
    strand: Strand,
    coordinates: Coordinates,
}

impl Region {
    /// Create a region, failing with an out-of-bounds error if it overruns the contig
    pub fn of(contig: Arc<Contig>, strand: Strand, coordinates: Coordinates) -> Result<Self> {
        coordinates.validate_on(&contig)?;
        Ok(Self {
            contig,
            strand,
            coordinates,
        })
    }

    /// Create a region with precise coordinates
    pub fn precise(
        contig: Arc<Contig>,
        strand: Strand,
        system: CoordinateSystem,
        start: i64,
        end: i64,
    ) -> Result<Self> {
        Self::of(contig, strand, Coordinates::precise(system, start, end)?)
    }

    /// Shared handle to the contig
    pub fn contig_arc(&self) -> &Arc<Contig> {
        &self.contig
    }

    /// Widen by `upstream` bases before the start and `downstream` after the end
    pub fn with_padding(&self, upstream: i64, downstream: i64) -> Result<Self> {
        if upstream == 0 && downstream == 0 {
            return Ok(self.clone());
        }
        Self::of(
            Arc::clone(&self.contig),
            self.strand,
            self.coordinates.extend(upstream, downstream)?,
        )
    }
}

impl Interval for Region {
    #[inline]
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl HasCoordinateSystem for Region {
    fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinates.coordinate_system()
    }

    fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        Self {
            contig: Arc::clone(&self.contig),
            strand: self.strand,
            coordinates: self.coordinates.with_coordinate_system(system),
        }
    }
}

impl Stranded for Region {
    fn strand(&self) -> Strand {
        self.strand
    }

    fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        Self {
            contig: Arc::clone(&self.contig),
            strand,
            coordinates: self.coordinates.invert(&self.contig),
        }
    }
}

impl GenomicRegion for Region {
    fn contig(&self) -> &Contig {
        &self.contig
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}({})", self.contig, self.coordinates, self.strand)
    }
}
