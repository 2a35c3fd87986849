//! Sequence and structural variants
//!
//! A variant is a [`GenomicRegion`] with reference and alternate alleles.
//! Two representations implement the [`Variant`] contract:
//!
//! - [`CompactVariant`]: short precise `ACGT` changes packed into one word
//! - [`HeapVariant`]: everything else
//!
//! [`GenomicVariant`] wraps either one and is what [`GenomicVariant::of`]
//! and [`VariantBuilder`] hand back, so callers never branch on the
//! representation.

pub mod alleles;
mod builder;
mod compact;
mod heap;
mod variant_type;

pub use builder::VariantBuilder;
pub use compact::{CompactVariant, MAX_BASES};
pub use heap::HeapVariant;
pub use variant_type::VariantType;

use crate::contig::Contig;
use crate::coords::{CoordinateSystem, Coordinates};
use crate::region::{GenomicRegion, HasCoordinateSystem, Interval, Stranded};
use crate::strand::Strand;
use crate::Result;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A change from a reference allele to an alternate allele on a contig
pub trait Variant: GenomicRegion {
    /// Record identifier, such as a dbSNP id; never part of equality
    fn id(&self) -> Option<&str>;

    fn ref_allele(&self) -> Cow<'_, str>;

    fn alt_allele(&self) -> Cow<'_, str>;

    /// Signed change in sequence length: negative for deletions
    fn change_length(&self) -> i64;

    fn variant_type(&self) -> VariantType;

    fn is_symbolic(&self) -> bool {
        alleles::is_symbolic(&self.alt_allele())
    }

    fn is_breakend(&self) -> bool {
        let alt = self.alt_allele();
        alleles::is_breakend(&alt) || alleles::is_single_breakend(&alt)
    }
}

/// `contig:start-end(strand) ref>alt`
pub(crate) fn fmt_variant<V: Variant>(v: &V, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
        f,
        "{}:{}-{}({}) {}>{}",
        v.contig(),
        v.start(),
        v.end(),
        v.strand(),
        v.ref_allele(),
        v.alt_allele()
    )
}

/// A variant in whichever representation suits it
///
/// Equality and hashing look through the representation: a variant packed
/// into a [`CompactVariant`] equals the same variant held in a
/// [`HeapVariant`]. Coordinates are compared in a common system, alleles
/// without regard to case, and the identifier is ignored.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ferro_coords::{Contig, CoordinateSystem, GenomicVariant, Strand, Variant, VariantType};
///
/// let contig = Arc::new(Contig::new(1, "1", 1_000));
/// let snv = GenomicVariant::of(Arc::clone(&contig), None, Strand::Positive, CoordinateSystem::OneBased, 5, "G", "T").unwrap();
/// assert!(snv.is_compact());
/// assert_eq!(snv.variant_type(), VariantType::Snv);
///
/// let long = GenomicVariant::of(contig, None, Strand::Positive, CoordinateSystem::OneBased, 5, "GATTACAGATTACA", "G").unwrap();
/// assert!(!long.is_compact());
/// assert_eq!(long.change_length(), -13);
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum GenomicVariant {
    Compact(CompactVariant),
    Heap(HeapVariant),
}

macro_rules! dispatch {
    ($self:ident, $v:ident => $e:expr) => {
        match $self {
            GenomicVariant::Compact($v) => $e,
            GenomicVariant::Heap($v) => $e,
        }
    };
}

macro_rules! dispatch_map {
    ($self:ident, $v:ident => $e:expr) => {
        match $self {
            GenomicVariant::Compact($v) => GenomicVariant::Compact($e),
            GenomicVariant::Heap($v) => GenomicVariant::Heap($e),
        }
    };
}

impl GenomicVariant {
    /// Create a sequence variant, packing it when it qualifies
    ///
    /// Falls back to [`HeapVariant`] for long, IUPAC or symbolic alleles.
    /// Coordinate and allele errors are reported the same either way.
    pub fn of(
        contig: Arc<Contig>,
        id: Option<String>,
        strand: Strand,
        system: CoordinateSystem,
        start: i64,
        ref_allele: &str,
        alt_allele: &str,
    ) -> Result<Self> {
        if CompactVariant::can_encode(&contig, ref_allele, alt_allele) {
            return CompactVariant::try_new(contig, id, strand, system, start, ref_allele, alt_allele)
                .map(GenomicVariant::Compact);
        }
        log::trace!(
            "{}:{} {}>{} is not compactable, using heap representation",
            contig,
            start,
            ref_allele,
            alt_allele
        );
        HeapVariant::new(contig, id, strand, system, start, ref_allele, alt_allele)
            .map(GenomicVariant::Heap)
    }

    /// Create a variant with a symbolic, breakend or missing alternate allele
    pub fn of_symbolic(
        contig: Arc<Contig>,
        id: Option<String>,
        strand: Strand,
        coordinates: Coordinates,
        ref_allele: &str,
        alt_allele: &str,
        change_length: i64,
    ) -> Result<Self> {
        HeapVariant::symbolic(
            contig,
            id,
            strand,
            coordinates,
            ref_allele,
            alt_allele,
            change_length,
        )
        .map(GenomicVariant::Heap)
    }

    pub fn is_compact(&self) -> bool {
        matches!(self, GenomicVariant::Compact(_))
    }

    /// The same variant in the general representation
    pub fn to_heap(&self) -> HeapVariant {
        match self {
            GenomicVariant::Compact(v) => HeapVariant::from(v),
            GenomicVariant::Heap(v) => v.clone(),
        }
    }

    pub fn contig_arc(&self) -> &Arc<Contig> {
        dispatch!(self, v => v.contig_arc())
    }
}

impl From<CompactVariant> for GenomicVariant {
    fn from(v: CompactVariant) -> Self {
        GenomicVariant::Compact(v)
    }
}

impl From<HeapVariant> for GenomicVariant {
    fn from(v: HeapVariant) -> Self {
        GenomicVariant::Heap(v)
    }
}

impl Interval for GenomicVariant {
    fn coordinates(&self) -> Coordinates {
        dispatch!(self, v => v.coordinates())
    }
}

impl HasCoordinateSystem for GenomicVariant {
    fn coordinate_system(&self) -> CoordinateSystem {
        dispatch!(self, v => v.coordinate_system())
    }

    fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        dispatch_map!(self, v => v.with_coordinate_system(system))
    }
}

impl Stranded for GenomicVariant {
    fn strand(&self) -> Strand {
        dispatch!(self, v => v.strand())
    }

    fn with_strand(&self, strand: Strand) -> Self {
        dispatch_map!(self, v => v.with_strand(strand))
    }
}

impl GenomicRegion for GenomicVariant {
    fn contig(&self) -> &Contig {
        dispatch!(self, v => GenomicRegion::contig(v))
    }
}

impl Variant for GenomicVariant {
    fn id(&self) -> Option<&str> {
        dispatch!(self, v => v.id())
    }

    fn ref_allele(&self) -> Cow<'_, str> {
        dispatch!(self, v => v.ref_allele())
    }

    fn alt_allele(&self) -> Cow<'_, str> {
        dispatch!(self, v => v.alt_allele())
    }

    fn change_length(&self) -> i64 {
        dispatch!(self, v => v.change_length())
    }

    fn variant_type(&self) -> VariantType {
        dispatch!(self, v => v.variant_type())
    }

    fn is_symbolic(&self) -> bool {
        dispatch!(self, v => v.is_symbolic())
    }

    fn is_breakend(&self) -> bool {
        dispatch!(self, v => v.is_breakend())
    }
}

impl PartialEq for GenomicVariant {
    fn eq(&self, other: &Self) -> bool {
        self.contig_id() == other.contig_id()
            && self.strand() == other.strand()
            && self.coordinates().to_zero_based() == other.coordinates().to_zero_based()
            && self.change_length() == other.change_length()
            && self.variant_type() == other.variant_type()
            && self.ref_allele().eq_ignore_ascii_case(&other.ref_allele())
            && self.alt_allele().eq_ignore_ascii_case(&other.alt_allele())
    }
}

impl Eq for GenomicVariant {}

impl Hash for GenomicVariant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contig_id().hash(state);
        self.strand().hash(state);
        self.coordinates().to_zero_based().hash(state);
        self.change_length().hash(state);
        self.variant_type().hash(state);
        for allele in [self.ref_allele(), self.alt_allele()] {
            allele.len().hash(state);
            for b in allele.bytes() {
                b.to_ascii_uppercase().hash(state);
            }
        }
    }
}

impl fmt::Display for GenomicVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, v => fmt::Display::fmt(v, f))
    }
}
