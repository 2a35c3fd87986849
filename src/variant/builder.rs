//! Staged construction of variants from partial information
//!
//! Fields are collected with chained setters and nothing is checked until
//! [`VariantBuilder::build`], which derives whatever was left out (end,
//! change length, representation) and validates the rest in one place.

use super::{alleles, GenomicVariant, HeapVariant, VariantType};
use crate::config::VariantConfig;
use crate::contig::Contig;
use crate::coords::{self, ConfidenceInterval, CoordinateSystem, Coordinates};
use crate::error::FerroError;
use crate::region::Interval;
use crate::strand::Strand;
use crate::Result;
use std::sync::Arc;

/// Builder for [`GenomicVariant`]
///
/// Defaults: positive strand, one-based coordinates, precise positions,
/// empty alleles and compact packing where possible.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ferro_coords::{Contig, Interval, Variant, VariantBuilder, VariantType};
///
/// let contig = Arc::new(Contig::new(1, "1", 1_000));
/// let del = VariantBuilder::new()
///     .contig(Arc::clone(&contig))
///     .start(5)
///     .ref_allele("AG")
///     .alt_allele("A")
///     .build()
///     .unwrap();
/// assert_eq!(del.end(), 6);
/// assert_eq!(del.change_length(), -1);
/// assert_eq!(del.variant_type(), VariantType::Del);
///
/// let sv = VariantBuilder::new()
///     .contig(contig)
///     .start(100)
///     .end(200)
///     .ref_allele("A")
///     .alt_allele("<DEL>")
///     .build()
///     .unwrap();
/// assert_eq!(sv.change_length(), -100);
/// ```
#[derive(Debug, Clone)]
pub struct VariantBuilder {
    contig: Option<Arc<Contig>>,
    id: Option<String>,
    strand: Strand,
    system: CoordinateSystem,
    start: Option<i64>,
    end: Option<i64>,
    change_length: Option<i64>,
    start_ci: ConfidenceInterval,
    end_ci: ConfidenceInterval,
    ref_allele: String,
    alt_allele: String,
    compact: bool,
}

impl Default for VariantBuilder {
    fn default() -> Self {
        Self {
            contig: None,
            id: None,
            strand: Strand::Positive,
            system: CoordinateSystem::OneBased,
            start: None,
            end: None,
            change_length: None,
            start_ci: ConfidenceInterval::precise(),
            end_ci: ConfidenceInterval::precise(),
            ref_allele: String::new(),
            alt_allele: String::new(),
            compact: true,
        }
    }
}

impl VariantBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from configured defaults for coordinate system and packing
    pub fn from_config(config: &VariantConfig) -> Self {
        Self {
            system: config.coordinate_system,
            compact: config.compact,
            ..Self::default()
        }
    }

    pub fn contig(mut self, contig: Arc<Contig>) -> Self {
        self.contig = Some(contig);
        self
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn strand(mut self, strand: Strand) -> Self {
        self.strand = strand;
        self
    }

    pub fn coordinate_system(mut self, system: CoordinateSystem) -> Self {
        self.system = system;
        self
    }

    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    /// End position; derived from the reference allele when not given
    pub fn end(mut self, end: i64) -> Self {
        self.end = Some(end);
        self
    }

    /// Change length; derived when not given, checked when it is
    pub fn change_length(mut self, change_length: i64) -> Self {
        self.change_length = Some(change_length);
        self
    }

    pub fn start_ci(mut self, ci: ConfidenceInterval) -> Self {
        self.start_ci = ci;
        self
    }

    pub fn end_ci(mut self, ci: ConfidenceInterval) -> Self {
        self.end_ci = ci;
        self
    }

    pub fn ref_allele(mut self, allele: impl Into<String>) -> Self {
        self.ref_allele = allele.into();
        self
    }

    pub fn alt_allele(mut self, allele: impl Into<String>) -> Self {
        self.alt_allele = allele.into();
        self
    }

    /// Whether eligible variants may use the packed representation
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = compact;
        self
    }

    /// Validate the collected fields and build the variant
    ///
    /// Sequence variants take their end and change length from the
    /// alleles; a supplied end or change length must agree. Symbolic
    /// variants default their end to the span of the reference allele and
    /// derive the change length for deletions, duplications and
    /// inversions; other symbolic types need it supplied. A deletion or
    /// duplication with neither an end nor a change length is incomplete.
    pub fn build(self) -> Result<GenomicVariant> {
        let contig = self
            .contig
            .ok_or(FerroError::IncompleteVariant { field: "contig" })?;
        let start = self
            .start
            .ok_or(FerroError::IncompleteVariant { field: "start" })?;
        let ref_len = self.ref_allele.len() as i64;
        let derived_end = coords::open_start(self.system, start)
            .checked_add(ref_len)
            .ok_or_else(|| FerroError::CoordinatesOutOfBounds {
                contig: contig.name().to_string(),
                length: contig.length(),
                start,
                end: i64::MAX,
            });

        if alleles::is_symbolic(&self.alt_allele) {
            let end = match self.end {
                Some(end) => end,
                None => derived_end?,
            };
            let coordinates =
                Coordinates::of(self.system, start, self.start_ci, end, self.end_ci)?;
            let change_length = match self.change_length {
                Some(c) => c,
                None => {
                    let base_type = VariantType::classify("", &self.alt_allele).base_type();
                    if self.end.is_none() && matches!(base_type, VariantType::Del | VariantType::Dup) {
                        return Err(FerroError::IncompleteVariant { field: "end" });
                    }
                    derive_symbolic_change_length(base_type, coordinates.length(), ref_len)
                        .ok_or(FerroError::IncompleteVariant {
                            field: "change_length",
                        })?
                }
            };
            return HeapVariant::symbolic(
                contig,
                self.id,
                self.strand,
                coordinates,
                self.ref_allele,
                self.alt_allele,
                change_length,
            )
            .map(GenomicVariant::Heap);
        }

        let derived_end = derived_end?;
        if let Some(end) = self.end {
            if end != derived_end {
                return Err(FerroError::invalid_coordinates(format!(
                    "end {} does not match reference allele '{}'; expected {}",
                    end, self.ref_allele, derived_end
                )));
            }
        }
        let expected = self.alt_allele.len() as i64 - ref_len;
        if let Some(given) = self.change_length {
            if given != expected {
                return Err(FerroError::ChangeLengthMismatch {
                    location: format!("{}:{}", contig, start),
                    given,
                    expected: expected.to_string(),
                });
            }
        }

        if !self.start_ci.is_precise() || !self.end_ci.is_precise() {
            let coordinates =
                Coordinates::of(self.system, start, self.start_ci, derived_end, self.end_ci)?;
            return HeapVariant::of(
                contig,
                self.id,
                self.strand,
                coordinates,
                self.ref_allele,
                self.alt_allele,
                expected,
            )
            .map(GenomicVariant::Heap);
        }

        if self.compact {
            GenomicVariant::of(
                contig,
                self.id,
                self.strand,
                self.system,
                start,
                &self.ref_allele,
                &self.alt_allele,
            )
        } else {
            HeapVariant::new(
                contig,
                self.id,
                self.strand,
                self.system,
                start,
                self.ref_allele,
                self.alt_allele,
            )
            .map(GenomicVariant::Heap)
        }
    }
}

/// Change length implied by a symbolic allele of `base_type` spanning `span` bases
///
/// The reference allele's padding bases are not part of the change.
fn derive_symbolic_change_length(base_type: VariantType, span: i64, ref_len: i64) -> Option<i64> {
    let changed = span - ref_len;
    match base_type {
        VariantType::Del => Some(-changed),
        VariantType::Dup => Some(changed),
        VariantType::Inv => Some(0),
        _ => None,
    }
}
