//! General heap-backed variant representation
//!
//! Holds any variant: long or IUPAC sequence alleles, symbolic and
//! breakend alternates, and imprecise coordinates.

use super::{alleles, Variant, VariantType};
use crate::contig::Contig;
use crate::coords::{CoordinateSystem, Coordinates};
use crate::error::{AlleleKind, FerroError};
use crate::region::{GenomicRegion, HasCoordinateSystem, Interval, Stranded};
use crate::strand::Strand;
use crate::Result;
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// A variant with its alleles stored as strings
///
/// Like [`CompactVariant`](super::CompactVariant), the identifier does not
/// take part in equality or hashing.
#[derive(Debug, Clone, Serialize)]
pub struct HeapVariant {
    contig: Arc<Contig>,
    id: Option<String>,
    strand: Strand,
    coordinates: Coordinates,
    #[serde(rename = "ref")]
    ref_allele: String,
    #[serde(rename = "alt")]
    alt_allele: String,
    change_length: i64,
    variant_type: VariantType,
}

impl HeapVariant {
    /// Create a sequence variant, deriving its end and change length from the alleles
    pub fn new(
        contig: Arc<Contig>,
        id: Option<String>,
        strand: Strand,
        system: CoordinateSystem,
        start: i64,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
    ) -> Result<Self> {
        let ref_allele = ref_allele.into();
        let alt_allele = alt_allele.into();
        if alleles::is_symbolic(&alt_allele) {
            return Err(FerroError::invalid_allele(
                AlleleKind::Alt,
                &alt_allele,
                "symbolic alleles need an explicit end and change length",
            ));
        }
        let coordinates = Coordinates::spanning(&contig, system, start, ref_allele.len())?;
        let change_length = alt_allele.len() as i64 - ref_allele.len() as i64;
        Self::of(
            contig,
            id,
            strand,
            coordinates,
            ref_allele,
            alt_allele,
            change_length,
        )
    }

    /// Create a variant with a symbolic, breakend or missing alternate allele
    pub fn symbolic(
        contig: Arc<Contig>,
        id: Option<String>,
        strand: Strand,
        coordinates: Coordinates,
        ref_allele: impl Into<String>,
        alt_allele: impl Into<String>,
        change_length: i64,
    ) -> Result<Self> {
        let alt_allele = alt_allele.into();
        alleles::validate_symbolic(&alt_allele)?;
        Self::of(
            contig,
            id,
            strand,
            coordinates,
            ref_allele.into(),
            alt_allele,
            change_length,
        )
    }

    /// Create a variant from fully specified parts, checking they agree
    ///
    /// - the reference allele must be `[ACGTNacgtn]*`
    /// - a sequence alternate must be `[ACGTNacgtn]*`, the coordinates must
    ///   span the reference allele and `change_length` must be
    ///   `len(alt) - len(ref)`
    /// - a symbolic alternate must have a negative change length for
    ///   deletions, positive for insertions and duplications and zero for
    ///   inversions
    /// - the coordinates must lie on the contig
    pub fn of(
        contig: Arc<Contig>,
        id: Option<String>,
        strand: Strand,
        coordinates: Coordinates,
        ref_allele: String,
        alt_allele: String,
        change_length: i64,
    ) -> Result<Self> {
        alleles::validate_sequence(AlleleKind::Ref, &ref_allele)?;
        let variant_type = VariantType::classify(&ref_allele, &alt_allele);

        if alleles::is_symbolic(&alt_allele) {
            let expected = match variant_type.base_type() {
                VariantType::Del if change_length >= 0 => Some("< 0"),
                VariantType::Ins | VariantType::Dup if change_length <= 0 => Some("> 0"),
                VariantType::Inv if change_length != 0 => Some("0"),
                _ => None,
            };
            if let Some(expected) = expected {
                return Err(FerroError::ChangeLengthMismatch {
                    location: format!("{}:{}", contig, coordinates),
                    given: change_length,
                    expected: format!("{} for {}", expected, variant_type),
                });
            }
        } else {
            alleles::validate_sequence(AlleleKind::Alt, &alt_allele)?;
            if coordinates.length() != ref_allele.len() as i64 {
                return Err(FerroError::invalid_coordinates(format!(
                    "{} spans {} bases but reference allele '{}' has {}",
                    coordinates,
                    coordinates.length(),
                    ref_allele,
                    ref_allele.len()
                )));
            }
            let expected = alt_allele.len() as i64 - ref_allele.len() as i64;
            if change_length != expected {
                return Err(FerroError::ChangeLengthMismatch {
                    location: format!("{}:{}", contig, coordinates),
                    given: change_length,
                    expected: expected.to_string(),
                });
            }
        }

        coordinates.validate_on(&contig)?;

        Ok(Self {
            contig,
            id,
            strand,
            coordinates,
            ref_allele,
            alt_allele,
            change_length,
            variant_type,
        })
    }

    pub fn contig_arc(&self) -> &Arc<Contig> {
        &self.contig
    }
}

impl From<&super::CompactVariant> for HeapVariant {
    fn from(v: &super::CompactVariant) -> Self {
        Self {
            contig: Arc::clone(v.contig_arc()),
            id: v.id().map(str::to_string),
            strand: v.strand(),
            coordinates: v.coordinates(),
            ref_allele: v.ref_allele().into_owned(),
            alt_allele: v.alt_allele().into_owned(),
            change_length: v.change_length(),
            variant_type: v.variant_type(),
        }
    }
}

impl Interval for HeapVariant {
    #[inline]
    fn coordinates(&self) -> Coordinates {
        self.coordinates
    }
}

impl HasCoordinateSystem for HeapVariant {
    fn coordinate_system(&self) -> CoordinateSystem {
        self.coordinates.coordinate_system()
    }

    fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        Self {
            coordinates: self.coordinates.with_coordinate_system(system),
            ..self.clone()
        }
    }
}

impl Stranded for HeapVariant {
    fn strand(&self) -> Strand {
        self.strand
    }

    /// Invert the coordinates and reverse-complement the sequence alleles
    ///
    /// Symbolic alternates are left as they are.
    fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        let alt_allele = if alleles::is_symbolic(&self.alt_allele) {
            self.alt_allele.clone()
        } else {
            alleles::reverse_complement(&self.alt_allele)
        };
        Self {
            contig: Arc::clone(&self.contig),
            id: self.id.clone(),
            strand,
            coordinates: self.coordinates.invert(&self.contig),
            ref_allele: alleles::reverse_complement(&self.ref_allele),
            alt_allele,
            change_length: self.change_length,
            variant_type: self.variant_type,
        }
    }
}

impl GenomicRegion for HeapVariant {
    fn contig(&self) -> &Contig {
        &self.contig
    }
}

impl Variant for HeapVariant {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn ref_allele(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.ref_allele)
    }

    fn alt_allele(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.alt_allele)
    }

    fn change_length(&self) -> i64 {
        self.change_length
    }

    fn variant_type(&self) -> VariantType {
        self.variant_type
    }
}

impl PartialEq for HeapVariant {
    fn eq(&self, other: &Self) -> bool {
        self.contig.id() == other.contig.id()
            && self.strand == other.strand
            && self.coordinates == other.coordinates
            && self.ref_allele == other.ref_allele
            && self.alt_allele == other.alt_allele
            && self.change_length == other.change_length
            && self.variant_type == other.variant_type
    }
}

impl Eq for HeapVariant {}

impl Hash for HeapVariant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contig.id().hash(state);
        self.strand.hash(state);
        self.coordinates.hash(state);
        self.ref_allele.hash(state);
        self.alt_allele.hash(state);
    }
}

impl fmt::Display for HeapVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_variant(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::CoordinateSystem::{OneBased, ZeroBased};
    use crate::coords::ConfidenceInterval;
    use crate::error::ErrorCode;

    fn contig() -> Arc<Contig> {
        Arc::new(Contig::new(7, "chr7", 1000))
    }

    fn precise(system: CoordinateSystem, start: i64, end: i64) -> Coordinates {
        Coordinates::precise(system, start, end).unwrap()
    }

    #[test]
    fn test_sequence_variant_derives_end_and_change_length() {
        let v = HeapVariant::new(contig(), None, Strand::Positive, OneBased, 5, "AG", "A").unwrap();
        assert_eq!((v.start(), v.end()), (5, 6));
        assert_eq!(v.change_length(), -1);
        assert_eq!(v.variant_type(), VariantType::Del);
        assert!(!v.is_symbolic());
    }

    #[test]
    fn test_extreme_starts() {
        let err = HeapVariant::new(contig(), None, Strand::Positive, ZeroBased, i64::MAX, "AC", "A")
            .unwrap_err();
        assert!(err.is_out_of_bounds());
        let err = HeapVariant::new(contig(), None, Strand::Positive, OneBased, i64::MAX, "", "A")
            .unwrap_err();
        assert!(err.is_out_of_bounds());
        let err = HeapVariant::new(contig(), None, Strand::Positive, OneBased, i64::MIN, "AC", "A")
            .unwrap_err();
        assert!(matches!(err, FerroError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_long_iupac_alleles() {
        let v = HeapVariant::new(contig(), None, Strand::Positive, ZeroBased, 100, "ACGTNACGTNACGT", "A")
            .unwrap();
        assert_eq!(v.length(), 14);
        assert_eq!(v.change_length(), -13);
    }

    #[test]
    fn test_rejects_bad_bases() {
        let err = HeapVariant::new(contig(), None, Strand::Positive, OneBased, 5, "AX", "A")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidBase);
        assert!(matches!(
            err,
            FerroError::InvalidAllele {
                allele: AlleleKind::Ref,
                ..
            }
        ));
    }

    #[test]
    fn test_new_rejects_symbolic_alt() {
        let err = HeapVariant::new(contig(), None, Strand::Positive, OneBased, 5, "A", "<DEL>")
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidSymbolicAllele);
    }

    #[test]
    fn test_change_length_mismatch() {
        let err = HeapVariant::of(
            contig(),
            None,
            Strand::Positive,
            precise(OneBased, 5, 6),
            "AG".to_string(),
            "A".to_string(),
            2,
        )
        .unwrap_err();
        match err {
            FerroError::ChangeLengthMismatch {
                location,
                given,
                expected,
            } => {
                assert_eq!(location, "chr7:[5,6]");
                assert_eq!(given, 2);
                assert_eq!(expected, "-1");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_coordinates_must_span_reference() {
        let err = HeapVariant::of(
            contig(),
            None,
            Strand::Positive,
            precise(OneBased, 5, 9),
            "AG".to_string(),
            "A".to_string(),
            -1,
        )
        .unwrap_err();
        assert!(matches!(err, FerroError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_symbolic_change_length_sign() {
        let coords = precise(OneBased, 100, 200);
        let del = HeapVariant::symbolic(contig(), None, Strand::Positive, coords, "A", "<DEL>", -100)
            .unwrap();
        assert_eq!(del.variant_type(), VariantType::Del);
        assert!(del.is_symbolic());

        for (alt, change) in [("<DEL:ME:ALU>", 100), ("<INS>", -5), ("<DUP>", 0), ("<INV>", 3)] {
            let err = HeapVariant::symbolic(contig(), None, Strand::Positive, coords, "A", alt, change)
                .unwrap_err();
            assert!(
                matches!(err, FerroError::ChangeLengthMismatch { .. }),
                "{} {}",
                alt,
                change
            );
        }

        let cnv = HeapVariant::symbolic(contig(), None, Strand::Positive, coords, "A", "<CNV>", 0);
        assert!(cnv.is_ok());
    }

    #[test]
    fn test_symbolic_requires_symbolic_alt() {
        let coords = precise(OneBased, 100, 100);
        assert!(HeapVariant::symbolic(contig(), None, Strand::Positive, coords, "A", "G", 0).is_err());
    }

    #[test]
    fn test_breakend() {
        let coords = precise(OneBased, 100, 100);
        let bnd = HeapVariant::symbolic(contig(), None, Strand::Positive, coords, "G", "G]17:198982]", 0)
            .unwrap();
        assert!(bnd.is_breakend());
        assert_eq!(bnd.variant_type(), VariantType::Bnd);
    }

    #[test]
    fn test_out_of_bounds() {
        let err = HeapVariant::new(contig(), None, Strand::Positive, OneBased, 1000, "AC", "A")
            .unwrap_err();
        assert!(err.is_out_of_bounds());
    }

    #[test]
    fn test_strand_flip_preserves_case_and_symbolic_alt() {
        let v = HeapVariant::new(contig(), None, Strand::Positive, OneBased, 10, "acGT", "aN").unwrap();
        let flipped = v.to_opposite_strand();
        assert_eq!(flipped.ref_allele(), "ACgt");
        assert_eq!(flipped.alt_allele(), "Nt");
        assert_eq!(flipped.to_opposite_strand(), v);

        let ci = ConfidenceInterval::new(-10, 5).unwrap();
        let coords = Coordinates::of(OneBased, 100, ci, 200, ConfidenceInterval::precise()).unwrap();
        let sv = HeapVariant::symbolic(contig(), None, Strand::Positive, coords, "A", "<DEL>", -100)
            .unwrap();
        let flipped = sv.to_opposite_strand();
        assert_eq!(flipped.alt_allele(), "<DEL>");
        assert_eq!(flipped.ref_allele(), "T");
        assert_eq!(flipped.coordinates().end_ci(), ci.invert());
        assert_eq!(flipped.to_opposite_strand(), sv);
    }

    #[test]
    fn test_id_excluded_from_equality() {
        let a = HeapVariant::new(contig(), Some("a".into()), Strand::Positive, OneBased, 5, "A", "N").unwrap();
        let b = HeapVariant::new(contig(), Some("b".into()), Strand::Positive, OneBased, 5, "A", "N").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize() {
        let v = HeapVariant::new(contig(), Some("rs1".into()), Strand::Negative, OneBased, 5, "A", "C")
            .unwrap();
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(json["ref"], "A");
        assert_eq!(json["alt"], "C");
        assert_eq!(json["strand"], "-");
        assert_eq!(json["variant_type"], "SNV");
        assert_eq!(json["contig"]["name"], "chr7");
    }
}
