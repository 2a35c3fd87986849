//! Property-based tests for the coordinate algebra and variant representations
//!
//! Intervals and variants are generated on a single contig and compared
//! across coordinate systems and strands.

use ferro_coords::coords::{self, CoordinateSystem};
use ferro_coords::{
    CompactVariant, Contig, Coordinates, GenomicRegion, GenomicVariant, HasCoordinateSystem,
    HeapVariant, Interval, Region, Strand, Stranded, Variant, VariantType,
};
use proptest::prelude::*;
use proptest::test_runner::Config as ProptestConfig;
use std::sync::Arc;

const CONTIG_LENGTH: u64 = 10_000;

fn contig() -> Arc<Contig> {
    Arc::new(Contig::new(1, "chr1", CONTIG_LENGTH))
}

// =============================================================================
// Base strategies
// =============================================================================

fn system() -> impl Strategy<Value = CoordinateSystem> {
    prop_oneof![Just(CoordinateSystem::OneBased), Just(CoordinateSystem::ZeroBased)]
}

fn strand() -> impl Strategy<Value = Strand> {
    prop_oneof![Just(Strand::Positive), Just(Strand::Negative)]
}

fn nucleotide() -> impl Strategy<Value = char> {
    prop_oneof![Just('A'), Just('C'), Just('G'), Just('T')]
}

fn sequence(max: usize) -> impl Strategy<Value = String> {
    prop::collection::vec(nucleotide(), 0..=max).prop_map(|v| v.into_iter().collect())
}

/// Zero-based open start and length of an interval that fits on the contig,
/// empty intervals included
fn span() -> impl Strategy<Value = (i64, i64)> {
    (0..CONTIG_LENGTH as i64).prop_flat_map(|open| (Just(open), 0..=(CONTIG_LENGTH as i64 - open).min(200)))
}

/// A region in any system on any strand
fn region() -> impl Strategy<Value = Region> {
    (span(), system(), strand()).prop_map(|((open, len), system, strand)| {
        let start = CoordinateSystem::ZeroBased.convert_start(system, open);
        Region::precise(contig(), strand, system, start, open + len).unwrap()
    })
}

/// Alleles that together fit the compact encoding
fn compact_alleles() -> impl Strategy<Value = (String, String)> {
    (0usize..=11).prop_flat_map(|ref_len| {
        (
            prop::collection::vec(nucleotide(), ref_len),
            prop::collection::vec(nucleotide(), 0..=(11 - ref_len)),
        )
            .prop_map(|(r, a)| (r.into_iter().collect(), a.into_iter().collect()))
    })
}

fn compact_variant() -> impl Strategy<Value = CompactVariant> {
    (compact_alleles(), 0..(CONTIG_LENGTH as i64 - 11), system(), strand()).prop_map(
        |((r, a), open, system, strand)| {
            let start = CoordinateSystem::ZeroBased.convert_start(system, open);
            CompactVariant::try_new(contig(), None, strand, system, start, &r, &a).unwrap()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    // -------------------------------------------------------------------------
    // Coordinate algebra
    // -------------------------------------------------------------------------

    /// Converting a position there and back returns it unchanged
    #[test]
    fn test_convert_round_trip(pos in -1_000i64..1_000_000, s in system(), t in system()) {
        prop_assert_eq!(t.convert_start(s, s.convert_start(t, pos)), pos);
        prop_assert_eq!(t.convert_end(s, s.convert_end(t, pos)), pos);
    }

    /// Converting coordinates preserves the bases they cover
    #[test]
    fn test_conversion_preserves_span(r in region(), t in system()) {
        let converted = r.with_coordinate_system(t);
        prop_assert_eq!(converted.open_start(), r.open_start());
        prop_assert_eq!(converted.closed_end(), r.closed_end());
        prop_assert_eq!(converted.with_coordinate_system(r.coordinate_system()), r);
    }

    /// Every constructible interval has a non-negative length
    #[test]
    fn test_length_non_negative(s in system(), start in -5i64..50, end in -5i64..50) {
        if let Ok(c) = Coordinates::precise(s, start, end) {
            prop_assert!(c.length() >= 0);
            prop_assert_eq!(c.length(), coords::length(s, start, end));
        }
    }

    /// Inverting twice on the same contig is the identity
    #[test]
    fn test_invert_involution(r in region()) {
        let c = r.coordinates();
        prop_assert_eq!(c.invert(r.contig()).invert(r.contig()), c);
        prop_assert_eq!(c.invert(r.contig()).length(), c.length());
    }

    // -------------------------------------------------------------------------
    // Regions
    // -------------------------------------------------------------------------

    /// Flipping to the opposite strand and back returns the original region
    #[test]
    fn test_region_strand_involution(r in region()) {
        prop_assert_eq!(r.with_strand(r.strand().opposite()).with_strand(r.strand()), r);
    }

    /// Changing system then strand matches changing strand then system
    #[test]
    fn test_system_and_strand_commute(r in region(), t in system()) {
        let a = r.with_coordinate_system(t).to_opposite_strand();
        let b = r.to_opposite_strand().with_coordinate_system(t);
        prop_assert_eq!(a, b);
    }

    /// Overlap does not depend on argument order, system or strand
    #[test]
    fn test_overlap_symmetry(a in region(), b in region()) {
        prop_assert_eq!(a.overlaps_with(&b), b.overlaps_with(&a));
        prop_assert_eq!(
            a.overlaps_with(&b),
            a.to_opposite_strand().overlaps_with(&b.to_zero_based())
        );
    }

    /// Distance on a common strand is antisymmetric and zero when overlapping
    #[test]
    fn test_distance_antisymmetry(a in region(), b in region()) {
        let b = b.with_strand(a.strand());
        let d = a.distance_to_region(&b).unwrap();
        prop_assert_eq!(d, -b.distance_to_region(&a).unwrap());
        if a.overlaps_with(&b) {
            prop_assert_eq!(d, 0);
        }
    }

    /// A region always contains itself seen from either strand and system
    #[test]
    fn test_contains_self(r in region(), t in system()) {
        prop_assert!(r.contains_region(&r.to_opposite_strand().with_coordinate_system(t)));
    }

    // -------------------------------------------------------------------------
    // Variants
    // -------------------------------------------------------------------------

    /// Compact accessors agree with the general representation
    #[test]
    fn test_compact_matches_heap(v in compact_variant()) {
        let heap = HeapVariant::new(
            contig(),
            None,
            v.strand(),
            v.coordinate_system(),
            v.start(),
            v.ref_allele(),
            v.alt_allele(),
        ).unwrap();
        prop_assert_eq!(v.start(), heap.start());
        prop_assert_eq!(v.end(), heap.end());
        prop_assert_eq!(v.ref_allele(), heap.ref_allele());
        prop_assert_eq!(v.alt_allele(), heap.alt_allele());
        prop_assert_eq!(v.length(), heap.length());
        prop_assert_eq!(v.change_length(), heap.change_length());
        prop_assert_eq!(v.variant_type(), heap.variant_type());
        prop_assert_eq!(HeapVariant::from(&v), heap);
    }

    /// Strand flips of both representations stay in step
    #[test]
    fn test_compact_strand_flip_matches_heap(v in compact_variant()) {
        let flipped = v.to_opposite_strand();
        let heap_flipped = HeapVariant::from(&v).to_opposite_strand();
        prop_assert_eq!(HeapVariant::from(&flipped), heap_flipped);
        prop_assert_eq!(flipped.to_opposite_strand(), v);
    }

    /// Coordinate-system changes never touch the alleles or the span
    #[test]
    fn test_compact_system_round_trip(v in compact_variant(), t in system()) {
        let converted = v.with_coordinate_system(t);
        prop_assert_eq!(converted.ref_allele(), v.ref_allele());
        prop_assert_eq!(converted.open_start(), v.open_start());
        prop_assert_eq!(converted.with_coordinate_system(v.coordinate_system()), v);
    }

    /// Representation selection never changes what a variant reports
    #[test]
    fn test_genomic_variant_of(
        r in sequence(8),
        a in sequence(8),
        open in 0i64..1_000,
        s in system(),
    ) {
        let start = CoordinateSystem::ZeroBased.convert_start(s, open);
        let v = GenomicVariant::of(contig(), None, Strand::Positive, s, start, &r, &a).unwrap();
        prop_assert_eq!(v.is_compact(), r.len() + a.len() <= 11);
        prop_assert_eq!(v.variant_type(), VariantType::classify(&r, &a));
        prop_assert_eq!(v.change_length(), a.len() as i64 - r.len() as i64);
        let heap = v.to_heap();
        prop_assert_eq!(heap.ref_allele(), r.as_str());
    }

    // -------------------------------------------------------------------------
    // Classifier
    // -------------------------------------------------------------------------

    /// Classification never panics and base types are at most one hop away
    #[test]
    fn test_classify_total(r in "\\PC{0,12}", a in "\\PC{0,12}") {
        let t = VariantType::classify(&r, &a);
        prop_assert_eq!(t.base_type().base_type(), t.base_type());
    }

    /// Reverse-complementing both alleles preserves the variant type
    #[test]
    fn test_classify_strand_invariant(r in sequence(10), a in sequence(10)) {
        let rc = |s: &str| ferro_coords::variant::alleles::reverse_complement(s);
        prop_assert_eq!(VariantType::classify(&r, &a), VariantType::classify(&rc(&r), &rc(&a)));
    }
}
