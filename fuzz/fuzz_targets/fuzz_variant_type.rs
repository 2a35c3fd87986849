//! Fuzz target for allele classification and variant construction
//!
//! This target splits arbitrary byte strings into a reference and an
//! alternate allele to find panics in the classifier or the constructors.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        // Don't fuzz extremely long inputs - diminishing returns
        if input.len() > 1000 {
            return;
        }

        let (ref_allele, alt_allele) = input.split_once('>').unwrap_or((input, ""));

        // Classification is total
        let variant_type = ferro_coords::VariantType::classify(ref_allele, alt_allele);
        let _ = variant_type.base_type();

        // Construction may fail but must never panic
        let contig = Arc::new(ferro_coords::Contig::new(1, "1", 1_000));
        let starts = [input.len() as i64 - 1, i64::MAX, i64::MIN];
        for system in [
            ferro_coords::CoordinateSystem::OneBased,
            ferro_coords::CoordinateSystem::ZeroBased,
        ] {
            for start in starts {
                let _ = ferro_coords::CompactVariant::try_new(
                    Arc::clone(&contig),
                    None,
                    ferro_coords::Strand::Positive,
                    system,
                    start,
                    ref_allele,
                    alt_allele,
                );
                let _ = ferro_coords::VariantBuilder::new()
                    .contig(Arc::clone(&contig))
                    .coordinate_system(system)
                    .start(start)
                    .ref_allele(ref_allele)
                    .alt_allele(alt_allele)
                    .build();
            }
        }
    }
});
