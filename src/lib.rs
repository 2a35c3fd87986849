// Copyright (c) 2024-2025 Fulcrum Genomics LLC
// SPDX-License-Identifier: MIT

//! ferro-coords: coordinate-system algebra and compact variants
//!
//! Part of the ferro bioinformatics toolkit.
//!
//! VCF, BED, GFF and HGVS disagree on whether the first base is numbered
//! 0 or 1 and on whether interval ends are open or closed. This crate lets
//! regions and variants expressed in either system and on either strand be
//! compared directly, and packs short sequence variants into a single word.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use ferro_coords::{
//!     Contig, CoordinateSystem, GenomicRegion, GenomicVariant, Region, Strand, Variant,
//!     VariantType,
//! };
//!
//! let chr1 = Arc::new(Contig::new(1, "1", 1_000));
//!
//! // A VCF deletion and a BED interval on the opposite strand
//! let del = GenomicVariant::of(Arc::clone(&chr1), None, Strand::Positive, CoordinateSystem::OneBased, 100, "AGT", "A").unwrap();
//! let bed = Region::precise(chr1, Strand::Negative, CoordinateSystem::ZeroBased, 898, 900).unwrap();
//!
//! assert_eq!(del.variant_type(), VariantType::Del);
//! assert!(del.overlaps_with(&bed));
//! ```

pub mod config;
pub mod contig;
pub mod coords;
pub mod error;
pub mod region;
pub mod strand;
pub mod variant;

// Re-export commonly used types
pub use config::{ConfigError, FerroConfig, VariantConfig};
pub use contig::Contig;
pub use coords::{Bound, ConfidenceInterval, CoordinateSystem, Coordinates};
pub use error::{AlleleKind, Diagnostic, ErrorCode, FerroError, SourceSpan};
pub use region::{GenomicRegion, HasCoordinateSystem, Interval, Region, Stranded};
pub use strand::Strand;
pub use variant::{
    CompactVariant, GenomicVariant, HeapVariant, Variant, VariantBuilder, VariantType, MAX_BASES,
};

/// Result type alias for ferro-coords operations
pub type Result<T> = std::result::Result<T, FerroError>;
