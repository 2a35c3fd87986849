//! Bit-packed representation of short sequence variants
//!
//! A variant whose reference and alternate alleles together hold at most
//! [`MAX_BASES`] `A`/`C`/`G`/`T` bases fits in one `u64` alongside its
//! start, strand and coordinate system:
//!
//! ```text
//!  63            32 31  28 27  24 23                     2  1   0
//! +----------------+------+------+------------------------+---+---+
//! | 0-based start  | ref  | alt  | ref bases, alt bases   | S | C |
//! | (u32)          | len  | len  | 2 bits each, MSB first | - | 1 |
//! +----------------+------+------+------------------------+---+---+
//! ```
//!
//! `S` is set for the negative strand and `C` for one-based coordinates.
//! The start is always stored 0-based, so changing coordinate system only
//! flips `C`. Unused sequence bits are zero.
//!
//! Bases are coded `A=0, C=1, G=2, T=3`, so the complement of a code is
//! `code ^ 0b11`.

use super::{alleles, Variant, VariantType};
use crate::contig::Contig;
use crate::coords::{CoordinateSystem, Coordinates};
use crate::error::FerroError;
use crate::region::{GenomicRegion, HasCoordinateSystem, Interval, Stranded};
use crate::strand::Strand;
use crate::Result;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Most bases the reference and alternate alleles may hold between them
pub const MAX_BASES: usize = 11;

const START_SHIFT: u32 = 32;
const REF_LEN_SHIFT: u32 = 28;
const ALT_LEN_SHIFT: u32 = 24;
const LEN_MASK: u64 = 0xF;
/// Shift of the first base; base `i` sits at `SEQ_SHIFT - 2 * i`
const SEQ_SHIFT: u32 = 22;
const BASE_MASK: u64 = 0b11;
const STRAND_BIT: u64 = 1 << 1;
const SYSTEM_BIT: u64 = 1;

/// Interned single-base alleles, indexed by base code
static SINGLE_BASES: [&str; 4] = ["A", "C", "G", "T"];
const CODE_TO_BASE: [u8; 4] = [b'A', b'C', b'G', b'T'];

#[inline]
fn base_code(base: u8) -> Option<u64> {
    match base.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

#[inline]
const fn base_shift(i: usize) -> u32 {
    SEQ_SHIFT - 2 * i as u32
}

/// Why a variant cannot be packed, or `None` if it can
fn ineligibility(contig: &Contig, ref_allele: &str, alt_allele: &str) -> Option<String> {
    if alleles::is_symbolic(alt_allele) {
        return Some(format!("alternate allele '{}' is symbolic", alt_allele));
    }
    let total = ref_allele.len() + alt_allele.len();
    if total > MAX_BASES {
        return Some(format!(
            "{} combined allele bases exceed the limit of {}",
            total, MAX_BASES
        ));
    }
    if !alleles::is_acgt(ref_allele) {
        return Some(format!("reference allele '{}' is not ACGT", ref_allele));
    }
    if !alleles::is_acgt(alt_allele) {
        return Some(format!("alternate allele '{}' is not ACGT", alt_allele));
    }
    if contig.length() > u32::MAX as u64 {
        return Some(format!(
            "contig {} of length {} is too long for a 32-bit start",
            contig.name(),
            contig.length()
        ));
    }
    None
}

/// A short precise sequence variant packed into one word
///
/// Equality, hashing and ordering use the contig, the packed word and the
/// variant type. The identifier is carried along but never compared, the
/// same way VCF `ID` does not distinguish otherwise identical records.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use ferro_coords::{CompactVariant, Contig, CoordinateSystem, Interval, Strand, Stranded, Variant};
///
/// let contig = Arc::new(Contig::new(1, "1", 100));
/// let v = CompactVariant::try_new(contig, None, Strand::Positive, CoordinateSystem::OneBased, 10, "ACG", "TGCCTA").unwrap();
/// assert_eq!(v.ref_allele(), "ACG");
/// assert_eq!(v.alt_allele(), "TGCCTA");
/// assert_eq!((v.start(), v.end()), (10, 12));
/// assert_eq!(v.change_length(), 3);
/// assert_eq!(v.to_opposite_strand().to_opposite_strand(), v);
/// ```
#[derive(Debug, Clone)]
pub struct CompactVariant {
    contig: Arc<Contig>,
    id: Option<String>,
    bits: u64,
    variant_type: VariantType,
}

impl CompactVariant {
    /// Whether a variant with these alleles can be packed onto `contig`
    ///
    /// Both alleles must be `A`/`C`/`G`/`T` in either case, together no more
    /// than [`MAX_BASES`] long, and the alternate must not be symbolic. The
    /// contig must be addressable with a 32-bit start.
    pub fn can_encode(contig: &Contig, ref_allele: &str, alt_allele: &str) -> bool {
        ineligibility(contig, ref_allele, alt_allele).is_none()
    }

    /// Pack a variant, failing rather than falling back
    ///
    /// Fails with [`FerroError::NotCompactable`] if the alleles do not
    /// qualify, [`FerroError::InvalidCoordinates`] if the start precedes the
    /// first base and [`FerroError::CoordinatesOutOfBounds`] if the
    /// reference allele runs past the end of the contig. Nothing is packed
    /// until every check has passed.
    pub fn try_new(
        contig: Arc<Contig>,
        id: Option<String>,
        strand: Strand,
        system: CoordinateSystem,
        start: i64,
        ref_allele: &str,
        alt_allele: &str,
    ) -> Result<Self> {
        if let Some(msg) = ineligibility(&contig, ref_allele, alt_allele) {
            return Err(FerroError::NotCompactable { msg });
        }

        let coordinates = Coordinates::spanning(&contig, system, start, ref_allele.len())?;

        let mut bits = (coordinates.open_start() as u64) << START_SHIFT
            | (ref_allele.len() as u64) << REF_LEN_SHIFT
            | (alt_allele.len() as u64) << ALT_LEN_SHIFT;
        for (i, b) in ref_allele.bytes().chain(alt_allele.bytes()).enumerate() {
            // eligibility already guarantees ACGT
            bits |= base_code(b).unwrap_or(0) << base_shift(i);
        }
        if strand.is_negative() {
            bits |= STRAND_BIT;
        }
        if system.is_one_based() {
            bits |= SYSTEM_BIT;
        }

        Ok(Self::from_bits(contig, id, bits))
    }

    fn from_bits(contig: Arc<Contig>, id: Option<String>, bits: u64) -> Self {
        let mut variant = Self {
            contig,
            id,
            bits,
            variant_type: VariantType::Unknown,
        };
        let variant_type = VariantType::classify(&variant.ref_allele(), &variant.alt_allele());
        variant.variant_type = variant_type;
        variant
    }

    /// The raw packed word
    #[inline]
    pub fn encoded(&self) -> u64 {
        self.bits
    }

    pub fn contig_arc(&self) -> &Arc<Contig> {
        &self.contig
    }

    #[inline]
    fn zero_based_start(&self) -> i64 {
        (self.bits >> START_SHIFT) as i64
    }

    #[inline]
    fn ref_len(&self) -> usize {
        ((self.bits >> REF_LEN_SHIFT) & LEN_MASK) as usize
    }

    #[inline]
    fn alt_len(&self) -> usize {
        ((self.bits >> ALT_LEN_SHIFT) & LEN_MASK) as usize
    }

    #[inline]
    fn code_at(&self, i: usize) -> u64 {
        (self.bits >> base_shift(i)) & BASE_MASK
    }

    fn decode(&self, offset: usize, len: usize) -> Cow<'_, str> {
        match len {
            0 => Cow::Borrowed(""),
            1 => Cow::Borrowed(SINGLE_BASES[self.code_at(offset) as usize]),
            _ => Cow::Owned(
                (offset..offset + len)
                    .map(|i| CODE_TO_BASE[self.code_at(i) as usize] as char)
                    .collect(),
            ),
        }
    }
}

impl Interval for CompactVariant {
    fn coordinates(&self) -> Coordinates {
        let system = self.coordinate_system();
        let open = self.zero_based_start();
        Coordinates::precise_unchecked(
            system,
            CoordinateSystem::ZeroBased.convert_start(system, open),
            open + self.ref_len() as i64,
        )
    }

    #[inline]
    fn open_start(&self) -> i64 {
        self.zero_based_start()
    }

    #[inline]
    fn length(&self) -> i64 {
        self.ref_len() as i64
    }
}

impl HasCoordinateSystem for CompactVariant {
    #[inline]
    fn coordinate_system(&self) -> CoordinateSystem {
        if self.bits & SYSTEM_BIT != 0 {
            CoordinateSystem::OneBased
        } else {
            CoordinateSystem::ZeroBased
        }
    }

    fn with_coordinate_system(&self, system: CoordinateSystem) -> Self {
        let bits = if system.is_one_based() {
            self.bits | SYSTEM_BIT
        } else {
            self.bits & !SYSTEM_BIT
        };
        Self {
            contig: Arc::clone(&self.contig),
            id: self.id.clone(),
            bits,
            variant_type: self.variant_type,
        }
    }
}

impl Stranded for CompactVariant {
    #[inline]
    fn strand(&self) -> Strand {
        if self.bits & STRAND_BIT != 0 {
            Strand::Negative
        } else {
            Strand::Positive
        }
    }

    /// Reflect the start across the contig and reverse-complement both alleles
    fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand() {
            return self.clone();
        }
        let ref_len = self.ref_len();
        let alt_len = self.alt_len();
        let open = self.contig.extent() - (self.zero_based_start() + ref_len as i64);

        let mut bits = (open as u64) << START_SHIFT
            | (self.bits & ((LEN_MASK << REF_LEN_SHIFT) | (LEN_MASK << ALT_LEN_SHIFT) | SYSTEM_BIT));
        for (offset, len) in [(0, ref_len), (ref_len, alt_len)] {
            for i in 0..len {
                let code = self.code_at(offset + len - 1 - i) ^ BASE_MASK;
                bits |= code << base_shift(offset + i);
            }
        }
        if strand.is_negative() {
            bits |= STRAND_BIT;
        }

        Self {
            contig: Arc::clone(&self.contig),
            id: self.id.clone(),
            bits,
            variant_type: self.variant_type,
        }
    }
}

impl GenomicRegion for CompactVariant {
    fn contig(&self) -> &Contig {
        &self.contig
    }
}

impl Variant for CompactVariant {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn ref_allele(&self) -> Cow<'_, str> {
        self.decode(0, self.ref_len())
    }

    fn alt_allele(&self) -> Cow<'_, str> {
        self.decode(self.ref_len(), self.alt_len())
    }

    fn change_length(&self) -> i64 {
        self.alt_len() as i64 - self.ref_len() as i64
    }

    fn variant_type(&self) -> VariantType {
        self.variant_type
    }

    fn is_symbolic(&self) -> bool {
        false
    }

    fn is_breakend(&self) -> bool {
        false
    }
}

impl PartialEq for CompactVariant {
    fn eq(&self, other: &Self) -> bool {
        self.contig.id() == other.contig.id()
            && self.bits == other.bits
            && self.variant_type == other.variant_type
    }
}

impl Eq for CompactVariant {}

impl Hash for CompactVariant {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.contig.id().hash(state);
        self.bits.hash(state);
    }
}

impl PartialOrd for CompactVariant {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CompactVariant {
    fn cmp(&self, other: &Self) -> Ordering {
        self.contig
            .id()
            .cmp(&other.contig.id())
            .then_with(|| self.bits.cmp(&other.bits))
    }
}

impl Serialize for CompactVariant {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("CompactVariant", 8)?;
        s.serialize_field("contig", self.contig.as_ref())?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("strand", &self.strand())?;
        s.serialize_field("coordinates", &self.coordinates())?;
        s.serialize_field("ref", &self.ref_allele())?;
        s.serialize_field("alt", &self.alt_allele())?;
        s.serialize_field("change_length", &self.change_length())?;
        s.serialize_field("variant_type", &self.variant_type)?;
        s.end()
    }
}

impl fmt::Display for CompactVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        super::fmt_variant(self, f)
    }
}
