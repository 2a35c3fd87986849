//! Allele text helpers
//!
//! Alleles follow VCF 4.x conventions:
//!
//! | Form | Example |
//! |------|---------|
//! | Sequence | `ACGT`, `acgtn` |
//! | Symbolic | `<DEL>`, `<INS:ME:ALU>` |
//! | Breakend | `G]17:198982]`, `[13:123456[T` |
//! | Single breakend | `.A`, `G.` |
//! | Spanning deletion | `*` |
//! | Missing | `.` |

use crate::error::{AlleleKind, FerroError};
use crate::Result;

/// Complement of every ASCII byte; IUPAC codes map to their complements,
/// case is preserved and anything else maps to itself.
static COMPLEMENT: [u8; 256] = build_complement_table();

const fn build_complement_table() -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = i as u8;
        i += 1;
    }
    let pairs: [(u8, u8); 8] = [
        (b'A', b'T'),
        (b'C', b'G'),
        (b'R', b'Y'),
        (b'K', b'M'),
        (b'B', b'V'),
        (b'D', b'H'),
        (b'S', b'S'),
        (b'W', b'W'),
    ];
    let mut j = 0;
    while j < pairs.len() {
        let (a, b) = pairs[j];
        table[a as usize] = b;
        table[b as usize] = a;
        table[(a + 32) as usize] = b + 32;
        table[(b + 32) as usize] = a + 32;
        j += 1;
    }
    table[b'U' as usize] = b'A';
    table[b'u' as usize] = b'a';
    table
}

/// Complement of a single nucleotide byte
#[inline]
pub fn complement(base: u8) -> u8 {
    COMPLEMENT[base as usize]
}

/// Reverse complement of a nucleotide sequence, preserving case
///
/// ```
/// use ferro_coords::variant::alleles::reverse_complement;
///
/// assert_eq!(reverse_complement("TCAG"), "CTGA");
/// assert_eq!(reverse_complement("acgN"), "Ncgt");
/// ```
pub fn reverse_complement(seq: &str) -> String {
    seq.bytes().rev().map(|b| complement(b) as char).collect()
}

/// `<TOKEN>` form, e.g. `<DEL>` or `<INS:ME:ALU>`
pub fn is_large_symbolic(allele: &str) -> bool {
    allele.len() > 1 && allele.starts_with('<') && allele.ends_with('>')
}

/// Mate-pair breakend in bracket notation, e.g. `G]17:198982]`
pub fn is_breakend(allele: &str) -> bool {
    allele.contains('[') || allele.contains(']')
}

/// Single breakend with a leading or trailing `.`, e.g. `.A` or `G.`
pub fn is_single_breakend(allele: &str) -> bool {
    allele.len() > 1 && (allele.starts_with('.') || allele.ends_with('.'))
}

/// The `.` missing-value allele
pub fn is_missing(allele: &str) -> bool {
    allele == "."
}

/// The `*` allele marking an upstream spanning deletion
pub fn is_missing_upstream_deletion(allele: &str) -> bool {
    allele == "*"
}

/// Any allele that is not literal sequence
pub fn is_symbolic(allele: &str) -> bool {
    is_large_symbolic(allele)
        || is_breakend(allele)
        || is_single_breakend(allele)
        || is_missing(allele)
        || is_missing_upstream_deletion(allele)
}

/// Only `A`, `C`, `G` or `T` in either case
pub fn is_acgt(seq: &str) -> bool {
    seq.bytes()
        .all(|b| matches!(b.to_ascii_uppercase(), b'A' | b'C' | b'G' | b'T'))
}

/// Check a sequence allele consists of `[ACGTNacgtn]`
///
/// Empty alleles are accepted; they describe the empty side of a trimmed
/// insertion or deletion.
pub fn validate_sequence(kind: AlleleKind, seq: &str) -> Result<()> {
    match seq
        .char_indices()
        .find(|(_, c)| !matches!(c.to_ascii_uppercase(), 'A' | 'C' | 'G' | 'T' | 'N'))
    {
        Some((offset, c)) => Err(FerroError::invalid_allele_at(
            kind,
            seq,
            offset,
            format!("invalid base '{}'", c),
        )),
        None => Ok(()),
    }
}

/// Check an alternate allele is one of the non-sequence forms
pub fn validate_symbolic(alt: &str) -> Result<()> {
    if is_symbolic(alt) {
        Ok(())
    } else {
        Err(FerroError::invalid_allele(
            AlleleKind::Alt,
            alt,
            "expected a symbolic, breakend or missing allele",
        ))
    }
}
