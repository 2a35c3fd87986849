//! Variant type classification
//!
//! Types form a shallow hierarchy: every sub-type names its parent through
//! [`VariantType::base_type`], which is always reached in one hop.
//!
//! | Type | Base | VCF token |
//! |------|------|-----------|
//! | `DelMeAlu` | `Del` | `DEL:ME:ALU` |
//! | `InsMe` | `Ins` | `INS:ME` |
//! | `DupTandem` | `Dup` | `DUP:TANDEM` |
//! | `CnvGain` | `Cnv` | `CNV:GAIN` |

use super::alleles;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed classification of sequence and structural changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum VariantType {
    #[serde(rename = "SNV")]
    Snv,
    #[serde(rename = "MNV")]
    Mnv,
    #[serde(rename = "DEL")]
    Del,
    #[serde(rename = "DEL:ME")]
    DelMe,
    #[serde(rename = "DEL:ME:ALU")]
    DelMeAlu,
    #[serde(rename = "DEL:ME:LINE1")]
    DelMeLine1,
    #[serde(rename = "DEL:ME:SVA")]
    DelMeSva,
    #[serde(rename = "DEL:ME:HERV")]
    DelMeHerv,
    #[serde(rename = "INS")]
    Ins,
    #[serde(rename = "INS:ME")]
    InsMe,
    #[serde(rename = "INS:ME:ALU")]
    InsMeAlu,
    #[serde(rename = "INS:ME:LINE1")]
    InsMeLine1,
    #[serde(rename = "INS:ME:SVA")]
    InsMeSva,
    #[serde(rename = "INS:ME:HERV")]
    InsMeHerv,
    #[serde(rename = "DUP")]
    Dup,
    #[serde(rename = "DUP:TANDEM")]
    DupTandem,
    #[serde(rename = "INV")]
    Inv,
    #[serde(rename = "DELINS")]
    Delins,
    #[serde(rename = "CNV")]
    Cnv,
    #[serde(rename = "CNV:GAIN")]
    CnvGain,
    #[serde(rename = "CNV:LOSS")]
    CnvLoss,
    #[serde(rename = "CNV:LOH")]
    CnvLoh,
    #[serde(rename = "CNV:COMPLEX")]
    CnvComplex,
    #[serde(rename = "BND")]
    Bnd,
    #[serde(rename = "STR")]
    Str,
    #[serde(rename = "TRA")]
    Tra,
    #[serde(rename = "SYMBOLIC")]
    Symbolic,
    #[serde(rename = "UNKNOWN")]
    Unknown,
}

impl VariantType {
    pub const ALL: [VariantType; 28] = [
        VariantType::Snv,
        VariantType::Mnv,
        VariantType::Del,
        VariantType::DelMe,
        VariantType::DelMeAlu,
        VariantType::DelMeLine1,
        VariantType::DelMeSva,
        VariantType::DelMeHerv,
        VariantType::Ins,
        VariantType::InsMe,
        VariantType::InsMeAlu,
        VariantType::InsMeLine1,
        VariantType::InsMeSva,
        VariantType::InsMeHerv,
        VariantType::Dup,
        VariantType::DupTandem,
        VariantType::Inv,
        VariantType::Delins,
        VariantType::Cnv,
        VariantType::CnvGain,
        VariantType::CnvLoss,
        VariantType::CnvLoh,
        VariantType::CnvComplex,
        VariantType::Bnd,
        VariantType::Str,
        VariantType::Tra,
        VariantType::Symbolic,
        VariantType::Unknown,
    ];

    /// Classify a change from its reference and alternate alleles
    ///
    /// Never fails: text that matches nothing known is [`VariantType::Unknown`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ferro_coords::VariantType;
    ///
    /// assert_eq!(VariantType::classify("G", "T"), VariantType::Snv);
    /// assert_eq!(VariantType::classify("AG", "A"), VariantType::Del);
    /// assert_eq!(VariantType::classify("TCAG", "CTGA"), VariantType::Inv);
    /// assert_eq!(VariantType::classify("A", "<INS:ME:ALU>"), VariantType::InsMeAlu);
    /// ```
    pub fn classify(ref_allele: &str, alt_allele: &str) -> VariantType {
        if alleles::is_symbolic(alt_allele) {
            return Self::parse_symbolic(alt_allele);
        }
        let r = ref_allele.len();
        let a = alt_allele.len();
        if r == a {
            match r {
                0 => VariantType::Unknown,
                1 => VariantType::Snv,
                _ if is_inversion(ref_allele, alt_allele) => VariantType::Inv,
                _ => VariantType::Mnv,
            }
        } else if r > a {
            if is_prefix_or_suffix(alt_allele, ref_allele) {
                VariantType::Del
            } else {
                VariantType::Delins
            }
        } else if is_prefix_or_suffix(ref_allele, alt_allele) {
            VariantType::Ins
        } else {
            VariantType::Delins
        }
    }

    /// Classify a non-sequence alternate allele
    ///
    /// Breakends are [`VariantType::Bnd`]. A `<...>` token is matched
    /// exactly, then with trailing `:`-segments dropped one at a time, then
    /// by a known token prefixing its first segment (`<STR27>` is
    /// [`VariantType::Str`]). Any other `<...>` token is
    /// [`VariantType::Symbolic`]; everything else is [`VariantType::Unknown`].
    pub fn parse_symbolic(alt_allele: &str) -> VariantType {
        if alleles::is_breakend(alt_allele) || alleles::is_single_breakend(alt_allele) {
            return VariantType::Bnd;
        }
        if !alleles::is_large_symbolic(alt_allele) {
            return VariantType::Unknown;
        }
        let token = &alt_allele[1..alt_allele.len() - 1];
        if token.is_empty() {
            return VariantType::Unknown;
        }

        let mut candidate = token;
        loop {
            if let Some(t) = from_token(candidate) {
                return t;
            }
            match candidate.rfind(':') {
                Some(idx) => candidate = &candidate[..idx],
                None => break,
            }
        }

        let head = token.split(':').next().unwrap_or(token);
        BASE_TOKENS
            .iter()
            .find(|(prefix, _)| starts_with_ignore_case(head, prefix))
            .map(|(_, t)| *t)
            .unwrap_or(VariantType::Symbolic)
    }

    /// The parent type, or `self` for top-level types
    pub fn base_type(&self) -> VariantType {
        match self {
            VariantType::DelMe
            | VariantType::DelMeAlu
            | VariantType::DelMeLine1
            | VariantType::DelMeSva
            | VariantType::DelMeHerv => VariantType::Del,
            VariantType::InsMe
            | VariantType::InsMeAlu
            | VariantType::InsMeLine1
            | VariantType::InsMeSva
            | VariantType::InsMeHerv => VariantType::Ins,
            VariantType::DupTandem => VariantType::Dup,
            VariantType::CnvGain
            | VariantType::CnvLoss
            | VariantType::CnvLoh
            | VariantType::CnvComplex => VariantType::Cnv,
            other => *other,
        }
    }

    /// Whether this type is `base` or one of its sub-types
    pub fn is_a(&self, base: VariantType) -> bool {
        *self == base || self.base_type() == base
    }

    /// VCF token text, e.g. `DEL:ME:ALU`
    pub fn as_str(&self) -> &'static str {
        match self {
            VariantType::Snv => "SNV",
            VariantType::Mnv => "MNV",
            VariantType::Del => "DEL",
            VariantType::DelMe => "DEL:ME",
            VariantType::DelMeAlu => "DEL:ME:ALU",
            VariantType::DelMeLine1 => "DEL:ME:LINE1",
            VariantType::DelMeSva => "DEL:ME:SVA",
            VariantType::DelMeHerv => "DEL:ME:HERV",
            VariantType::Ins => "INS",
            VariantType::InsMe => "INS:ME",
            VariantType::InsMeAlu => "INS:ME:ALU",
            VariantType::InsMeLine1 => "INS:ME:LINE1",
            VariantType::InsMeSva => "INS:ME:SVA",
            VariantType::InsMeHerv => "INS:ME:HERV",
            VariantType::Dup => "DUP",
            VariantType::DupTandem => "DUP:TANDEM",
            VariantType::Inv => "INV",
            VariantType::Delins => "DELINS",
            VariantType::Cnv => "CNV",
            VariantType::CnvGain => "CNV:GAIN",
            VariantType::CnvLoss => "CNV:LOSS",
            VariantType::CnvLoh => "CNV:LOH",
            VariantType::CnvComplex => "CNV:COMPLEX",
            VariantType::Bnd => "BND",
            VariantType::Str => "STR",
            VariantType::Tra => "TRA",
            VariantType::Symbolic => "SYMBOLIC",
            VariantType::Unknown => "UNKNOWN",
        }
    }
}

/// Top-level tokens usable as a prefix match
const BASE_TOKENS: [(&str, VariantType); 8] = [
    ("DEL", VariantType::Del),
    ("INS", VariantType::Ins),
    ("DUP", VariantType::Dup),
    ("INV", VariantType::Inv),
    ("CNV", VariantType::Cnv),
    ("BND", VariantType::Bnd),
    ("STR", VariantType::Str),
    ("TRA", VariantType::Tra),
];

fn from_token(token: &str) -> Option<VariantType> {
    // <*> and <NON_REF> are gVCF reference blocks
    if token == "*" || token.eq_ignore_ascii_case("NON_REF") {
        return Some(VariantType::Symbolic);
    }
    VariantType::ALL
        .iter()
        .find(|t| t.as_str().eq_ignore_ascii_case(token))
        .copied()
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s.as_bytes()[s.len() - suffix.len()..].eq_ignore_ascii_case(suffix.as_bytes())
}

fn is_prefix_or_suffix(short: &str, long: &str) -> bool {
    starts_with_ignore_case(long, short) || ends_with_ignore_case(long, short)
}

/// Reverse-complement symmetric but not identical
///
/// `AT>AT` is its own reverse complement and no change at all, so identity
/// is ruled out first at every length.
fn is_inversion(ref_allele: &str, alt_allele: &str) -> bool {
    if ref_allele.eq_ignore_ascii_case(alt_allele) {
        return false;
    }
    ref_allele
        .bytes()
        .zip(alt_allele.bytes().rev())
        .all(|(r, a)| r.eq_ignore_ascii_case(&alleles::complement(a)))
}

impl fmt::Display for VariantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VariantType {
    type Err = String;

    /// Strict token parse; use [`VariantType::parse_symbolic`] for lenient matching
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VariantType::ALL
            .iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| format!("unknown variant type '{}'", s))
    }
}
