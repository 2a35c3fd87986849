//! Reference sequence (contig) descriptors
//!
//! Contigs are supplied by an external catalog (typically built from an
//! assembly report). This crate only reads their id and length, and shares
//! them between regions and variants as `Arc<Contig>`.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

static UNKNOWN_CONTIG: Lazy<Arc<Contig>> = Lazy::new(|| {
    Arc::new(Contig {
        id: 0,
        name: "na".to_string(),
        length: 0,
        genbank_accession: None,
        refseq_accession: None,
        ucsc_name: None,
    })
});

/// A named reference sequence of known length
///
/// Equality, ordering and hashing use the numeric id only.
///
/// # Examples
///
/// ```
/// use ferro_coords::Contig;
///
/// let chr1 = Contig::new(1, "1", 248_956_422);
/// assert_eq!(chr1.length(), 248_956_422);
/// assert_eq!(chr1, Contig::new(1, "chr1", 0));
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contig {
    id: u32,
    name: String,
    length: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    genbank_accession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    refseq_accession: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    ucsc_name: Option<String>,
}

impl Contig {
    /// Create a contig with no aliases
    ///
    /// Id 0 is reserved for [`Contig::unknown`]; a caller contig given id 0
    /// compares equal to it but is not reported as unknown.
    pub fn new(id: u32, name: impl Into<String>, length: u64) -> Self {
        Self {
            id,
            name: name.into(),
            length,
            genbank_accession: None,
            refseq_accession: None,
            ucsc_name: None,
        }
    }

    /// The shared null-object contig (id 0, length 0)
    pub fn unknown() -> Arc<Contig> {
        Arc::clone(&UNKNOWN_CONTIG)
    }

    /// Attach the GenBank, RefSeq and UCSC names of this contig
    pub fn with_aliases(
        mut self,
        genbank_accession: impl Into<String>,
        refseq_accession: impl Into<String>,
        ucsc_name: impl Into<String>,
    ) -> Self {
        self.genbank_accession = Some(genbank_accession.into());
        self.refseq_accession = Some(refseq_accession.into());
        self.ucsc_name = Some(ucsc_name.into());
        self
    }

    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn genbank_accession(&self) -> Option<&str> {
        self.genbank_accession.as_deref()
    }

    pub fn refseq_accession(&self) -> Option<&str> {
        self.refseq_accession.as_deref()
    }

    pub fn ucsc_name(&self) -> Option<&str> {
        self.ucsc_name.as_deref()
    }

    /// Whether this is the shared contig returned by [`Contig::unknown`]
    pub fn is_unknown(&self) -> bool {
        std::ptr::eq(self, Arc::as_ptr(&UNKNOWN_CONTIG))
    }

    /// Length as a signed position, capped one below `i64::MAX`
    ///
    /// The cap leaves room for the one-base shift of a closed start, so
    /// reflecting across the contig never overflows.
    #[inline]
    pub fn extent(&self) -> i64 {
        i64::try_from(self.length).map_or(i64::MAX - 1, |len| len.min(i64::MAX - 1))
    }
}

impl PartialEq for Contig {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Contig {}

impl Hash for Contig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl PartialOrd for Contig {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Contig {
    fn cmp(&self, other: &Self) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl fmt::Display for Contig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}
