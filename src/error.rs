//! Error types for ferro-coords
//!
//! Every failure in this crate is raised synchronously at the point of
//! construction or transformation. Errors carry:
//! - Error codes for categorization
//! - The offending values (coordinates, alleles, change lengths)
//! - An optional diagnostic pointing at the first offending character of
//!   an allele

use std::fmt;
use thiserror::Error;

/// Error codes for categorizing errors
///
/// These codes can be used for programmatic error handling
/// and for documentation lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ErrorCode {
    // Allele errors (E1xxx)
    /// Invalid base in a sequence allele
    InvalidBase = 1001,
    /// Malformed symbolic or breakend allele
    InvalidSymbolicAllele = 1002,

    // Coordinate errors (E3xxx)
    /// Coordinates fall outside the contig
    PositionOutOfBounds = 3001,
    /// Invalid coordinate range
    InvalidRange = 3003,
    /// Confidence interval does not bracket zero
    InvalidConfidenceInterval = 3004,
    /// Given change length contradicts the derived one
    ChangeLengthMismatch = 3005,
    /// Regions are on different contigs
    ContigMismatch = 3006,

    // Representation errors (E4xxx)
    /// Variant cannot be packed into the compact encoding
    NotCompactable = 4001,
    /// A required variant field was never supplied
    IncompleteVariant = 4002,

    // IO errors (E9xxx)
    /// File IO error
    IoError = 9001,
    /// Configuration file error
    ConfigError = 9003,
}

impl ErrorCode {
    /// Get the error code as a string (e.g., "E3001")
    pub fn as_str(&self) -> String {
        format!("E{:04}", *self as u16)
    }

    /// Get a brief description of this error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidBase => "invalid nucleotide base",
            ErrorCode::InvalidSymbolicAllele => "invalid symbolic allele",
            ErrorCode::PositionOutOfBounds => "position out of bounds",
            ErrorCode::InvalidRange => "invalid coordinate range",
            ErrorCode::InvalidConfidenceInterval => "invalid confidence interval",
            ErrorCode::ChangeLengthMismatch => "change length mismatch",
            ErrorCode::ContigMismatch => "regions on different contigs",
            ErrorCode::NotCompactable => "variant not representable in compact form",
            ErrorCode::IncompleteVariant => "incomplete variant",
            ErrorCode::IoError => "file I/O error",
            ErrorCode::ConfigError => "configuration error",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A span in the source input indicating error location
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceSpan {
    /// Starting byte offset (0-indexed)
    pub start: usize,
    /// Ending byte offset (exclusive)
    pub end: usize,
}

impl SourceSpan {
    /// Create a new source span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Format the source with the error highlighted
    ///
    /// Returns a string like:
    /// ```text
    /// ACGXT
    ///    ^
    /// ```
    pub fn highlight(&self, source: &str) -> String {
        if source.is_empty() {
            return String::new();
        }

        let safe_start = self.start.min(source.len());
        let safe_end = self.end.min(source.len()).max(safe_start);

        let mut pointer = " ".repeat(safe_start);
        pointer.push('^');
        if safe_start < safe_end {
            pointer.push_str(&"~".repeat(safe_end - safe_start - 1));
        }

        format!("{}\n{}", source, pointer)
    }
}

/// Diagnostic information for an error
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Diagnostic {
    /// Error code
    pub code: Option<ErrorCode>,
    /// Source span for highlighting
    pub span: Option<SourceSpan>,
    /// The original input (for error display)
    pub source: Option<String>,
    /// Helpful hint
    pub hint: Option<String>,
}

impl Diagnostic {
    /// Create a new empty diagnostic
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an error code
    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    /// Add a source span
    pub fn with_span(mut self, span: SourceSpan) -> Self {
        self.span = Some(span);
        self
    }

    /// Add the original source
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Add a hint
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Format the diagnostic as a detailed error message
    pub fn format(&self, primary_message: &str) -> String {
        let mut result = String::new();

        if let Some(code) = &self.code {
            result.push_str(&format!("[{}] ", code));
        }

        result.push_str(primary_message);

        if let (Some(span), Some(source)) = (&self.span, &self.source) {
            result.push_str("\n\n");
            result.push_str(&span.highlight(source));
        }

        if let Some(hint) = &self.hint {
            result.push_str("\n\nHint: ");
            result.push_str(hint);
        }

        result
    }
}

/// Which allele of a variant an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlleleKind {
    /// The reference allele
    Ref,
    /// The alternate allele
    Alt,
}

impl fmt::Display for AlleleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlleleKind::Ref => write!(f, "reference"),
            AlleleKind::Alt => write!(f, "alternate"),
        }
    }
}

/// Main error type for ferro-coords operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FerroError {
    /// Malformed interval, independent of any contig
    #[error("Invalid coordinates: {msg}")]
    InvalidCoordinates { msg: String },

    /// Coordinates overrun the contig they are placed on
    ///
    /// Kept apart from [`FerroError::InvalidCoordinates`] so callers can
    /// tell genome-boundary overruns from malformed input.
    #[error("Coordinates {start}-{end} out of bounds for contig {contig} of length {length}")]
    CoordinatesOutOfBounds {
        contig: String,
        length: u64,
        start: i64,
        end: i64,
    },

    /// Confidence interval that does not satisfy lower <= 0 <= upper
    #[error("Invalid confidence interval ({lower}, {upper}): {msg}")]
    InvalidConfidenceInterval { lower: i32, upper: i32, msg: String },

    /// Allele text outside the permitted alphabet
    #[error("Invalid {allele} allele '{sequence}': {msg}")]
    InvalidAllele {
        allele: AlleleKind,
        sequence: String,
        msg: String,
        /// Optional diagnostic with the offending character highlighted
        diagnostic: Option<Box<Diagnostic>>,
    },

    /// Caller-supplied change length contradicts the derived one
    #[error("Change length mismatch at {location}: given {given}, expected {expected}")]
    ChangeLengthMismatch {
        location: String,
        given: i64,
        expected: String,
    },

    /// Variant is not representable in the compact encoding
    #[error("Cannot encode compact variant: {msg}")]
    NotCompactable { msg: String },

    /// A field required to build a variant was never supplied
    #[error("Incomplete variant: missing {field}")]
    IncompleteVariant { field: &'static str },

    /// Operation requires both regions to share a contig
    #[error("Contig mismatch: {expected} vs {found}")]
    ContigMismatch { expected: String, found: String },

    /// IO error (for configuration files)
    #[error("IO error: {msg}")]
    Io { msg: String },

    /// Configuration file could not be parsed
    #[error("Config error: {msg}")]
    Config { msg: String },
}

impl FerroError {
    /// Create an allele error pointing at the byte offset of the first bad character
    pub fn invalid_allele_at(
        allele: AlleleKind,
        sequence: &str,
        offset: usize,
        msg: impl Into<String>,
    ) -> Self {
        let width = sequence
            .get(offset..)
            .and_then(|rest| rest.chars().next())
            .map_or(1, char::len_utf8);
        let diagnostic = Diagnostic::new()
            .with_code(ErrorCode::InvalidBase)
            .with_span(SourceSpan::new(offset, offset + width))
            .with_source(sequence)
            .with_hint("sequence alleles may only contain A, C, G, T or N");
        FerroError::InvalidAllele {
            allele,
            sequence: sequence.to_string(),
            msg: msg.into(),
            diagnostic: Some(Box::new(diagnostic)),
        }
    }

    /// Create an allele error without positional information
    pub fn invalid_allele(allele: AlleleKind, sequence: &str, msg: impl Into<String>) -> Self {
        FerroError::InvalidAllele {
            allele,
            sequence: sequence.to_string(),
            msg: msg.into(),
            diagnostic: None,
        }
    }

    /// Create a generic invalid-coordinates error
    pub fn invalid_coordinates(msg: impl Into<String>) -> Self {
        FerroError::InvalidCoordinates { msg: msg.into() }
    }

    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            FerroError::InvalidAllele {
                diagnostic: Some(d),
                ..
            } => d.code.unwrap_or(ErrorCode::InvalidBase),
            FerroError::InvalidAllele { .. } => ErrorCode::InvalidSymbolicAllele,
            FerroError::InvalidCoordinates { .. } => ErrorCode::InvalidRange,
            FerroError::CoordinatesOutOfBounds { .. } => ErrorCode::PositionOutOfBounds,
            FerroError::InvalidConfidenceInterval { .. } => ErrorCode::InvalidConfidenceInterval,
            FerroError::ChangeLengthMismatch { .. } => ErrorCode::ChangeLengthMismatch,
            FerroError::NotCompactable { .. } => ErrorCode::NotCompactable,
            FerroError::IncompleteVariant { .. } => ErrorCode::IncompleteVariant,
            FerroError::ContigMismatch { .. } => ErrorCode::ContigMismatch,
            FerroError::Io { .. } => ErrorCode::IoError,
            FerroError::Config { .. } => ErrorCode::ConfigError,
        }
    }

    /// True for the dedicated out-of-bounds condition
    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, FerroError::CoordinatesOutOfBounds { .. })
    }

    /// Get a formatted error with full diagnostic output
    pub fn detailed_message(&self) -> String {
        match self {
            FerroError::InvalidAllele {
                diagnostic: Some(d),
                ..
            } => d.format(&self.to_string()),
            _ => format!("[{}] {}", self.code(), self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_as_str() {
        assert_eq!(ErrorCode::InvalidBase.as_str(), "E1001");
        assert_eq!(ErrorCode::InvalidSymbolicAllele.as_str(), "E1002");
        assert_eq!(ErrorCode::PositionOutOfBounds.as_str(), "E3001");
        assert_eq!(ErrorCode::NotCompactable.as_str(), "E4001");
        assert_eq!(ErrorCode::IoError.as_str(), "E9001");
    }

    #[test]
    fn test_error_code_description() {
        assert_eq!(
            ErrorCode::PositionOutOfBounds.description(),
            "position out of bounds"
        );
        assert_eq!(
            ErrorCode::ChangeLengthMismatch.description(),
            "change length mismatch"
        );
        assert_eq!(ErrorCode::ConfigError.description(), "configuration error");
    }

    #[test]
    fn test_source_span_highlight() {
        let span = SourceSpan::new(3, 4);
        assert_eq!(span.highlight("ACGXT"), "ACGXT\n   ^");
    }

    #[test]
    fn test_source_span_highlight_range() {
        let span = SourceSpan::new(1, 4);
        assert_eq!(span.highlight("A<X>"), "A<X>\n ^~~");
    }

    #[test]
    fn test_source_span_highlight_empty_source() {
        assert_eq!(SourceSpan::new(0, 5).highlight(""), "");
    }

    #[test]
    fn test_source_span_highlight_out_of_bounds() {
        let result = SourceSpan::new(100, 200).highlight("short");
        assert!(result.starts_with("short\n"));
    }

    #[test]
    fn test_diagnostic_format_full() {
        let diag = Diagnostic::new()
            .with_code(ErrorCode::InvalidBase)
            .with_span(SourceSpan::new(2, 3))
            .with_source("ACX")
            .with_hint("Use A, C, G, T or N");

        let result = diag.format("Test message");
        assert!(result.starts_with("[E1001] Test message"));
        assert!(result.contains("ACX\n  ^"));
        assert!(result.contains("Hint: Use A, C, G, T or N"));
    }

    #[test]
    fn test_invalid_allele_at() {
        let err = FerroError::invalid_allele_at(AlleleKind::Alt, "ACXT", 2, "invalid base 'X'");
        assert_eq!(err.code(), ErrorCode::InvalidBase);
        assert_eq!(
            err.to_string(),
            "Invalid alternate allele 'ACXT': invalid base 'X'"
        );
        let detailed = err.detailed_message();
        assert!(detailed.contains("[E1001]"));
        assert!(detailed.contains("ACXT\n  ^"));
        assert!(detailed.contains("Hint: sequence alleles may only contain A, C, G, T or N"));
    }

    #[test]
    fn test_invalid_allele_at_multibyte_character() {
        let err = FerroError::invalid_allele_at(AlleleKind::Ref, "AÉT", 1, "invalid base 'É'");
        match err {
            FerroError::InvalidAllele {
                diagnostic: Some(d),
                ..
            } => assert_eq!(d.span, Some(SourceSpan::new(1, 3))),
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_invalid_allele_without_diagnostic() {
        let err = FerroError::invalid_allele(AlleleKind::Ref, "<DEL>", "reference must be bases");
        assert_eq!(err.code(), ErrorCode::InvalidSymbolicAllele);
    }

    #[test]
    fn test_out_of_bounds_is_distinct() {
        let oob = FerroError::CoordinatesOutOfBounds {
            contig: "chr1".to_string(),
            length: 10,
            start: 5,
            end: 11,
        };
        assert!(oob.is_out_of_bounds());
        assert_eq!(oob.code(), ErrorCode::PositionOutOfBounds);
        assert!(!FerroError::invalid_coordinates("bad").is_out_of_bounds());
        assert_eq!(
            oob.to_string(),
            "Coordinates 5-11 out of bounds for contig chr1 of length 10"
        );
    }

    #[test]
    fn test_change_length_mismatch_display() {
        let err = FerroError::ChangeLengthMismatch {
            location: "chr1:5".to_string(),
            given: 2,
            expected: "-1".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Change length mismatch at chr1:5: given 2, expected -1"
        );
        assert!(err.detailed_message().starts_with("[E3005]"));
    }

    #[test]
    fn test_error_equality() {
        let a = FerroError::invalid_coordinates("x");
        let b = FerroError::invalid_coordinates("x");
        assert_eq!(a, b);
        assert_ne!(a, FerroError::invalid_coordinates("y"));
    }
}
