//! Error taxonomy for the RG16 decoder.

/// Basic Error types.
#[derive(Debug)]
pub enum Rg16Error {
    /// A read reached past the end of the byte source.
    TruncatedSource { offset: usize, want: usize },
    /// The source failed the format checks `read_rg16` requires. Never
    /// returned by `is_rg16`, which swallows this condition into `false`.
    NotRg16 {
        detected_version: u64,
        detected_manufacturer: u64,
        detected_sample_format: u64,
    },
    /// An enumerated header field held a code with no known meaning.
    UnknownEnumCode { field: &'static str, code: u64 },
    /// A trace preamble declared an extension block index outside 1..=10.
    UnknownTraceExtensionBlock { index: u8 },
    /// Traces passed to the merger did not share a single sampling rate.
    HeterogeneousStreamForMerge,
    /// Underlying byte source failure (file I/O).
    IoError(std::io::Error),
    #[cfg(feature = "to_json")]
    /// Serialisation failure.
    SerdeError(serde_json::Error),
}

impl From<std::io::Error> for Rg16Error {
    fn from(e: std::io::Error) -> Self {
        Self::IoError(e)
    }
}

impl std::fmt::Display for Rg16Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use self::Rg16Error::*;
        match self {
            TruncatedSource { offset, want } => write!(
                fmt,
                "source has fewer than {} bytes available at offset {}",
                want, offset
            ),
            NotRg16 {
                detected_version,
                detected_manufacturer,
                detected_sample_format,
            } => write!(
                fmt,
                "not an RG16 file: version={}, manufacturer_code={}, sample_format_code={} (want 262/20/8058)",
                detected_version, detected_manufacturer, detected_sample_format
            ),
            UnknownEnumCode { field, code } => {
                write!(fmt, "unknown code {} for field {}", code, field)
            }
            UnknownTraceExtensionBlock { index } => {
                write!(fmt, "trace extension block {} is not defined (1..=10)", index)
            }
            HeterogeneousStreamForMerge => write!(
                fmt,
                "cannot merge traces that do not share a single sampling rate"
            ),
            IoError(e) => write!(fmt, "{}", e),
            #[cfg(feature = "to_json")]
            SerdeError(e) => write!(fmt, "{}", e),
        }
    }
}

impl From<Rg16Error> for String {
    fn from(e: Rg16Error) -> String {
        e.to_string()
    }
}

impl std::error::Error for Rg16Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use self::Rg16Error::*;
        match self {
            IoError(e) => e.source(),
            #[cfg(feature = "to_json")]
            SerdeError(e) => e.source(),
            _ => None,
        }
    }
}
