//! Error types for WLAN scan collection
//!
//! Errors are layered to match how far they propagate:
//!
//! - [`DecodeError`]: one record is skipped, the adapter continues
//! - [`ScanError::ScanQuery`]: one adapter is omitted, the cycle continues
//! - [`ScanError::AdapterEnumeration`]: the whole cycle fails

use log::warn;
use thiserror::Error;

use crate::collectors::platform::SourceError;

/// The SSID's declared length does not fit in its buffer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("SSID declared length {declared_length} exceeds buffer length {buffer_length}")]
pub struct DecodeError {
    pub declared_length: usize,
    pub buffer_length: usize,
}

/// Errors raised while running a scan cycle
#[derive(Debug, Error)]
pub enum ScanError {
    /// Adapters could not be listed; fatal for the cycle
    #[error("failed to enumerate wireless adapters")]
    AdapterEnumeration {
        #[source]
        source: SourceError,
    },

    /// Raw lists could not be fetched for one adapter
    #[error("failed to query scan results for adapter {adapter}")]
    ScanQuery {
        adapter: String,
        #[source]
        source: SourceError,
    },

    /// One network record had a malformed SSID
    #[error("skipped network record on adapter {adapter}")]
    Decode {
        adapter: String,
        #[source]
        source: DecodeError,
    },
}

impl ScanError {
    /// Whether this error aborts the whole cycle
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::AdapterEnumeration { .. })
    }

    /// Adapter label the error belongs to, if it is adapter-scoped
    pub fn adapter(&self) -> Option<&str> {
        match self {
            ScanError::AdapterEnumeration { .. } => None,
            ScanError::ScanQuery { adapter, .. } | ScanError::Decode { adapter, .. } => {
                Some(adapter)
            }
        }
    }
}

/// Logs a recovered scan error with its full cause chain
pub fn log_recovered_error(error: &ScanError) {
    let mut message = error.to_string();
    let mut cause = std::error::Error::source(error);
    while let Some(inner) = cause {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        cause = inner.source();
    }
    warn!("{message}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatality() {
        let fatal = ScanError::AdapterEnumeration {
            source: SourceError::Unsupported("test".to_string()),
        };
        assert!(fatal.is_fatal());
        assert_eq!(fatal.adapter(), None);

        let query = ScanError::ScanQuery {
            adapter: "wlan0 (1)".to_string(),
            source: SourceError::UnknownAdapter("wlan0".to_string()),
        };
        assert!(!query.is_fatal());
        assert_eq!(query.adapter(), Some("wlan0 (1)"));

        let decode = ScanError::Decode {
            adapter: "wlan0 (1)".to_string(),
            source: DecodeError {
                declared_length: 9,
                buffer_length: 4,
            },
        };
        assert!(!decode.is_fatal());
    }

    #[test]
    fn test_source_chain() {
        let err = ScanError::Decode {
            adapter: "wlan0 (1)".to_string(),
            source: DecodeError {
                declared_length: 9,
                buffer_length: 4,
            },
        };
        let source = std::error::Error::source(&err).map(|s| s.to_string());
        assert_eq!(
            source.as_deref(),
            Some("SSID declared length 9 exceeds buffer length 4")
        );
    }
}
