//! Error types for rs-boilerpipe.
//!
//! Every failure while acquiring a [`TextDocument`](crate::TextDocument) from raw
//! input surfaces as [`Error::Processing`]. Filters and segmentation are total
//! over well-formed documents and never fail.

use std::error::Error as StdError;

/// Boxed lower-level cause kept inside [`Error::Processing`].
pub type BoxedCause = Box<dyn StdError + Send + Sync + 'static>;

/// Error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Acquiring or processing the document failed (parse error, I/O error, ...).
    #[error("Processing failed: {message}")]
    Processing {
        /// Human readable description, taken from the cause when wrapping.
        message: String,
        /// The original failure, if any.
        #[source]
        source: Option<BoxedCause>,
    },

    /// An extractor name did not match any known pipeline.
    #[error("Unknown extractor: {0}")]
    UnknownExtractor(String),
}

impl Error {
    /// Wraps a lower-level failure, preserving it as the source.
    ///
    /// An already-typed [`Error`] passes through unchanged, so wrapping twice
    /// never nests a processing failure inside another one.
    pub fn processing<E>(cause: E) -> Self
    where
        E: Into<BoxedCause>,
    {
        let cause: BoxedCause = cause.into();
        match cause.downcast::<Self>() {
            Ok(typed) => *typed,
            Err(cause) => Self::Processing {
                message: cause.to_string(),
                source: Some(cause),
            },
        }
    }

    /// A processing failure without an underlying cause.
    pub fn message(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
            source: None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::processing(err)
    }
}

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn wraps_io_error_and_keeps_source() {
        let err = Error::from(io::Error::new(io::ErrorKind::UnexpectedEof, "stream ended"));
        match &err {
            Error::Processing { message, source } => {
                assert_eq!(message, "stream ended");
                assert!(source.is_some());
            }
            Error::UnknownExtractor(_) => panic!("expected Processing, got {err:?}"),
        }
        assert!(StdError::source(&err).is_some());
    }

    #[test]
    fn typed_error_is_not_wrapped_twice() {
        let inner = Error::message("bad markup");
        let outer = Error::processing(inner);
        match outer {
            Error::Processing { message, source } => {
                assert_eq!(message, "bad markup");
                assert!(source.is_none());
            }
            Error::UnknownExtractor(name) => panic!("unexpected UnknownExtractor({name})"),
        }
    }

    #[test]
    fn display_includes_message() {
        let err = Error::message("no input");
        assert_eq!(err.to_string(), "Processing failed: no input");
    }
}
