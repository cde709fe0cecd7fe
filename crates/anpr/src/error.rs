//! Errors produced while decoding ANPR XML.
//!
//! | Error | Cause |
//! |-------|-------|
//! | [`InvalidEncoding`](DecodeError::InvalidEncoding) | Payload bytes are not UTF-8 |
//! | [`EmptyDocument`](DecodeError::EmptyDocument) | No element found at all |
//! | [`UnexpectedRoot`](DecodeError::UnexpectedRoot) | Root element is not `EventNotificationAlert` |
//! | [`MalformedXml`](DecodeError::MalformedXml) | Not well-formed, truncated, or a typed leaf failed to parse |
//!
//! Callers treat every variant the same way: the submission carried malformed
//! XML and is rejected as a bad request.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    #[error("xml payload is not valid utf-8: {0}")]
    InvalidEncoding(String),

    #[error("xml payload contains no root element")]
    EmptyDocument,

    #[error("unexpected root element <{found}>, expected <{expected}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
    },

    #[error("malformed xml: {0}")]
    MalformedXml(String),
}
