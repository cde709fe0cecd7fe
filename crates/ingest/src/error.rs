//! Error types produced while pulling parts out of a submission.
//!
//! | Error | When | Fatal? |
//! |-------|------|--------|
//! | [`MissingRequiredPart`](ExtractError::MissingRequiredPart) | XML part absent | Yes |
//! | [`PartRead`](ExtractError::PartRead) | A present part's stream failed mid-read | Yes for XML, no for images |
//!
//! Whether a failure ends the submission is the caller's decision; this crate
//! only reports what went wrong and for which part.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// The part the submission cannot do without was not posted.
    #[error("required part {0:?} is missing")]
    MissingRequiredPart(String),

    /// A part was present but its body stream failed before the end.
    #[error("failed to read part {part:?}: {reason}")]
    PartRead { part: String, reason: String },
}

impl ExtractError {
    /// Name of the part the error refers to.
    pub fn part(&self) -> &str {
        match self {
            ExtractError::MissingRequiredPart(part) => part,
            ExtractError::PartRead { part, .. } => part,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_part() {
        let err = ExtractError::MissingRequiredPart("anpr.xml".into());
        assert_eq!(err.to_string(), "required part \"anpr.xml\" is missing");
        assert_eq!(err.part(), "anpr.xml");

        let err = ExtractError::PartRead {
            part: "detectionPicture.jpg".into(),
            reason: "connection reset".into(),
        };
        assert!(err.to_string().contains("connection reset"));
        assert_eq!(err.part(), "detectionPicture.jpg");
    }
}
