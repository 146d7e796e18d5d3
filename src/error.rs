use std::fmt;

use thiserror::Error;

/// The traversal level an extraction failure was detected at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Day,
    Stage,
    Event,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Day => write!(f, "day"),
            Level::Stage => write!(f, "stage"),
            Level::Event => write!(f, "event"),
        }
    }
}

/// Failure modes of a running-order extraction. All variants are fatal to the
/// enclosing parse; there is no partial-success mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// A marker element or one of its required descendants was not where the
    /// markup conventions say it should be.
    #[error("unable to parse running order structure ({0})")]
    StructureMismatch(Level),

    /// A day or event time label did not match its expected textual pattern.
    #[error("time label {label:?} does not match {expected:?}")]
    TimeFormat {
        label: String,
        expected: &'static str,
    },

    /// The HTML collaborator did not produce a usable document tree.
    #[error("unable to parse document: {0}")]
    DocumentParse(String),
}
