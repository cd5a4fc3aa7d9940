//! Typed errors for the timeline pipeline.
//!
//! Parse/structural problems abort a whole decode; per-entry problems are
//! isolated to their entry; asset download failures are recorded and never
//! fatal. Expected absences (no mentions, no links) are empty sequences,
//! not errors.

use thiserror::Error;

/// Fatal errors for an entire decode call. No partial results are returned
/// when one of these is raised.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The payload is not valid JSON.
    #[error("timeline payload is not valid JSON: {0}")]
    PayloadDecode(#[from] serde_json::Error),

    /// The payload parsed but has no `twts` array.
    #[error("timeline payload has no `twts` array")]
    MissingTwts,
}

/// A processed entry lacked a field assumed present after the body-text
/// filter. The entry is dropped and decoding continues; callers get the
/// dropped indices back in [`crate::pipeline::DecodeOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("timeline entry {index} is missing `{field}`")]
pub struct EntryFieldMissing {
    /// Index of the entry in the server's `twts` array.
    pub index: usize,
    /// Name of the missing wire field.
    pub field: &'static str,
}

/// A planned asset download failed. Non-fatal: the local file stays
/// absent and rendering falls back to no image.
#[derive(Debug, Clone, Error)]
#[error("failed to fetch {remote_url} into {local_filename}: {reason}")]
pub struct AssetUnavailable {
    /// URL the download was attempted from.
    pub remote_url: String,
    /// Cache filename the bytes were headed for.
    pub local_filename: String,
    /// Underlying transport or filesystem error, stringified.
    pub reason: String,
}
