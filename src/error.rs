// Diagnostic translation for codec status codes.
//
// A numeric status plus the codec's optional message collapse into one
// stable, greppable string.  Priority order: version mismatch beats the
// codec's own message, which beats the fixed per-code table, which beats
// a generic fallback.  The format is `Error <code> <context>: <detail>`
// when a detail is known and `Error: <code> <context>` otherwise.

use std::fmt;

use crate::stream::StreamStatus;

/// Build the diagnostic string for a failing status.
///
/// Always returns a non-empty string; `context` is a phrase such as
/// "while decompressing data" locating the failure for the caller.
pub fn diagnostic(status: StreamStatus, message: Option<&str>, context: &str) -> String {
    let detail = if status == StreamStatus::VersionError {
        Some("library version mismatch")
    } else if let Some(msg) = message.filter(|m| !m.is_empty()) {
        Some(msg)
    } else {
        match status {
            StreamStatus::BufError => Some("incomplete or truncated stream"),
            StreamStatus::StreamError => Some("inconsistent stream state"),
            StreamStatus::DataError => Some("invalid input data"),
            _ => None,
        }
    };

    match detail {
        Some(detail) => format!("Error {} {context}: {detail}", status.code()),
        None => format!("Error: {} {context}", status.code()),
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Failure of a whole-buffer compression or decompression pass.
///
/// Each variant owns its full diagnostic; the variants classify the
/// failure independently of the message text.
#[derive(Debug)]
pub enum CodecError {
    /// The codec rejected stream setup.
    Init(String),
    /// The allocator refused an output-buffer request.
    Alloc(String),
    /// The codec failed while output space remained, meaning the input is
    /// malformed or inconsistent rather than the buffer too small.
    Data(String),
    /// A status the growth loop does not classify. Never ignored.
    Codec(String),
    /// Closing the stream failed after the pass had otherwise completed.
    Finalize(String),
}

impl CodecError {
    pub(crate) fn init(status: StreamStatus, message: Option<&str>, context: &str) -> Self {
        Self::Init(diagnostic(status, message, context))
    }

    pub(crate) fn alloc(context: &str) -> Self {
        Self::Alloc(diagnostic(StreamStatus::MemError, None, context))
    }

    pub(crate) fn data(status: StreamStatus, message: Option<&str>, context: &str) -> Self {
        Self::Data(diagnostic(status, message, context))
    }

    pub(crate) fn codec(status: StreamStatus, message: Option<&str>, context: &str) -> Self {
        Self::Codec(diagnostic(status, message, context))
    }

    pub(crate) fn finalize(status: StreamStatus, message: Option<&str>, context: &str) -> Self {
        Self::Finalize(diagnostic(status, message, context))
    }

    /// Classify a failing mid-stream status: the codec's own corrupt-input
    /// verdict stays a data failure, anything else is unclassified.
    pub(crate) fn step_failure(
        status: StreamStatus,
        message: Option<&str>,
        context: &str,
    ) -> Self {
        match status {
            StreamStatus::DataError => Self::data(status, message, context),
            other => Self::codec(other, message, context),
        }
    }

    /// The complete diagnostic string.
    pub fn message(&self) -> &str {
        match self {
            Self::Init(msg)
            | Self::Alloc(msg)
            | Self::Data(msg)
            | Self::Codec(msg)
            | Self::Finalize(msg) => msg,
        }
    }
}

impl fmt::Display for CodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for CodecError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
