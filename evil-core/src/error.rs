//! Error types.

use thiserror::Error;

/// Failures that stop a run.
///
/// Malformed programs never produce one of these: unknown bytes are inert
/// and pool edge cases are no-ops. Only the host side can fail.
#[derive(Debug, Error)]
pub enum VmError {
    /// Reading the next input byte failed for a reason other than end of input.
    #[error("input error at source offset {offset}: {source}")]
    Input {
        /// Source pointer of the read instruction.
        offset: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Emitting an output byte failed.
    #[error("output error at source offset {offset}: {source}")]
    Output {
        /// Source pointer of the write instruction.
        offset: usize,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}
