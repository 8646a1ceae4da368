//! Error definitions for the pipeline simulator.
//!
//! The taxonomy is deliberately small. An unreadable source file is *not* an
//! error — the loader degrades to an empty program and the engine runs zero
//! cycles. Malformed source, on the other hand, fails fast at load time with
//! a diagnosable error, and engine-side variants cover internal consistency
//! faults that a validated program should never trigger.

use thiserror::Error;

/// Errors produced while loading a program or driving the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    /// A source line carried a label but no mnemonic, or no tokens at all.
    #[error("line {line}: missing mnemonic")]
    MissingMnemonic {
        /// 1-based source line number.
        line: usize,
    },

    /// A counted-branch threshold operand did not parse as a decimal integer.
    #[error("line {line}: branch threshold `{token}` is not an integer")]
    BadThreshold {
        /// 1-based source line number.
        line: usize,
        /// The offending operand token.
        token: String,
    },

    /// A jump or branch names a label with no symbol-table entry.
    #[error("line {line}: unknown jump target `{label}`")]
    UnknownLabel {
        /// 1-based source line number.
        line: usize,
        /// The unresolved label text.
        label: String,
    },

    /// A jump or branch record is missing a required operand field.
    #[error("line {line}: `{mnemonic}` is missing its {what} operand")]
    MissingOperand {
        /// 1-based source line number.
        line: usize,
        /// Mnemonic of the malformed record.
        mnemonic: String,
        /// Description of the missing field.
        what: &'static str,
    },

    /// An internal structural invariant was violated at runtime.
    ///
    /// Cursor ordering and counter-table presence are established by the
    /// loader; a correct build never reports this.
    #[error("internal consistency fault: {0}")]
    Internal(String),
}
