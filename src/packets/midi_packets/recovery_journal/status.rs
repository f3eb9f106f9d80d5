use super::{byte_cursor::ByteCursor, recovery_journal::RecoveryJournal};
use crate::packets::error::{JournalError, MalformedReason};

/// Outcome of a single decode attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JournalStatus {
    /// The whole journal is available; `consumed` bytes belong to it.
    Success { consumed: usize },
    /// At least this many more bytes are required before trying again.
    MoreDataNeeded(usize),
    /// The journal can never be decoded and should be dropped.
    MalformedEncoding(MalformedReason),
}

impl JournalStatus {
    pub fn of<C: ByteCursor + ?Sized>(cursor: &C) -> Self {
        RecoveryJournal::decode(cursor).into()
    }

    pub fn is_success(&self) -> bool {
        matches!(self, JournalStatus::Success { .. })
    }
}

impl From<Result<RecoveryJournal, JournalError>> for JournalStatus {
    fn from(result: Result<RecoveryJournal, JournalError>) -> Self {
        match result {
            Ok(journal) => JournalStatus::Success { consumed: journal.length },
            Err(error) => error.into(),
        }
    }
}

impl From<JournalError> for JournalStatus {
    fn from(error: JournalError) -> Self {
        match error {
            JournalError::MoreDataNeeded { needed } => JournalStatus::MoreDataNeeded(needed),
            JournalError::Malformed(reason) => JournalStatus::MalformedEncoding(reason),
        }
    }
}
