use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum JournalError {
    #[error("Not enough data, {needed} more byte(s) required")]
    MoreDataNeeded { needed: usize },
    #[error("Malformed journal: {0}")]
    Malformed(#[from] MalformedReason),
}

impl JournalError {
    /// Only incomplete input is worth retrying once more bytes have arrived.
    pub fn is_retriable(&self) -> bool {
        matches!(self, JournalError::MoreDataNeeded { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MalformedReason {
    #[error("chapter N has LOW ({low}) > HIGH ({high})")]
    NoteRangeInverted { low: u8, high: u8 },
    #[error("system journal length {length} is shorter than its header")]
    SystemJournalTooShort { length: u16 },
    #[error("channel {channel} journal length {declared} does not cover the {decoded} byte(s) decoded")]
    ChannelJournalOverrun { channel: u8, declared: u16, decoded: usize },
    #[error("channel {channel} journal length {declared} does not match the {decoded} byte(s) decoded")]
    ChannelJournalLengthMismatch { channel: u8, declared: u16, decoded: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_incomplete_is_retriable() {
        assert!(JournalError::MoreDataNeeded { needed: 1 }.is_retriable());
        assert!(!JournalError::from(MalformedReason::NoteRangeInverted { low: 5, high: 2 }).is_retriable());
    }

    #[test]
    fn test_error_messages() {
        let err = JournalError::MoreDataNeeded { needed: 3 };
        assert_eq!(err.to_string(), "Not enough data, 3 more byte(s) required");

        let err = JournalError::from(MalformedReason::NoteRangeInverted { low: 5, high: 2 });
        assert_eq!(err.to_string(), "Malformed journal: chapter N has LOW (5) > HIGH (2)");
    }
}
