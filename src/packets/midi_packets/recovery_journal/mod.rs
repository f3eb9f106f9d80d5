pub mod byte_cursor;
pub mod channel_journal;
pub mod journal_reader;
#[allow(clippy::module_inception)]
pub mod recovery_journal;
pub mod status;
pub mod system_journal;
