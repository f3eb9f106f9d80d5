pub mod recovery_journal;
pub(crate) mod util;
