#[allow(clippy::module_inception)]
pub mod system_journal;
