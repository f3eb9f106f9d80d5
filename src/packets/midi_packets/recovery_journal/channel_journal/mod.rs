pub mod channel_aftertouch_chapter;
#[allow(clippy::module_inception)]
pub mod channel_journal;
pub mod note_chapter;
pub mod note_extras_chapter;
pub mod pitch_wheel_chapter;
pub mod poly_aftertouch_chapter;
pub mod program_change_chapter;
