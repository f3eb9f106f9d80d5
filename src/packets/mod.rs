pub mod error;
pub mod midi_packets;
