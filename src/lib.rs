//! Rust library for decoding the recovery journal of RTP MIDI (RFC 6295) packets.
//!
//! The decoder is a structural walk over the bytes of a journal received so far.
//! It never reads past what is available, tells the caller how many more bytes
//! are needed, and rejects encodings that can never be valid.
//!
//! # Features
//! - **Resumable**: decoding keeps no state between calls. Call again with the same
//!   journal once more bytes arrive.
//! - **Any byte source**: anything implementing [`ByteCursor`](packets::midi_packets::recovery_journal::byte_cursor::ByteCursor),
//!   including slices, `VecDeque<u8>` ring buffers and `bytes::BytesMut`.
//! - **Chapter layout**: offsets and fields of chapters P, W, N, E, T and A for each channel.
//!
//! ## Unsupported Features
//! - **Chapters C and M**: their grammar is not decoded. The rest of the channel
//!   journal is stepped over using the channel LENGTH field.
//! - **System journal**: its presence flags are reported and it is stepped over,
//!   but its chapters are not decoded.
//! - **Encoding**: the library does not build journals.
pub mod packets;
