use midi_types::Value7;

use crate::packets::error::JournalError;
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};
use crate::packets::midi_packets::util::StatusBit;

/// Chapter W: the most recent Pitch Wheel command.
#[derive(Debug, Clone, PartialEq)]
pub struct PitchWheelChapter {
    pub offset: usize,
    pub s: bool,
    pub first: Value7,
    pub r: bool,
    pub second: Value7,
}

impl PitchWheelChapter {
    pub const SIZE: usize = 2;

    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(Self::SIZE)?;
        let offset = reader.position();
        let first = reader.read_u8();
        let second = reader.read_u8();

        Ok(Self {
            offset,
            s: first.status_bit(),
            first: Value7::from(first.seven_bits()),
            r: second.status_bit(),
            second: Value7::from(second.seven_bits()),
        })
    }

    /// The 14-bit wheel position, `second` holding the most significant bits.
    pub fn value(&self) -> u16 {
        (u16::from(u8::from(self.second)) << 7) | u16::from(u8::from(self.first))
    }
}
