use midi_types::Value7;

use crate::packets::error::JournalError;
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};
use crate::packets::midi_packets::util::StatusBit;

/// Chapter T: the most recent Channel Aftertouch pressure.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelAftertouchChapter {
    pub offset: usize,
    pub s: bool,
    pub pressure: Value7,
}

impl ChannelAftertouchChapter {
    pub const SIZE: usize = 1;

    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(Self::SIZE)?;
        let offset = reader.position();
        let pressure = reader.read_u8();

        Ok(Self {
            offset,
            s: pressure.status_bit(),
            pressure: Value7::from(pressure.seven_bits()),
        })
    }
}
