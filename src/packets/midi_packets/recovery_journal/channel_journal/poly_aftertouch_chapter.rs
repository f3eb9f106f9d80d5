use midi_types::{Note, Value7};

use crate::packets::error::JournalError;
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};
use crate::packets::midi_packets::util::StatusBit;

#[derive(Debug, Clone, PartialEq)]
pub struct PolyPressureLog {
    pub s: bool,
    pub note: Note,
    pub x: bool,
    pub pressure: Value7,
}

impl PolyPressureLog {
    pub const SIZE: usize = 2;
}

/// Chapter A: poly aftertouch pressure per note.
#[derive(Debug, Clone, PartialEq)]
pub struct PolyAftertouchChapter {
    pub offset: usize,
    pub s: bool,
    pub logs: Vec<PolyPressureLog>,
}

impl PolyAftertouchChapter {
    pub const HEADER_SIZE: usize = 1;

    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(Self::HEADER_SIZE)?;
        let offset = reader.position();
        let header = reader.read_u8();
        let log_count = header.seven_bits() as usize + 1;

        reader.require(log_count * PolyPressureLog::SIZE)?;
        let logs = (0..log_count)
            .map(|_| {
                let note = reader.read_u8();
                let pressure = reader.read_u8();
                PolyPressureLog {
                    s: note.status_bit(),
                    note: Note::from(note.seven_bits()),
                    x: pressure.status_bit(),
                    pressure: Value7::from(pressure.seven_bits()),
                }
            })
            .collect();

        Ok(Self {
            offset,
            s: header.status_bit(),
            logs,
        })
    }

    pub fn size(&self) -> usize {
        Self::HEADER_SIZE + self.logs.len() * PolyPressureLog::SIZE
    }
}
