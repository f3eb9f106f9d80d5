use midi_types::{Note, Value7};

use crate::packets::error::JournalError;
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};
use crate::packets::midi_packets::util::StatusBit;

/// One Chapter E log. When `v` is set `count_vel` is a Note Off release
/// velocity, otherwise it counts Note On/Off commands for `note`.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteExtraLog {
    pub s: bool,
    pub note: Note,
    pub v: bool,
    pub count_vel: Value7,
}

impl NoteExtraLog {
    pub const SIZE: usize = 2;
}

/// Chapter E: note command extras.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteExtrasChapter {
    pub offset: usize,
    pub s: bool,
    pub logs: Vec<NoteExtraLog>,
}

impl NoteExtrasChapter {
    pub const HEADER_SIZE: usize = 1;

    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(Self::HEADER_SIZE)?;
        let offset = reader.position();
        let header = reader.read_u8();
        // LEN codes one less than the number of logs
        let log_count = header.seven_bits() as usize + 1;

        reader.require(log_count * NoteExtraLog::SIZE)?;
        let logs = (0..log_count)
            .map(|_| {
                let note = reader.read_u8();
                let count_vel = reader.read_u8();
                NoteExtraLog {
                    s: note.status_bit(),
                    note: Note::from(note.seven_bits()),
                    v: count_vel.status_bit(),
                    count_vel: Value7::from(count_vel.seven_bits()),
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
        Self::HEADER_SIZE + self.logs.len() * NoteExtraLog::SIZE
    }
}
