use std::ops::RangeInclusive;

use midi_types::{Note, Value7};

use crate::packets::error::{JournalError, MalformedReason};
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};
use crate::packets::midi_packets::util::StatusBit;

#[repr(u16)]
enum NoteChapterHeaderMasks {
    B = 0b1000_0000_0000_0000,
    Len = 0b0111_1111_0000_0000,
    Low = 0b0000_0000_1111_0000,
    High = 0b0000_0000_0000_1111,
}

/// The 16-bit Chapter N header: `B (1) | LEN (7) | LOW (4) | HIGH (4)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteChapterHeader {
    header: u16,
}

impl NoteChapterHeader {
    pub const SIZE: usize = 2;
    const MAX_LEN: u8 = 127;

    pub fn b_flag(&self) -> bool {
        self.header & NoteChapterHeaderMasks::B as u16 != 0
    }

    /// Raw 7-bit LEN field, 0..=127.
    pub fn len_field(&self) -> u8 {
        ((self.header & NoteChapterHeaderMasks::Len as u16) >> 8) as u8
    }

    /// 4-bit LOW field, 0..=15.
    pub fn low(&self) -> u8 {
        ((self.header & NoteChapterHeaderMasks::Low as u16) >> 4) as u8
    }

    /// 4-bit HIGH field, 0..=15.
    pub fn high(&self) -> u8 {
        (self.header & NoteChapterHeaderMasks::High as u16) as u8
    }

    /// `LEN = 127` together with `LOW = 15, HIGH = 0` codes a full 128 entry log list.
    fn is_full_log_list(&self) -> bool {
        self.len_field() == Self::MAX_LEN && self.low() == 15 && self.high() == 0
    }

    pub fn log_count(&self) -> usize {
        if self.is_full_log_list() { 128 } else { self.len_field() as usize }
    }

    /// Number of offbit octets following the log list.
    ///
    /// LOW > HIGH is only legal for the two empty-bitfield codings (15, 0) and (15, 1).
    pub fn offbit_count(&self) -> Result<usize, MalformedReason> {
        let (low, high) = (self.low(), self.high());
        match (low, high) {
            (low, high) if low <= high => Ok((high - low + 1) as usize),
            (15, 0) | (15, 1) => Ok(0),
            (low, high) => Err(MalformedReason::NoteRangeInverted { low, high }),
        }
    }

    /// Bytes following the header: two per log entry plus the offbit octets.
    pub fn body_size(&self) -> Result<usize, MalformedReason> {
        Ok(self.log_count() * NoteLog::SIZE + self.offbit_count()?)
    }
}

impl From<u16> for NoteChapterHeader {
    fn from(header: u16) -> Self {
        NoteChapterHeader { header }
    }
}

/// One Note On entry of the Chapter N log list.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteLog {
    pub s: bool,
    pub note: Note,
    pub y: bool,
    pub velocity: Value7,
}

impl NoteLog {
    pub const SIZE: usize = 2;
}

/// Chapter N: recent Note On commands and the notes recently turned off.
#[derive(Debug, Clone, PartialEq)]
pub struct NoteChapter {
    pub offset: usize,
    pub header: NoteChapterHeader,
    pub logs: Vec<NoteLog>,
    pub offbits: Vec<u8>,
}

impl NoteChapter {
    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(NoteChapterHeader::SIZE)?;
        let offset = reader.position();
        let header = NoteChapterHeader::from(reader.read_u16_be());
        let offbit_count = header.offbit_count()?;
        let log_count = header.log_count();

        reader.require(log_count * NoteLog::SIZE + offbit_count)?;
        let logs = (0..log_count)
            .map(|_| {
                let note = reader.read_u8();
                let velocity = reader.read_u8();
                NoteLog {
                    s: note.status_bit(),
                    note: Note::from(note.seven_bits()),
                    y: velocity.status_bit(),
                    velocity: Value7::from(velocity.seven_bits()),
                }
            })
            .collect();
        let offbits = (0..offbit_count).map(|_| reader.read_u8()).collect();

        Ok(Self { offset, header, logs, offbits })
    }

    /// Total bytes of this chapter, header included.
    pub fn size(&self) -> usize {
        NoteChapterHeader::SIZE + self.logs.len() * NoteLog::SIZE + self.offbits.len()
    }

    /// Notes whose state is coded by the offbit octets, if any.
    pub fn offbit_notes(&self) -> Option<RangeInclusive<u8>> {
        if self.offbits.is_empty() {
            return None;
        }
        Some(self.header.low() * 8..=self.header.high() * 8 + 7)
    }

    /// Whether the offbit octets mark `note` as recently turned off.
    pub fn is_recently_off(&self, note: u8) -> bool {
        match self.offbit_notes() {
            Some(range) if range.contains(&note) => {
                let index = (note - self.header.low() * 8) as usize;
                self.offbits[index / 8] & (0x80 >> (index % 8)) != 0
            }
            _ => false,
        }
    }
}
