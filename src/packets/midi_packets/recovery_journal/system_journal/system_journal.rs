use tracing::{Level, event};

use crate::packets::error::{JournalError, MalformedReason};
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};

#[repr(u16)]
enum SystemJournalHeaderMasks {
    S = 0b1000_0000_0000_0000,
    D = 0b0100_0000_0000_0000,
    V = 0b0010_0000_0000_0000,
    Q = 0b0001_0000_0000_0000,
    F = 0b0000_1000_0000_0000,
    X = 0b0000_0100_0000_0000,
    Length = 0b0000_0011_1111_1111,
}

/// The 16-bit system journal header: `S D V Q F X | LENGTH (10)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SystemJournalHeader {
    header: u16,
}

impl SystemJournalHeader {
    pub const SIZE: usize = 2;

    fn get_flag(&self, flag: SystemJournalHeaderMasks) -> bool {
        self.header & flag as u16 != 0
    }

    pub fn s_flag(&self) -> bool {
        self.get_flag(SystemJournalHeaderMasks::S)
    }

    /// Chapter D, simple system commands.
    pub fn d_flag(&self) -> bool {
        self.get_flag(SystemJournalHeaderMasks::D)
    }

    /// Chapter V, active sense.
    pub fn v_flag(&self) -> bool {
        self.get_flag(SystemJournalHeaderMasks::V)
    }

    /// Chapter Q, sequencer state.
    pub fn q_flag(&self) -> bool {
        self.get_flag(SystemJournalHeaderMasks::Q)
    }

    /// Chapter F, MIDI time code.
    pub fn f_flag(&self) -> bool {
        self.get_flag(SystemJournalHeaderMasks::F)
    }

    /// Chapter X, system exclusive.
    pub fn x_flag(&self) -> bool {
        self.get_flag(SystemJournalHeaderMasks::X)
    }

    /// Length of the whole system journal in bytes, header included.
    pub fn length(&self) -> u16 {
        self.header & SystemJournalHeaderMasks::Length as u16
    }
}

impl From<u16> for SystemJournalHeader {
    fn from(header: u16) -> Self {
        SystemJournalHeader { header }
    }
}

/// Location of the system journal. Its chapters are stepped over, not decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemJournal {
    pub offset: usize,
    pub header: SystemJournalHeader,
}

impl SystemJournal {
    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(SystemJournalHeader::SIZE)?;
        let offset = reader.position();
        let header = SystemJournalHeader::from(reader.read_u16_be());
        let chapters_length = (header.length() as usize)
            .checked_sub(SystemJournalHeader::SIZE)
            .ok_or(MalformedReason::SystemJournalTooShort { length: header.length() })?;

        event!(Level::TRACE, length = header.length(), "Skipping system journal");
        reader.require_and_skip(chapters_length)?;
        Ok(SystemJournal { offset, header })
    }

    pub fn size(&self) -> usize {
        self.header.length() as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_flags() {
        let header = SystemJournalHeader::from(0b1010_1000_0000_0101);
        assert!(header.s_flag());
        assert!(!header.d_flag());
        assert!(header.v_flag());
        assert!(!header.q_flag());
        assert!(header.f_flag());
        assert!(!header.x_flag());
        assert_eq!(header.length(), 5);
    }

    #[test]
    fn test_skip_system_chapters() {
        let data = [0x40u8, 0x04, 0x00, 0x00, 0xFF];
        let mut reader = JournalReader::new(&data[..]);
        let journal = SystemJournal::read(&mut reader).unwrap();
        assert!(journal.header.d_flag());
        assert_eq!(journal.size(), 4);
        assert_eq!(reader.position(), 4);
    }

    #[test]
    fn test_length_shorter_than_header() {
        let data = [0x40u8, 0x01];
        let mut reader = JournalReader::new(&data[..]);
        assert_eq!(
            SystemJournal::read(&mut reader),
            Err(JournalError::Malformed(MalformedReason::SystemJournalTooShort { length: 1 }))
        );
    }

    #[test]
    fn test_truncated_system_chapters() {
        let data = [0x00u8, 0x06, 0x00];
        let mut reader = JournalReader::new(&data[..]);
        assert_eq!(SystemJournal::read(&mut reader), Err(JournalError::MoreDataNeeded { needed: 3 }));
    }
}
