use tracing::{Level, event, instrument};

use super::{
    byte_cursor::ByteCursor,
    channel_journal::channel_journal::ChannelJournal,
    journal_reader::JournalReader,
    system_journal::system_journal::SystemJournal,
};
use crate::packets::error::JournalError;

#[repr(u8)]
enum JournalHeaderMasks {
    S = 0b1000_0000,
    Y = 0b0100_0000,
    A = 0b0010_0000,
    H = 0b0001_0000,
    TotChan = 0b0000_1111,
}

/// The three byte recovery journal header: `S Y A H TOTCHAN (4)` followed by
/// the checkpoint packet sequence number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JournalHeader {
    flags: u8,
    checkpoint_sequence_number: u16,
}

impl JournalHeader {
    pub const SIZE: usize = 3;

    pub fn new(flags: u8, checkpoint_sequence_number: u16) -> Self {
        JournalHeader {
            flags,
            checkpoint_sequence_number,
        }
    }

    fn get_flag(&self, flag: JournalHeaderMasks) -> bool {
        self.flags & flag as u8 != 0
    }

    pub fn flags(&self) -> u8 {
        self.flags
    }

    /// Single packet loss hint.
    pub fn s_flag(&self) -> bool {
        self.get_flag(JournalHeaderMasks::S)
    }

    /// The system journal follows the header.
    pub fn y_flag(&self) -> bool {
        self.get_flag(JournalHeaderMasks::Y)
    }

    /// The channel journal list follows.
    pub fn a_flag(&self) -> bool {
        self.get_flag(JournalHeaderMasks::A)
    }

    /// Channels use the enhanced Chapter C encoding.
    pub fn h_flag(&self) -> bool {
        self.get_flag(JournalHeaderMasks::H)
    }

    /// TOTCHAN + 1, always within 1..=16.
    pub fn total_channels(&self) -> usize {
        (self.flags & JournalHeaderMasks::TotChan as u8) as usize + 1
    }

    pub fn checkpoint_sequence_number(&self) -> u16 {
        self.checkpoint_sequence_number
    }

    fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(1)?;
        let flags = reader.read_u8();
        reader.require(2)?;
        let checkpoint_sequence_number = reader.read_u16_be();
        Ok(JournalHeader::new(flags, checkpoint_sequence_number))
    }
}

/// Options for [`JournalDecoder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JournalDecoder {
    strict_channel_length: bool,
}

impl JournalDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject channel journals whose LENGTH field disagrees with their decoded chapters.
    pub fn strict_channel_length(mut self, strict: bool) -> Self {
        self.strict_channel_length = strict;
        self
    }

    /// Walks the journal at the start of `cursor`.
    ///
    /// Nothing is kept between calls: after [`JournalError::MoreDataNeeded`]
    /// call again with the same journal once more bytes are available.
    #[instrument(name = "journal", skip_all, fields(available = cursor.available()))]
    pub fn decode<C: ByteCursor + ?Sized>(&self, cursor: &C) -> Result<RecoveryJournal, JournalError> {
        let result = self.walk(&mut JournalReader::new(cursor));
        match &result {
            Ok(journal) => event!(
                Level::DEBUG,
                length = journal.length,
                channels = journal.channel_journals.len(),
                checkpoint = journal.header.checkpoint_sequence_number(),
                "Decoded recovery journal"
            ),
            Err(JournalError::MoreDataNeeded { needed }) => event!(Level::TRACE, needed, "Recovery journal incomplete"),
            Err(e) => event!(Level::WARN, "Failed to decode recovery journal: {e}"),
        }
        result
    }

    fn walk<C: ByteCursor + ?Sized>(&self, reader: &mut JournalReader<C>) -> Result<RecoveryJournal, JournalError> {
        let header = JournalHeader::read(reader)?;

        let system_journal = if header.y_flag() { Some(SystemJournal::read(reader)?) } else { None };

        let mut channel_journals = Vec::new();
        if header.a_flag() {
            for _ in 0..header.total_channels() {
                channel_journals.push(ChannelJournal::read(reader, self.strict_channel_length)?);
            }
        }

        debug_assert_eq!(reader.position(), reader.required());
        Ok(RecoveryJournal {
            header,
            system_journal,
            channel_journals,
            length: reader.position(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryJournal {
    pub header: JournalHeader,
    pub system_journal: Option<SystemJournal>,
    pub channel_journals: Vec<ChannelJournal>,
    /// Bytes consumed from the start of the cursor.
    pub length: usize,
}

impl RecoveryJournal {
    /// Decodes with the default, lenient, [`JournalDecoder`].
    pub fn decode<C: ByteCursor + ?Sized>(cursor: &C) -> Result<Self, JournalError> {
        JournalDecoder::default().decode(cursor)
    }

    pub fn channel_journal(&self, channel: u8) -> Option<&ChannelJournal> {
        self.channel_journals.iter().find(|journal| journal.header.channel_number() == channel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packets::error::MalformedReason;
    use crate::packets::midi_packets::recovery_journal::channel_journal::channel_journal::{ChannelJournalChapter, ChannelJournalType};

    #[test]
    fn test_total_channels_for_every_flags_byte() {
        for flags in 0..=u8::MAX {
            let header = JournalHeader::new(flags, 0);
            assert_eq!(header.total_channels(), (flags & 0x0F) as usize + 1);
            assert!((1..=16).contains(&header.total_channels()));
        }
    }

    #[test]
    fn test_header_flags() {
        let header = JournalHeader::new(0b1011_0101, 0x1234);
        assert!(header.s_flag());
        assert!(!header.y_flag());
        assert!(header.a_flag());
        assert!(header.h_flag());
        assert_eq!(header.total_channels(), 6);
        assert_eq!(header.checkpoint_sequence_number(), 0x1234);
    }

    #[test]
    fn test_header_only_journal() {
        let data = [0x80u8, 0xAB, 0xCD];
        let journal = RecoveryJournal::decode(&data[..]).unwrap();
        assert_eq!(journal.length, 3);
        assert_eq!(journal.header.checkpoint_sequence_number(), 0xABCD);
        assert!(journal.system_journal.is_none());
        assert!(journal.channel_journals.is_empty());
    }

    #[test]
    fn test_incomplete_header() {
        assert_eq!(RecoveryJournal::decode(&[0u8; 0][..]), Err(JournalError::MoreDataNeeded { needed: 1 }));
        assert_eq!(RecoveryJournal::decode(&[0x20u8][..]), Err(JournalError::MoreDataNeeded { needed: 2 }));
        assert_eq!(RecoveryJournal::decode(&[0x20u8, 0x00][..]), Err(JournalError::MoreDataNeeded { needed: 1 }));
        assert_eq!(RecoveryJournal::decode(&[0x20u8, 0x00, 0x01][..]), Err(JournalError::MoreDataNeeded { needed: 3 }));
    }

    #[test]
    fn test_system_journal_then_channel() {
        let data = [
            0x60, 0x00, 0x07, // Y and A, one channel
            0x40, 0x03, 0xAA, // system journal, one chapter byte
            0x08, 0x04, 0x02, // channel 1, length 4, T
            0x15, 0x00, 0x00, // chapter T, then unrelated bytes
        ];
        let journal = RecoveryJournal::decode(&data[..]).unwrap();
        assert_eq!(journal.length, 10);
        let system_journal = journal.system_journal.as_ref().unwrap();
        assert_eq!(system_journal.offset, 3);
        assert!(system_journal.header.d_flag());

        let channel = journal.channel_journal(1).unwrap();
        assert_eq!(channel.offset, 6);
        assert!(matches!(
            channel.chapter(ChannelJournalType::ChannelAftertouch),
            Some(ChannelJournalChapter::ChannelAftertouch(_))
        ));
        assert!(journal.channel_journal(0).is_none());
    }

    #[test]
    fn test_strict_channel_length() {
        // channel declares 4 bytes but carries 5
        let data = [0x20u8, 0x00, 0x01, 0x00, 0x04, 0x10, 0x00, 0x00];
        let journal = JournalDecoder::new().decode(&data[..]).unwrap();
        assert_eq!(journal.length, 8);

        let strict = JournalDecoder::new().strict_channel_length(true);
        assert_eq!(
            strict.decode(&data[..]),
            Err(JournalError::Malformed(MalformedReason::ChannelJournalLengthMismatch {
                channel: 0,
                declared: 4,
                decoded: 5
            }))
        );
    }
}
