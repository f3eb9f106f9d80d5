use midi_types::Channel;
use tracing::{Level, event};

use super::{
    channel_aftertouch_chapter::ChannelAftertouchChapter, note_chapter::NoteChapter, note_extras_chapter::NoteExtrasChapter,
    pitch_wheel_chapter::PitchWheelChapter, poly_aftertouch_chapter::PolyAftertouchChapter, program_change_chapter::ProgramChangeChapter,
};
use crate::packets::error::{JournalError, MalformedReason};
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum ChannelJournalType {
    ProgramChange,
    ControlChange,
    ParameterSystem,
    PitchWheel,
    NoteOffOn,
    NoteCommandExtras,
    ChannelAftertouch,
    PolyAftertouch,
}

impl ChannelJournalType {
    /// Chapters in the order they appear on the wire.
    pub const ALL: [ChannelJournalType; 8] = [
        ChannelJournalType::ProgramChange,
        ChannelJournalType::ControlChange,
        ChannelJournalType::ParameterSystem,
        ChannelJournalType::PitchWheel,
        ChannelJournalType::NoteOffOn,
        ChannelJournalType::NoteCommandExtras,
        ChannelJournalType::ChannelAftertouch,
        ChannelJournalType::PolyAftertouch,
    ];

    /// Bit of this chapter in the table of contents byte.
    pub fn toc_mask(self) -> u8 {
        match self {
            ChannelJournalType::ProgramChange => 0b1000_0000,
            ChannelJournalType::ControlChange => 0b0100_0000,
            ChannelJournalType::ParameterSystem => 0b0010_0000,
            ChannelJournalType::PitchWheel => 0b0001_0000,
            ChannelJournalType::NoteOffOn => 0b0000_1000,
            ChannelJournalType::NoteCommandExtras => 0b0000_0100,
            ChannelJournalType::ChannelAftertouch => 0b0000_0010,
            ChannelJournalType::PolyAftertouch => 0b0000_0001,
        }
    }
}

#[repr(u32)]
enum ChannelJournalHeaderMasks {
    S = 0b1000_0000_0000_0000_0000_0000,
    Chan = 0b0111_1000_0000_0000_0000_0000,
    H = 0b0000_0100_0000_0000_0000_0000,
    Length = 0b0000_0011_1111_1111_0000_0000,
    Toc = 0b0000_0000_0000_0000_1111_1111,
}

/// The 24-bit channel journal header:
/// `S (1) | CHAN (4) | H (1) | LENGTH (10) | P C M W N E T A`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChannelJournalHeader {
    header: u32,
}

impl ChannelJournalHeader {
    pub const SIZE: usize = 3;

    pub fn s_flag(&self) -> bool {
        self.header & ChannelJournalHeaderMasks::S as u32 != 0
    }

    /// Zero-based channel number, 0..=15.
    pub fn channel_number(&self) -> u8 {
        ((self.header & ChannelJournalHeaderMasks::Chan as u32) >> 19) as u8
    }

    pub fn channel(&self) -> Channel {
        Channel::from(self.channel_number())
    }

    /// Set when Chapter C of this channel uses the enhanced encoding.
    pub fn h_flag(&self) -> bool {
        self.header & ChannelJournalHeaderMasks::H as u32 != 0
    }

    /// Length of the whole channel journal in bytes, header included.
    pub fn length(&self) -> u16 {
        ((self.header & ChannelJournalHeaderMasks::Length as u32) >> 8) as u16
    }

    pub fn toc(&self) -> u8 {
        (self.header & ChannelJournalHeaderMasks::Toc as u32) as u8
    }

    pub fn has_chapter(&self, chapter: ChannelJournalType) -> bool {
        self.toc() & chapter.toc_mask() != 0
    }

    pub fn chapters(&self) -> impl Iterator<Item = ChannelJournalType> + '_ {
        ChannelJournalType::ALL.into_iter().filter(|chapter| self.has_chapter(*chapter))
    }
}

impl From<u32> for ChannelJournalHeader {
    fn from(header: u32) -> Self {
        ChannelJournalHeader {
            header: header & 0x00FF_FFFF,
        }
    }
}

/// Span of a channel journal stepped over with its LENGTH field, starting
/// at the first chapter whose grammar is not decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedChapters {
    pub offset: usize,
    pub length: usize,
    pub chapters: Vec<ChannelJournalType>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChannelJournalChapter {
    ProgramChange(ProgramChangeChapter),
    PitchWheel(PitchWheelChapter),
    NoteOffOn(NoteChapter),
    NoteCommandExtras(NoteExtrasChapter),
    ChannelAftertouch(ChannelAftertouchChapter),
    PolyAftertouch(PolyAftertouchChapter),
    Unparsed(UnparsedChapters),
}

impl ChannelJournalChapter {
    pub fn offset(&self) -> usize {
        match self {
            ChannelJournalChapter::ProgramChange(chapter) => chapter.offset,
            ChannelJournalChapter::PitchWheel(chapter) => chapter.offset,
            ChannelJournalChapter::NoteOffOn(chapter) => chapter.offset,
            ChannelJournalChapter::NoteCommandExtras(chapter) => chapter.offset,
            ChannelJournalChapter::ChannelAftertouch(chapter) => chapter.offset,
            ChannelJournalChapter::PolyAftertouch(chapter) => chapter.offset,
            ChannelJournalChapter::Unparsed(span) => span.offset,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            ChannelJournalChapter::ProgramChange(_) => ProgramChangeChapter::SIZE,
            ChannelJournalChapter::PitchWheel(_) => PitchWheelChapter::SIZE,
            ChannelJournalChapter::NoteOffOn(chapter) => chapter.size(),
            ChannelJournalChapter::NoteCommandExtras(chapter) => chapter.size(),
            ChannelJournalChapter::ChannelAftertouch(_) => ChannelAftertouchChapter::SIZE,
            ChannelJournalChapter::PolyAftertouch(chapter) => chapter.size(),
            ChannelJournalChapter::Unparsed(span) => span.length,
        }
    }

    fn covers(&self, chapter_type: ChannelJournalType) -> bool {
        match (self, chapter_type) {
            (ChannelJournalChapter::ProgramChange(_), ChannelJournalType::ProgramChange)
            | (ChannelJournalChapter::PitchWheel(_), ChannelJournalType::PitchWheel)
            | (ChannelJournalChapter::NoteOffOn(_), ChannelJournalType::NoteOffOn)
            | (ChannelJournalChapter::NoteCommandExtras(_), ChannelJournalType::NoteCommandExtras)
            | (ChannelJournalChapter::ChannelAftertouch(_), ChannelJournalType::ChannelAftertouch)
            | (ChannelJournalChapter::PolyAftertouch(_), ChannelJournalType::PolyAftertouch) => true,
            (ChannelJournalChapter::Unparsed(span), chapter_type) => span.chapters.contains(&chapter_type),
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChannelJournal {
    pub offset: usize,
    pub header: ChannelJournalHeader,
    pub chapters: Vec<ChannelJournalChapter>,
}

impl ChannelJournal {
    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>, strict_length: bool) -> Result<Self, JournalError> {
        reader.require(ChannelJournalHeader::SIZE)?;
        let offset = reader.position();
        let header = ChannelJournalHeader::from(reader.read_u24_be());
        event!(
            Level::TRACE,
            channel = header.channel_number(),
            length = header.length(),
            toc = header.toc(),
            "Channel journal header"
        );

        let mut chapters = Vec::new();
        for chapter_type in header.chapters() {
            let chapter = match chapter_type {
                ChannelJournalType::ProgramChange => ChannelJournalChapter::ProgramChange(ProgramChangeChapter::read(reader)?),
                ChannelJournalType::PitchWheel => ChannelJournalChapter::PitchWheel(PitchWheelChapter::read(reader)?),
                ChannelJournalType::NoteOffOn => ChannelJournalChapter::NoteOffOn(NoteChapter::read(reader)?),
                ChannelJournalType::NoteCommandExtras => ChannelJournalChapter::NoteCommandExtras(NoteExtrasChapter::read(reader)?),
                ChannelJournalType::ChannelAftertouch => ChannelJournalChapter::ChannelAftertouch(ChannelAftertouchChapter::read(reader)?),
                ChannelJournalType::PolyAftertouch => ChannelJournalChapter::PolyAftertouch(PolyAftertouchChapter::read(reader)?),
                ChannelJournalType::ControlChange | ChannelJournalType::ParameterSystem => {
                    // Everything from here to the end of the channel journal is stepped over.
                    chapters.push(Self::skip_remaining(reader, offset, &header, chapter_type)?);
                    return Ok(ChannelJournal { offset, header, chapters });
                }
            };
            chapters.push(chapter);
        }

        let decoded = reader.position() - offset;
        if decoded != header.length() as usize {
            let reason = MalformedReason::ChannelJournalLengthMismatch {
                channel: header.channel_number(),
                declared: header.length(),
                decoded,
            };
            if strict_length {
                return Err(reason.into());
            }
            event!(Level::WARN, "{reason}");

            // LENGTH still bounds the channel, step over whatever the chapters left behind
            if let Some(length) = (header.length() as usize).checked_sub(decoded).filter(|length| *length > 0) {
                let start = reader.require_and_skip(length)?;
                chapters.push(ChannelJournalChapter::Unparsed(UnparsedChapters {
                    offset: start,
                    length,
                    chapters: Vec::new(),
                }));
            }
        }

        Ok(ChannelJournal { offset, header, chapters })
    }

    fn skip_remaining<C: ByteCursor + ?Sized>(
        reader: &mut JournalReader<C>,
        offset: usize,
        header: &ChannelJournalHeader,
        first: ChannelJournalType,
    ) -> Result<ChannelJournalChapter, JournalError> {
        let decoded = reader.position() - offset;
        let length = (header.length() as usize)
            .checked_sub(decoded)
            .ok_or(MalformedReason::ChannelJournalOverrun {
                channel: header.channel_number(),
                declared: header.length(),
                decoded,
            })?;

        let chapters: Vec<_> = header.chapters().skip_while(|chapter| *chapter != first).collect();
        event!(Level::TRACE, length, ?chapters, "Skipping undecoded chapters");
        let offset = reader.require_and_skip(length)?;
        Ok(ChannelJournalChapter::Unparsed(UnparsedChapters { offset, length, chapters }))
    }

    pub fn channel(&self) -> Channel {
        self.header.channel()
    }

    /// The decoded chapter, or the undecoded span containing it.
    pub fn chapter(&self, chapter_type: ChannelJournalType) -> Option<&ChannelJournalChapter> {
        self.chapters.iter().find(|chapter| chapter.covers(chapter_type))
    }

    /// Bytes consumed from the cursor by this channel journal.
    pub fn size(&self) -> usize {
        ChannelJournalHeader::SIZE + self.chapters.iter().map(ChannelJournalChapter::size).sum::<usize>()
    }
}
