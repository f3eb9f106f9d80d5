use midi_types::{Program, Value7};

use crate::packets::error::JournalError;
use crate::packets::midi_packets::recovery_journal::{byte_cursor::ByteCursor, journal_reader::JournalReader};
use crate::packets::midi_packets::util::StatusBit;

/// Chapter P: the most recent Program Change, with the bank select that preceded it.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramChangeChapter {
    pub offset: usize,
    pub s: bool,
    pub program: Program,
    pub b: bool,
    pub bank_msb: Value7,
    pub x: bool,
    pub bank_lsb: Value7,
}

impl ProgramChangeChapter {
    pub const SIZE: usize = 3;

    pub(crate) fn read<C: ByteCursor + ?Sized>(reader: &mut JournalReader<C>) -> Result<Self, JournalError> {
        reader.require(Self::SIZE)?;
        let offset = reader.position();
        let program = reader.read_u8();
        let bank_msb = reader.read_u8();
        let bank_lsb = reader.read_u8();

        Ok(Self {
            offset,
            s: program.status_bit(),
            program: Program::from(program.seven_bits()),
            b: bank_msb.status_bit(),
            bank_msb: Value7::from(bank_msb.seven_bits()),
            x: bank_lsb.status_bit(),
            bank_lsb: Value7::from(bank_lsb.seven_bits()),
        })
    }
}
