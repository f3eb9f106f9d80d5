use super::byte_cursor::ByteCursor;
use crate::packets::error::JournalError;

/// Running count of the bytes a decode attempt needs to have available.
///
/// The watermark only ever grows. A structure of `n` bytes is accounted for
/// with [`LengthBudget::require`] before any of its bytes are read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LengthBudget {
    required: usize,
}

impl LengthBudget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(&self) -> usize {
        self.required
    }

    pub fn require(&mut self, n: usize, available: usize) -> Result<(), JournalError> {
        self.required += n;
        if available < self.required {
            return Err(JournalError::MoreDataNeeded {
                needed: self.required - available,
            });
        }
        Ok(())
    }
}

/// Read position over a [`ByteCursor`], kept in step with a [`LengthBudget`].
#[derive(Debug)]
pub struct JournalReader<'a, C: ByteCursor + ?Sized> {
    cursor: &'a C,
    position: usize,
    budget: LengthBudget,
}

impl<'a, C: ByteCursor + ?Sized> JournalReader<'a, C> {
    pub fn new(cursor: &'a C) -> Self {
        JournalReader {
            cursor,
            position: 0,
            budget: LengthBudget::new(),
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn required(&self) -> usize {
        self.budget.required()
    }

    /// Grows the watermark by `n` and fails if the cursor cannot cover it yet.
    pub fn require(&mut self, n: usize) -> Result<(), JournalError> {
        self.budget.require(n, self.cursor.available())
    }

    /// Requires `n` bytes, then steps over them.
    pub fn require_and_skip(&mut self, n: usize) -> Result<usize, JournalError> {
        self.require(n)?;
        Ok(self.skip(n))
    }

    /// Skips `n` already required bytes and returns the offset of the first one.
    pub(crate) fn skip(&mut self, n: usize) -> usize {
        debug_assert!(self.position + n <= self.budget.required(), "skip past the required watermark");
        let start = self.position;
        self.position += n;
        start
    }

    pub(crate) fn read_u8(&mut self) -> u8 {
        debug_assert!(self.position < self.budget.required(), "read past the required watermark");
        let byte = self.cursor.peek(self.position);
        self.position += 1;
        byte
    }

    pub(crate) fn read_u16_be(&mut self) -> u16 {
        u16::from_be_bytes([self.read_u8(), self.read_u8()])
    }

    pub(crate) fn read_u24_be(&mut self) -> u32 {
        u32::from_be_bytes([0, self.read_u8(), self.read_u8(), self.read_u8()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget_reports_shortfall() {
        let mut budget = LengthBudget::new();
        assert_eq!(budget.require(3, 4), Ok(()));
        assert_eq!(budget.require(3, 4), Err(JournalError::MoreDataNeeded { needed: 2 }));
        assert_eq!(budget.required(), 6);
    }

    #[test]
    fn test_budget_never_rewinds() {
        let mut budget = LengthBudget::new();
        let _ = budget.require(10, 0);
        assert_eq!(budget.required(), 10);
        assert_eq!(budget.require(0, 10), Ok(()));
        assert_eq!(budget.required(), 10);
    }

    #[test]
    fn test_big_endian_reads() {
        let data = [0x12u8, 0x34, 0x56, 0x78, 0x9A, 0xBC];
        let mut reader = JournalReader::new(&data[..]);
        reader.require(6).unwrap();
        assert_eq!(reader.read_u8(), 0x12);
        assert_eq!(reader.read_u16_be(), 0x3456);
        assert_eq!(reader.read_u24_be(), 0x0078_9ABC);
        assert_eq!(reader.position(), reader.required());
    }

    #[test]
    fn test_failed_require_does_not_move_position() {
        let data = [0x00u8; 2];
        let mut reader = JournalReader::new(&data[..]);
        reader.require(1).unwrap();
        reader.read_u8();
        assert_eq!(reader.require(2), Err(JournalError::MoreDataNeeded { needed: 1 }));
        assert_eq!(reader.position(), 1);
    }

    #[test]
    fn test_require_and_skip_returns_offset() {
        let data = [0x00u8; 5];
        let mut reader = JournalReader::new(&data[..]);
        assert_eq!(reader.require_and_skip(2), Ok(0));
        assert_eq!(reader.require_and_skip(3), Ok(2));
        assert_eq!(reader.require_and_skip(1), Err(JournalError::MoreDataNeeded { needed: 1 }));
        assert_eq!(reader.position(), 5);
    }
}
