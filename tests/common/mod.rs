use bytes::{BufMut, Bytes, BytesMut};

/// Builds recovery journals byte by byte for tests.
pub struct JournalBuilder {
    buffer: BytesMut,
    channel_start: Option<usize>,
}

#[allow(dead_code)]
impl JournalBuilder {
    pub const S: u8 = 0b1000_0000;
    pub const Y: u8 = 0b0100_0000;
    pub const A: u8 = 0b0010_0000;
    pub const H: u8 = 0b0001_0000;

    pub const P: u8 = 0b1000_0000;
    pub const C: u8 = 0b0100_0000;
    pub const M: u8 = 0b0010_0000;
    pub const W: u8 = 0b0001_0000;
    pub const N: u8 = 0b0000_1000;
    pub const E: u8 = 0b0000_0100;
    pub const T: u8 = 0b0000_0010;
    pub const PA: u8 = 0b0000_0001;

    pub fn new(flags: u8, checkpoint: u16) -> Self {
        let mut buffer = BytesMut::new();
        buffer.put_u8(flags);
        buffer.put_u16(checkpoint);
        JournalBuilder { buffer, channel_start: None }
    }

    pub fn system_journal(mut self, flags: u16, chapters: &[u8]) -> Self {
        let length = (chapters.len() + 2) as u16;
        self.buffer.put_u16(flags | length);
        self.buffer.put_slice(chapters);
        self
    }

    /// Starts a channel journal; its LENGTH is patched in by the next
    /// `channel` call or by `build`.
    pub fn channel(mut self, channel: u8, toc: u8) -> Self {
        self.finish_channel();
        self.channel_start = Some(self.buffer.len());
        let header = ((channel as u32) << 19) | toc as u32;
        self.buffer.put_slice(&header.to_be_bytes()[1..]);
        self
    }

    /// Starts a channel journal with an explicit LENGTH field.
    pub fn channel_with_length(mut self, channel: u8, length: u16, toc: u8) -> Self {
        self.finish_channel();
        let header = ((channel as u32) << 19) | ((length as u32) << 8) | toc as u32;
        self.buffer.put_slice(&header.to_be_bytes()[1..]);
        self
    }

    pub fn bytes(mut self, bytes: &[u8]) -> Self {
        self.buffer.put_slice(bytes);
        self
    }

    pub fn note_chapter(mut self, len: u8, low: u8, high: u8) -> Self {
        self.buffer.put_u16(((len as u16) << 8) | ((low as u16) << 4) | high as u16);
        let log_count = if len == 127 && low == 15 && high == 0 { 128 } else { len as usize };
        for note in 0..log_count {
            self.buffer.put_u8(note as u8 & 0x7F);
            self.buffer.put_u8(0x40);
        }
        if low <= high {
            for _ in low..=high {
                self.buffer.put_u8(0x00);
            }
        }
        self
    }

    /// Chapter E or A with `count` logs.
    pub fn log_chapter(mut self, count: usize) -> Self {
        self.buffer.put_u8((count - 1) as u8);
        for note in 0..count {
            self.buffer.put_u8(note as u8 & 0x7F);
            self.buffer.put_u8(0x01);
        }
        self
    }

    fn finish_channel(&mut self) {
        if let Some(start) = self.channel_start.take() {
            let length = (self.buffer.len() - start) as u32;
            let header = u32::from_be_bytes([0, self.buffer[start], self.buffer[start + 1], self.buffer[start + 2]]);
            let header = (header & !0x0003_FF00) | (length << 8);
            let bytes = header.to_be_bytes();
            self.buffer[start..start + 3].copy_from_slice(&bytes[1..]);
        }
    }

    pub fn build(mut self) -> Bytes {
        self.finish_channel();
        self.buffer.freeze()
    }
}
