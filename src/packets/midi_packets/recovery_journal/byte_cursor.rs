use std::collections::VecDeque;

use bytes::{Bytes, BytesMut};

/// Read-only, random access view over the bytes of a journal received so far.
///
/// Offsets are zero-based from the first byte of the recovery journal. The
/// decoder never peeks at an offset it has not first checked against
/// [`ByteCursor::available`].
pub trait ByteCursor {
    fn available(&self) -> usize;
    fn peek(&self, offset: usize) -> u8;
}

impl ByteCursor for [u8] {
    fn available(&self) -> usize {
        self.len()
    }

    fn peek(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl<const N: usize> ByteCursor for [u8; N] {
    fn available(&self) -> usize {
        N
    }

    fn peek(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl ByteCursor for Vec<u8> {
    fn available(&self) -> usize {
        self.len()
    }

    fn peek(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl ByteCursor for VecDeque<u8> {
    fn available(&self) -> usize {
        self.len()
    }

    fn peek(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl ByteCursor for Bytes {
    fn available(&self) -> usize {
        self.len()
    }

    fn peek(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl ByteCursor for BytesMut {
    fn available(&self) -> usize {
        self.len()
    }

    fn peek(&self, offset: usize) -> u8 {
        self[offset]
    }
}

impl<C: ByteCursor + ?Sized> ByteCursor for &C {
    fn available(&self) -> usize {
        (**self).available()
    }

    fn peek(&self, offset: usize) -> u8 {
        (**self).peek(offset)
    }
}
