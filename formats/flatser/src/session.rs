//! Growable byte buffer with a single read/write cursor

use alloc::vec::Vec;

use log::{debug, trace};

use crate::{Decode, DecodeError, Encode, LENGTH_PREFIX_SIZE};

/// One encode/decode session
///
/// The cursor is shared between reading and writing. After encoding, call
/// [`Session::rewind`] before decoding the same bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    buffer: Vec<u8>,
    cursor: usize,
}

impl Session {
    /// Creates an empty session
    #[must_use]
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
        }
    }

    /// Creates a session that reads from `buffer`, starting at its first byte
    #[must_use]
    pub fn with_buffer(buffer: impl Into<Vec<u8>>) -> Self {
        Self {
            buffer: buffer.into(),
            cursor: 0,
        }
    }

    /// Encodes a single value at the cursor
    ///
    /// # Panics
    /// Panics if a text, sequence or map inside `value` has more than
    /// `u32::MAX` elements
    pub fn encode<T: Encode + ?Sized>(&mut self, value: &T) {
        value.encode(self);
    }

    /// Decodes a single value at the cursor into `value`
    ///
    /// # Errors
    /// Returns an error if the buffer runs out before `value` is complete, or
    /// if a text payload is not UTF-8. `value` may be partially overwritten.
    pub fn decode<T: Decode + ?Sized>(&mut self, value: &mut T) -> Result<(), DecodeError> {
        value.decode(self)
    }

    /// Encodes several values back to back, in order
    ///
    /// # Panics
    /// Same as [`Session::encode`]
    pub fn encode_all(&mut self, values: &[&dyn Encode]) {
        for value in values {
            value.encode(self);
        }
    }

    /// Decodes several values back to back, in order
    ///
    /// Stops at the first value that fails; later values are left untouched.
    ///
    /// # Errors
    /// Returns the error of the first value that failed to decode
    pub fn decode_all(&mut self, values: &mut [&mut dyn Decode]) -> Result<(), DecodeError> {
        for value in values {
            value.decode(self)?;
        }
        Ok(())
    }

    /// Moves the cursor back to the start without touching the bytes
    pub fn rewind(&mut self) {
        self.cursor = 0;
    }

    /// Replaces the bytes of this session and rewinds it
    pub fn set_buffer(&mut self, buffer: impl Into<Vec<u8>>) {
        self.buffer = buffer.into();
        self.cursor = 0;
        trace!("Session buffer replaced with {} bytes", self.buffer.len());
    }

    /// Drops all bytes and rewinds
    pub fn clear_buffer(&mut self) {
        trace!("Clearing {} byte session buffer", self.buffer.len());
        self.buffer.clear();
        self.cursor = 0;
    }

    /// Returns the bytes written so far
    #[must_use]
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Ends the session, handing out its bytes
    #[must_use]
    pub fn into_buffer(self) -> Vec<u8> {
        self.buffer
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of bytes between the cursor and the end of the buffer
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Writes raw bytes at the cursor, growing the buffer only as far as needed
    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let end = self.cursor + bytes.len();
        if self.remaining() < bytes.len() {
            trace!("Growing session buffer from {} to {end} bytes", self.buffer.len());
            self.buffer.resize(end, 0);
        }
        self.buffer[self.cursor..end].copy_from_slice(bytes);
        self.cursor = end;
    }

    /// Reads `len` raw bytes at the cursor
    ///
    /// # Errors
    /// Returns [`DecodeError::ShortRead`] if fewer than `len` bytes remain. The
    /// cursor does not move in that case.
    pub fn read_bytes(&mut self, len: usize) -> Result<&[u8], DecodeError> {
        self.ensure_remaining(len)?;
        let start = self.cursor;
        self.cursor += len;
        Ok(&self.buffer[start..self.cursor])
    }

    /// Reads exactly `N` raw bytes at the cursor
    ///
    /// # Errors
    /// Returns [`DecodeError::ShortRead`] if fewer than `N` bytes remain. The
    /// cursor does not move in that case.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N], DecodeError> {
        let mut bytes = [0u8; N];
        bytes.copy_from_slice(self.read_bytes(N)?);
        Ok(bytes)
    }

    /// Writes the element count of a container
    ///
    /// # Panics
    /// Panics if `len` does not fit in a `u32`
    pub(crate) fn write_length_prefix(&mut self, len: usize) {
        let len: u32 = len
            .try_into()
            .expect("Container length must fit in a u32 length prefix");
        self.write_bytes(&len.to_le_bytes());
    }

    /// Reads the element count of a container and checks that `len` elements
    /// of at least `min_element_len` bytes each could still follow
    pub(crate) fn read_length_prefix(
        &mut self,
        min_element_len: usize,
    ) -> Result<usize, DecodeError> {
        let len = u32::from_le_bytes(self.read_array::<LENGTH_PREFIX_SIZE>()?) as usize;
        let needed = len.saturating_mul(min_element_len);
        if needed > self.remaining() {
            debug!(
                "Length prefix of {len} elements needs at least {needed} bytes, only {} left",
                self.remaining()
            );
            return Err(DecodeError::ShortRead {
                needed,
                available: self.remaining(),
            });
        }
        Ok(len)
    }

    fn ensure_remaining(&self, needed: usize) -> Result<(), DecodeError> {
        let available = self.remaining();
        if available < needed {
            debug!(
                "Short read at offset {}: {needed} bytes needed, {available} available",
                self.cursor
            );
            return Err(DecodeError::ShortRead { needed, available });
        }
        Ok(())
    }
}

impl From<Vec<u8>> for Session {
    fn from(buffer: Vec<u8>) -> Self {
        Self::with_buffer(buffer)
    }
}

impl From<&[u8]> for Session {
    fn from(buffer: &[u8]) -> Self {
        Self::with_buffer(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::DecodeError;

    #[test]
    fn grows_by_exactly_the_written_size() {
        let mut session = Session::new();
        session.write_bytes(&[1, 2, 3]);
        assert_eq!(session.len(), 3);
        assert_eq!(session.cursor(), 3);
        session.write_bytes(&[4]);
        assert_eq!(session.buffer(), &[1, 2, 3, 4]);
    }

    #[test]
    fn writing_after_rewind_overwrites_without_truncating() {
        let mut session = Session::new();
        session.write_bytes(&[1, 2, 3, 4]);
        session.rewind();
        session.write_bytes(&[9, 9]);
        assert_eq!(session.buffer(), &[9, 9, 3, 4]);
        assert_eq!(session.cursor(), 2);
        session.write_bytes(&[7, 7, 7]);
        assert_eq!(session.buffer(), &[9, 9, 7, 7, 7]);
    }

    #[test]
    fn short_read_leaves_cursor_in_place() {
        let mut session = Session::with_buffer([1u8, 2, 3].as_slice());
        assert_eq!(session.read_array::<2>().unwrap(), [1, 2]);
        assert_eq!(
            session.read_array::<2>(),
            Err(DecodeError::ShortRead {
                needed: 2,
                available: 1
            })
        );
        assert_eq!(session.cursor(), 2);
        assert_eq!(session.read_bytes(1).unwrap(), &[3]);
        assert_eq!(session.remaining(), 0);
    }

    #[test]
    fn set_buffer_rewinds() {
        let mut session = Session::new();
        session.write_bytes(&[5]);
        session.set_buffer([1u8, 2].as_slice());
        assert_eq!(session.cursor(), 0);
        assert_eq!(session.buffer(), &[1, 2]);
    }

    #[test]
    fn clear_empties_and_rewinds() {
        let mut session = Session::from(alloc::vec![1u8, 2, 3]);
        session.read_bytes(2).unwrap();
        session.clear_buffer();
        assert!(session.is_empty());
        assert_eq!(session.cursor(), 0);
        assert!(session.read_bytes(1).is_err());
    }

    #[test]
    fn impossible_length_prefix_is_rejected_before_allocating() {
        let mut session = Session::with_buffer(u32::MAX.to_le_bytes().as_slice());
        assert_eq!(
            session.read_length_prefix(1),
            Err(DecodeError::ShortRead {
                needed: u32::MAX as usize,
                available: 0
            })
        );
        assert_eq!(session.cursor(), 4);

        session.rewind();
        assert_eq!(session.read_length_prefix(0).unwrap(), u32::MAX as usize);
    }
}
