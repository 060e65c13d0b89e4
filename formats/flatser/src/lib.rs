//! Flat, schema-less serialization into a single growable buffer
//!
//! A [`Session`] owns the bytes and a cursor. Values are written with
//! [`Session::encode`] and read back, in the same order, with
//! [`Session::decode`]. The format carries no type tags and no framing for
//! composite values: the decoder has to know what it is reading.
//!
//! Wire format:
//! - fixed-width integers and floats: little-endian, no padding
//! - `bool`: one byte, `0` or `1` (any nonzero byte decodes as `true`)
//! - text and sequences: `u32` element count followed by the elements
//! - maps: `u32` entry count followed by `key value` pairs
//! - pairs and composites: their fields back to back
#![no_std]

extern crate alloc;

#[cfg(any(feature = "std", test))]
extern crate std;

use thiserror::Error;

mod de_impls;
mod ser_impls;
mod session;

pub use session::Session;

/// Size of the element/entry count that precedes every text, sequence and map
pub const LENGTH_PREFIX_SIZE: usize = 4;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Not enough bytes left after the cursor
    #[error("Expected {needed} bytes, but only {available} bytes available")]
    ShortRead { needed: usize, available: usize },
    /// Text payload is not valid UTF-8
    #[error("Invalid UTF-8 sequence: {0}")]
    InvalidUtf8(#[from] core::str::Utf8Error),
}

/// Writes a value at the cursor of a session
///
/// Composite types implement this by encoding each of their fields in a fixed
/// order, usually through [`Session::encode_all`].
pub trait Encode {
    /// Appends the encoding of this value to the session, advancing its cursor
    ///
    /// # Panics
    /// Container impls panic if the element count does not fit in a `u32`
    fn encode(&self, session: &mut Session);
}

/// Reads a value from the cursor of a session, in place
///
/// Implementations must read fields in exactly the order [`Encode`] wrote
/// them. Nothing checks this.
pub trait Decode {
    /// Overwrites `self` with the value at the cursor
    ///
    /// # Errors
    /// Returns an error as soon as one of the underlying reads fails. Neither
    /// the cursor nor the fields decoded up to that point are rolled back.
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError>;

    /// Smallest number of bytes any encoding of this type occupies
    ///
    /// Used to reject length prefixes that cannot possibly be satisfied before
    /// allocating for them. Zero disables the check.
    #[must_use]
    fn min_encoded_len() -> usize
    where
        Self: Sized,
    {
        0
    }
}
