use core::str;
#[cfg(feature = "std")]
use core::hash::{BuildHasher, Hash};

use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{Decode, DecodeError, Session, LENGTH_PREFIX_SIZE};

impl Decode for bool {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        let [byte] = session.read_array::<1>()?;
        *self = byte != 0;
        Ok(())
    }

    fn min_encoded_len() -> usize {
        1
    }
}

impl Decode for u8 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        let [byte] = session.read_array::<1>()?;
        *self = byte;
        Ok(())
    }

    fn min_encoded_len() -> usize {
        1
    }
}

impl Decode for i8 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        1
    }
}

impl Decode for u16 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        2
    }
}

impl Decode for i16 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        2
    }
}

impl Decode for u32 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        4
    }
}

impl Decode for i32 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        4
    }
}

impl Decode for u64 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        8
    }
}

impl Decode for i64 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        8
    }
}

impl Decode for f32 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        4
    }
}

impl Decode for f64 {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        *self = Self::from_le_bytes(session.read_array()?);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        8
    }
}

/// Text is replaced only once the whole payload is present and valid UTF-8
impl Decode for String {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        let len = session.read_length_prefix(1)?;
        let text = str::from_utf8(session.read_bytes(len)?)?;
        self.clear();
        self.push_str(text);
        Ok(())
    }

    fn min_encoded_len() -> usize {
        LENGTH_PREFIX_SIZE
    }
}

/// The vector is reset to `len` default elements before any of them is read.
/// If an element fails, the ones before it keep their decoded values and the
/// rest stay at their defaults.
impl<T: Decode + Default> Decode for Vec<T> {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        let len = session.read_length_prefix(T::min_encoded_len())?;
        self.clear();
        self.resize_with(len, T::default);
        for x in self.iter_mut() {
            x.decode(session)?;
        }
        Ok(())
    }

    fn min_encoded_len() -> usize {
        LENGTH_PREFIX_SIZE
    }
}

impl<A: Decode, B: Decode> Decode for (A, B) {
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        self.0.decode(session)?;
        self.1.decode(session)
    }

    fn min_encoded_len() -> usize {
        A::min_encoded_len() + B::min_encoded_len()
    }
}

/// Entries are inserted into the existing map. A key seen twice keeps the
/// value that came last.
#[cfg(feature = "std")]
impl<K, V, S> Decode for HashMap<K, V, S>
where
    K: Decode + Default + Eq + Hash,
    V: Decode + Default,
    S: BuildHasher,
{
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        let len = session.read_length_prefix(<(K, V)>::min_encoded_len())?;
        for _ in 0..len {
            let mut entry = <(K, V)>::default();
            entry.decode(session)?;
            self.insert(entry.0, entry.1);
        }
        Ok(())
    }

    fn min_encoded_len() -> usize {
        LENGTH_PREFIX_SIZE
    }
}

/// Same merge semantics as the `HashMap` impl
impl<K, V> Decode for BTreeMap<K, V>
where
    K: Decode + Default + Ord,
    V: Decode + Default,
{
    fn decode(&mut self, session: &mut Session) -> Result<(), DecodeError> {
        let len = session.read_length_prefix(<(K, V)>::min_encoded_len())?;
        for _ in 0..len {
            let mut entry = <(K, V)>::default();
            entry.decode(session)?;
            self.insert(entry.0, entry.1);
        }
        Ok(())
    }

    fn min_encoded_len() -> usize {
        LENGTH_PREFIX_SIZE
    }
}
