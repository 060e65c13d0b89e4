use alloc::{collections::BTreeMap, string::String, vec::Vec};
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::{Encode, Session};

impl Encode for bool {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&[u8::from(*self)]);
    }
}

impl Encode for u8 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&[*self]);
    }
}

impl Encode for i8 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for u16 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for i16 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for u32 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for i32 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for u64 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for i64 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for f32 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

impl Encode for f64 {
    fn encode(&self, session: &mut Session) {
        session.write_bytes(&self.to_le_bytes());
    }
}

// Text is a sequence of UTF-8 bytes
impl Encode for str {
    fn encode(&self, session: &mut Session) {
        session.write_length_prefix(self.len());
        session.write_bytes(self.as_bytes());
    }
}

impl Encode for String {
    fn encode(&self, session: &mut Session) {
        self.as_str().encode(session);
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, session: &mut Session) {
        session.write_length_prefix(self.len());
        for x in self {
            x.encode(session);
        }
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, session: &mut Session) {
        self.as_slice().encode(session);
    }
}

impl<A: Encode, B: Encode> Encode for (A, B) {
    fn encode(&self, session: &mut Session) {
        self.0.encode(session);
        self.1.encode(session);
    }
}

#[cfg(feature = "std")]
impl<K: Encode, V: Encode, S> Encode for HashMap<K, V, S> {
    fn encode(&self, session: &mut Session) {
        session.write_length_prefix(self.len());
        for (k, v) in self {
            k.encode(session);
            v.encode(session);
        }
    }
}

impl<K: Encode, V: Encode> Encode for BTreeMap<K, V> {
    fn encode(&self, session: &mut Session) {
        session.write_length_prefix(self.len());
        for (k, v) in self {
            k.encode(session);
            v.encode(session);
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, session: &mut Session) {
        (**self).encode(session);
    }
}
