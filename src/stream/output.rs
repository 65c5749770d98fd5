use bytes::{BufMut, Bytes, BytesMut};
use serde_json::{Map, Value};

use super::generic;
use super::NamedWriteable;

/// Append-only wire buffer.
///
/// Writing into memory cannot fail, so none of the write primitives return
/// a `Result`. Callers that ship the frozen bytes over a transport handle
/// that transport's errors themselves.
#[derive(Debug, Default)]
pub struct StreamOutput {
    buf: BytesMut,
}

impl StreamOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn freeze(self) -> Bytes {
        self.buf.freeze()
    }

    pub fn write_byte(&mut self, b: u8) {
        self.buf.put_u8(b);
    }

    pub fn write_bool(&mut self, v: bool) {
        self.write_byte(u8::from(v));
    }

    /// Variable-length unsigned int: 7 bits per byte, low group first,
    /// high bit set on every byte except the last.
    pub fn write_vint(&mut self, mut v: u32) {
        while v & !0x7F != 0 {
            self.buf.put_u8(((v & 0x7F) | 0x80) as u8);
            v >>= 7;
        }
        self.buf.put_u8(v as u8);
    }

    pub fn write_i64(&mut self, v: i64) {
        self.buf.put_i64(v);
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.put_u64(v);
    }

    /// Raw IEEE-754 bits, big-endian. NaN payloads and infinities go out
    /// verbatim.
    pub fn write_f64(&mut self, v: f64) {
        self.buf.put_u64(v.to_bits());
    }

    pub fn write_string(&mut self, s: &str) {
        self.write_len(s.len());
        self.buf.put_slice(s.as_bytes());
    }

    pub fn write_string_list(&mut self, list: &[String]) {
        self.write_len(list.len());
        for s in list {
            self.write_string(s);
        }
    }

    pub fn write_named_writeable<T: NamedWriteable + ?Sized>(&mut self, value: &T) {
        self.write_string(value.writeable_name());
        value.write_to(self);
    }

    pub fn write_generic_value(&mut self, value: &Value) {
        generic::write_value(self, value);
    }

    /// Writes an optional map; `None` goes out as the null marker.
    pub fn write_map(&mut self, map: Option<&Map<String, Value>>) {
        match map {
            Some(map) => generic::write_map(self, map),
            None => generic::write_null(self),
        }
    }

    pub(crate) fn write_len(&mut self, len: usize) {
        debug_assert!(len <= u32::MAX as usize, "length {len} does not fit a vint");
        let len = u32::try_from(len).unwrap_or(u32::MAX);
        self.write_vint(len);
    }
}
