use bytes::{Buf, Bytes};
use serde_json::{Map, Value};

use super::error::DecodeError;
use super::generic;
use super::limits::StreamLimits;

/// Cursor over a received wire buffer.
///
/// Every read checks the remaining length first, so a short buffer yields
/// [`DecodeError::Truncated`] instead of a panic.
#[derive(Debug, Clone)]
pub struct StreamInput {
    buf: Bytes,
    limits: StreamLimits,
}

impl StreamInput {
    pub fn new(buf: impl Into<Bytes>) -> Self {
        Self::with_limits(buf, StreamLimits::default())
    }

    pub fn with_limits(buf: impl Into<Bytes>, limits: StreamLimits) -> Self {
        Self {
            buf: buf.into(),
            limits,
        }
    }

    pub fn limits(&self) -> &StreamLimits {
        &self.limits
    }

    pub fn remaining(&self) -> usize {
        self.buf.remaining()
    }

    pub fn is_exhausted(&self) -> bool {
        !self.buf.has_remaining()
    }

    fn ensure(&self, needed: usize) -> Result<(), DecodeError> {
        let remaining = self.buf.remaining();
        if remaining < needed {
            return Err(DecodeError::Truncated { needed, remaining });
        }
        Ok(())
    }

    pub fn read_byte(&mut self) -> Result<u8, DecodeError> {
        self.ensure(1)?;
        Ok(self.buf.get_u8())
    }

    pub fn read_bool(&mut self) -> Result<bool, DecodeError> {
        Ok(self.read_byte()? != 0)
    }

    pub fn read_vint(&mut self) -> Result<u32, DecodeError> {
        let mut value = 0u32;
        for shift in (0..35).step_by(7) {
            let b = self.read_byte()?;
            // Fifth byte may only carry the top four bits.
            if shift == 28 && b & 0xF0 != 0 {
                return Err(DecodeError::MalformedVInt);
            }
            value |= u32::from(b & 0x7F) << shift;
            if b & 0x80 == 0 {
                return Ok(value);
            }
        }
        Err(DecodeError::MalformedVInt)
    }

    pub fn read_i64(&mut self) -> Result<i64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_i64())
    }

    pub fn read_u64(&mut self) -> Result<u64, DecodeError> {
        self.ensure(8)?;
        Ok(self.buf.get_u64())
    }

    pub fn read_f64(&mut self) -> Result<f64, DecodeError> {
        self.ensure(8)?;
        Ok(f64::from_bits(self.buf.get_u64()))
    }

    pub fn read_string(&mut self) -> Result<String, DecodeError> {
        let len = self.read_vint()? as usize;
        if len > self.limits.max_string_bytes {
            return Err(DecodeError::LengthOutOfBounds {
                length: len,
                max: self.limits.max_string_bytes,
            });
        }
        self.ensure(len)?;
        let raw = self.buf.split_to(len);
        Ok(String::from_utf8(raw.to_vec())?)
    }

    pub fn read_string_list(&mut self) -> Result<Vec<String>, DecodeError> {
        let len = self.read_collection_len()?;
        let mut list = Vec::with_capacity(len);
        for _ in 0..len {
            list.push(self.read_string()?);
        }
        Ok(list)
    }

    pub fn read_generic_value(&mut self) -> Result<Value, DecodeError> {
        generic::read_value(self, 0)
    }

    /// Reads a map written by [`StreamOutput::write_map`](super::StreamOutput::write_map).
    pub fn read_map(&mut self) -> Result<Option<Map<String, Value>>, DecodeError> {
        generic::read_optional_map(self)
    }

    pub(crate) fn read_collection_len(&mut self) -> Result<usize, DecodeError> {
        let len = self.read_vint()? as usize;
        if len > self.limits.max_collection_len {
            return Err(DecodeError::LengthOutOfBounds {
                length: len,
                max: self.limits.max_collection_len,
            });
        }
        Ok(len)
    }
}
