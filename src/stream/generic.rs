//! Self-describing values used for free-form metadata maps.
//!
//! Each value is prefixed with a signed type byte:
//!
//! | byte | value            |
//! |------|------------------|
//! | -1   | null             |
//! | 0    | string           |
//! | 2    | 64-bit integer   |
//! | 4    | double           |
//! | 5    | boolean          |
//! | 7    | list             |
//! | 10   | map (key order kept) |
//! | 26   | unsigned 64-bit integer above `i64::MAX` |

use serde_json::{Map, Number, Value};

use super::error::DecodeError;
use super::input::StreamInput;
use super::output::StreamOutput;

const NULL: i8 = -1;
const STRING: i8 = 0;
const LONG: i8 = 2;
const DOUBLE: i8 = 4;
const BOOLEAN: i8 = 5;
const LIST: i8 = 7;
const MAP: i8 = 10;
const UNSIGNED_LONG: i8 = 26;

fn write_type(out: &mut StreamOutput, t: i8) {
    out.write_byte(t as u8);
}

pub(crate) fn write_null(out: &mut StreamOutput) {
    write_type(out, NULL);
}

pub(crate) fn write_map(out: &mut StreamOutput, map: &Map<String, Value>) {
    write_type(out, MAP);
    out.write_len(map.len());
    for (key, value) in map {
        out.write_string(key);
        write_value(out, value);
    }
}

pub(crate) fn write_value(out: &mut StreamOutput, value: &Value) {
    match value {
        Value::Null => write_null(out),
        Value::String(s) => {
            write_type(out, STRING);
            out.write_string(s);
        }
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                write_type(out, LONG);
                out.write_i64(i);
            } else if let Some(u) = n.as_u64() {
                write_type(out, UNSIGNED_LONG);
                out.write_u64(u);
            } else {
                write_type(out, DOUBLE);
                out.write_f64(n.as_f64().unwrap_or(f64::NAN));
            }
        }
        Value::Bool(b) => {
            write_type(out, BOOLEAN);
            out.write_bool(*b);
        }
        Value::Array(items) => {
            write_type(out, LIST);
            out.write_len(items.len());
            for item in items {
                write_value(out, item);
            }
        }
        Value::Object(map) => write_map(out, map),
    }
}

pub(crate) fn read_value(input: &mut StreamInput, depth: usize) -> Result<Value, DecodeError> {
    let t = input.read_byte()? as i8;
    read_typed(input, t, depth)
}

pub(crate) fn read_optional_map(
    input: &mut StreamInput,
) -> Result<Option<Map<String, Value>>, DecodeError> {
    match input.read_byte()? as i8 {
        NULL => Ok(None),
        MAP => read_map_body(input, 0).map(Some),
        other => Err(DecodeError::UnknownGenericType(other)),
    }
}

fn read_typed(input: &mut StreamInput, t: i8, depth: usize) -> Result<Value, DecodeError> {
    match t {
        NULL => Ok(Value::Null),
        STRING => Ok(Value::String(input.read_string()?)),
        LONG => Ok(Value::Number(input.read_i64()?.into())),
        UNSIGNED_LONG => Ok(Value::Number(input.read_u64()?.into())),
        DOUBLE => {
            let d = input.read_f64()?;
            Number::from_f64(d)
                .map(Value::Number)
                .ok_or(DecodeError::NonFiniteDouble)
        }
        BOOLEAN => Ok(Value::Bool(input.read_bool()?)),
        LIST => {
            let depth = descend(input, depth)?;
            let len = input.read_collection_len()?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(read_value(input, depth)?);
            }
            Ok(Value::Array(items))
        }
        MAP => read_map_body(input, depth).map(Value::Object),
        other => Err(DecodeError::UnknownGenericType(other)),
    }
}

fn read_map_body(input: &mut StreamInput, depth: usize) -> Result<Map<String, Value>, DecodeError> {
    let depth = descend(input, depth)?;
    let len = input.read_collection_len()?;
    let mut map = Map::with_capacity(len);
    for _ in 0..len {
        let key = input.read_string()?;
        let value = read_value(input, depth)?;
        map.insert(key, value);
    }
    Ok(map)
}

fn descend(input: &StreamInput, depth: usize) -> Result<usize, DecodeError> {
    let max = input.limits().max_depth;
    if depth >= max {
        return Err(DecodeError::NestingTooDeep(max));
    }
    Ok(depth + 1)
}
