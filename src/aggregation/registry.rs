//! Process-wide table mapping result wire tags to their readers.
//!
//! The table is created on first use and lives until the process exits;
//! there is no teardown step.

use std::any::TypeId;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use once_cell::sync::Lazy;
use thiserror::Error;

use super::internal::InternalAggregation;
use crate::stream::{DecodeError, StreamInput, StreamOutput};

/// A result type that can be shipped between nodes under a fixed tag.
pub trait StreamableResult: InternalAggregation + Sized + 'static {
    const TYPE: &'static str;

    fn read_result(input: &mut StreamInput) -> Result<Self, DecodeError>;
}

pub type ResultReader = fn(&mut StreamInput) -> Result<Box<dyn InternalAggregation>, DecodeError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Result type [{0}] is already registered with a different reader")]
    Conflict(&'static str),
}

struct Entry {
    owner: TypeId,
    reader: ResultReader,
}

static READERS: Lazy<RwLock<HashMap<&'static str, Entry>>> = Lazy::new(Default::default);

fn read_boxed<T: StreamableResult>(
    input: &mut StreamInput,
) -> Result<Box<dyn InternalAggregation>, DecodeError> {
    Ok(Box::new(T::read_result(input)?))
}

/// Registers `T` under `T::TYPE`.
///
/// Registering the same type twice is a no-op. Registering a different type
/// under a tag that is already taken fails.
pub fn register_result<T: StreamableResult>() -> Result<(), RegistryError> {
    let owner = TypeId::of::<T>();
    let mut readers = READERS.write().unwrap_or_else(PoisonError::into_inner);

    if let Some(existing) = readers.get(T::TYPE) {
        if existing.owner == owner {
            return Ok(());
        }
        tracing::warn!(result_type = T::TYPE, "conflicting result reader registration");
        return Err(RegistryError::Conflict(T::TYPE));
    }

    readers.insert(
        T::TYPE,
        Entry {
            owner,
            reader: read_boxed::<T>,
        },
    );
    tracing::debug!(result_type = T::TYPE, "registered result reader");
    Ok(())
}

pub fn is_registered(type_name: &str) -> bool {
    READERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .contains_key(type_name)
}

/// Writes the result's tag followed by the result itself.
pub fn write_result(result: &dyn InternalAggregation, out: &mut StreamOutput) {
    out.write_string(result.type_name());
    result.write_to(out);
}

/// Reads a tag and dispatches to the reader registered for it.
pub fn read_result(input: &mut StreamInput) -> Result<Box<dyn InternalAggregation>, DecodeError> {
    let type_name = input.read_string()?;
    let reader = READERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(type_name.as_str())
        .map(|entry| entry.reader);

    match reader {
        Some(reader) => reader(input),
        None => {
            tracing::warn!(result_type = %type_name, "no reader registered for result type");
            Err(DecodeError::UnknownNamedWriteable {
                category: "aggregation result",
                name: type_name,
            })
        }
    }
}
