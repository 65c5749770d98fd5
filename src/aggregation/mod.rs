pub mod header;
pub mod internal;
pub mod registry;
pub mod simple_value;

pub use header::{AggregationHeader, PipelineAggregatorRef};
pub use internal::{AggregationError, InternalAggregation, ReduceContext};
pub use registry::{read_result, register_result, write_result, RegistryError, StreamableResult};
pub use simple_value::{Property, SimpleValue};
