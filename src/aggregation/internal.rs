use std::any::Any;
use std::fmt;

use thiserror::Error;

use super::header::AggregationHeader;
use crate::stream::{StreamOutput, Writeable};
use crate::xcontent::{fields, DocumentSink};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("Operation [{operation}] not supported by [{aggregation}]")]
    UnsupportedOperation {
        aggregation: String,
        operation: &'static str,
    },

    #[error("Path not supported for [{aggregation}]: {path:?}")]
    InvalidPath {
        aggregation: String,
        path: Vec<String>,
    },
}

/// State handed to `reduce` by the engine merging partial results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReduceContext {
    is_final_reduce: bool,
}

impl ReduceContext {
    pub fn new(is_final_reduce: bool) -> Self {
        Self { is_final_reduce }
    }

    pub fn is_final_reduce(&self) -> bool {
        self.is_final_reduce
    }
}

/// A node in an aggregation result tree.
pub trait InternalAggregation: fmt::Debug + Send + Sync {
    fn header(&self) -> &AggregationHeader;

    /// Wire tag used by the result registry.
    fn type_name(&self) -> &'static str;

    /// Result-specific fields, written after the header.
    fn write_body(&self, out: &mut StreamOutput);

    /// Result-specific fields inside the result's own object.
    fn render_body(&self, sink: &mut dyn DocumentSink);

    fn reduce(
        &self,
        siblings: &[Box<dyn InternalAggregation>],
        ctx: &ReduceContext,
    ) -> Result<Box<dyn InternalAggregation>, AggregationError>;

    fn as_any(&self) -> &dyn Any;

    fn name(&self) -> &str {
        self.header().name()
    }

    fn write_to(&self, out: &mut StreamOutput) {
        self.header().write_to(out);
        self.write_body(out);
    }

    /// Renders `{name: {"meta": {...}, <body>}}`; `meta` only when present.
    fn to_xcontent(&self, sink: &mut dyn DocumentSink) {
        sink.start_object(self.name());
        if let Some(meta) = self.header().metadata() {
            sink.field_value(fields::META, &serde_json::Value::Object(meta.clone()));
        }
        self.render_body(sink);
        sink.end_object();
    }
}
