use std::any::Any;
use std::sync::Arc;

use serde_json::{Map, Value};

use super::header::{AggregationHeader, PipelineAggregatorRef};
use super::internal::{AggregationError, InternalAggregation, ReduceContext};
use super::registry::{self, RegistryError, StreamableResult};
use crate::format::DocValueFormat;
use crate::stream::{DecodeError, StreamInput, StreamOutput};
use crate::xcontent::{fields, DocumentSink};

/// A single pre-computed number produced by a pipeline stage, e.g. the output
/// of a script run over sibling buckets.
///
/// Terminal: it has no children and cannot be reduced.
#[derive(Debug, Clone)]
pub struct SimpleValue {
    header: AggregationHeader,
    format: Arc<DocValueFormat>,
    value: f64,
}

/// Result of resolving a property path against a [`SimpleValue`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property<'a> {
    Aggregation(&'a SimpleValue),
    Value(f64),
}

impl SimpleValue {
    pub const NAME: &'static str = "simple_value";

    /// Any `value` is accepted; NaN and the infinities mean "no value".
    ///
    /// # Panics
    ///
    /// Panics if `name` is empty.
    pub fn new(
        name: impl Into<String>,
        value: f64,
        format: impl Into<Arc<DocValueFormat>>,
        pipeline_aggregators: Vec<PipelineAggregatorRef>,
        metadata: Option<Map<String, Value>>,
    ) -> Self {
        Self {
            header: AggregationHeader::new(name, pipeline_aggregators, metadata),
            format: format.into(),
            value,
        }
    }

    pub fn register_streams() -> Result<(), RegistryError> {
        registry::register_result::<Self>()
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn format(&self) -> &DocValueFormat {
        &self.format
    }

    pub fn value_as_string(&self) -> String {
        self.format.format(self.value)
    }

    pub fn has_value(&self) -> bool {
        self.value.is_finite()
    }

    pub fn property(&self, path: &[&str]) -> Result<Property<'_>, AggregationError> {
        match path {
            [] => Ok(Property::Aggregation(self)),
            [field] if *field == fields::VALUE => Ok(Property::Value(self.value)),
            _ => Err(AggregationError::InvalidPath {
                aggregation: self.name().to_string(),
                path: path.iter().map(|p| p.to_string()).collect(),
            }),
        }
    }
}

// Compares the value bit-for-bit so NaN results survive a round trip check.
impl PartialEq for SimpleValue {
    fn eq(&self, other: &Self) -> bool {
        self.header == other.header
            && self.value.to_bits() == other.value.to_bits()
            && *self.format == *other.format
    }
}

impl StreamableResult for SimpleValue {
    const TYPE: &'static str = Self::NAME;

    fn read_result(input: &mut StreamInput) -> Result<Self, DecodeError> {
        let header = AggregationHeader::read_from(input)?;
        let format = DocValueFormat::read_from(input)?;
        let value = input.read_f64()?;
        Ok(Self {
            header,
            format: Arc::new(format),
            value,
        })
    }
}

impl InternalAggregation for SimpleValue {
    fn header(&self) -> &AggregationHeader {
        &self.header
    }

    fn type_name(&self) -> &'static str {
        Self::NAME
    }

    fn write_body(&self, out: &mut StreamOutput) {
        out.write_named_writeable(self.format.as_ref());
        out.write_f64(self.value);
    }

    fn render_body(&self, sink: &mut dyn DocumentSink) {
        let has_value = self.has_value();
        sink.field_number(fields::VALUE, has_value.then_some(self.value));
        if has_value && !self.format.is_raw() {
            sink.field_string(fields::VALUE_AS_STRING, &self.format.format(self.value));
        }
    }

    fn reduce(
        &self,
        siblings: &[Box<dyn InternalAggregation>],
        _ctx: &ReduceContext,
    ) -> Result<Box<dyn InternalAggregation>, AggregationError> {
        tracing::error!(
            aggregation = %self.name(),
            siblings = siblings.len(),
            "reduce called on a simple_value result"
        );
        Err(AggregationError::UnsupportedOperation {
            aggregation: self.name().to_string(),
            operation: "reduce",
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
