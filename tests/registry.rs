use std::any::Any;

use simple_value_core::aggregation::registry::is_registered;
use simple_value_core::aggregation::{
    read_result, register_result, write_result, AggregationError, AggregationHeader,
    InternalAggregation, ReduceContext, RegistryError, SimpleValue, StreamableResult,
};
use simple_value_core::format::DocValueFormat;
use simple_value_core::stream::{DecodeError, StreamInput, StreamOutput};
use simple_value_core::xcontent::DocumentSink;

/// A second result type that tries to claim the `simple_value` tag.
#[derive(Debug)]
struct Impostor {
    header: AggregationHeader,
}

impl InternalAggregation for Impostor {
    fn header(&self) -> &AggregationHeader {
        &self.header
    }

    fn type_name(&self) -> &'static str {
        Self::TYPE
    }

    fn write_body(&self, _out: &mut StreamOutput) {}

    fn render_body(&self, _sink: &mut dyn DocumentSink) {}

    fn reduce(
        &self,
        _siblings: &[Box<dyn InternalAggregation>],
        _ctx: &ReduceContext,
    ) -> Result<Box<dyn InternalAggregation>, AggregationError> {
        Err(AggregationError::UnsupportedOperation {
            aggregation: self.name().to_string(),
            operation: "reduce",
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl StreamableResult for Impostor {
    const TYPE: &'static str = "simple_value";

    fn read_result(input: &mut StreamInput) -> Result<Self, DecodeError> {
        Ok(Self {
            header: AggregationHeader::read_from(input)?,
        })
    }
}

#[test]
fn registration_is_idempotent() {
    SimpleValue::register_streams().unwrap();
    SimpleValue::register_streams().unwrap();
    assert!(is_registered("simple_value"));
}

#[test]
fn conflicting_registration_fails_fast() {
    SimpleValue::register_streams().unwrap();
    let result = register_result::<Impostor>();
    assert_eq!(result, Err(RegistryError::Conflict("simple_value")));

    // The original reader is still in place.
    let node = SimpleValue::new("kept", 4.0, DocValueFormat::Raw, vec![], None);
    let mut out = StreamOutput::new();
    write_result(&node, &mut out);
    let decoded = read_result(&mut StreamInput::new(out.freeze())).unwrap();
    assert!(decoded.as_any().downcast_ref::<SimpleValue>().is_some());
}

#[test]
fn dispatch_by_tag_round_trips() {
    SimpleValue::register_streams().unwrap();
    let node = SimpleValue::new(
        "avg_ratio",
        0.125,
        DocValueFormat::decimal("0.0%").unwrap(),
        vec![],
        None,
    );

    let mut out = StreamOutput::new();
    write_result(&node, &mut out);
    let mut input = StreamInput::new(out.freeze());
    let decoded = read_result(&mut input).unwrap();

    assert_eq!(decoded.type_name(), "simple_value");
    assert_eq!(decoded.name(), "avg_ratio");
    let decoded = decoded.as_any().downcast_ref::<SimpleValue>().unwrap();
    assert_eq!(decoded, &node);
    assert_eq!(decoded.value_as_string(), "12.5%");
    assert!(input.is_exhausted());
}

#[test]
fn unregistered_tag_is_rejected() {
    let mut out = StreamOutput::new();
    out.write_string("no_such_result");
    out.write_string("a");

    let mut input = StreamInput::new(out.freeze());
    match read_result(&mut input) {
        Err(DecodeError::UnknownNamedWriteable { name, .. }) => {
            assert_eq!(name, "no_such_result")
        }
        other => panic!("expected unknown result error, got {other:?}"),
    }
    assert!(!is_registered("no_such_result"));
}
