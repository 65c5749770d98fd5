use simple_value_core::aggregation::{
    AggregationError, InternalAggregation, Property, ReduceContext, SimpleValue,
};
use simple_value_core::format::DocValueFormat;

fn node(name: &str, value: f64) -> SimpleValue {
    SimpleValue::new(name, value, DocValueFormat::Raw, vec![], None)
}

fn boxed(name: &str, value: f64) -> Box<dyn InternalAggregation> {
    Box::new(node(name, value))
}

#[test]
fn reduce_always_fails() {
    let target = node("a", 1.0);
    let sibling_sets: Vec<Vec<Box<dyn InternalAggregation>>> = vec![
        vec![],
        vec![boxed("a", 2.0)],
        vec![boxed("a", 2.0), boxed("a", f64::NAN)],
    ];

    for siblings in &sibling_sets {
        for is_final in [false, true] {
            let result = target.reduce(siblings, &ReduceContext::new(is_final));
            match result {
                Err(AggregationError::UnsupportedOperation { aggregation, operation }) => {
                    assert_eq!(aggregation, "a");
                    assert_eq!(operation, "reduce");
                }
                other => panic!("expected unsupported operation, got {other:?}"),
            }
        }
    }
}

#[test]
fn reduce_leaves_node_untouched() {
    let target = node("a", 7.0);
    let before = target.clone();
    let siblings = vec![boxed("a", 1.0)];
    let _ = target.reduce(&siblings, &ReduceContext::default());
    assert_eq!(target, before);
}

#[test]
fn property_paths() {
    let target = node("total", 12.5);

    assert_eq!(target.property(&[]).unwrap(), Property::Aggregation(&target));
    assert_eq!(target.property(&["value"]).unwrap(), Property::Value(12.5));

    let err = target.property(&["value", "extra"]).unwrap_err();
    assert_eq!(
        err,
        AggregationError::InvalidPath {
            aggregation: "total".into(),
            path: vec!["value".into(), "extra".into()],
        }
    );
    assert!(target.property(&["count"]).is_err());
}
