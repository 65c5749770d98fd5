use serde_json::json;
use simple_value_core::stream::{DecodeError, StreamInput, StreamLimits, StreamOutput};

#[test]
fn vint_boundaries() {
    let values = [0u32, 1, 127, 128, 16_383, 16_384, u32::MAX];
    let mut out = StreamOutput::new();
    for v in values {
        out.write_vint(v);
    }
    let bytes = out.freeze();
    // 1 + 1 + 1 + 2 + 2 + 3 + 5
    assert_eq!(bytes.len(), 15);

    let mut input = StreamInput::new(bytes);
    for v in values {
        assert_eq!(input.read_vint().unwrap(), v);
    }
}

#[test]
fn overlong_vint_is_malformed() {
    let mut input = StreamInput::new(vec![0xFFu8, 0xFF, 0xFF, 0xFF, 0xFF, 0x01]);
    assert!(matches!(input.read_vint(), Err(DecodeError::MalformedVInt)));

    let mut input = StreamInput::new(vec![0x80u8, 0x80, 0x80, 0x80, 0x10]);
    assert!(matches!(input.read_vint(), Err(DecodeError::MalformedVInt)));
}

#[test]
fn truncated_reads_report_shortfall() {
    let mut input = StreamInput::new(vec![0u8; 3]);
    match input.read_f64() {
        Err(DecodeError::Truncated { needed, remaining }) => {
            assert_eq!(needed, 8);
            assert_eq!(remaining, 3);
        }
        other => panic!("expected truncation, got {other:?}"),
    }

    let mut out = StreamOutput::new();
    out.write_vint(10);
    out.write_byte(b'x');
    let mut input = StreamInput::new(out.freeze());
    assert!(matches!(
        input.read_string(),
        Err(DecodeError::Truncated { needed: 10, remaining: 1 })
    ));
}

#[test]
fn string_length_limit_is_enforced() {
    let limits = StreamLimits {
        max_string_bytes: 4,
        ..StreamLimits::default()
    };
    let mut out = StreamOutput::new();
    out.write_string("hello");
    let mut input = StreamInput::with_limits(out.freeze(), limits);

    assert!(matches!(
        input.read_string(),
        Err(DecodeError::LengthOutOfBounds { length: 5, max: 4 })
    ));
}

#[test]
fn invalid_utf8_is_rejected() {
    let mut input = StreamInput::new(vec![2u8, 0xC3, 0x28]);
    assert!(matches!(input.read_string(), Err(DecodeError::InvalidUtf8(_))));
}

#[test]
fn generic_values_keep_types_and_order() {
    let value = json!({
        "z": 1,
        "a": [true, null, "s", -7, 1.5],
        "m": {"inner": {"deep": "x"}}
    });
    let mut out = StreamOutput::new();
    out.write_generic_value(&value);

    let mut input = StreamInput::new(out.freeze());
    let decoded = input.read_generic_value().unwrap();

    assert_eq!(decoded, value);
    let keys: Vec<&String> = decoded.as_object().unwrap().keys().collect();
    assert_eq!(keys, ["z", "a", "m"]);
}

#[test]
fn absent_map_reads_as_none() {
    let mut out = StreamOutput::new();
    out.write_map(None);
    let mut input = StreamInput::new(out.freeze());
    assert_eq!(input.read_map().unwrap(), None);
}

#[test]
fn nesting_limit_is_enforced() {
    let limits = StreamLimits {
        max_depth: 2,
        ..StreamLimits::default()
    };
    let value = json!([[["too deep"]]]);
    let mut out = StreamOutput::new();
    out.write_generic_value(&value);

    let mut input = StreamInput::with_limits(out.freeze(), limits);
    assert!(matches!(
        input.read_generic_value(),
        Err(DecodeError::NestingTooDeep(2))
    ));
}

#[test]
fn unknown_generic_type_is_rejected() {
    let mut input = StreamInput::new(vec![99u8]);
    assert!(matches!(
        input.read_generic_value(),
        Err(DecodeError::UnknownGenericType(99))
    ));
}

#[test]
fn default_limits() {
    let limits = StreamLimits::default();
    assert_eq!(limits, StreamLimits::v0());
    assert_eq!(limits.max_string_bytes, 1 << 20);
    assert_eq!(limits.max_collection_len, 1 << 16);
    assert_eq!(limits.max_depth, 32);
}

#[test]
fn unsigned_above_i64_max_is_lossless() {
    let value = json!({"big": u64::MAX, "edge": (i64::MAX as u64) + 1, "small": 7u64});
    let mut out = StreamOutput::new();
    out.write_generic_value(&value);

    let mut input = StreamInput::new(out.freeze());
    let decoded = input.read_generic_value().unwrap();

    assert_eq!(decoded, value);
    assert_eq!(decoded["big"].as_u64(), Some(u64::MAX));
    assert!(decoded["big"].is_u64());
    assert!(input.is_exhausted());
}
