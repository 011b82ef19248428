use pretty_assertions::assert_eq;
use tagwire::prelude::*;
use uuid::Uuid;

#[test]
fn test_inference_picks_narrowest_type() {
    let cases = [
        (Native::Int(42), WireType::Int1),
        (Native::Int(100_000), WireType::Int4),
        (Native::Float(2.5), WireType::Float8),
        (Native::BigUint(42), WireType::Uint1),
        (Native::BigInt(42), WireType::Uint1),
        (Native::BigInt(-42), WireType::Int8),
        (Native::Bool(false), WireType::Boolean),
        (Native::Str("hello".into()), WireType::Utf8),
    ];
    for (native, expected) in cases {
        let pair = tagwire::encode(&native).expect("encode");
        assert_eq!(pair.ty, expected, "{:?}", native);
    }
}

#[test]
fn test_uuid_strings_infer_by_version() {
    let v4 = Uuid::new_v4();
    let v7 = Uuid::now_v7();
    assert_eq!(tagwire::encode(&Native::from(v4.to_string())).unwrap().ty, WireType::Uuid4);
    assert_eq!(tagwire::encode(&Native::from(v7.to_string())).unwrap().ty, WireType::Uuid7);
    assert_eq!(tagwire::encode(&Native::Uuid(v7)).unwrap().ty, WireType::Uuid7);
}

#[test]
fn test_identity_id_accepts_only_v7_or_nil() {
    let v4 = Uuid::new_v4().to_string();
    let v7 = Uuid::now_v7().to_string();

    assert!(Value::parse(WireType::IdentityId, &v4).is_err());
    assert!(Value::parse(WireType::Uuid4, &v4).is_ok());
    assert!(Value::parse(WireType::IdentityId, &v7).is_ok());
    assert!(Value::parse(WireType::IdentityId, &Uuid::nil().to_string()).is_ok());
}

#[test]
fn test_int2_boundaries() {
    assert!(Value::int2(-32768).is_ok());
    assert!(Value::int2(32767).is_ok());

    let err = Value::int2(-32769).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Range error: -32769 is out of range for Int2, expected [-32768, 32767]"
    );
    assert!(Value::int2(32768).unwrap_err().is_range());
}

#[test]
fn test_float4_is_single_precision() {
    let pi = std::f64::consts::PI;
    let Native::Float(stored) = Value::float4(pi).unwrap().to_native() else {
        panic!("expected a float");
    };
    assert_ne!(stored, pi);
    assert!(((stored - pi) / pi).abs() < 1e-7);
}

#[test]
fn test_round_trip_through_wire_pairs() {
    let values = vec![
        Value::boolean(true),
        Value::int4(i32::MIN).unwrap(),
        Value::uint16(u128::MAX).unwrap(),
        Value::float8(0.1).unwrap(),
        Value::utf8("  padded  "),
        Value::blob(Vec::new()),
        Value::interval(Interval::new(13, -2, 1_500_000_000)),
        Value::uuid7(Uuid::now_v7()).unwrap(),
        Value::Int16(None),
        Value::Undefined,
    ];

    for value in values {
        let pair = value.encode();
        let json = serde_json::to_string(&pair).unwrap();
        let back: WirePair = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_value().unwrap(), value, "{}", json);
    }
}

#[test]
fn test_decoded_natives_reconstruct_values() {
    let values = vec![
        Value::int1(-5).unwrap(),
        Value::int8(i64::MAX).unwrap(),
        Value::uint8(u64::MAX).unwrap(),
        Value::row_number(9),
        Value::float4(1.25).unwrap(),
        Value::decimal("3.14159").unwrap(),
    ];
    for value in values {
        let pair = value.encode();
        let native = tagwire::decode(pair.ty.as_str(), &pair.value).unwrap();
        assert_eq!(Value::new(pair.ty, native).unwrap(), value);
    }
}

#[test]
fn test_empty_string_differs_from_absent() {
    let empty = Value::utf8("");
    assert!(!empty.is_absent());
    assert_ne!(empty.to_wire_string(), ABSENT);
    assert_eq!(Value::Utf8(None).to_wire_string(), ABSENT);

    // Blank wire text is read back as absent
    assert_eq!(Value::parse(WireType::Utf8, "").unwrap(), Value::Utf8(None));
}

#[test]
fn test_duration_rendering() {
    assert_eq!(Interval::from_nanoseconds(123_456_789).to_string(), "PT0.123456789S");
    assert_eq!(Interval::from_nanoseconds(100_000_000).to_string(), "PT0.1S");
    assert_eq!(Interval::zero().to_string(), "PT0S");
}

#[test]
fn test_duration_format_is_idempotent() {
    let literals = ["P1Y2M3DT4H5M6.789S", "-P1DT2H", "PT-1M-30S", "P2W", "PT36H", "P0D"];
    for literal in literals {
        let once = tagwire::parse_duration(literal).unwrap().to_string();
        let twice = tagwire::parse_duration(&once).unwrap().to_string();
        assert_eq!(once, twice, "{}", literal);
    }
}

#[test]
fn test_duration_rejections() {
    for literal in ["", "P", "PT", "P1DT", "1D", "P1X", "PT1.1234567890S", "P1H"] {
        let err = tagwire::parse_duration(literal).unwrap_err();
        assert!(err.is_parse(), "{}: {}", literal, err);
    }
}
