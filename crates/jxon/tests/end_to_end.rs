//! End-to-end exercises of the public API: parsing, inference, validation,
//! emission, and module loading working together.

use std::fs;

use tempfile::TempDir;

use jxon::{
    Config, EnumMember, JxonType, SimpleKind, Value, emit_schema, emit_value, infer_schema,
    parse_combined, parse_schema, parse_value, validate, validate_filling, values_equal,
};

#[test]
fn a_value_infers_a_schema_that_validates_it() {
    let value = parse_value(
        "{\"name\": \"widget\", \"sizes\": [1, 2, 3], \"doc\": <p>spec<b>bold</b></p>}",
    )
    .unwrap();
    let schema = infer_schema(&value).unwrap().unwrap();
    assert!(validate(&schema, &value));

    let JxonType::Record(fields) = &schema else {
        panic!("expected record");
    };
    assert_eq!(fields["doc"], Some(JxonType::Simple(SimpleKind::Xml)));
}

#[test]
fn schemas_written_in_jxsd_validate_parsed_values() {
    let schema = parse_schema("{\"id\": Integer, \"color\": Enum(\"red\", \"blue\")}").unwrap();
    let good = parse_value("{\"id\": 7, \"color\": \"red\"}").unwrap();
    let bad = parse_value("{\"id\": 7, \"color\": \"mauve\"}").unwrap();
    assert!(validate(&schema, &good));
    assert!(!validate(&schema, &bad));
}

#[test]
fn filled_schemas_keep_validating_purely() {
    let mut schema = parse_schema("[]").unwrap();
    assert_eq!(schema, JxonType::List(None));

    let ints = parse_value("[1, 2]").unwrap();
    assert!(validate_filling(&mut schema, &ints).unwrap());

    // Idempotence: a later pure call returns the same result.
    assert!(validate(&schema, &ints));
    assert!(!validate(&schema, &parse_value("[\"x\"]").unwrap()));
}

#[test]
fn emitted_schemas_reparse_exactly() {
    let schema = JxonType::new_enum(vec![
        EnumMember::Integer(3.into()),
        EnumMember::Integer(1.into()),
    ])
    .unwrap();
    for config in [Config::compact(), Config::pretty(2), Config::compact().sorted()] {
        let text = emit_schema(&schema, &config).unwrap();
        assert_eq!(parse_schema(&text).unwrap(), schema);
    }
}

#[test]
fn modules_tie_the_system_together() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("shape.jxsd"),
        "Point = {\"x\": Float, \"y\": Float}\nexport default Point;",
    )
    .unwrap();
    fs::write(
        dir.path().join("origin.jxon"),
        "import P from \"./shape.jxsd\";\norigin: P = {\"x\": 0.0, \"y\": 0.0}\nexport default origin;",
    )
    .unwrap();

    let source = "import origin from \"./origin.jxon\";\n{\"at\": origin}";
    let value = parse_combined(source, dir.path()).unwrap();

    let expected = parse_value("{\"at\": {\"x\": 0.0, \"y\": 0.0}}").unwrap();
    assert!(values_equal(&value, &expected));
}

#[test]
fn emitted_modules_content_roundtrips() {
    let value = parse_value("xs = [1, 2] {\"data\": xs, \"copy\": xs}").unwrap();
    let text = emit_value(&value, &Config::pretty(4)).unwrap();
    assert!(values_equal(&parse_value(&text).unwrap(), &value));
}

#[test]
fn values_equal_is_structural() {
    let a = parse_value("{\"x\": 1, \"y\": <p a=\"1\" b=\"2\">t</p>}").unwrap();
    let b = parse_value("{\"y\": <p b=\"2\" a=\"1\">t</p>, \"x\": 1}").unwrap();
    assert!(values_equal(&a, &b));

    let c = parse_value("{\"x\": 1, \"y\": <p a=\"1\">t</p>}").unwrap();
    assert!(!values_equal(&a, &c));
}
