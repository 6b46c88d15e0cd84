use std::fs;
use std::path::Path;

use tempfile::TempDir;

use jxon_parser::{
    ParserError, parse_combined, parse_combined_file, parse_module, parse_value_file,
};
use jxon_value::value::{Array, Value};
use jxon_value::{JxonType, Object, SimpleKind};

fn write(dir: &TempDir, name: &str, contents: &str) {
    fs::write(dir.path().join(name), contents).unwrap();
}

fn combined(dir: &TempDir, source: &str) -> Result<Value, ParserError> {
    parse_combined(source, dir.path())
}

fn parse_message(result: Result<Value, ParserError>) -> String {
    match result.unwrap_err() {
        ParserError::Parse(diagnostic) => diagnostic.message,
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[test]
fn imports_a_default_export() {
    let dir = TempDir::new().unwrap();
    write(&dir, "m.jxon", "export default 42;");
    let value = combined(&dir, "import n from \"./m.jxon\";\nn").unwrap();
    assert_eq!(value, Value::from(42));
}

#[test]
fn imports_named_exports() {
    let dir = TempDir::new().unwrap();
    write(&dir, "lib.jxon", "a = 1 b = 2 c = 3 export { a, b, c };");
    let value = combined(&dir, "import { a, c } from \"./lib.jxon\"; [a, c]").unwrap();
    assert_eq!(
        value,
        Value::Array(Array(vec![Value::from(1), Value::from(3)]))
    );
}

#[test]
fn imports_a_whole_module_for_dotted_lookup() {
    let dir = TempDir::new().unwrap();
    write(&dir, "lib.jxon", "x = \"deep\"");
    let value = combined(&dir, "import * as lib from \"./lib.jxon\"; lib.x").unwrap();
    assert_eq!(value, Value::from("deep"));
}

#[test]
fn combines_default_and_star_clauses() {
    let dir = TempDir::new().unwrap();
    write(&dir, "m.jxon", "x = 1 export default x;");
    let value = combined(
        &dir,
        "import d, * as m from \"./m.jxon\"; [d, m.x]",
    )
    .unwrap();
    assert_eq!(
        value,
        Value::Array(Array(vec![Value::from(1), Value::from(1)]))
    );
}

#[test]
fn a_module_without_exports_exposes_all_bindings() {
    let dir = TempDir::new().unwrap();
    write(&dir, "open.jxon", "x = 1");
    let value = combined(&dir, "import { x, Integer } from \"./open.jxon\"; x").unwrap();
    assert_eq!(value, Value::from(1));
}

#[test]
fn explicit_exports_replace_the_visible_bindings() {
    let dir = TempDir::new().unwrap();
    write(&dir, "closed.jxon", "a = 1 b = 2 export a;");
    let message = parse_message(combined(&dir, "import { b } from \"./closed.jxon\"; b"));
    assert_eq!(message, "Module ./closed.jxon has no export called b");
}

#[test]
fn importing_a_missing_default_export_is_diagnosed() {
    let dir = TempDir::new().unwrap();
    write(&dir, "named.jxon", "a = 1 export a;");
    let message = parse_message(combined(&dir, "import d from \"./named.jxon\"; d"));
    assert_eq!(message, "Module ./named.jxon has no default export");
}

#[test]
fn inline_imports_yield_the_default_export() {
    let dir = TempDir::new().unwrap();
    write(&dir, "m.jxon", "export default [1, 2];");
    let value = combined(&dir, "import(\"./m.jxon\")").unwrap();
    assert_eq!(
        value,
        Value::Array(Array(vec![Value::from(1), Value::from(2)]))
    );
}

#[test]
fn legacy_json_imports_parse_with_the_jxon_grammar() {
    let dir = TempDir::new().unwrap();
    write(&dir, "data.json", "{\"k\": [1, 2]}");
    let value = combined(&dir, "import d from \"./data.json\"; d").unwrap();
    let expected: Object = [(
        "k".to_string(),
        Value::Array(Array(vec![Value::from(1), Value::from(2)])),
    )]
    .into_iter()
    .collect();
    assert_eq!(value, Value::Object(expected));
}

#[test]
fn legacy_xml_imports_parse_as_elements() {
    let dir = TempDir::new().unwrap();
    write(&dir, "doc.xml", "<doc version=\"1\"><item/></doc>");
    let value = combined(&dir, "import d from \"./doc.xml\"; d").unwrap();
    let Value::Xml(doc) = value else {
        panic!("expected XML");
    };
    assert_eq!(doc.tag, "doc");
    assert_eq!(doc.children.len(), 1);
}

#[test]
fn jxsd_imports_carry_schemas_into_annotations() {
    let dir = TempDir::new().unwrap();
    write(&dir, "point.jxsd", "{\"x\": Integer, \"y\": Integer}");
    let value = combined(
        &dir,
        "p: import(\"./point.jxsd\") = {\"x\": 1, \"y\": 2}\np",
    )
    .unwrap();
    assert!(matches!(value, Value::Object(_)));

    let mismatch = combined(
        &dir,
        "p: import(\"./point.jxsd\") = {\"x\": 1}\np",
    );
    assert_eq!(parse_message(mismatch), "Type does not match annotation");
}

#[test]
fn jxsd_modules_import_other_jxsd_modules() {
    let dir = TempDir::new().unwrap();
    write(&dir, "scalar.jxsd", "Id = Integer export { Id };");
    write(
        &dir,
        "record.jxsd",
        "import { Id } from \"./scalar.jxsd\";\n{\"id\": Id}",
    );
    let value = combined(&dir, "import s from \"./record.jxsd\"; s").unwrap();
    assert_eq!(
        value,
        Value::Schema(JxonType::Record(indexmap::IndexMap::from([(
            "id".to_string(),
            Some(JxonType::Simple(SimpleKind::Integer)),
        )])))
    );
}

#[test]
fn unknown_extensions_are_rejected() {
    let dir = TempDir::new().unwrap();
    write(&dir, "data.yaml", "k: v");
    let message = parse_message(combined(&dir, "import d from \"./data.yaml\"; d"));
    assert_eq!(message, "Unknown file extension: .yaml");
}

#[test]
fn missing_files_surface_io_errors() {
    let dir = TempDir::new().unwrap();
    let err = combined(&dir, "import d from \"./absent.jxon\"; d").unwrap_err();
    assert!(matches!(err, ParserError::Io { .. }));
}

#[test]
fn circular_imports_are_detected() {
    let dir = TempDir::new().unwrap();
    write(&dir, "a.jxon", "import x from \"./b.jxon\"; export default 1;");
    write(&dir, "b.jxon", "import y from \"./a.jxon\"; export default 2;");
    let err = parse_combined_file(dir.path().join("a.jxon")).unwrap_err();
    assert!(matches!(err, ParserError::CircularImport(_)));
}

#[test]
fn a_module_importing_itself_is_circular() {
    let dir = TempDir::new().unwrap();
    write(&dir, "selfish.jxon", "import x from \"./selfish.jxon\"; 1");
    let err = parse_combined_file(dir.path().join("selfish.jxon")).unwrap_err();
    assert!(matches!(err, ParserError::CircularImport(_)));
}

#[test]
fn diamond_imports_are_not_circular() {
    let dir = TempDir::new().unwrap();
    write(&dir, "base.jxon", "export default 1;");
    write(&dir, "left.jxon", "import b from \"./base.jxon\"; export default b;");
    write(&dir, "right.jxon", "import b from \"./base.jxon\"; export default b;");
    let value = combined(
        &dir,
        "import l from \"./left.jxon\";\nimport r from \"./right.jxon\";\n[l, r]",
    )
    .unwrap();
    assert_eq!(
        value,
        Value::Array(Array(vec![Value::from(1), Value::from(1)]))
    );
}

#[test]
fn parse_module_exposes_the_export_table() {
    let dir = TempDir::new().unwrap();
    write(&dir, "m.jxon", "a = 1 b = 2 export { a, b }; export default a;");
    let module = parse_module(
        &fs::read_to_string(dir.path().join("m.jxon")).unwrap(),
        Some(dir.path()),
    )
    .unwrap();
    assert_eq!(module.default_export(), Some(&Value::from(1)));
    let names: Vec<&String> = module.exports().keys().collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn file_entry_points_anchor_relative_imports() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("nested")).unwrap();
    write(&dir, "nested/leaf.jxon", "export default \"leaf\";");
    fs::write(
        dir.path().join("nested/root.jxon"),
        "import v from \"./leaf.jxon\"; v",
    )
    .unwrap();
    let value = parse_value_file(dir.path().join("nested/root.jxon")).unwrap();
    assert_eq!(value, Value::from("leaf"));
}

#[test]
fn relative_imports_without_a_base_directory_are_rejected() {
    let source = "import n from \"./m.jxon\"; n";
    let err = jxon_parser::parse_module(source, None).unwrap_err();
    let ParserError::Parse(diagnostic) = err else {
        panic!("expected parse error");
    };
    assert!(diagnostic.message.contains("without a base directory"));
}

#[test]
fn absolute_import_paths_are_taken_literally() {
    let dir = TempDir::new().unwrap();
    write(&dir, "abs.jxon", "export default true;");
    let abs = dir.path().join("abs.jxon");
    let source = format!("import v from \"{}\"; v", abs.display());
    let value = parse_combined(&source, Path::new("/nonexistent")).unwrap();
    assert_eq!(value, Value::Bool(true));
}
