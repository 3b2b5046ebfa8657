use std::fs;

use brine_fbs::{generate_swift, load_schema, schema_to_json, FbsError, FileResolver};

#[test]
fn test_includes_are_loaded_relative_to_including_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("shared")).unwrap();
    fs::write(
        dir.path().join("root.fbs"),
        "include \"shared/types.fbs\";\ntable Root { v: Vec2; }\nroot_type Root;\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("shared/types.fbs"),
        "include \"more.fbs\";\nstruct Vec2 { x: float; y: float; }\n",
    )
    .unwrap();
    fs::write(dir.path().join("shared/more.fbs"), "enum Unused : byte { A }\n").unwrap();

    let schema = load_schema(&dir.path().join("root.fbs")).unwrap();
    assert_eq!(schema.children.len(), 1);
    assert_eq!(schema.children[0].structs[0].name.as_str(), "Vec2");
    assert_eq!(schema.children[0].children.len(), 1);

    let swift = generate_swift(&dir.path().join("root.fbs"), false).unwrap();
    assert!(swift.contains("public var v: Vec2?"));
    assert!(swift.contains("public struct Vec2 {"));
    assert!(!swift.contains("Unused"));
}

#[test]
fn test_include_cycle_is_cut() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.fbs"), "include \"b.fbs\"; table A { b: B; }").unwrap();
    fs::write(dir.path().join("b.fbs"), "include \"a.fbs\"; table B { a: A; }").unwrap();

    let schema = load_schema(&dir.path().join("a.fbs")).unwrap();
    assert_eq!(schema.children.len(), 1);
    assert_eq!(schema.children[0].includes.len(), 1);
    assert!(schema.children[0].children.is_empty());
}

#[test]
fn test_missing_root_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_schema(&dir.path().join("nope.fbs")).unwrap_err();
    assert!(matches!(err, FbsError::IncludeError(_)));
}

#[test]
fn test_schema_to_json() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("s.fbs"),
        "namespace game; table Player { name: string; }",
    )
    .unwrap();
    let schema = load_schema(&dir.path().join("s.fbs")).unwrap();
    let json = schema_to_json(&schema).unwrap();
    assert!(json.contains("\"namespace\""));
    assert!(json.contains("\"Player\""));
    assert!(json.contains("\"game\""));
}

#[test]
fn test_search_dirs_are_consulted() {
    let dir = tempfile::tempdir().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir(&lib).unwrap();
    fs::write(lib.join("common.fbs"), "table Common {}").unwrap();
    fs::write(dir.path().join("app.fbs"), "include \"common.fbs\"; table App { c: Common; }").unwrap();

    let schema = load_schema(&dir.path().join("app.fbs")).unwrap();
    assert!(schema.children.is_empty());

    let schema = FileResolver::new()
        .with_search_dir(&lib)
        .compile_root(&dir.path().join("app.fbs"))
        .unwrap();
    assert_eq!(schema.children.len(), 1);
    assert_eq!(schema.children[0].tables[0].name.as_str(), "Common");
}
