use brine_fbs_compiler::{
    compile_schema, compile_schema_to_swift, compile_schema_with, namespace_prefixes,
    types::{BaseType, Schema},
};
use pretty_assertions::assert_eq;

const MONSTER: &str = r#"
// Example IDL file for our monster's schema.
namespace MyGame.Sample;

enum Color:byte { Red = 0, Green, Blue = 2 }

union Equipment { Weapon } // Optionally add more tables.

struct Vec3 {
  x:float;
  y:float;
  z:float;
}

table Monster {
  pos:Vec3; // Struct.
  mana:short = 150;
  hp:short = 100;
  name:string;
  friendly:bool = false (deprecated);
  inventory:[ubyte];  // Vector of scalars.
  color:Color = Blue; // Enum.
  weapons:[Weapon];   // Vector of tables.
  equipped:Equipment; // Union.
}

table Weapon {
  name:string;
  damage:short;
}

root_type Monster;
file_identifier "MONS";
"#;

const MONSTER_SWIFT: &str = r#"import Foundation
import FlatBuffersSwift

extension MygameSample {
    public final class Monster {
        public var pos: MygameSample.Vec3?
        public var mana: Int16 = 150
        public var hp: Int16 = 100
        public var name: String?
        public var inventory: [UInt8] = []
        public var color: MygameSample.Color = .Blue
        public var weapons: [MygameSample.Weapon] = []
        public var equipped: MygameSample.Equipment?
        public init() {}
    }
}
extension MygameSample.Monster {
    public static let fileIdentifier: String? = "MONS"
    public static func finish(_ builder: FlatBuffersBuilder, offset: Offset) throws -> Data {
        return try builder.finish(offset: offset, fileIdentifier: fileIdentifier)
    }
}

extension MygameSample {
    public struct Vec3 {
        public var x: Float32
        public var y: Float32
        public var z: Float32

        public init(x: Float32, y: Float32, z: Float32) {
            self.x = x
            self.y = y
            self.z = z
        }
    }
}

extension MygameSample {
    public enum Color: Int8, CaseIterable {
        case Red = 0
        case Green
        case Blue = 2
    }
}

extension MygameSample {
    public final class Weapon {
        public var name: String?
        public var damage: Int16 = 0
        public init() {}
    }
}

extension MygameSample {
    public enum Equipment {
        case withWeapon(MygameSample.Weapon)
    }
}

"#;

#[test]
fn test_parse_monster_schema() {
    let schema = compile_schema(MONSTER).expect("compile_schema failed");

    let ns: Vec<&str> = schema.namespace.as_ref().unwrap().parts.iter().map(|p| p.as_str()).collect();
    assert_eq!(ns, ["MyGame", "Sample"]);
    assert_eq!(schema.root_type.as_ref().unwrap().ident.as_str(), "Monster");
    assert_eq!(schema.file_ident.as_ref().unwrap().value.value, "MONS");
    assert!(schema.file_extension.is_none());

    assert_eq!(schema.tables.len(), 2);
    assert_eq!(schema.structs.len(), 1);
    assert_eq!(schema.enums.len(), 1);
    assert_eq!(schema.unions.len(), 1);

    let monster = &schema.tables[0];
    assert_eq!(monster.name.as_str(), "Monster");
    assert_eq!(monster.fields.len(), 9);
    assert_eq!(monster.fields[3].type_.base, BaseType::String);
    assert!(monster.fields[4].is_deprecated());
    assert_eq!(monster.fields[6].default.as_deref(), Some("Blue"));
    assert!(!schema.has_recursions());
}

#[test]
fn test_generate_monster_swift() {
    let schema = compile_schema(MONSTER).unwrap();
    assert_eq!(compile_schema_to_swift(&schema, true), MONSTER_SWIFT);
}

#[test]
fn test_declaration_order_does_not_matter() {
    let forward = compile_schema("namespace ns; root_type T; table T { x: int; }").unwrap();
    let backward = compile_schema("table T { x: int; } root_type T; namespace ns;").unwrap();
    assert_eq!(forward, backward);
}

#[test]
fn test_second_namespace_fails_schema() {
    assert!(compile_schema("namespace a.b.c; table T {}").is_ok());
    assert!(compile_schema("namespace a.b.c; table T {} namespace x;").is_err());
}

#[test]
fn test_cyclic_tables_emit_once_with_late_binding() {
    let schema = compile_schema(
        "table A { b: B; } table B { a: A; again: A; } root_type A;",
    )
    .unwrap();
    assert!(schema.has_recursions());

    let out = compile_schema_to_swift(&schema, false);
    assert_eq!(out.matches("public final class A ").count(), 1);
    assert_eq!(out.matches("public final class B ").count(), 1);
    assert!(out.find("class A ").unwrap() < out.find("class B ").unwrap());
    assert_eq!(out.matches("fileprivate func performLateBindings").count(), 1);
    assert!(out.contains("        try performLateBindings(builder)\n"));
    assert!(out.contains("FlatBuffersBuildError.couldNotPerformLateBinding"));
    assert!(out.trim_end().ends_with("builder.deferedBindings.removeAll()\n}"));
}

#[test]
fn test_acyclic_root_has_no_helper() {
    let schema = compile_schema("table A { b: B; } table B { c: C; } table C {} root_type A;").unwrap();
    let out = compile_schema_to_swift(&schema, false);
    assert!(!out.contains("performLateBindings"));
}

#[test]
fn test_without_root_every_declaration_is_emitted_once() {
    let schema = compile_schema(
        "table B { s: S; } table A { b: B; } struct S { x: int; } enum E : int { X }",
    )
    .unwrap();
    let out = compile_schema_to_swift(&schema, false);
    let positions: Vec<usize> = ["class A ", "class B ", "struct S ", "enum E:"]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", out);
    assert_eq!(out.matches("struct S ").count(), 1);
}

#[test]
fn test_included_declaration_overrides_parent() {
    let mut calls = 0;
    let mut resolver = |path: &str| -> Option<Schema> {
        calls += 1;
        match path {
            "child.fbs" => compile_schema("table X { b: int; c: int; }").ok(),
            _ => None,
        }
    };
    let schema = compile_schema_with(
        r#"include "child.fbs"; include "gone.fbs";
           table X { a: int; } table Root { x: X; } root_type Root;"#,
        &mut resolver,
    )
    .unwrap();
    assert_eq!(calls, 2);
    assert_eq!(schema.includes.len(), 2);
    assert_eq!(schema.children.len(), 1);

    let out = compile_schema_to_swift(&schema, false);
    assert!(out.contains("public var b: Int32 = 0"));
    assert!(!out.contains("public var a: Int32"));
}

#[test]
fn test_without_root_included_declarations_are_emitted() {
    let mut resolver = |path: &str| -> Option<Schema> {
        match path {
            "child.fbs" => compile_schema("table Child { p: Parent; } enum Mood : byte { Calm }").ok(),
            _ => None,
        }
    };
    let schema = compile_schema_with(
        r#"include "child.fbs"; table Parent { c: Child; } struct Point { x: int; }"#,
        &mut resolver,
    )
    .unwrap();

    let out = compile_schema_to_swift(&schema, false);
    let positions: Vec<usize> = ["class Child ", "class Parent ", "enum Mood:", "struct Point "]
        .iter()
        .map(|needle| out.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", out);
    assert_eq!(out.matches("class Child ").count(), 1);
    assert_eq!(out.matches("class Parent ").count(), 1);
    assert!(!out.contains("performLateBindings"));
}

#[test]
fn test_namespace_prefixes_across_schemas() {
    let schemas: Vec<Schema> = ["namespace foo;", "namespace foo.bar;", "namespace foo;"]
        .iter()
        .map(|src| compile_schema(src).unwrap())
        .collect();
    assert_eq!(
        namespace_prefixes(&schemas),
        "public enum Foo {}\npublic enum FooBar {}"
    );
}
