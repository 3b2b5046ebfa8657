//! Grammar rules for `table`, `struct`, `enum` and `union` declarations.

use crate::{
    tokenizer::{eat, eat_keyword, raw_ident, skip_comments, string_literal, value_token},
    traits::Parse,
    types::{
        BaseType, Enum, EnumCase, Field, FieldType, Ident, Metadata, MetadataEntry, Scalar,
        Struct, Table, Union, UnionCase,
    },
};

impl Parse for MetadataEntry {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (key, p) = raw_ident(buf, pos)?;
        let key = key.to_string();
        let Some(p) = eat(buf, p, ":") else {
            return Some((MetadataEntry { key, value: None }, p));
        };
        if let Some((lit, end)) = string_literal(buf, p) {
            return Some((MetadataEntry { key, value: Some(lit.value) }, end));
        }
        let (value, end) = value_token(buf, p)?;
        Some((MetadataEntry { key, value: Some(value.to_string()) }, end))
    }
}

impl Parse for Metadata {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let mut p = eat(buf, pos, "(")?;
        let mut entries = Vec::new();
        loop {
            let (entry, next) = MetadataEntry::parse(buf, p)?;
            entries.push(entry);
            p = next;
            match eat(buf, p, ",") {
                Some(next) => p = next,
                None => break,
            }
        }
        let end = eat(buf, p, ")")?;
        Some((Metadata { entries }, end))
    }
}

/// Metadata is optional everywhere it appears.
fn metadata(buf: &[u8], pos: usize) -> (Metadata, usize) {
    Metadata::parse(buf, pos).unwrap_or((Metadata::default(), pos))
}

fn base_type(buf: &[u8], pos: usize) -> Option<(BaseType, usize)> {
    let (name, end) = raw_ident(buf, pos)?;
    let base = if name == "string" {
        BaseType::String
    } else if let Some(scalar) = Scalar::from_name(name) {
        BaseType::Scalar(scalar)
    } else {
        BaseType::Ref(Ident::new(name))
    };
    Some((base, end))
}

impl Parse for FieldType {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        if let Some(p) = eat(buf, pos, "[") {
            let (base, p) = base_type(buf, p)?;
            let end = eat(buf, p, "]")?;
            return Some((FieldType { base, is_vector: true }, end));
        }
        let (base, end) = base_type(buf, pos)?;
        Some((FieldType { base, is_vector: false }, end))
    }
}

impl Parse for Field {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let p = skip_comments(buf, pos);
        let (name, p) = Ident::parse(buf, p)?;
        let p = eat(buf, p, ":")?;
        let (type_, mut p) = FieldType::parse(buf, p)?;
        let mut default = None;
        if let Some(next) = eat(buf, p, "=") {
            let (value, next) = value_token(buf, next)?;
            default = Some(value.to_string());
            p = next;
        }
        let (metadata, p) = metadata(buf, p);
        let end = eat(buf, p, ";")?;
        Some((Field { name, type_, default, metadata }, end))
    }
}

/// `keyword Name (meta)? { field* }`, shared by tables and structs.
fn field_block(buf: &[u8], pos: usize, keyword: &str) -> Option<(Ident, Metadata, Vec<Field>, usize)> {
    let p = skip_comments(buf, pos);
    let p = eat_keyword(buf, p, keyword)?;
    let (name, p) = Ident::parse(buf, p)?;
    let (metadata, p) = metadata(buf, p);
    let mut p = eat(buf, p, "{")?;
    let mut fields = Vec::new();
    while let Some((field, next)) = Field::parse(buf, p) {
        fields.push(field);
        p = next;
    }
    let p = skip_comments(buf, p);
    let end = eat(buf, p, "}")?;
    Some((name, metadata, fields, end))
}

impl Parse for Table {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (name, metadata, fields, end) = field_block(buf, pos, "table")?;
        Some((Table { name, fields, metadata }, end))
    }
}

impl Parse for Struct {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (name, metadata, fields, end) = field_block(buf, pos, "struct")?;
        Some((Struct { name, fields, metadata }, end))
    }
}

/// Comma separated items inside braces, trailing comma allowed.
fn braced_list<T>(
    buf: &[u8],
    pos: usize,
    item: impl Fn(&[u8], usize) -> Option<(T, usize)>,
) -> Option<(Vec<T>, usize)> {
    let mut p = eat(buf, pos, "{")?;
    let mut items = Vec::new();
    while let Some((value, next)) = item(buf, skip_comments(buf, p)) {
        items.push(value);
        p = next;
        match eat(buf, p, ",") {
            Some(next) => p = next,
            None => break,
        }
    }
    let p = skip_comments(buf, p);
    let end = eat(buf, p, "}")?;
    Some((items, end))
}

impl Parse for EnumCase {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (name, p) = Ident::parse(buf, pos)?;
        match eat(buf, p, "=") {
            Some(p) => {
                let (value, end) = value_token(buf, p)?;
                Some((EnumCase { name, value: Some(value.to_string()) }, end))
            }
            None => Some((EnumCase { name, value: None }, p)),
        }
    }
}

impl Parse for Enum {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let p = skip_comments(buf, pos);
        let p = eat_keyword(buf, p, "enum")?;
        let (name, p) = Ident::parse(buf, p)?;
        let p = eat(buf, p, ":")?;
        let (base, p) = raw_ident(buf, p)?;
        let base = Scalar::from_name(base)?;
        let (metadata, p) = metadata(buf, p);
        let (cases, end) = braced_list(buf, p, EnumCase::parse)?;
        Some((Enum { name, base, cases, metadata }, end))
    }
}

impl Parse for UnionCase {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (value, end) = Ident::parse(buf, pos)?;
        Some((UnionCase { value }, end))
    }
}

impl Parse for Union {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let p = skip_comments(buf, pos);
        let p = eat_keyword(buf, p, "union")?;
        let (name, p) = Ident::parse(buf, p)?;
        let (metadata, p) = metadata(buf, p);
        let (cases, end) = braced_list(buf, p, UnionCase::parse)?;
        Some((Union { name, cases, metadata }, end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_fields() {
        let src = br#"
        table Monster (priority: 1) {
          pos: Vec3;
          hp: short = 100;
          name: string (required);
          // kept for wire compatibility
          friendly: bool = false (deprecated);
          inventory: [ubyte];
          weapons: [Weapon];
        }"#;
        let (table, end) = Table::parse(src, 0).unwrap();
        assert_eq!(end, src.len());
        assert_eq!(table.name.as_str(), "Monster");
        assert_eq!(table.metadata.entries[0].value.as_deref(), Some("1"));
        assert_eq!(table.fields.len(), 6);

        assert_eq!(table.fields[0].type_.reference().map(Ident::as_str), Some("Vec3"));
        assert_eq!(table.fields[1].type_.base, BaseType::Scalar(Scalar::Int16));
        assert_eq!(table.fields[1].default.as_deref(), Some("100"));
        assert_eq!(table.fields[2].type_.base, BaseType::String);
        assert!(table.fields[2].metadata.contains("required"));
        assert!(table.fields[3].is_deprecated());
        assert!(table.fields[4].type_.is_vector);
        assert_eq!(table.fields[4].type_.base, BaseType::Scalar(Scalar::UInt8));
        assert!(table.fields[5].type_.is_vector);
        assert_eq!(table.fields[5].type_.reference().map(Ident::as_str), Some("Weapon"));
    }

    #[test]
    fn test_field_names_are_escaped() {
        let (table, _) = Table::parse(b"table T { self: T; }", 0).unwrap();
        assert_eq!(table.fields[0].name.as_str(), "_self");
    }

    #[test]
    fn test_struct() {
        let (s, _) = Struct::parse(b"struct Vec3 { x: float; y: float; z: float; }", 0).unwrap();
        assert_eq!(s.name.as_str(), "Vec3");
        assert_eq!(s.fields.len(), 3);
        assert!(Table::parse(b"struct Vec3 {}", 0).is_none());
    }

    #[test]
    fn test_enum() {
        let src = b"enum Color : byte { Red = 1, Green, /* last */ Blue = 8, }";
        let (e, end) = Enum::parse(src, 0).unwrap();
        assert_eq!(end, src.len());
        assert_eq!(e.base, Scalar::Int8);
        let cases: Vec<(&str, Option<&str>)> = e
            .cases
            .iter()
            .map(|c| (c.name.as_str(), c.value.as_deref()))
            .collect();
        assert_eq!(cases, [("Red", Some("1")), ("Green", None), ("Blue", Some("8"))]);
    }

    #[test]
    fn test_enum_requires_scalar_base() {
        assert!(Enum::parse(b"enum Color : string { Red }", 0).is_none());
        assert!(Enum::parse(b"enum Color { Red }", 0).is_none());
    }

    #[test]
    fn test_union() {
        let (u, _) = Union::parse(b"union Equipment { Weapon, Shield }", 0).unwrap();
        let cases: Vec<&str> = u.cases.iter().map(|c| c.value.as_str()).collect();
        assert_eq!(cases, ["Weapon", "Shield"]);
    }

    #[test]
    fn test_unclosed_block_is_no_match() {
        assert!(Table::parse(b"table T { a: int;", 0).is_none());
        assert!(Union::parse(b"union U { A B }", 0).is_none());
    }
}
