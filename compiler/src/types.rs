use serde::Serialize;
use std::fmt;

use crate::utils::title_case;

/// A validated identifier. Reserved words are stored with a leading `_`,
/// so the stored value is what lookups key on and what gets emitted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Ident {
    value: String,
}

impl Ident {
    /// Builds an identifier from its raw source text, escaping reserved words.
    pub fn new(raw: &str) -> Self {
        let value = if crate::ident::is_reserved(raw) {
            format!("_{}", raw)
        } else {
            raw.to_string()
        };
        Ident { value }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Raw contents between the quotes; escape sequences are kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StringLiteral {
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Include {
    pub path: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Attribute {
    pub value: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileExtension {
    pub value: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileIdent {
    pub value: StringLiteral,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Namespace {
    pub parts: Vec<Ident>,
}

impl Namespace {
    /// `my_game.sample` becomes `My_gameSample`: every part is title-cased
    /// and the parts are joined without a separator.
    pub fn prefix(&self) -> String {
        self.parts.iter().map(|p| title_case(p.as_str())).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootType {
    pub ident: Ident,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Scalar {
    Bool,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
    Float32,
    Float64,
}

impl Scalar {
    pub fn from_name(name: &str) -> Option<Scalar> {
        let scalar = match name {
            "bool" => Scalar::Bool,
            "byte" | "int8" => Scalar::Int8,
            "ubyte" | "uint8" => Scalar::UInt8,
            "short" | "int16" => Scalar::Int16,
            "ushort" | "uint16" => Scalar::UInt16,
            "int" | "int32" => Scalar::Int32,
            "uint" | "uint32" => Scalar::UInt32,
            "long" | "int64" => Scalar::Int64,
            "ulong" | "uint64" => Scalar::UInt64,
            "float" | "float32" => Scalar::Float32,
            "double" | "float64" => Scalar::Float64,
            _ => return None,
        };
        Some(scalar)
    }

    pub fn is_float(self) -> bool {
        matches!(self, Scalar::Float32 | Scalar::Float64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum BaseType {
    Scalar(Scalar),
    String,
    /// Name of a table, struct, enum or union declared somewhere in scope.
    Ref(Ident),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldType {
    pub base:      BaseType,
    pub is_vector: bool,
}

impl FieldType {
    /// The declaration name this type points at, if any.
    pub fn reference(&self) -> Option<&Ident> {
        match &self.base {
            BaseType::Ref(ident) => Some(ident),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataEntry {
    pub key:   String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Metadata {
    pub entries: Vec<MetadataEntry>,
}

impl Metadata {
    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.key == key)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    pub name:     Ident,
    pub type_:    FieldType,
    pub default:  Option<String>,
    pub metadata: Metadata,
}

impl Field {
    pub fn is_deprecated(&self) -> bool {
        self.metadata.contains("deprecated")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    pub name:     Ident,
    pub fields:   Vec<Field>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Struct {
    pub name:     Ident,
    pub fields:   Vec<Field>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumCase {
    pub name:  Ident,
    pub value: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enum {
    pub name:     Ident,
    pub base:     Scalar,
    pub cases:    Vec<EnumCase>,
    pub metadata: Metadata,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionCase {
    pub value: Ident,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Union {
    pub name:     Ident,
    pub cases:    Vec<UnionCase>,
    pub metadata: Metadata,
}

/// One parsed schema file together with the schemas its includes resolved to.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Schema {
    pub includes:       Vec<Include>,
    pub namespace:      Option<Namespace>,
    pub root_type:      Option<RootType>,
    pub file_ident:     Option<FileIdent>,
    pub file_extension: Option<FileExtension>,
    pub attributes:     Vec<Attribute>,
    pub tables:         Vec<Table>,
    pub structs:        Vec<Struct>,
    pub enums:          Vec<Enum>,
    pub unions:         Vec<Union>,
    pub children:       Vec<Schema>,
}

impl Schema {
    pub fn prefix(&self) -> String {
        self.namespace.as_ref().map(Namespace::prefix).unwrap_or_default()
    }
}
