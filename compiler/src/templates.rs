//! Swift source for single declarations.
//!
//! Each function returns one block ending in a newline. Blocks never look at
//! what else gets emitted; ordering and deduplication live in `gen_swift`.

use crate::{
    lookup::{IdentLookup, Node},
    tokenizer::is_ident_start,
    types::{BaseType, Enum, Field, FieldType, Ident, Scalar, Struct, Table, Union},
    utils::indent,
};

pub const LATE_BINDING_HELPER: &str = "\
fileprivate func performLateBindings(_ builder: FlatBuffersBuilder) throws {
    for binding in builder.deferedBindings {
        guard let offset = builder.cache[ObjectIdentifier(binding.object)] else {
            throw FlatBuffersBuildError.couldNotPerformLateBinding
        }
        try builder.update(offset: offset, atCursor: binding.cursor)
    }
    builder.deferedBindings.removeAll()
}
";

/// What every template needs besides the declaration itself.
pub struct SwiftContext<'s, 'a> {
    pub lookup:       &'s IdentLookup<'a>,
    /// Namespace container, empty when the schema has no namespace.
    pub prefix:       &'s str,
    /// Root tables call `performLateBindings` before finishing.
    pub late_binding: bool,
}

fn scalar_type(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Bool => "Bool",
        Scalar::Int8 => "Int8",
        Scalar::UInt8 => "UInt8",
        Scalar::Int16 => "Int16",
        Scalar::UInt16 => "UInt16",
        Scalar::Int32 => "Int32",
        Scalar::UInt32 => "UInt32",
        Scalar::Int64 => "Int64",
        Scalar::UInt64 => "UInt64",
        Scalar::Float32 => "Float32",
        Scalar::Float64 => "Double",
    }
}

fn zero_value(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::Bool => "false",
        s if s.is_float() => "0.0",
        _ => "0",
    }
}

impl SwiftContext<'_, '_> {
    pub fn type_name(&self, name: &str) -> String {
        if self.prefix.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", self.prefix, name)
        }
    }

    fn swift_type(&self, type_: &FieldType) -> String {
        let base = match &type_.base {
            BaseType::Scalar(s) => scalar_type(*s).to_string(),
            BaseType::String => "String".to_string(),
            BaseType::Ref(name) => self.type_name(name.as_str()),
        };
        if type_.is_vector {
            format!("[{}]", base)
        } else {
            base
        }
    }

    /// Nests a declaration inside the namespace container.
    fn wrap(&self, block: String) -> String {
        if self.prefix.is_empty() {
            block
        } else {
            format!("extension {} {{\n{}\n}}\n", self.prefix, indent(&block))
        }
    }

    fn table_property(&self, field: &Field) -> String {
        let name = &field.name;
        let ty = self.swift_type(&field.type_);
        if field.type_.is_vector {
            return format!("public var {}: {} = []", name, ty);
        }
        match &field.type_.base {
            BaseType::Scalar(s) => {
                let value = match (s, field.default.as_deref()) {
                    (Scalar::Bool, Some("0")) => "false",
                    (Scalar::Bool, Some("1")) => "true",
                    (_, Some(value)) => value,
                    (_, None) => zero_value(*s),
                };
                format!("public var {}: {} = {}", name, ty, value)
            }
            BaseType::String => format!("public var {}: {}?", name, ty),
            BaseType::Ref(r) => match (self.lookup.resolve(r.as_str()), field.default.as_deref()) {
                (Some(Node::Enum(_)), Some(case)) if case.bytes().next().is_some_and(is_ident_start) => {
                    format!("public var {}: {} = .{}", name, ty, Ident::new(case))
                }
                (Some(Node::Enum(_)), Some(raw)) => {
                    format!("public var {}: {}? = {}(rawValue: {})", name, ty, ty, raw)
                }
                _ => format!("public var {}: {}?", name, ty),
            },
        }
    }

    pub fn table(&self, table: &Table, is_root: bool, file_ident: Option<&str>) -> String {
        let mut lines = vec![format!("public final class {} {{", table.name)];
        for field in table.fields.iter().filter(|f| !f.is_deprecated()) {
            lines.push(format!("    {}", self.table_property(field)));
        }
        lines.push("    public init() {}".to_string());
        lines.push("}".to_string());
        let mut out = self.wrap(lines.join("\n") + "\n");

        if is_root {
            let ident = match file_ident {
                Some(value) => format!("\"{}\"", value),
                None => "nil".to_string(),
            };
            out.push_str(&format!("extension {} {{\n", self.type_name(table.name.as_str())));
            out.push_str(&format!("    public static let fileIdentifier: String? = {}\n", ident));
            out.push_str("    public static func finish(_ builder: FlatBuffersBuilder, offset: Offset) throws -> Data {\n");
            if self.late_binding {
                out.push_str("        try performLateBindings(builder)\n");
            }
            out.push_str("        return try builder.finish(offset: offset, fileIdentifier: fileIdentifier)\n");
            out.push_str("    }\n}\n");
        }
        out
    }

    pub fn struct_(&self, s: &Struct) -> String {
        let fields: Vec<(String, String)> = s
            .fields
            .iter()
            .filter(|f| !f.is_deprecated())
            .map(|f| (f.name.to_string(), self.swift_type(&f.type_)))
            .collect();

        let mut lines = vec![format!("public struct {} {{", s.name)];
        for (name, ty) in &fields {
            lines.push(format!("    public var {}: {}", name, ty));
        }
        lines.push(String::new());
        let params: Vec<String> = fields.iter().map(|(n, t)| format!("{}: {}", n, t)).collect();
        lines.push(format!("    public init({}) {{", params.join(", ")));
        for (name, _) in &fields {
            lines.push(format!("        self.{} = {}", name, name));
        }
        lines.push("    }".to_string());
        lines.push("}".to_string());
        self.wrap(lines.join("\n") + "\n")
    }

    pub fn enum_(&self, e: &Enum) -> String {
        let mut lines = vec![format!("public enum {}: {}, CaseIterable {{", e.name, scalar_type(e.base))];
        for case in &e.cases {
            match &case.value {
                Some(value) => lines.push(format!("    case {} = {}", case.name, value)),
                None => lines.push(format!("    case {}", case.name)),
            }
        }
        lines.push("}".to_string());
        self.wrap(lines.join("\n") + "\n")
    }

    pub fn union(&self, u: &Union) -> String {
        let mut lines = vec![format!("public enum {} {{", u.name)];
        for case in &u.cases {
            lines.push(format!(
                "    case with{}({})",
                case.value,
                self.type_name(case.value.as_str())
            ));
        }
        lines.push("}".to_string());
        self.wrap(lines.join("\n") + "\n")
    }
}
