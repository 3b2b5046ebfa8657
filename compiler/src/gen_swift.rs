use std::collections::HashSet;

use tracing::debug;

use crate::{
    lookup::{IdentLookup, Node},
    templates::{SwiftContext, LATE_BINDING_HELPER},
    types::Schema,
    verifier::has_recursions,
};

/// Generated text, one appended block per line or snippet.
#[derive(Default)]
struct SourceBuilder {
    value: String,
}

impl SourceBuilder {
    fn append(&mut self, s: &str) {
        self.value.push_str(s);
        self.value.push('\n');
    }
}

/// State for one generation pass. Nothing here outlives the call that
/// created it.
struct Emitter<'s, 'a> {
    ctx:        SwiftContext<'s, 'a>,
    root_type:  Option<&'a str>,
    file_ident: Option<&'a str>,
    visited:    HashSet<&'a str>,
    out:        SourceBuilder,
}

impl<'a> Emitter<'_, 'a> {
    fn render(&self, node: Node<'a>) -> String {
        match node {
            Node::Table(t) => {
                let is_root = self.root_type == Some(t.name.as_str());
                let file_ident = if is_root { self.file_ident } else { None };
                self.ctx.table(t, is_root, file_ident)
            }
            Node::Struct(s) => self.ctx.struct_(s),
            Node::Enum(e) => self.ctx.enum_(e),
            Node::Union(u) => self.ctx.union(u),
        }
    }

    /// Emits `node` and then, depth first, whatever it references. A name is
    /// emitted and descended into at most once, which also ends cycles.
    fn visit(&mut self, node: Node<'a>) {
        if !self.visited.insert(node.name().as_str()) {
            return;
        }
        let block = self.render(node);
        self.out.append(&block);
        for next in node.references(self.ctx.lookup) {
            self.visit(next);
        }
    }
}

/// Generates Swift source for `schema` and everything its includes declare.
///
/// With a resolvable `root_type` only the root table and what it reaches are
/// emitted; otherwise every declaration is. `with_import` adds the
/// `FlatBuffersSwift` import line.
#[tracing::instrument(level = "debug", skip_all, fields(with_import = with_import))]
pub fn compile_schema_to_swift(schema: &Schema, with_import: bool) -> String {
    let lookup = IdentLookup::new(schema).flattened();
    let prefix = schema.prefix();
    let root_type = schema.root_type.as_ref().map(|r| r.ident.as_str());
    let late_binding = has_recursions(root_type, &lookup);

    let mut emitter = Emitter {
        ctx: SwiftContext { lookup: &lookup, prefix: &prefix, late_binding },
        root_type,
        file_ident: schema.file_ident.as_ref().map(|f| f.value.value.as_str()),
        visited: HashSet::new(),
        out: SourceBuilder::default(),
    };

    emitter.out.append("import Foundation");
    if with_import {
        emitter.out.append("import FlatBuffersSwift");
    }
    emitter.out.append("");

    let roots = match root_type.and_then(|name| lookup.tables.get(name)) {
        Some(&table) => vec![Node::Table(table)],
        None => lookup.nodes(),
    };
    debug!(roots = roots.len(), late_binding, "emitting declarations");
    for node in roots {
        emitter.visit(node);
    }

    if late_binding {
        emitter.out.append(LATE_BINDING_HELPER);
    }
    emitter.out.value
}

/// One `public enum <Prefix> {}` container per distinct namespace, in the
/// order the namespaces are first seen. `namespace ;` declares no container.
pub fn namespace_prefixes(schemas: &[Schema]) -> String {
    let mut seen = HashSet::new();
    schemas
        .iter()
        .filter_map(|s| s.namespace.as_ref().map(|n| n.prefix()))
        .filter(|prefix| !prefix.is_empty())
        .filter(|prefix| seen.insert(prefix.clone()))
        .map(|prefix| format!("public enum {} {{}}", prefix))
        .collect::<Vec<_>>()
        .join("\n")
}
