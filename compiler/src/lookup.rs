use std::collections::BTreeMap;

use tracing::trace;

use crate::types::{Enum, Ident, Schema, Struct, Table, Union};

/// Any top-level declaration the generator can emit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Node<'a> {
    Table(&'a Table),
    Struct(&'a Struct),
    Enum(&'a Enum),
    Union(&'a Union),
}

impl<'a> Node<'a> {
    pub fn name(&self) -> &'a Ident {
        match *self {
            Node::Table(t) => &t.name,
            Node::Struct(s) => &s.name,
            Node::Enum(e) => &e.name,
            Node::Union(u) => &u.name,
        }
    }

    /// Declarations that have to be emitted alongside this one, in field or
    /// case order.
    ///
    /// Tables follow every resolvable field reference, structs only follow
    /// nested structs, unions follow the tables named by their cases, and
    /// enums reference nothing.
    pub fn references(&self, lookup: &IdentLookup<'a>) -> Vec<Node<'a>> {
        match *self {
            Node::Table(t) => t
                .fields
                .iter()
                .filter_map(|f| f.type_.reference())
                .filter_map(|r| lookup.resolve(r.as_str()))
                .collect(),
            Node::Struct(s) => s
                .fields
                .iter()
                .filter_map(|f| f.type_.reference())
                .filter_map(|r| lookup.structs.get(r.as_str()).map(|&s| Node::Struct(s)))
                .collect(),
            Node::Enum(_) => Vec::new(),
            Node::Union(u) => u
                .cases
                .iter()
                .filter_map(|c| lookup.tables.get(c.value.as_str()).map(|&t| Node::Table(t)))
                .collect(),
        }
    }
}

/// Name tables for one schema's own declarations. Included schemas keep
/// their own lookups in `children` until [`IdentLookup::flattened`] is asked for.
#[derive(Debug, Clone, Default)]
pub struct IdentLookup<'a> {
    pub tables:   BTreeMap<&'a str, &'a Table>,
    pub structs:  BTreeMap<&'a str, &'a Struct>,
    pub enums:    BTreeMap<&'a str, &'a Enum>,
    pub unions:   BTreeMap<&'a str, &'a Union>,
    pub children: Vec<IdentLookup<'a>>,
}

/// Inserts every entry of `from`, replacing what `into` already had.
fn override_with<'a, T>(into: &mut BTreeMap<&'a str, &'a T>, from: &BTreeMap<&'a str, &'a T>, kind: &str) {
    for (&name, &decl) in from {
        if into.insert(name, decl).is_some() {
            trace!(declaration = name, kind, "declaration overridden by include");
        }
    }
}

impl<'a> IdentLookup<'a> {
    pub fn new(schema: &'a Schema) -> Self {
        IdentLookup {
            tables:   schema.tables.iter().map(|t| (t.name.as_str(), t)).collect(),
            structs:  schema.structs.iter().map(|s| (s.name.as_str(), s)).collect(),
            enums:    schema.enums.iter().map(|e| (e.name.as_str(), e)).collect(),
            unions:   schema.unions.iter().map(|u| (u.name.as_str(), u)).collect(),
            children: schema.children.iter().map(IdentLookup::new).collect(),
        }
    }

    /// Merges `other`'s own maps into `self`. On a name clash `other` wins.
    /// The result carries no children.
    pub fn merging(mut self, other: &IdentLookup<'a>) -> IdentLookup<'a> {
        override_with(&mut self.tables, &other.tables, "table");
        override_with(&mut self.structs, &other.structs, "struct");
        override_with(&mut self.enums, &other.enums, "enum");
        override_with(&mut self.unions, &other.unions, "union");
        self.children = Vec::new();
        self
    }

    /// One lookup covering this schema and everything it includes,
    /// transitively. Children are merged in order, so a later include beats
    /// an earlier one and any include beats the including schema.
    pub fn flattened(&self) -> IdentLookup<'a> {
        let own = IdentLookup {
            tables:   self.tables.clone(),
            structs:  self.structs.clone(),
            enums:    self.enums.clone(),
            unions:   self.unions.clone(),
            children: Vec::new(),
        };
        self.children
            .iter()
            .fold(own, |acc, child| acc.merging(&child.flattened()))
    }

    /// Own declarations: tables, then enums, then structs, then unions, each
    /// group in name order.
    pub fn nodes(&self) -> Vec<Node<'a>> {
        let tables = self.tables.values().map(|&t| Node::Table(t));
        let enums = self.enums.values().map(|&e| Node::Enum(e));
        let structs = self.structs.values().map(|&s| Node::Struct(s));
        let unions = self.unions.values().map(|&u| Node::Union(u));
        tables.chain(enums).chain(structs).chain(unions).collect()
    }

    /// Looks `name` up in tables, structs, enums and unions, in that order.
    pub fn resolve(&self, name: &str) -> Option<Node<'a>> {
        if let Some(&t) = self.tables.get(name) {
            Some(Node::Table(t))
        } else if let Some(&s) = self.structs.get(name) {
            Some(Node::Struct(s))
        } else if let Some(&e) = self.enums.get(name) {
            Some(Node::Enum(e))
        } else {
            self.unions.get(name).map(|&u| Node::Union(u))
        }
    }
}

impl Schema {
    pub fn ident_lookup(&self) -> IdentLookup<'_> {
        IdentLookup::new(self)
    }
}
