use std::collections::HashSet;

use crate::{
    lookup::IdentLookup,
    types::{Schema, Table},
};

/// Tracks a depth-first walk over table-to-table field references.
#[derive(Default)]
struct Walk<'a> {
    /// Tables on the current path.
    path: HashSet<&'a str>,
    /// Tables whose references are fully explored without reaching the path.
    done: HashSet<&'a str>,
}

impl<'a> Walk<'a> {
    /// Returns true as soon as a table on the current path is reached again.
    fn find_cycle(&mut self, table: &'a Table, lookup: &IdentLookup<'a>) -> bool {
        let name = table.name.as_str();
        if self.done.contains(name) {
            return false;
        }
        if !self.path.insert(name) {
            return true;
        }
        for field in &table.fields {
            let Some(reference) = field.type_.reference() else {
                continue;
            };
            if let Some(&next) = lookup.tables.get(reference.as_str()) {
                if self.find_cycle(next, lookup) {
                    return true;
                }
            }
        }
        self.path.remove(name);
        self.done.insert(name);
        false
    }
}

/// Whether the table graph reachable from `root_type` contains a cycle.
/// Unknown or missing root types never do.
pub fn has_recursions(root_type: Option<&str>, lookup: &IdentLookup<'_>) -> bool {
    let Some(root) = root_type.and_then(|name| lookup.tables.get(name).copied()) else {
        return false;
    };
    Walk::default().find_cycle(root, lookup)
}

impl Schema {
    /// True when the root table can reach itself, or any table on the way
    /// there, through table fields. Generated code then needs late binding.
    pub fn has_recursions(&self) -> bool {
        let lookup = IdentLookup::new(self).flattened();
        let root = self.root_type.as_ref().map(|r| r.ident.as_str());
        has_recursions(root, &lookup)
    }
}
