use tracing::debug;

use crate::{
    tokenizer::{eat, eat_keyword, skip_comments, string_literal},
    traits::{IncludeResolver, Parse},
    types::{
        Attribute, Enum, FileExtension, FileIdent, Ident, Include, Namespace, RootType, Schema,
        StringLiteral, Struct, Table, Union,
    },
};

/// `keyword "literal";` after any number of comments.
///
/// Comments are consumed even when the keyword then fails to match; they
/// belong to whichever rule eventually succeeds at this position.
fn directive(buf: &[u8], pos: usize, keyword: &str) -> Option<(StringLiteral, usize)> {
    let p0 = skip_comments(buf, pos);
    let p1 = eat_keyword(buf, p0, keyword)?;
    let (value, p2) = string_literal(buf, p1)?;
    let p3 = eat(buf, p2, ";")?;
    Some((value, p3))
}

impl Parse for Include {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (path, end) = directive(buf, pos, "include")?;
        Some((Include { path }, end))
    }
}

impl Parse for Attribute {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (value, end) = directive(buf, pos, "attribute")?;
        Some((Attribute { value }, end))
    }
}

impl Parse for FileExtension {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (value, end) = directive(buf, pos, "file_extension")?;
        Some((FileExtension { value }, end))
    }
}

impl Parse for FileIdent {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (value, end) = directive(buf, pos, "file_identifier")?;
        Some((FileIdent { value }, end))
    }
}

impl Parse for Namespace {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let p0 = skip_comments(buf, pos);
        let mut p = eat_keyword(buf, p0, "namespace")?;
        let mut parts = Vec::new();
        while let Some((part, next)) = Ident::parse(buf, p) {
            parts.push(part);
            p = next;
            match eat(buf, p, ".") {
                Some(next) => p = next,
                None => break,
            }
        }
        let end = eat(buf, p, ";")?;
        Some((Namespace { parts }, end))
    }
}

impl Parse for RootType {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let p0 = skip_comments(buf, pos);
        let p1 = eat_keyword(buf, p0, "root_type")?;
        let (ident, p2) = Ident::parse(buf, p1)?;
        let end = eat(buf, p2, ";")?;
        Some((RootType { ident }, end))
    }
}

/// Stores a singleton directive; a second occurrence fails the whole schema.
fn set_once<T>(slot: &mut Option<T>, value: T) -> Option<()> {
    if slot.is_some() {
        return None;
    }
    *slot = Some(value);
    Some(())
}

fn compose(
    buf: &[u8],
    mut resolver: Option<&mut dyn IncludeResolver>,
) -> Option<(Schema, usize)> {
    let mut schema = Schema::default();
    let mut p = 0;

    loop {
        if let Some((include, next)) = Include::parse(buf, p) {
            if let Some(resolver) = resolver.as_deref_mut() {
                match resolver.resolve(&include.path.value) {
                    Some(child) => schema.children.push(child),
                    None => debug!(path = %include.path.value, "include left unresolved"),
                }
            }
            schema.includes.push(include);
            p = next;
            continue;
        }
        if let Some((namespace, next)) = Namespace::parse(buf, p) {
            set_once(&mut schema.namespace, namespace)?;
            p = next;
            continue;
        }
        if let Some((root_type, next)) = RootType::parse(buf, p) {
            set_once(&mut schema.root_type, root_type)?;
            p = next;
            continue;
        }
        if let Some((file_ident, next)) = FileIdent::parse(buf, p) {
            set_once(&mut schema.file_ident, file_ident)?;
            p = next;
            continue;
        }
        if let Some((file_extension, next)) = FileExtension::parse(buf, p) {
            set_once(&mut schema.file_extension, file_extension)?;
            p = next;
            continue;
        }
        if let Some((attribute, next)) = Attribute::parse(buf, p) {
            schema.attributes.push(attribute);
            p = next;
            continue;
        }
        if let Some((table, next)) = Table::parse(buf, p) {
            schema.tables.push(table);
            p = next;
            continue;
        }
        if let Some((struct_, next)) = Struct::parse(buf, p) {
            schema.structs.push(struct_);
            p = next;
            continue;
        }
        if let Some((enum_, next)) = Enum::parse(buf, p) {
            schema.enums.push(enum_);
            p = next;
            continue;
        }
        if let Some((union, next)) = Union::parse(buf, p) {
            schema.unions.push(union);
            p = next;
            continue;
        }
        break;
    }

    debug!(
        position = p,
        remaining = buf.len() - p,
        tables = schema.tables.len(),
        children = schema.children.len(),
        "schema loop finished"
    );
    Some((schema, p))
}

/// Parses top-level declarations in any order until none matches.
///
/// Returns the schema and the position where parsing stopped; trailing bytes
/// are left for the caller to judge. A repeated `namespace`, `root_type`,
/// `file_identifier` or `file_extension` yields `None`. Includes are recorded
/// but never resolved.
pub fn parse_schema(buf: &[u8]) -> Option<(Schema, usize)> {
    compose(buf, None)
}

/// Same as [`parse_schema`], handing every include path to `resolver` and
/// keeping the schemas it returns as children.
pub fn parse_schema_with<R>(buf: &[u8], resolver: &mut R) -> Option<(Schema, usize)>
where
    R: IncludeResolver + ?Sized,
{
    let mut resolve = |path: &str| resolver.resolve(path);
    let resolve: &mut dyn IncludeResolver = &mut resolve;
    compose(buf, Some(resolve))
}
