use std::collections::HashSet;

use lazy_static::lazy_static;

use crate::{tokenizer::raw_ident, traits::Parse, types::Ident};

lazy_static! {
    /// Swift keywords that cannot be used as bare type, case or member names.
    static ref RESERVED_KEYWORDS: HashSet<&'static str> = [
        "associatedtype", "class", "deinit", "enum", "extension", "func",
        "import", "init", "inout", "internal", "let", "operator", "private",
        "protocol", "public", "static", "struct", "subscript", "typealias",
        "var", "break", "case", "continue", "default", "defer", "do", "else",
        "fallthrough", "for", "guard", "if", "in", "repeat", "return",
        "switch", "where", "while", "as", "catch", "dynamicType", "false",
        "is", "nil", "rethrows", "super", "self", "Self", "throw", "throws",
        "true", "try", "associativity", "convenience", "dynamic", "didSet",
        "final", "get", "infix", "indirect", "lazy", "left", "mutating",
        "none", "nonmutating", "optional", "override", "postfix",
        "precedence", "prefix", "Protocol", "required", "right", "set",
        "Type", "unowned", "weak", "willSet",
    ]
    .into_iter()
    .collect();
}

pub fn is_reserved(name: &str) -> bool {
    RESERVED_KEYWORDS.contains(name)
}

impl Parse for Ident {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)> {
        let (raw, end) = raw_ident(buf, pos)?;
        Some((Ident::new(raw), end))
    }
}
