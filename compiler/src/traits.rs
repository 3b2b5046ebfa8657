use crate::types::Schema;

/// A grammar rule over a raw byte buffer. On success returns the node and the
/// position just past it; on failure returns `None` and consumes nothing the
/// caller can observe.
pub trait Parse: Sized {
    fn parse(buf: &[u8], pos: usize) -> Option<(Self, usize)>;
}

/// Turns an `include "path";` into an already parsed schema.
///
/// Called inline from the schema loop, once per include, with no caching.
/// Implementations that read nested includes must guard against include
/// cycles themselves.
pub trait IncludeResolver {
    fn resolve(&mut self, path: &str) -> Option<Schema>;
}

impl<F> IncludeResolver for F
where
    F: FnMut(&str) -> Option<Schema>,
{
    fn resolve(&mut self, path: &str) -> Option<Schema> {
        self(path)
    }
}
