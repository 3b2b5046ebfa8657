use crate::{
    error::FbsError,
    parser::{parse_schema, parse_schema_with},
    tokenizer::{skip_comments, skip_whitespace},
    traits::IncludeResolver,
    types::Schema,
    utils::line_column,
};

/// Checks what the schema loop left behind. Whitespace and comments after the
/// last declaration are fine; anything else is reported where it starts.
fn finish(buf: &[u8], parsed: Option<(Schema, usize)>) -> Result<Schema, FbsError> {
    let Some((schema, end)) = parsed else {
        return Err(FbsError::ParseError {
            msg:    "Input is not a valid schema or repeats a namespace, root_type, file_identifier or file_extension".to_string(),
            line:   1,
            column: 1,
        });
    };

    let rest = skip_whitespace(buf, skip_comments(buf, end));
    if rest < buf.len() {
        let (line, column) = line_column(buf, rest);
        let snippet: String = String::from_utf8_lossy(&buf[rest..])
            .chars()
            .take_while(|c| *c != '\n')
            .take(40)
            .collect();
        return Err(FbsError::ParseError {
            msg: format!("Unexpected input {:?}", snippet),
            line,
            column,
        });
    }
    Ok(schema)
}

/// Parses a whole schema text. Includes are recorded but not resolved.
pub fn compile_schema(text: &str) -> Result<Schema, FbsError> {
    let buf = text.as_bytes();
    finish(buf, parse_schema(buf))
}

/// Parses a whole schema text, resolving includes through `resolver`.
pub fn compile_schema_with<R>(text: &str, resolver: &mut R) -> Result<Schema, FbsError>
where
    R: IncludeResolver + ?Sized,
{
    let buf = text.as_bytes();
    finish(buf, parse_schema_with(buf, resolver))
}
