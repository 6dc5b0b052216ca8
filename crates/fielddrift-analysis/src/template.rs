//! Handler lookup inside an infrastructure template.
//!
//! Finds the resource block `<Name>:` and returns the inline source that
//! follows its `ZipFile: |` key, up to the next key indented two columns or
//! less. An unknown name is a caller error, not heuristic uncertainty, so it
//! is reported as [`LocateError`].

use fielddrift_core::errors::LocateError;

const INLINE_KEY: &str = "ZipFile:";

/// Inline handler source for resource `name`.
pub fn locate_handler(template: &str, name: &str) -> Result<String, LocateError> {
    let (header_end, header_indent) = find_header(template, name).ok_or_else(|| LocateError::HandlerNotFound {
        name: name.to_string(),
    })?;

    let resource = &template[header_end..];
    let resource = &resource[..sibling_offset(resource, header_indent)];

    for (idx, _) in resource.match_indices(INLINE_KEY) {
        let after = &resource[idx + INLINE_KEY.len()..];
        let trimmed = after.trim_start();
        let Some(block) = trimmed.strip_prefix('|') else {
            continue;
        };
        let body = &block[..block_end(block)];
        if body.trim().is_empty() {
            break;
        }
        tracing::debug!(handler = name, bytes = body.len(), "located inline handler source");
        return Ok(body.to_string());
    }

    Err(LocateError::NoInlineSource {
        name: name.to_string(),
    })
}

/// Byte offset just past `name:` on a line where only whitespace precedes it,
/// plus that line's indentation.
fn find_header(template: &str, name: &str) -> Option<(usize, usize)> {
    let needle = format!("{name}:");
    let mut offset = 0;
    for line in template.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with(&needle) {
            let indent = line.len() - trimmed.len();
            return Some((offset + indent + needle.len(), indent));
        }
        offset += line.len();
    }
    None
}

/// Offset of the next line starting a key at `indent` columns or less.
fn sibling_offset(resource: &str, indent: usize) -> usize {
    let mut offset = 0;
    for (i, line) in resource.split_inclusive('\n').enumerate() {
        if i > 0 {
            let trimmed = line.trim_start();
            let line_indent = line.len() - trimmed.len();
            if !trimmed.is_empty() && line_indent <= indent && starts_with_key(trimmed) {
                return offset;
            }
        }
        offset += line.len();
    }
    resource.len()
}

/// End of an inline block: the first newline followed by at most two
/// whitespace characters and a `key:`.
fn block_end(block: &str) -> usize {
    for (idx, _) in block.match_indices('\n') {
        let rest = &block[idx + 1..];
        let ws: usize = rest
            .chars()
            .take(2)
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if starts_with_key(&rest[ws..]) {
            return idx;
        }
    }
    block.len()
}

fn starts_with_key(text: &str) -> bool {
    let word: usize = text
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    word > 0 && text[word..].starts_with(':')
}
