//! Frontmatter block parsing
//!
//! A chapter file may open with a `---`-delimited key/value block. The body
//! is YAML; the well-known keys are extracted with tolerant coercion and
//! everything else is carried through uninterpreted.

use crate::error::FrontmatterError;
use crate::types::Frontmatter;
use serde_yaml::Value;

const DELIMITER: &str = "---";

/// Split a frontmatter block off the head of `content`.
///
/// Returns the parsed metadata and the content with the block removed. When
/// no block is present the metadata is empty and the content is returned
/// unchanged; that is not an error. Fails with
/// [`FrontmatterError::Unterminated`] when the opening delimiter has no
/// matching close before end of input.
pub fn parse(content: &str) -> Result<(Frontmatter, &str), FrontmatterError> {
    let input = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some(first_line_end) = input.find('\n') else {
        // Single-line input: a lone delimiter opens a block that never closes
        return if input.trim_end() == DELIMITER {
            Err(FrontmatterError::Unterminated)
        } else {
            Ok((Frontmatter::default(), content))
        };
    };
    if input[..first_line_end].trim_end() != DELIMITER {
        return Ok((Frontmatter::default(), content));
    }

    let body_start = first_line_end + 1;
    let mut offset = body_start;
    for line in input[body_start..].split_inclusive('\n') {
        if line.trim_end() == DELIMITER {
            let block = &input[body_start..offset];
            let rest = &input[offset + line.len()..];
            return Ok((parse_block(block)?, rest));
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

fn parse_block(block: &str) -> Result<Frontmatter, FrontmatterError> {
    if block.trim().is_empty() {
        return Ok(Frontmatter::default());
    }

    let value: Value = serde_yaml::from_str(block)?;
    let Value::Mapping(mapping) = value else {
        // A well-delimited block that is not a mapping carries no metadata
        return Ok(Frontmatter::default());
    };

    let mut meta = Frontmatter::default();
    for (key, value) in mapping {
        let Some(key) = key.as_str().map(str::to_owned) else {
            continue;
        };
        match key.as_str() {
            "title" => meta.title = scalar_string(&value),
            "author" => meta.author = scalar_string(&value),
            "date" => meta.date = scalar_string(&value),
            "chapter" => meta.chapter = integer(&value),
            "draft" => meta.draft = boolean(&value),
            _ => {
                meta.extra.insert(key, value);
            }
        }
    }
    Ok(meta)
}

/// Scalars only; structured values do not coerce to a string field
fn scalar_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// `true`/`false` as a YAML bool or a quoted string, case-insensitive
fn boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s.eq_ignore_ascii_case("true") => Some(true),
        Value::String(s) if s.eq_ignore_ascii_case("false") => Some(false),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
