//! Placeholder substitution for `.ini` templates.
//!
//! Templates use `{name}` placeholders; `{{` and `}}` stand for literal
//! braces. Every placeholder in the template needs a value; values the
//! template does not use are logged and ignored.

use crate::bundler::error::{ErrorExt, Result};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;
use thiserror::Error;

/// Errors raised while filling a template.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    /// Placeholders present in the template with no supplied value.
    #[error("unresolved template placeholders: {}", .0.join(", "))]
    Unresolved(Vec<String>),

    /// A `{` without a matching `}` or a lone `}`.
    #[error("unbalanced brace at byte {0}")]
    Unbalanced(usize),

    /// Placeholder name that is not an identifier.
    #[error("invalid placeholder name '{0}'")]
    InvalidName(String),
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

fn parse(text: &str) -> std::result::Result<Vec<Segment<'_>>, TemplateError> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'{' if bytes.get(i + 1) == Some(&b'{') => {
                segments.push(Segment::Text(&text[start..i + 1]));
                i += 2;
                start = i;
            }
            b'}' if bytes.get(i + 1) == Some(&b'}') => {
                segments.push(Segment::Text(&text[start..i + 1]));
                i += 2;
                start = i;
            }
            b'{' => {
                let close = text[i + 1..]
                    .find('}')
                    .map(|offset| i + 1 + offset)
                    .ok_or(TemplateError::Unbalanced(i))?;
                let name = &text[i + 1..close];
                if !is_identifier(name) {
                    return Err(TemplateError::InvalidName(name.to_string()));
                }
                segments.push(Segment::Text(&text[start..i]));
                segments.push(Segment::Placeholder(name));
                i = close + 1;
                start = i;
            }
            b'}' => return Err(TemplateError::Unbalanced(i)),
            _ => i += 1,
        }
    }
    segments.push(Segment::Text(&text[start..]));
    Ok(segments)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Returns the distinct placeholder names used in `text`.
pub fn placeholders(text: &str) -> std::result::Result<BTreeSet<String>, TemplateError> {
    Ok(parse(text)?
        .into_iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(name.to_string()),
            Segment::Text(_) => None,
        })
        .collect())
}

/// Substitutes every placeholder in `text` and normalizes line endings to `\n`.
pub fn fill(text: &str, values: &HashMap<&str, String>) -> std::result::Result<String, TemplateError> {
    let segments = parse(text)?;

    let used: BTreeSet<&str> = segments
        .iter()
        .filter_map(|s| match s {
            Segment::Placeholder(name) => Some(*name),
            Segment::Text(_) => None,
        })
        .collect();

    let missing: Vec<String> = used
        .iter()
        .filter(|name| !values.contains_key(*name))
        .map(|name| name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(TemplateError::Unresolved(missing));
    }

    let mut unused: Vec<&str> = values
        .keys()
        .copied()
        .filter(|key| !used.contains(key))
        .collect();
    if !unused.is_empty() {
        unused.sort_unstable();
        log::warn!("Template does not use the values: {}", unused.join(", "));
    }

    let mut out = String::with_capacity(text.len());
    for segment in segments {
        match segment {
            Segment::Text(t) => out.push_str(t),
            Segment::Placeholder(name) => out.push_str(&values[name]),
        }
    }
    Ok(out.replace("\r\n", "\n"))
}

/// Reads a template file, fills it and writes the result to `output`.
///
/// Parent directories of `output` are created as needed.
pub async fn render_to_file(
    template: &Path,
    values: &HashMap<&str, String>,
    output: &Path,
) -> Result<()> {
    let text = tokio::fs::read_to_string(template)
        .await
        .fs_context("reading template", template)?;
    let rendered = fill(&text, values)?;

    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .fs_context("creating config directory", parent)?;
    }
    tokio::fs::write(output, rendered)
        .await
        .fs_context("writing rendered template", output)?;

    log::debug!("Rendered {} -> {}", template.display(), output.display());
    Ok(())
}
