//! Deterministic source formatter for generated Python.
//!
//! Layout normalization only: the templates already emit canonical code, so
//! this pass pins whitespace down, then parses the result with the Python
//! grammar and rejects anything with a syntax error before it can reach
//! disk. `format(format(x)) == format(x)`.

use ast_grep_core::Node;
use ast_grep_core::tree_sitter::StrDoc;
use ast_grep_language::{LanguageExt, SupportLang};

use crate::error::FormatError;

const INDENT_WIDTH: usize = 4;
const MAX_BLANK_RUN: usize = 2;

/// Normalize `text` and check its structure.
///
/// # Errors
///
/// [`FormatError`] for empty input, or for text the Python grammar cannot
/// parse without error recovery.
pub fn format(text: &str) -> Result<String, FormatError> {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut lines: Vec<String> = Vec::new();
    let mut blank_run = 0;
    for raw in normalized.split('\n') {
        let line = expand_leading_tabs(raw.trim_end());
        if line.is_empty() {
            blank_run += 1;
            if lines.is_empty() || blank_run > MAX_BLANK_RUN {
                continue;
            }
        } else {
            blank_run = 0;
        }
        lines.push(line);
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    if lines.is_empty() {
        return Err(FormatError::Empty);
    }

    let mut out = lines.join("\n");
    out.push('\n');
    check_syntax(&out)?;
    Ok(out)
}

fn expand_leading_tabs(line: &str) -> String {
    let body = line.trim_start_matches([' ', '\t']);
    let lead = &line[..line.len() - body.len()];
    if !lead.contains('\t') {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + INDENT_WIDTH);
    for c in lead.chars() {
        if c == '\t' {
            out.push_str(&" ".repeat(INDENT_WIDTH));
        } else {
            out.push(c);
        }
    }
    out.push_str(body);
    out
}

/// Parse `text` as Python and report the first error or missing node.
fn check_syntax(text: &str) -> Result<(), FormatError> {
    let tree = SupportLang::Python.ast_grep(text);
    let mut pending: Vec<Node<'_, StrDoc<SupportLang>>> = vec![tree.root()];
    while let Some(node) = pending.pop() {
        let line = node.start_pos().line() + 1;
        if node.is_missing() {
            return Err(FormatError::Missing {
                line,
                expected: node.kind().to_string(),
            });
        }
        if node.kind() == "ERROR" {
            let text = node.text();
            let near = text.lines().next().unwrap_or_default().trim();
            return Err(FormatError::Syntax {
                line,
                near: near.to_string(),
            });
        }
        let children: Vec<_> = node.children().collect();
        pending.extend(children.into_iter().rev());
    }
    Ok(())
}
