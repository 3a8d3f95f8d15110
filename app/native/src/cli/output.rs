//! Terminal rendering shared by the CLI commands.

use colored::Colorize;
use serde_json::Value;

const INDENT: &str = "  ";

/// Prints a JSON value pretty-printed and colorized.
pub fn print_highlighted_json(value: &Value) { println!("{}", highlight_json(value)); }

/// Pretty-prints a JSON value with two-space indentation.
///
/// Keys are cyan, strings green, numbers yellow, booleans and `null`
/// magenta. With colors disabled the output matches
/// [`serde_json::to_string_pretty`].
#[must_use]
pub fn highlight_json(value: &Value) -> String {
    let mut out = String::new();
    write_value(&mut out, value, 0);
    out
}

fn write_value(out: &mut String, value: &Value, depth: usize) {
    match value {
        Value::Null => out.push_str(&"null".magenta().to_string()),
        Value::Bool(flag) => out.push_str(&flag.to_string().magenta().to_string()),
        Value::Number(number) => out.push_str(&number.to_string().yellow().to_string()),
        // Display on a string value yields the quoted, escaped literal
        Value::String(_) => out.push_str(&value.to_string().green().to_string()),
        Value::Array(items) => {
            write_container(out, ('[', ']'), items.iter().map(|item| (None, item)), depth);
        }
        Value::Object(map) => {
            write_container(out, ('{', '}'), map.iter().map(|(k, v)| (Some(k), v)), depth);
        }
    }
}

fn write_container<'a>(
    out: &mut String,
    (open, close): (char, char),
    entries: impl ExactSizeIterator<Item = (Option<&'a String>, &'a Value)>,
    depth: usize,
) {
    let len = entries.len();
    out.push_str(&open.to_string().bold().to_string());

    if len > 0 {
        out.push('\n');
        for (i, (key, value)) in entries.enumerate() {
            out.push_str(&INDENT.repeat(depth + 1));
            if let Some(key) = key {
                out.push_str(&Value::from(key.as_str()).to_string().cyan().to_string());
                out.push_str(": ");
            }
            write_value(out, value, depth + 1);
            if i + 1 < len {
                out.push(',');
            }
            out.push('\n');
        }
        out.push_str(&INDENT.repeat(depth));
    }

    out.push_str(&close.to_string().bold().to_string());
}

/// Shortens `text` to at most `max_chars` characters, ending in `…` when
/// anything was cut. Counts characters, not bytes.
#[must_use]
pub fn shorten(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }

    let mut short: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    short.push('…');
    short
}

/// A green check or a red cross.
#[must_use]
pub fn check_mark(value: bool) -> String {
    if value { "✓".green().to_string() } else { "✗".red().to_string() }
}
