// output.rs: flat key → description listings.
//
// Renders the two-column blocks used by help:
//
//   Options:
//     -b, --base[=string]    Specify working base path
//         --config=<string>  Specify config path
//
// Keys are padded to the widest key; descriptions are word-wrapped so that
// key column + description fit in `RENDER_WIDTH`.

use std::fmt::Write as _;

use crate::config::RENDER_WIDTH;

const INDENT: &str = "  ";
const GUTTER: &str = "    ";

/// Splits `text` on whitespace into rows no wider than `RENDER_WIDTH - offset`.
///
/// A single word longer than the budget gets a row of its own.
pub fn split_words(offset: usize, text: &str) -> Vec<String> {
    let budget = RENDER_WIDTH.saturating_sub(offset).max(1);
    let mut rows = Vec::new();
    let mut row = String::new();

    for word in text.split_whitespace() {
        if !row.is_empty() && row.len() + 1 + word.len() > budget {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(word);
    }
    if !row.is_empty() {
        rows.push(row);
    }
    rows
}

/// Renders a titled listing. Rows are printed in the order given; an empty
/// listing renders as an empty string.
pub fn render_listing(title: &str, rows: &[(String, String)]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let width = rows.iter().map(|(k, _)| k.chars().count()).max().unwrap_or(0);
    let holder = " ".repeat(width);

    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "{title}:");
    for (key, description) in rows {
        let lines = split_words(width, description);
        if lines.is_empty() {
            let _ = writeln!(out, "{INDENT}{key}");
            continue;
        }
        for (i, line) in lines.iter().enumerate() {
            if i == 0 {
                let _ = writeln!(out, "{INDENT}{key:<width$}{GUTTER}{line}");
            } else {
                let _ = writeln!(out, "{INDENT}{holder}{GUTTER}{line}");
            }
        }
    }
    out
}
