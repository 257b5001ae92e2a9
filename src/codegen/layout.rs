//! Re-indents flat SQF text by counting braces.
//!
//! The pass is textual only. It does not know about string literals, so a
//! `{`, `}` or `;` inside a quoted string shifts the indentation of the lines
//! that follow it. The code itself is never changed, only whitespace.

/// One level of indentation.
pub const INDENT: &str = "    ";

/// Nesting depth for a single formatting call.
///
/// Unbalanced input can push the counter below zero; such lines are simply
/// emitted without indentation.
#[derive(Debug, Default)]
struct Indenter {
    depth: isize,
}

impl Indenter {
    fn place(&mut self, line: &str) -> String {
        let opens = line.contains('{');
        let closes = line.contains('}');
        match (opens, closes) {
            (true, true) => pad(self.depth - 1, line),
            (true, false) => {
                let placed = pad(self.depth, line);
                self.depth += 1;
                placed
            }
            (false, true) => {
                self.depth -= 1;
                pad(self.depth, line)
            }
            (false, false) => pad(self.depth, line),
        }
    }
}

fn pad(depth: isize, line: &str) -> String {
    let levels = usize::try_from(depth).unwrap_or(0);
    format!("{}{}", INDENT.repeat(levels), line)
}

/// Breaks flat text into lines after `{` and `;` and before `}`, then
/// indents each line by its brace depth.
pub fn indent(flat: &str) -> String {
    let expanded = flat
        .replace('{', "{\n")
        .replace('}', "\n}")
        .replace(';', ";\n")
        .replace("\n\n", "\n");

    let mut indenter = Indenter::default();
    expanded
        .lines()
        .map(|line| indenter.place(line))
        .collect::<Vec<_>>()
        .join("\n")
}
