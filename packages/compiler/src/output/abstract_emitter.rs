//! Abstract Emitter Module
//!
//! Line buffer and identifier escaping shared by source emitters.

use once_cell::sync::Lazy;
use regex::Regex;

const INDENT_WITH: &str = "  ";

static LEGAL_IDENTIFIER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z_][0-9A-Za-z_]*$").unwrap());

/// Kotlin hard keywords; using one as a name requires backticks.
const HARD_KEYWORDS: &[&str] = &[
    "as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
    "interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
    "try", "typealias", "typeof", "val", "var", "when", "while",
];

#[derive(Debug, Clone)]
struct EmittedLine {
    parts: Vec<String>,
    indent: usize,
}

impl EmittedLine {
    fn new(indent: usize) -> Self {
        EmittedLine {
            parts: Vec::new(),
            indent,
        }
    }
}

pub struct EmitterVisitorContext {
    lines: Vec<EmittedLine>,
    indent: usize,
}

impl EmitterVisitorContext {
    pub fn create_root() -> Self {
        EmitterVisitorContext::new(0)
    }

    pub fn new(indent: usize) -> Self {
        EmitterVisitorContext {
            lines: vec![EmittedLine::new(indent)],
            indent,
        }
    }

    pub fn println(&mut self, last_part: &str) {
        self.print(last_part, true);
    }

    pub fn print(&mut self, part: &str, new_line: bool) {
        if !part.is_empty() {
            if let Some(current) = self.lines.last_mut() {
                current.parts.push(part.to_string());
            }
        }
        if new_line {
            self.lines.push(EmittedLine::new(self.indent));
        }
    }

    pub fn inc_indent(&mut self) {
        self.indent += 1;
        self.reindent_current_line();
    }

    pub fn dec_indent(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.reindent_current_line();
    }

    fn reindent_current_line(&mut self) {
        let indent = self.indent;
        if let Some(current) = self.lines.last_mut() {
            if current.parts.is_empty() {
                current.indent = indent;
            }
        }
    }

    pub fn to_source(&self) -> String {
        self.lines
            .iter()
            .map(|l| {
                if !l.parts.is_empty() {
                    format!("{}{}", create_indent(l.indent), l.parts.join(""))
                } else {
                    String::new()
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn create_indent(count: usize) -> String {
    INDENT_WITH.repeat(count)
}

/// Escape identifier for safe use in generated code
pub fn escape_identifier(input: &str) -> String {
    if LEGAL_IDENTIFIER_RE.is_match(input) && !HARD_KEYWORDS.contains(&input) {
        input.to_string()
    } else {
        format!("`{}`", input)
    }
}
