pub mod tokens;

use crate::error::ScriptError;

pub const COMMENT_MARKER: &str = "//";

/// True for lines that take no part in execution: empty after trimming, or
/// starting with `//`.
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with(COMMENT_MARKER)
}

/// The statement sequence of one script.
///
/// Every source line is kept, blank and comment lines included, so that
/// indices stay stable for loop-body capture and branch lookahead. Lines
/// are stored trimmed.
#[derive(Debug, Clone, Default)]
pub struct Script {
    lines: Vec<String>,
}

/// One captured statement of a loop body, with its index in the script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BodyLine {
    pub index: usize,
    pub text: String,
}

/// Statements captured between a `While` header and its closing brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopBody {
    pub statements: Vec<BodyLine>,
    /// Index of the closing brace line, or the script length when the body
    /// was never closed.
    pub end: usize,
    pub closed: bool,
}

impl Script {
    pub fn new(source: &str) -> Self {
        Self {
            lines: source.lines().map(|l| l.trim().to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &str)> {
        self.lines.iter().enumerate().map(|(i, l)| (i, l.as_str()))
    }

    /// First executable line at or after `from`.
    pub fn next_statement(&self, from: usize) -> Option<(usize, &str)> {
        self.iter()
            .skip(from)
            .find(|(_, line)| !is_blank_or_comment(line))
    }

    /// Capture the brace-delimited body that follows the header at `header`.
    ///
    /// The opening brace sits either on the header line itself or alone on
    /// the very next line. Nesting is tracked with a plain counter over `{`
    /// and `}` characters; lines that are only a brace, blank lines and
    /// comments are not part of the body.
    pub fn capture_body(&self, header: usize) -> Result<LoopBody, ScriptError> {
        let header_line = self
            .line(header)
            .ok_or_else(|| ScriptError::malformed(format!("no line {}", header + 1)))?;

        let mut current = header + 1;
        if !header_line.contains('{') {
            match self.line(current) {
                Some("{") => current += 1,
                _ => {
                    return Err(ScriptError::malformed(
                        "expected '{' after While condition",
                    ))
                }
            }
        }

        let mut depth: usize = 1;
        let mut statements = Vec::new();
        while let Some(line) = self.line(current) {
            if line.contains('{') {
                depth += 1;
            }
            if line.contains('}') {
                depth -= 1;
            }
            if depth == 0 {
                return Ok(LoopBody {
                    statements,
                    end: current,
                    closed: true,
                });
            }
            if line != "{" && line != "}" && !is_blank_or_comment(line) {
                statements.push(BodyLine {
                    index: current,
                    text: line.to_string(),
                });
            }
            current += 1;
        }

        Ok(LoopBody {
            statements,
            end: self.len(),
            closed: false,
        })
    }
}
