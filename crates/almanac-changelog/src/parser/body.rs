//! Body and footer grammar

use std::sync::LazyLock;

use almanac_core::ParserMode;
use regex::Regex;

use super::error::ParseError;
use super::tokenizer::{LineKind, LineToken};
use super::types::Footer;

/// A line that starts like a footer
static FOOTER_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:BREAKING CHANGE|[\w-]+)(?:: | #)").expect("Invalid regex"));

/// A complete footer line
static FOOTER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<name>BREAKING CHANGE|[\w-]+)(?P<separator>: | #)(?P<value>.*)$")
        .expect("Invalid regex")
});

static FOOTER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:BREAKING CHANGE|[\w-]+)").expect("Invalid regex"));

struct Cursor<'t, 'a> {
    lines: &'t [LineToken<'a>],
    position: usize,
    mode: ParserMode,
}

impl<'t, 'a> Cursor<'t, 'a> {
    fn peek(&self) -> LineToken<'a> {
        self.lines
            .get(self.position)
            .or_else(|| self.lines.last())
            .copied()
            .unwrap_or(LineToken {
                kind: LineKind::EndOfInput,
                text: "",
                line_number: 1,
            })
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    /// Blank lines; in loose mode whitespace-only lines count too
    fn is_blank(&self, line: &LineToken<'_>) -> bool {
        match line.kind {
            LineKind::Blank => true,
            LineKind::Content => !self.mode.is_strict() && line.text.trim().is_empty(),
            LineKind::EndOfInput => false,
        }
    }

    /// Consume the blank separator under the cursor.
    ///
    /// Returns `false` when only trailing blank lines were left, which loose
    /// mode accepts. Strict mode requires exactly one blank line followed by
    /// content.
    fn skip_separator(&mut self) -> Result<bool, ParseError> {
        self.advance();

        if self.mode.is_strict() {
            let next = self.peek();
            return match next.kind {
                LineKind::Blank => Err(ParseError::new(next.line_number, 1, "unexpected blank line")),
                LineKind::EndOfInput => Err(ParseError::new(
                    next.line_number,
                    1,
                    "unexpected end of input after blank line",
                )),
                LineKind::Content => Ok(true),
            };
        }

        while self.is_blank(&self.peek()) {
            self.advance();
        }
        Ok(!self.peek().is_end())
    }

    /// Consume consecutive content lines
    fn take_paragraph(&mut self) -> Vec<LineToken<'a>> {
        let mut paragraph = Vec::new();
        loop {
            let line = self.peek();
            if line.kind != LineKind::Content || self.is_blank(&line) {
                return paragraph;
            }
            paragraph.push(line);
            self.advance();
        }
    }
}

/// Parse everything after the header into body paragraphs and footers.
///
/// `lines` starts right after the header and ends with the end-of-input
/// token. The first paragraph whose lines all look like footers starts the
/// footer block; every line after that must be a footer.
pub(crate) fn parse_body(
    lines: &[LineToken<'_>],
    mode: ParserMode,
) -> Result<(Vec<String>, Vec<Footer>), ParseError> {
    let mut cursor = Cursor {
        lines,
        position: 0,
        mode,
    };
    let mut body = Vec::new();
    let mut footers = Vec::new();
    let mut in_footers = false;

    let first = cursor.peek();
    if first.is_end() {
        return Ok((body, footers));
    }
    if !cursor.is_blank(&first) {
        return Err(ParseError::new(
            first.line_number,
            1,
            "expected blank line after header",
        ));
    }
    if !cursor.skip_separator()? {
        return Ok((body, footers));
    }

    loop {
        let paragraph = cursor.take_paragraph();

        if !in_footers && paragraph.iter().all(|line| FOOTER_PREFIX.is_match(line.text)) {
            in_footers = true;
        }

        if in_footers {
            for line in &paragraph {
                footers.push(parse_footer(line)?);
            }
        } else {
            let text: Vec<&str> = paragraph.iter().map(|line| line.text).collect();
            body.push(text.join("\n"));
        }

        if cursor.peek().is_end() || !cursor.skip_separator()? {
            return Ok((body, footers));
        }
    }
}

fn parse_footer(line: &LineToken<'_>) -> Result<Footer, ParseError> {
    let Some(captures) = FOOTER.captures(line.text) else {
        return Err(footer_error(line));
    };

    let name = &captures["name"];
    let separator = &captures["separator"];
    let value = &captures["value"];

    if value.trim().is_empty() {
        return Err(ParseError::new(
            line.line_number,
            name.chars().count() + separator.chars().count() + 1,
            "footer value must not be empty",
        ));
    }

    let value = if separator == " #" {
        format!("#{}", value)
    } else {
        value.to_string()
    };

    Ok(Footer::new(name, value))
}

/// Position the error on the first character that breaks the footer shape
fn footer_error(line: &LineToken<'_>) -> ParseError {
    let Some(name) = FOOTER_NAME.find(line.text) else {
        return ParseError::new(line.line_number, 1, "expected footer name");
    };

    let name_length = name.as_str().chars().count();
    let column = match line.text[name.end()..].chars().next() {
        Some(':') | Some(' ') => name_length + 2,
        _ => name_length + 1,
    };
    ParseError::new(line.line_number, column, "expected footer separator ': ' or ' #'")
}
