//! Header grammar: `type["(" scope ")"]["!"]": " description`

use super::error::ParseError;
use super::tokenizer::{tokenize_header, HeaderToken, HeaderTokenKind, LineKind, LineToken};
use super::types::{CommitHeader, CommitType};

struct HeaderParser<'a> {
    tokens: Vec<HeaderToken<'a>>,
    position: usize,
    line_number: usize,
}

impl<'a> HeaderParser<'a> {
    /// Take the next token. Keeps returning `LineEnd` once the line is consumed.
    fn next(&mut self) -> HeaderToken<'a> {
        let index = self.position.min(self.tokens.len().saturating_sub(1));
        self.position += 1;
        self.tokens.get(index).copied().unwrap_or(HeaderToken {
            kind: HeaderTokenKind::LineEnd,
            value: "",
            offset: 0,
            column: 1,
        })
    }

    fn error(&self, token: &HeaderToken<'_>, message: &str) -> ParseError {
        ParseError::new(self.line_number, token.column, message)
    }
}

/// Parse the first line of a commit message
pub(crate) fn parse_header(line: &LineToken<'_>) -> Result<CommitHeader, ParseError> {
    match line.kind {
        LineKind::EndOfInput => {
            return Err(ParseError::new(line.line_number, 1, "commit message is empty"));
        }
        LineKind::Blank => {
            return Err(ParseError::new(
                line.line_number,
                1,
                "expected commit header, found blank line",
            ));
        }
        LineKind::Content => {}
    }

    let mut parser = HeaderParser {
        tokens: tokenize_header(line.text),
        position: 0,
        line_number: line.line_number,
    };

    let commit_type = parser.next();
    if commit_type.kind != HeaderTokenKind::String {
        return Err(parser.error(&commit_type, "expected commit type"));
    }

    let mut scope = None;
    let mut token = parser.next();
    if token.kind == HeaderTokenKind::OpenParen {
        let value = parser.next();
        match value.kind {
            HeaderTokenKind::String => {}
            HeaderTokenKind::CloseParen => return Err(parser.error(&value, "scope must not be empty")),
            _ => return Err(parser.error(&value, "expected scope")),
        }

        let close = parser.next();
        if close.kind != HeaderTokenKind::CloseParen {
            return Err(parser.error(&close, "expected ')' after scope"));
        }

        scope = Some(value.value.to_string());
        token = parser.next();
    }

    let is_breaking_change = token.kind == HeaderTokenKind::Bang;
    if is_breaking_change {
        token = parser.next();
    }

    if token.kind != HeaderTokenKind::Colon {
        return Err(parser.error(&token, "expected ':' after commit type"));
    }
    let colon = token;

    let space = parser.next();
    match space.kind {
        HeaderTokenKind::LineEnd => return Err(parser.error(&colon, "expected space after ':'")),
        HeaderTokenKind::Whitespace if space.value == " " => {}
        _ => return Err(parser.error(&space, "expected a single space after ':'")),
    }

    let description = &line.text[space.offset + space.value.len()..];
    if description.trim().is_empty() {
        return Err(ParseError::new(
            line.line_number,
            space.column + 1,
            "description must not be empty",
        ));
    }

    Ok(CommitHeader {
        commit_type: CommitType::new(commit_type.value),
        scope,
        description: description.to_string(),
        is_breaking_change,
    })
}
