//! Line and header tokenizers

/// Classification of a physical line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Anything non-empty, including whitespace-only lines
    Content,
    /// Empty after removing the line terminator
    Blank,
    /// Synthetic token after the last line
    EndOfInput,
}

/// One line of a commit message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineToken<'a> {
    /// Line classification
    pub kind: LineKind,
    /// Line text without its terminator (empty for blank and end of input)
    pub text: &'a str,
    /// 1-based line number
    pub line_number: usize,
}

impl<'a> LineToken<'a> {
    /// Check if this is the end-of-input token
    pub fn is_end(&self) -> bool {
        self.kind == LineKind::EndOfInput
    }
}

/// Lazily splits text into [`LineToken`]s.
///
/// Lines end at `\n` or `\r\n`. The last token is always
/// [`LineKind::EndOfInput`], numbered one past the final line; an empty
/// input yields only that token, at line 1.
#[derive(Debug, Clone)]
pub struct LineTokenizer<'a> {
    rest: &'a str,
    line_number: usize,
    finished: bool,
}

impl<'a> LineTokenizer<'a> {
    /// Create a tokenizer over `text`
    pub fn new(text: &'a str) -> Self {
        Self {
            rest: text,
            line_number: 1,
            finished: false,
        }
    }
}

impl<'a> Iterator for LineTokenizer<'a> {
    type Item = LineToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let line_number = self.line_number;
        self.line_number += 1;

        if self.rest.is_empty() {
            self.finished = true;
            return Some(LineToken {
                kind: LineKind::EndOfInput,
                text: "",
                line_number,
            });
        }

        let (line, rest) = match self.rest.find('\n') {
            Some(end) => (&self.rest[..end], &self.rest[end + 1..]),
            None => (self.rest, ""),
        };
        self.rest = rest;

        let text = line.strip_suffix('\r').unwrap_or(line);
        let kind = if text.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Content
        };

        Some(LineToken {
            kind,
            text,
            line_number,
        })
    }
}

/// Classification of a header token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderTokenKind {
    /// Run of characters that are not delimiters or whitespace
    String,
    /// `(`
    OpenParen,
    /// `)`
    CloseParen,
    /// `:`
    Colon,
    /// `!`
    Bang,
    /// A single whitespace character
    Whitespace,
    /// Synthetic token after the last character
    LineEnd,
}

/// A token of the header line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderToken<'a> {
    /// Token classification
    pub kind: HeaderTokenKind,
    /// Token text
    pub value: &'a str,
    /// Byte offset into the line
    pub offset: usize,
    /// 1-based column, counted in characters
    pub column: usize,
}

fn classify(c: char) -> HeaderTokenKind {
    match c {
        '(' => HeaderTokenKind::OpenParen,
        ')' => HeaderTokenKind::CloseParen,
        ':' => HeaderTokenKind::Colon,
        '!' => HeaderTokenKind::Bang,
        c if c.is_whitespace() => HeaderTokenKind::Whitespace,
        _ => HeaderTokenKind::String,
    }
}

/// Split the header line into tokens, ending with [`HeaderTokenKind::LineEnd`]
pub fn tokenize_header(line: &str) -> Vec<HeaderToken<'_>> {
    let mut tokens = Vec::new();
    let mut chars = line.char_indices().peekable();
    let mut column = 1;

    while let Some((start, c)) = chars.next() {
        let kind = classify(c);
        let mut end = start + c.len_utf8();
        let mut width = 1;

        if kind == HeaderTokenKind::String {
            while let Some(&(index, next)) = chars.peek() {
                if classify(next) != HeaderTokenKind::String {
                    break;
                }
                end = index + next.len_utf8();
                width += 1;
                chars.next();
            }
        }

        tokens.push(HeaderToken {
            kind,
            value: &line[start..end],
            offset: start,
            column,
        });
        column += width;
    }

    tokens.push(HeaderToken {
        kind: HeaderTokenKind::LineEnd,
        value: "",
        offset: line.len(),
        column,
    });
    tokens
}
