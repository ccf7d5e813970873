//! Conventional Commits message parser
//!
//! Parsing runs in two stages: the text is split into line tokens, then the
//! header grammar consumes line 1 and the body grammar the rest. Failures
//! carry the exact 1-based line and column of the first unexpected input.

mod body;
mod error;
mod header;
pub mod tokenizer;
mod types;

pub use error::ParseError;
pub use types::{CommitHeader, CommitType, Footer, FooterName, ParsedCommitMessage};

use almanac_core::ParserMode;
use tracing::debug;

use tokenizer::{LineToken, LineTokenizer};

/// Parse a commit message.
///
/// `mode` accepts a [`ParserMode`] or a `bool` (`true` = strict). An empty
/// message always fails at line 1, column 1.
pub fn parse(text: &str, mode: impl Into<ParserMode>) -> Result<ParsedCommitMessage, ParseError> {
    let mode = mode.into();
    let lines: Vec<LineToken<'_>> = LineTokenizer::new(text).collect();
    let Some((first, rest)) = lines.split_first() else {
        return Err(ParseError::new(1, 1, "commit message is empty"));
    };

    let header = header::parse_header(first)?;
    let (body, footers) = body::parse_body(rest, mode)?;

    debug!(
        commit_type = %header.commit_type,
        paragraphs = body.len(),
        footers = footers.len(),
        %mode,
        "parsed commit message"
    );

    Ok(ParsedCommitMessage {
        header,
        body,
        footers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn error_at(text: &str, mode: ParserMode) -> (usize, usize) {
        parse(text, mode).unwrap_err().position()
    }

    #[test]
    fn test_simple_header_in_both_modes() {
        for mode in [ParserMode::Strict, ParserMode::Loose] {
            let message = parse("docs: fix typo", mode).unwrap();
            assert_eq!(message.header.commit_type, "docs");
            assert_eq!(message.header.description, "fix typo");
            assert!(message.body.is_empty());
            assert!(message.footers.is_empty());
        }
    }

    #[test]
    fn test_footer_scenario() {
        let message = parse("feat: Add widget\n\nCloses #12\n", true).unwrap();
        assert_eq!(message.header.commit_type, "feat");
        assert_eq!(message.header.description, "Add widget");
        assert!(message.body.is_empty());
        assert_eq!(message.footers, vec![Footer::new("Closes", "#12")]);
    }

    #[test]
    fn test_empty_input_fails_at_origin() {
        assert_eq!(error_at("", ParserMode::Strict), (1, 1));
        assert_eq!(error_at("", ParserMode::Loose), (1, 1));
    }

    #[test]
    fn test_body_paragraphs_round_trip() {
        let message = parse("type: d\n\nL1\nL2\n\nL3\n", ParserMode::Strict).unwrap();
        assert_eq!(message.body, vec!["L1\nL2", "L3"]);
        assert!(message.footers.is_empty());
    }

    #[test]
    fn test_display_parses_back() {
        let text = "fix(io)!: handle short reads\n\nReads could stop early.\nNow they loop.\n\nRefs #7\nBREAKING CHANGE: read() returns usize";
        let message = parse(text, ParserMode::Strict).unwrap();
        let reparsed = parse(&message.to_string(), ParserMode::Strict).unwrap();
        assert_eq!(reparsed, message);
        assert!(message.is_breaking_change());
        assert_eq!(message.breaking_change_descriptions(), vec!["read() returns usize"]);
    }

    #[test]
    fn test_gaps_between_sections() {
        let text = "feat: x\n\n\nbody\n\n\nCloses #1\n\n\n";
        assert_eq!(error_at(text, ParserMode::Strict), (3, 1));

        let message = parse(text, ParserMode::Loose).unwrap();
        assert_eq!(message.body, vec!["body"]);
        assert_eq!(message.footers, vec![Footer::new("Closes", "#1")]);
    }

    #[test]
    fn test_gaps_around_footers() {
        assert_eq!(error_at("feat: x\n\nbody\n\n\nCloses #1", ParserMode::Strict), (5, 1));
        assert_eq!(error_at("feat: x\n\nCloses #1\n\n\nRefs: 2", ParserMode::Strict), (5, 1));

        let message = parse("feat: x\n\nCloses #1\n\n \n\nRefs: 2\n\n", ParserMode::Loose).unwrap();
        assert!(message.body.is_empty());
        assert_eq!(
            message.footers,
            vec![Footer::new("Closes", "#1"), Footer::new("Refs", "2")]
        );
    }

    #[test]
    fn test_crlf_message() {
        let message = parse("fix: a\r\n\r\nbody\r\n\r\nRefs: 3\r\n", ParserMode::Strict).unwrap();
        assert_eq!(message.body, vec!["body"]);
        assert_eq!(message.footers, vec![Footer::new("Refs", "3")]);
    }

    #[test]
    fn test_header_errors_are_on_line_one() {
        let err = parse("feat(scope: x", ParserMode::Loose).unwrap_err();
        assert_eq!(err.position(), (1, 11));
        assert!(err.to_string().contains("(line 1, column 11)"));
    }

    #[test]
    fn test_blank_first_line() {
        assert_eq!(error_at("\nfeat: x", ParserMode::Loose), (1, 1));
    }

    #[test]
    fn test_case_of_type_is_kept() {
        let message = parse("FEAT: shout", ParserMode::Strict).unwrap();
        assert_eq!(message.header.commit_type.as_str(), "FEAT");
        assert_eq!(message.header.commit_type, CommitType::new("feat"));
    }
}
