//! Splitting one multi-company model reply into per-company emails.
//!
//! Attribution relies only on text cues: a line that names one of the
//! requested companies starts that company's email. Names that contain one
//! another (`"Acme"` and `"Acme Logistics"`) resolve by input order, and a
//! body line that mentions a company name starts a new block.

use prospector_core::BatchEmailResult;

use crate::error::ParseError;

/// How a line can name a company, tried in this order for each name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MatchStrategy {
    ExactLine,
    BracketPrefix,
    Substring,
}

impl MatchStrategy {
    const ORDERED: [Self; 3] = [Self::ExactLine, Self::BracketPrefix, Self::Substring];

    fn matches(self, line: &str, name: &str) -> bool {
        match self {
            Self::ExactLine => line == name,
            Self::BracketPrefix => line
                .strip_prefix('[')
                .is_some_and(|rest| rest.starts_with(name)),
            Self::Substring => line.contains(name),
        }
    }
}

/// The first canonical name (in input order) that `line` refers to.
fn match_entity<'a>(line: &str, names: &[&'a str]) -> Option<&'a str> {
    names.iter().copied().find(|name| {
        let needle = name.trim();
        !needle.is_empty()
            && MatchStrategy::ORDERED
                .iter()
                .any(|strategy| strategy.matches(line, needle))
    })
}

/// Attribute sections of `raw` to the companies in `names`.
///
/// Results appear in reply order and carry the canonical name exactly as
/// passed in. Lines before the first company header, blank lines, and lines
/// starting with `[` that name no company are dropped. Email bodies are
/// trimmed and may be empty.
///
/// # Errors
///
/// [`ParseError::NoEmailsParsed`] when no section could be attributed,
/// including when `names` is empty.
pub fn parse_batch_response(
    raw: &str,
    names: &[&str],
) -> Result<Vec<BatchEmailResult>, ParseError> {
    let mut results = Vec::new();
    let mut current: Option<(&str, String)> = None;

    for line in raw.lines() {
        let trimmed = line.trim();

        if let Some(name) = match_entity(trimmed, names) {
            if let Some((done, body)) = current.take() {
                results.push(finish(done, &body));
            }
            current = Some((name, String::new()));
        } else if let Some((_, body)) = current.as_mut() {
            if !trimmed.is_empty() && !trimmed.starts_with('[') {
                body.push_str(line);
                body.push('\n');
            }
        }
    }

    if let Some((done, body)) = current {
        results.push(finish(done, &body));
    }

    if results.is_empty() {
        return Err(ParseError::NoEmailsParsed);
    }
    Ok(results)
}

fn finish(name: &str, body: &str) -> BatchEmailResult {
    BatchEmailResult {
        company_name: name.to_string(),
        email: body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_EMAILS: &str = "\
[Acme Corp]
Hi Acme team,
Your dispatchers spend hours on check calls.

Best,
Jordan

[Beta Freight]
Hello Beta,
Compliance tracking does not have to be manual.
";

    #[test]
    fn splits_bracketed_sections_into_trimmed_bodies() {
        let emails =
            parse_batch_response(TWO_EMAILS, &["Acme Corp", "Beta Freight"]).expect("parse");
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].company_name, "Acme Corp");
        assert_eq!(
            emails[0].email,
            "Hi Acme team,\nYour dispatchers spend hours on check calls.\nBest,\nJordan"
        );
        assert_eq!(emails[1].company_name, "Beta Freight");
        assert_eq!(
            emails[1].email,
            "Hello Beta,\nCompliance tracking does not have to be manual."
        );
    }

    #[test]
    fn missing_section_yields_fewer_results() {
        let raw = "[Acme Corp]\nHi Acme team,\nShort note.\n";
        let emails = parse_batch_response(raw, &["Acme Corp", "Beta Freight"]).expect("parse");
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].company_name, "Acme Corp");
    }

    #[test]
    fn empty_name_list_is_an_error() {
        let err = parse_batch_response(TWO_EMAILS, &[]).unwrap_err();
        assert!(matches!(err, ParseError::NoEmailsParsed));
    }

    #[test]
    fn reply_without_any_header_is_an_error() {
        let err = parse_batch_response("Here are your emails!", &["Acme Corp"]).unwrap_err();
        assert!(matches!(err, ParseError::NoEmailsParsed));
    }

    #[test]
    fn blank_names_are_ignored_as_delimiters() {
        let raw = "preamble\n[Acme Corp]\nBody line\n";
        let emails = parse_batch_response(raw, &["  ", "Acme Corp"]).expect("parse");
        assert_eq!(emails.len(), 1);
        assert_eq!(emails[0].email, "Body line");
    }

    #[test]
    fn bare_name_line_opens_a_section() {
        let raw = "Acme Corp\nDear team,\nThanks.\n";
        let emails = parse_batch_response(raw, &["Acme Corp"]).expect("parse");
        assert_eq!(emails[0].email, "Dear team,\nThanks.");
    }

    #[test]
    fn bracketed_placeholder_lines_are_dropped() {
        let raw = "[Acme Corp]\n[Email body here]\nReal body\n";
        let emails = parse_batch_response(raw, &["Acme Corp"]).expect("parse");
        assert_eq!(emails[0].email, "Real body");
    }

    #[test]
    fn body_lines_keep_their_indentation_until_trim() {
        let raw = "[Acme Corp]\n  - faster dispatch\n  - fewer calls\n";
        let emails = parse_batch_response(raw, &["Acme Corp"]).expect("parse");
        assert_eq!(emails[0].email, "- faster dispatch\n  - fewer calls");
    }

    #[test]
    fn overlapping_names_resolve_by_input_order() {
        let raw = "[Acme Logistics]\nBody\n";
        let emails = parse_batch_response(raw, &["Acme", "Acme Logistics"]).expect("parse");
        assert_eq!(emails[0].company_name, "Acme");

        let emails = parse_batch_response(raw, &["Acme Logistics", "Acme"]).expect("parse");
        assert_eq!(emails[0].company_name, "Acme Logistics");
    }

    #[test]
    fn name_mentioned_in_body_starts_a_new_section() {
        let raw = "[Acme Corp]\nHi,\nTeams like Beta Freight already automate this.\n";
        let emails = parse_batch_response(raw, &["Acme Corp", "Beta Freight"]).expect("parse");
        assert_eq!(emails.len(), 2);
        assert_eq!(emails[0].email, "Hi,");
        assert_eq!(emails[1].company_name, "Beta Freight");
        assert_eq!(emails[1].email, "");
    }
}
