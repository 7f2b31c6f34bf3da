use regress::Regex;

use crate::error::ParseError;
use crate::extract::Extractor;

/// Searches the body for the first match of an ECMAScript regular expression.
///
/// Returns capture group 1 when the pattern has groups, otherwise the whole
/// match.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegexExtractor;

impl Extractor for RegexExtractor {
    fn extract(&self, body: &str, selector: &str) -> Result<String, ParseError> {
        if selector.is_empty() {
            return Ok(body.to_string());
        }

        let regex =
            Regex::new(selector).map_err(|err| ParseError::InvalidSelector(err.to_string()))?;
        let found = regex.find(body).ok_or(ParseError::NoRegexMatch)?;

        let range = if found.captures.is_empty() {
            found.group(0)
        } else {
            // A group that did not take part in the match reads as empty.
            found.group(1)
        };
        Ok(range.map_or("", |range| &body[range]).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_group_that_did_not_match_is_empty() {
        assert_eq!(RegexExtractor.extract("value=", "value=(\\d+)?").unwrap(), "");
    }

    #[test]
    fn later_groups_are_ignored() {
        assert_eq!(
            RegexExtractor.extract("k=v", "(\\w)=(\\w)").unwrap(),
            "k"
        );
    }

    #[test]
    fn back_reference_matches_repeated_text() {
        assert_eq!(RegexExtractor.extract("ab aa bb", r"(\w)\1").unwrap(), "a");
    }

    #[test]
    fn look_ahead_is_not_part_of_the_match() {
        assert_eq!(
            RegexExtractor.extract("price 42USD", r"\d+(?=USD)").unwrap(),
            "42"
        );
        assert_eq!(
            RegexExtractor.extract("price 42USD", r"(\d+)(?=USD)").unwrap(),
            "42"
        );
    }

    #[test]
    fn digit_class_is_ascii_only() {
        assert_eq!(
            RegexExtractor.extract("n=\u{664}\u{662}", r"n=(\d+)"),
            Err(ParseError::NoRegexMatch)
        );
    }
}
