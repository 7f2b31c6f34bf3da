use std::borrow::Cow;

use sxd_document::dom::ChildOfElement;
use sxd_document::parser;
use sxd_xpath::nodeset::Node;
use sxd_xpath::Value;

use crate::error::{ParseError, XML_VALUE_NOT_FOUND};
use crate::extract::Extractor;

/// Evaluates an XPath expression against an XML document. HTML bodies go
/// through the same XML parser, so they must be well formed.
///
/// A `<!DOCTYPE ...>` declaration is skipped and default `xmlns="..."`
/// declarations are ignored, so unprefixed names like `//title` match XHTML
/// and feed documents.
///
/// When the expression selects nodes, only the first one in document order
/// is used. An element yields its first text child, other nodes yield their
/// string value. Expressions that evaluate to a string, number or boolean
/// return that value as text.
#[derive(Debug, Default, Clone, Copy)]
pub struct XPathExtractor;

impl Extractor for XPathExtractor {
    fn extract(&self, body: &str, selector: &str) -> Result<String, ParseError> {
        let markup = drop_default_namespaces(&drop_doctype(body));
        let package =
            parser::parse(&markup).map_err(|err| ParseError::BodyMalformed(err.to_string()))?;

        if selector.is_empty() {
            return Ok(body.to_string());
        }

        let document = package.as_document();
        let value = sxd_xpath::evaluate_xpath(&document, selector)
            .map_err(|err| ParseError::InvalidSelector(err.to_string()))?;

        match value {
            Value::Nodeset(nodes) => nodes
                .document_order_first()
                .map(node_text)
                .ok_or_else(|| ParseError::SelectorNotFound(XML_VALUE_NOT_FOUND.to_string())),
            scalar => Ok(scalar.string()),
        }
    }
}

fn drop_doctype(body: &str) -> Cow<'_, str> {
    const DOCTYPE: &[u8] = b"<!doctype";
    let Some(start) = body
        .as_bytes()
        .windows(DOCTYPE.len())
        .position(|window| window.eq_ignore_ascii_case(DOCTYPE))
    else {
        return Cow::Borrowed(body);
    };

    // The internal subset in `[...]` may itself contain `>`.
    let mut depth = 0usize;
    for (offset, ch) in body[start..].char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => depth = depth.saturating_sub(1),
            '>' if depth == 0 => {
                let rest = body[start + offset + 1..].trim_start();
                return Cow::Owned(format!("{}{}", &body[..start], rest));
            }
            _ => {}
        }
    }
    // Unterminated; left for the parser to report.
    Cow::Borrowed(body)
}

fn drop_default_namespaces(markup: &str) -> String {
    const XMLNS: &str = "xmlns";
    let mut out = String::with_capacity(markup.len());
    let mut rest = markup;
    let mut in_tag = false;

    while let Some(pos) = rest.find(XMLNS) {
        let (before, candidate) = rest.split_at(pos);
        in_tag = before.chars().fold(in_tag, |inside, ch| match ch {
            '<' => true,
            '>' => false,
            _ => inside,
        });
        let is_attribute = in_tag && before.ends_with(|ch: char| ch.is_ascii_whitespace());

        match default_namespace_len(candidate).filter(|_| is_attribute) {
            Some(len) => {
                out.push_str(before.trim_end());
                rest = &candidate[len..];
            }
            None => {
                out.push_str(before);
                out.push_str(XMLNS);
                rest = &candidate[XMLNS.len()..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Length of a leading `xmlns = "..."` attribute in `attr`, if it is one.
fn default_namespace_len(attr: &str) -> Option<usize> {
    let value = attr
        .strip_prefix("xmlns")?
        .trim_start()
        .strip_prefix('=')?
        .trim_start();
    let quote = value.chars().next().filter(|ch| *ch == '"' || *ch == '\'')?;
    let close = value[1..].find(quote)?;
    Some(attr.len() - value.len() + close + 2)
}

fn node_text(node: Node<'_>) -> String {
    match node {
        Node::Element(element) => element
            .children()
            .into_iter()
            .find_map(|child| match child {
                ChildOfElement::Text(text) => Some(text.text().to_string()),
                _ => None,
            })
            .unwrap_or_default(),
        Node::Root(_) => String::new(),
        other => other.string_value(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn doctype_with_internal_subset_is_removed() {
        let body = "<!DOCTYPE note [<!ENTITY x \"y\">]>\n<note/>";
        assert_eq!(drop_doctype(body), "<note/>");
        assert_eq!(drop_doctype("<a/>"), "<a/>");
    }

    #[test]
    fn only_default_namespace_attributes_are_dropped() {
        let markup = r#"<feed xmlns="urn:a" xmlns:m="urn:m"><p>xmlns="kept"</p></feed>"#;
        assert_eq!(
            drop_default_namespaces(markup),
            r#"<feed xmlns:m="urn:m"><p>xmlns="kept"</p></feed>"#
        );
    }

    #[test]
    fn element_text_is_its_first_text_child_only() {
        let body = "<root><p>lead<b>bold</b>tail</p></root>";
        assert_eq!(XPathExtractor.extract(body, "//p").unwrap(), "lead");
    }

    #[test]
    fn attribute_selection_returns_value() {
        let body = r#"<root><item id="7">A</item></root>"#;
        assert_eq!(XPathExtractor.extract(body, "//item/@id").unwrap(), "7");
    }

    #[test]
    fn scalar_expression_returns_its_text() {
        let body = "<root><item>A</item><item>B</item></root>";
        assert_eq!(XPathExtractor.extract(body, "count(//item)").unwrap(), "2");
    }
}
