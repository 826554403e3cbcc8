//! Checks that keep document content from reaching outside the request.
//!
//! Every document handed to an engine must be well-formed XML in the encoding
//! it declares. Internal DTD subsets are fine; anything that names an external
//! resource (an external DTD subset, a `SYSTEM`/`PUBLIC` entity) is refused.
//! Stylesheets additionally may not pull in other stylesheets
//! (`xsl:import`, `xsl:include`) or load documents through `document()`,
//! except `document('')`, which reads the stylesheet itself.

use super::EngineError;
use encoding_rs::{Encoding, UTF_8, UTF_16BE, UTF_16LE};
use quick_xml::Reader;
use quick_xml::events::Event;
use roxmltree::{Document, ParsingOptions};
use std::borrow::Cow;

pub const XSLT_NAMESPACE: &str = "http://www.w3.org/1999/XSL/Transform";

/// Verifies a plain XML document (render input or intermediate XSL-FO).
pub fn check_document(label: &str, bytes: &[u8]) -> Result<(), EngineError> {
    let text = decode(label, bytes)?;
    parse(label, &text)?;
    Ok(())
}

/// Verifies a stylesheet is well-formed and self-contained.
pub fn check_stylesheet(bytes: &[u8]) -> Result<(), EngineError> {
    let label = "stylesheet";
    let text = decode(label, bytes)?;
    let doc = parse(label, &text)?;

    for node in doc.descendants().filter(|n| n.is_element()) {
        let tag = node.tag_name();
        if tag.namespace() == Some(XSLT_NAMESPACE) && matches!(tag.name(), "import" | "include") {
            return Err(EngineError::Hardening(format!(
                "xsl:{} is not permitted (line {})",
                tag.name(),
                doc.text_pos_at(node.range().start).row
            )));
        }

        if let Some(attr) = node
            .attributes()
            .find(|attr| loads_external_document(attr.value()))
        {
            return Err(EngineError::Hardening(format!(
                "document() may only load the stylesheet itself (attribute '{}' on line {})",
                attr.name(),
                doc.text_pos_at(node.range().start).row
            )));
        }
    }

    Ok(())
}

/// Decodes `bytes` using the byte order mark or the encoding named in the
/// XML declaration, defaulting to UTF-8.
fn decode<'a>(label: &str, bytes: &'a [u8]) -> Result<Cow<'a, str>, EngineError> {
    let (encoding, body) = match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) => (encoding, &bytes[bom_len..]),
        None => (sniff_encoding(label, bytes)?, bytes),
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .ok_or_else(|| {
            EngineError::Malformed(format!("{label} is not valid {}", encoding.name()))
        })?;

    if encoding == UTF_8 {
        Ok(text)
    } else {
        Ok(Cow::Owned(blank_declaration(&text)))
    }
}

fn sniff_encoding(label: &str, bytes: &[u8]) -> Result<&'static Encoding, EngineError> {
    match bytes {
        [0x3c, 0x00, 0x3f, 0x00, ..] => return Ok(UTF_16LE),
        [0x00, 0x3c, 0x00, 0x3f, ..] => return Ok(UTF_16BE),
        _ => {}
    }

    let Some(name) = declared_encoding(bytes) else {
        return Ok(UTF_8);
    };

    match Encoding::for_label(name.trim().as_bytes()) {
        // A declaration that reads as ASCII is not really UTF-16.
        Some(encoding) if encoding == UTF_16LE || encoding == UTF_16BE => Ok(UTF_8),
        Some(encoding) => Ok(encoding),
        None => Err(EngineError::Malformed(format!(
            "{label} declares unsupported encoding '{name}'"
        ))),
    }
}

/// The `encoding` pseudo-attribute of the XML declaration, if there is one.
fn declared_encoding(bytes: &[u8]) -> Option<String> {
    let mut reader = Reader::from_reader(bytes);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => match decl.encoding()? {
            Ok(name) => Some(String::from_utf8_lossy(&name).into_owned()),
            Err(_) => None,
        },
        _ => None,
    }
}

/// Replaces the XML declaration with spaces once the text has been decoded,
/// since the encoding it names no longer describes the text.
fn blank_declaration(text: &str) -> String {
    let end = text
        .strip_prefix("<?xml")
        .filter(|rest| rest.starts_with(|c: char| c.is_ascii_whitespace()))
        .and_then(|rest| rest.find("?>"))
        .map(|end| "<?xml".len() + end + "?>".len());

    match end {
        Some(end) => format!("{}{}", " ".repeat(end), &text[end..]),
        None => text.to_string(),
    }
}

fn parse<'a>(label: &str, text: &'a str) -> Result<Document<'a>, EngineError> {
    if text.trim().is_empty() {
        return Err(EngineError::Malformed(format!("{label} is empty")));
    }

    if let Some(what) = doctype(text).and_then(|markup| external_reference(&markup)) {
        return Err(EngineError::Hardening(format!("{label} declares {what}")));
    }

    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    Document::parse_with_options(text, options)
        .map_err(|e| EngineError::Malformed(format!("{label} is not well-formed: {e}")))
}

/// The document type declaration in the prolog, with quoted literals and
/// comments blanked out so that only markup keywords remain.
fn doctype(text: &str) -> Option<String> {
    let mut rest = text;
    loop {
        rest = rest.trim_start();
        if let Some(after) = rest.strip_prefix("<?") {
            rest = &after[after.find("?>")? + 2..];
        } else if let Some(after) = rest.strip_prefix("<!--") {
            rest = &after[after.find("-->")? + 3..];
        } else {
            return rest.strip_prefix("<!DOCTYPE").map(doctype_markup);
        }
    }
}

fn doctype_markup(body: &str) -> String {
    let mut markup = String::new();
    let mut rest = body;
    let mut in_subset = false;

    while let Some(c) = rest.chars().next() {
        if let Some(after) = rest.strip_prefix("<!--") {
            rest = after.find("-->").map_or("", |end| &after[end + 3..]);
            markup.push(' ');
            continue;
        }

        rest = &rest[c.len_utf8()..];
        match c {
            '"' | '\'' => {
                rest = rest.find(c).map_or("", |end| &rest[end + 1..]);
                markup.push(' ');
            }
            '>' if !in_subset => break,
            _ => {
                match c {
                    '[' => in_subset = true,
                    ']' => in_subset = false,
                    _ => {}
                }
                markup.push(c);
            }
        }
    }

    markup
}

fn external_reference(markup: &str) -> Option<&'static str> {
    let (external_id, subset) = markup.split_once('[').unwrap_or((markup, ""));
    if has_external_id(external_id) {
        return Some("an external DTD subset");
    }

    subset
        .split("<!")
        .filter(|decl| decl.starts_with("ENTITY"))
        .any(has_external_id)
        .then_some("an external entity")
}

fn has_external_id(markup: &str) -> bool {
    markup
        .split(|c: char| c.is_whitespace() || matches!(c, '<' | '>' | '[' | ']'))
        .any(|word| matches!(word, "SYSTEM" | "PUBLIC"))
}

/// True when an XPath expression (or attribute value template) calls
/// `document()` with anything but the empty string literal.
fn loads_external_document(expr: &str) -> bool {
    const NAME: &str = "document";

    expr.match_indices(NAME).any(|(idx, _)| {
        let standalone = expr[..idx]
            .chars()
            .next_back()
            .is_none_or(|c| !(c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':')));
        let Some(args) = expr[idx + NAME.len()..].trim_start().strip_prefix('(') else {
            return false;
        };
        standalone && !names_stylesheet_itself(args)
    })
}

fn names_stylesheet_itself(args: &str) -> bool {
    let args = args.trim_start();
    args.strip_prefix("''")
        .or_else(|| args.strip_prefix("\"\""))
        .is_some_and(|rest| rest.trim_start().starts_with(')'))
}
