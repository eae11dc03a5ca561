//! Restricted-HTML to chat-markup conversion.
//!
//! Calendar descriptions arrive as the small HTML subset the calendar web
//! editor produces. [`convert`] rewrites that subset into the chat markup
//! dialect the webhook consumer renders, by applying a fixed, ordered list
//! of rewrite rules. The order is a contract: each rule runs to completion
//! before the next, later rules must never reinterpret tokens produced by
//! earlier ones, and whitespace is moved out of emphasis delimiters before
//! the delimiter is closed (the consumer refuses to render `** text**`).
//!
//! Anything the rule list does not recognize is deleted rather than kept
//! or escaped. The converter never fails; it always returns best-effort
//! text, empty input included.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// What to do with every match of a rule's pattern.
enum Rewrite {
    /// Replace with a template; `${n}` refers to capture groups.
    Template(&'static str),
    /// Decode a known character entity; unknown entities stay untouched.
    Entities,
}

/// One conversion rule. Rules are applied in declaration order.
struct Rule {
    pattern: Regex,
    rewrite: Rewrite,
}

impl Rule {
    fn template(pattern: &str, replacement: &'static str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid rewrite pattern"),
            rewrite: Rewrite::Template(replacement),
        }
    }

    fn entities(pattern: &str) -> Self {
        Self {
            pattern: Regex::new(pattern).expect("valid entity pattern"),
            rewrite: Rewrite::Entities,
        }
    }
}

/// The conversion rule list, in application order:
///
/// 1. line breaks,
/// 2. list items (ordered lists are not numbered; everything is a bullet),
/// 3. emphasis pairs with whitespace hugging,
/// 4. hyperlinks (only the double-quoted `href` form),
/// 5. closing block tags become newlines,
/// 6. every remaining tag is deleted,
/// 7. the four supported character entities are decoded.
///
/// The `(\s*)` captures around emphasis tags pull adjacent whitespace to
/// the outside of the inserted delimiter so the delimiter hugs the actual
/// content. Known limitation: mixed or overlapping emphasis tags that are
/// not separated by whitespace can still produce delimiter runs the
/// consumer renders literally. Existing calendar content depends on the
/// current output shape, so the behavior is kept as-is.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        Rule::template(r"<br>", "\n"),
        Rule::template(r"<li>", "\n\u{2022} "),
        Rule::template(r"<b>(\s*)", "${1}**"),
        Rule::template(r"(\s*)</b>", "**${1}"),
        Rule::template(r"<u>(\s*)", "${1}__"),
        Rule::template(r"(\s*)</u>", "__${1}"),
        Rule::template(r"<i>(\s*)", "${1}*"),
        Rule::template(r"(\s*)</i>", "*${1}"),
        Rule::template(r#"<a[^>]* href="([^"]+)"[^>]*>(.+?)</a>"#, "[${2}](${1})"),
        Rule::template(r"</(div|p|h\d)>", "\n"),
        Rule::template(r"<[^>]*>", ""),
        Rule::entities(r"&.+?;"),
    ]
});

/// Decodes the supported named entities; anything else passes through.
fn decode_entity(entity: &str) -> &str {
    match entity {
        "&amp;" => "&",
        "&lt;" => "<",
        "&gt;" => ">",
        "&nbsp;" => " ",
        other => other,
    }
}

/// Converts a restricted-HTML description into chat markup.
///
/// Empty input is a no-op, not an error. Unsupported markup degrades to
/// plain text per the rule list; this function never fails.
pub fn convert(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut text = html.to_string();
    for rule in RULES.iter() {
        text = match rule.rewrite {
            Rewrite::Template(replacement) => {
                rule.pattern.replace_all(&text, replacement).into_owned()
            }
            Rewrite::Entities => rule
                .pattern
                .replace_all(&text, |caps: &Captures| decode_entity(&caps[0]).to_string())
                .into_owned(),
        };
    }
    text
}
