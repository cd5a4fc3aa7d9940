//! Post body sanitizer.
//!
//! Yarn pods hand back a `markdownText` that is a soup of markdown,
//! pre-rendered HTML fragments and JSON escape leftovers. This module boils
//! it down to plain display text with a fixed sequence of literal string
//! transforms. It is intentionally *not* an HTML parser: angle-bracket and
//! parenthesized-URL spans are consumed greedily from the first opener to
//! the next closer, which can over-delete on malformed input. That matches
//! the upstream client behavior and keeps the transform a stable fixed
//! point (sanitizing twice changes nothing).

/// Literal replacements applied after span stripping, in order.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("\\u003c", ""),
    ("\\u003e", ""),
    ("&#39;", "'"),
    ("<p>", " "),
    ("</p>", " "),
    ("[", ""),
    ("]", ""),
];

/// Sanitize a raw post body for display.
///
/// `reply_seed` is the composed reply subject for the same post; every
/// occurrence of it is stripped so the body does not duplicate the
/// auto-quoted reply header. Empty input yields empty output; this never
/// fails.
pub fn sanitize(raw_markdown: &str, reply_seed: &str) -> String {
    let text = strip_spans(raw_markdown, "<", '>');
    let text = strip_spans(&text, "(http", ')');

    let mut text = text;
    for (from, to) in REPLACEMENTS {
        text = text.replace(from, to);
    }
    if !reply_seed.is_empty() {
        text = text.replace(reply_seed, "");
    }
    text.replace("Read more", "")
}

/// Repeatedly remove the first span starting with `open` through the next
/// occurrence of `close` at or after it, inclusive.
///
/// Scans the immutable input into a fresh buffer rather than erasing in
/// place. An `open` with no following `close` is not a complete span and
/// ends the stripping (the remainder is kept verbatim).
fn strip_spans(input: &str, open: &str, close: char) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find(open) {
        let Some(end) = rest[start..].find(close) else {
            break;
        };
        out.push_str(&rest[..start]);
        rest = &rest[start + end + close.len_utf8()..];
    }
    out.push_str(rest);
    out
}
