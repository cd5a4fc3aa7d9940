//! Post view-model produced by the timeline decoder.

use serde::{Deserialize, Serialize};

/// The user who wrote a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Short handle (nick) on the pod.
    pub nick: String,
    /// Feed URI identifying the author.
    pub uri: String,
    /// Avatar image URL; may be empty.
    pub avatar_uri: String,
}

/// One display-ready timeline entry.
///
/// Posts are built fresh on every decode call and never cached or merged
/// across calls; everything derived (`reply_seed`, `display_body`) is
/// immutable once the decoder emits the post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    /// Server-assigned content hash, unique within one timeline response.
    pub hash: String,
    /// Who wrote it.
    pub author: Author,
    /// Timestamp normalized for display (`T`→`:`, `Z`→`.`). A string
    /// transform only, not a parsed time.
    pub created: String,
    /// Original body text from the server, never mutated.
    pub raw_markdown: String,
    /// Mention strings as supplied, duplicates and order preserved.
    pub mentions: Vec<String>,
    /// Raw link strings as supplied (`![](url)` or bare URLs).
    pub links: Vec<String>,
    /// Pre-composed reply line; the canonical subject for reply actions.
    /// Never contains the decoding user's own identity.
    pub reply_seed: String,
    /// Sanitized body with header and injected anchors, ready to render.
    pub display_body: String,
}

impl Post {
    /// One-line preview of the display body, for list views.
    pub fn preview(&self, max_len: usize) -> String {
        let body = self
            .display_body
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ");
        if body.chars().count() <= max_len {
            body
        } else {
            let cut: String = body.chars().take(max_len.saturating_sub(3)).collect();
            format!("{cut}...")
        }
    }
}
