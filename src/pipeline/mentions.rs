//! Reply-seed composition.
//!
//! When the user hits reply, the composer is pre-filled with the post's
//! subject followed by `@<nick uri>` tags for the author and everyone the
//! post mentioned, except the replying user themselves. The seed produced
//! here becomes the post's canonical subject after decoding.

/// Build the ready-to-edit reply line for a post.
///
/// The author tag and each mention are appended in order, each followed by
/// a single space (the trailing space is kept so the user can type right
/// away). Any tag containing `current_user` as a substring is skipped, so
/// you never @-mention yourself replying to your own post.
///
/// Self-matching is substring containment, not token equality: a user
/// whose name is contained in another handle gets filtered along with it.
/// Known limitation, kept for parity with the pod's other clients.
pub fn build_reply_seed(
    subject: &str,
    author_nick: &str,
    author_uri: &str,
    mentions: &[String],
    current_user: &str,
) -> String {
    let mut seed = format!("{subject} ");

    let author_tag = format!("@<{author_nick} {author_uri}> ");
    if !author_tag.contains(current_user) {
        seed.push_str(&author_tag);
    }

    for mention in mentions {
        if mention.contains(current_user) {
            continue;
        }
        seed.push_str(mention);
        seed.push(' ');
    }

    seed
}
