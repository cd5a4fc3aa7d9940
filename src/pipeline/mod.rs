//! Timeline ingestion pipeline.
//!
//! Turns a raw JSON timeline payload from a pod into display-ready
//! [`Post`] records plus a plan of asset downloads, in one stateless pass:
//!
//! ```text
//! raw JSON ─→ decode ─→ per entry ─→ mention resolver (reply seed)
//!                                  + sanitizer        (display body)
//!                                  + link extractor   (anchors, images)
//!                                  ─→ asset planner   (avatar + images)
//! ```
//!
//! Every call is independent; no posts are cached or merged across calls.

pub mod assets;
pub mod links;
pub mod mentions;
pub mod sanitize;

use serde::Deserialize;

use crate::error::{DecodeError, EntryFieldMissing};
use crate::models::{Author, Post};

pub use assets::{plan_fetch, AssetFetch, DiskStore, FetchDecision, FileStore};
pub use links::{extract_links, ExtractedLinks, ImageLink};
pub use mentions::build_reply_seed;
pub use sanitize::sanitize;

/// Everything one decode call produces.
#[derive(Debug, Default)]
pub struct DecodeOutcome {
    /// Display-ready posts, in server response order.
    pub posts: Vec<Post>,
    /// Planned asset downloads, in entry order. One entry per post avatar
    /// plus one per inline image; duplicates are possible and kept.
    pub fetch_plan: Vec<AssetFetch>,
    /// Entries dropped for missing fields, with their payload indices, so
    /// the caller can log or abort the page.
    pub dropped: Vec<EntryFieldMissing>,
}

// Wire contract from the pod. Fixed externally; validated, not redesigned.
#[derive(Debug, Deserialize)]
struct RawTimeline {
    #[serde(default)]
    twts: Option<Vec<RawEntry>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawEntry {
    #[serde(rename = "markdownText")]
    markdown_text: Option<String>,
    twter: Option<RawTwter>,
    created: Option<String>,
    subject: Option<String>,
    hash: Option<String>,
    mentions: Option<Vec<String>>,
    links: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawTwter {
    nick: Option<String>,
    uri: Option<String>,
    avatar: Option<String>,
}

/// Decode a raw timeline payload into posts and a fetch plan.
///
/// Entries with no `markdownText` at all are treated as partial and
/// silently excluded (the relative order of the rest is unchanged). An
/// entry missing any other required field is dropped and recorded in
/// [`DecodeOutcome::dropped`]; decoding continues. An unparseable payload
/// or a missing `twts` array fails the whole call with no partial results.
///
/// `current_user` is the logged-in identity used to filter self-mentions
/// out of reply seeds; `store` is consulted for already-cached assets.
pub fn decode(
    payload: &str,
    current_user: &str,
    store: &dyn FileStore,
) -> Result<DecodeOutcome, DecodeError> {
    let raw: RawTimeline = serde_json::from_str(payload)?;
    let entries = raw.twts.ok_or(DecodeError::MissingTwts)?;

    let mut outcome = DecodeOutcome::default();

    for (index, entry) in entries.into_iter().enumerate() {
        if entry.markdown_text.is_none() {
            tracing::debug!(index, "timeline entry has no markdownText, excluded");
            continue;
        }
        match decode_entry(index, entry, current_user, store) {
            Ok((post, fetches)) => {
                outcome.posts.push(post);
                outcome.fetch_plan.extend(fetches);
            }
            Err(err) => {
                tracing::warn!("dropping timeline entry: {err}");
                outcome.dropped.push(err);
            }
        }
    }

    Ok(outcome)
}

/// Run one entry through the whole pipeline.
fn decode_entry(
    index: usize,
    entry: RawEntry,
    current_user: &str,
    store: &dyn FileStore,
) -> Result<(Post, Vec<AssetFetch>), EntryFieldMissing> {
    let missing = |field: &'static str| EntryFieldMissing { index, field };

    let raw_markdown = entry.markdown_text.ok_or_else(|| missing("markdownText"))?;
    let twter = entry.twter.ok_or_else(|| missing("twter"))?;
    let nick = twter.nick.ok_or_else(|| missing("twter.nick"))?;
    let uri = twter.uri.ok_or_else(|| missing("twter.uri"))?;
    let avatar = twter.avatar.ok_or_else(|| missing("twter.avatar"))?;
    let created = entry.created.ok_or_else(|| missing("created"))?;
    let subject = entry.subject.ok_or_else(|| missing("subject"))?;
    let hash = entry.hash.ok_or_else(|| missing("hash"))?;

    // Absent or null mentions/links are empty, not errors.
    let mentions = entry.mentions.unwrap_or_default();
    let links = entry.links.unwrap_or_default();

    // The reply seed becomes the canonical subject from here on.
    let reply_seed = build_reply_seed(&subject, &nick, &uri, &mentions, current_user);

    let created = normalize_timestamp(&created);
    let header = format!("\n{created}\n<a href=\"{uri}\">{nick}</a> : \n\n");
    let body = format!("{header}{}", sanitize(&raw_markdown, &reply_seed));

    let extracted = extract_links(&body, &links);

    let mut fetches = Vec::new();
    if !avatar.is_empty() {
        // Avatar filename is always <nick>.png regardless of the actual
        // image format, for compatibility with the cache layout other
        // clients use.
        fetches.push(plan_fetch(store, &avatar, &format!("{nick}.png")));
    }
    for image in &extracted.images {
        fetches.push(plan_fetch(store, &image.source_url, &image.local_filename));
    }

    let post = Post {
        hash,
        author: Author {
            nick,
            uri,
            avatar_uri: avatar,
        },
        created,
        raw_markdown,
        mentions,
        links,
        reply_seed,
        display_body: extracted.body,
    };

    Ok((post, fetches))
}

/// Display normalization of the pod's timestamp string: every `T` becomes
/// `:` and every `Z` becomes `.`. Not a semantic time parse.
fn normalize_timestamp(created: &str) -> String {
    created.replace('T', ":").replace('Z', ".")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::path::PathBuf;

    struct FakeStore(HashSet<String>);

    impl FakeStore {
        fn empty() -> Self {
            Self(HashSet::new())
        }

        fn with(files: &[&str]) -> Self {
            Self(files.iter().map(ToString::to_string).collect())
        }
    }

    impl FileStore for FakeStore {
        fn exists(&self, filename: &str) -> bool {
            self.0.contains(filename)
        }

        fn resolve(&self, filename: &str) -> PathBuf {
            PathBuf::from(filename)
        }
    }

    fn entry(nick: &str, body: &str) -> String {
        format!(
            r#"{{"markdownText":"{body}","subject":"s","created":"2024-01-02T03:04:05Z","hash":"h-{nick}","twter":{{"nick":"{nick}","uri":"u","avatar":"a.png"}},"mentions":[],"links":[]}}"#
        )
    }

    #[test]
    fn end_to_end_single_post() {
        let payload = r#"{"twts":[{"markdownText":"<b>hi</b> (http://x) [done]","subject":"s","created":"2024-01-02T03:04:05Z","hash":"h1","twter":{"nick":"bob","uri":"u","avatar":"a.png"},"mentions":["@<alice a>"],"links":[]}]}"#;

        let outcome = decode(payload, "alice", &FakeStore::empty()).unwrap();
        assert_eq!(outcome.posts.len(), 1);
        assert!(outcome.dropped.is_empty());

        let post = outcome.posts[0].clone();
        // Alice's own mention filtered, bob's author tag kept.
        assert_eq!(post.reply_seed, "s @<bob u> ");
        assert!(!post.display_body.contains("<b>"));
        assert!(!post.display_body.contains("(http://x)"));
        assert!(!post.display_body.contains('['));
        assert!(!post.display_body.contains(&post.reply_seed));
        assert_eq!(post.raw_markdown, "<b>hi</b> (http://x) [done]");
        assert_eq!(post.hash, "h1");

        // One avatar fetch, filename always <nick>.png.
        assert_eq!(
            outcome.fetch_plan,
            vec![AssetFetch {
                remote_url: "a.png".into(),
                local_filename: "bob.png".into(),
                decision: FetchDecision::Fetch,
            }]
        );
    }

    #[test]
    fn timestamp_is_normalized_replace_all() {
        let payload = format!(r#"{{"twts":[{}]}}"#, entry("bob", "hi"));
        let outcome = decode(&payload, "alice", &FakeStore::empty()).unwrap();
        assert_eq!(outcome.posts[0].created, "2024-01-02:03:04:05.");
    }

    #[test]
    fn display_body_has_header_with_author_link() {
        let payload = format!(r#"{{"twts":[{}]}}"#, entry("bob", "hi"));
        let outcome = decode(&payload, "alice", &FakeStore::empty()).unwrap();
        assert!(outcome.posts[0]
            .display_body
            .starts_with("\n2024-01-02:03:04:05.\n<a href=\"u\">bob</a> : \n\n"));
    }

    #[test]
    fn entries_without_body_are_excluded_in_order() {
        let payload = format!(
            r#"{{"twts":[{},{{"subject":"s","created":"c","hash":"h","twter":{{"nick":"x","uri":"u","avatar":""}}}},{}]}}"#,
            entry("first", "one"),
            entry("third", "three"),
        );
        let outcome = decode(&payload, "alice", &FakeStore::empty()).unwrap();
        assert_eq!(outcome.posts.len(), 2);
        assert_eq!(outcome.posts[0].author.nick, "first");
        assert_eq!(outcome.posts[1].author.nick, "third");
        // Lacking a body is not an error, just exclusion.
        assert!(outcome.dropped.is_empty());
    }

    #[test]
    fn missing_field_drops_entry_and_records_index() {
        let payload = format!(
            r#"{{"twts":[{},{{"markdownText":"no hash here","subject":"s","created":"c","twter":{{"nick":"x","uri":"u","avatar":""}}}}]}}"#,
            entry("first", "one"),
        );
        let outcome = decode(&payload, "alice", &FakeStore::empty()).unwrap();
        assert_eq!(outcome.posts.len(), 1);
        assert_eq!(
            outcome.dropped,
            vec![crate::error::EntryFieldMissing {
                index: 1,
                field: "hash",
            }]
        );
    }

    #[test]
    fn unparseable_payload_is_fatal() {
        let err = decode("not json", "alice", &FakeStore::empty()).unwrap_err();
        assert!(matches!(err, DecodeError::PayloadDecode(_)));
    }

    #[test]
    fn payload_without_twts_is_fatal() {
        let err = decode(r#"{"posts":[]}"#, "alice", &FakeStore::empty()).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTwts));
        let err = decode(r#"{"twts":null}"#, "alice", &FakeStore::empty()).unwrap_err();
        assert!(matches!(err, DecodeError::MissingTwts));
    }

    #[test]
    fn null_mentions_and_links_are_empty() {
        let payload = r#"{"twts":[{"markdownText":"hi","subject":"s","created":"c","hash":"h","twter":{"nick":"bob","uri":"u","avatar":""},"mentions":null,"links":null}]}"#;
        let outcome = decode(payload, "alice", &FakeStore::empty()).unwrap();
        assert!(outcome.posts[0].mentions.is_empty());
        assert!(outcome.posts[0].links.is_empty());
    }

    #[test]
    fn empty_avatar_plans_nothing() {
        let payload = r#"{"twts":[{"markdownText":"hi","subject":"s","created":"c","hash":"h","twter":{"nick":"bob","uri":"u","avatar":""}}]}"#;
        let outcome = decode(payload, "alice", &FakeStore::empty()).unwrap();
        assert!(outcome.fetch_plan.is_empty());
    }

    #[test]
    fn cached_avatar_is_skipped() {
        let payload = format!(r#"{{"twts":[{}]}}"#, entry("bob", "hi"));
        let outcome = decode(&payload, "alice", &FakeStore::with(&["bob.png"])).unwrap();
        assert_eq!(outcome.fetch_plan[0].decision, FetchDecision::Skip);
    }

    #[test]
    fn image_links_are_planned_and_anchored() {
        let payload = r#"{"twts":[{"markdownText":"pic ![](https://pod/m/shot.png) and https://pod/page","subject":"s","created":"c","hash":"h","twter":{"nick":"bob","uri":"u","avatar":""},"links":["![](https://pod/m/shot.png)","https://pod/page"]}]}"#;
        let outcome = decode(payload, "alice", &FakeStore::empty()).unwrap();

        assert_eq!(
            outcome.fetch_plan,
            vec![AssetFetch {
                remote_url: "https://pod/m/shot.png".into(),
                local_filename: "shot.png".into(),
                decision: FetchDecision::Fetch,
            }]
        );
        // Non-image links still get an anchor.
        assert!(outcome.posts[0]
            .display_body
            .contains("<a href=\"https://pod/page\">https://pod/page</a>"));
    }

    #[test]
    fn reply_seed_never_contains_current_user() {
        let payload = r#"{"twts":[{"markdownText":"hi","subject":"s","created":"c","hash":"h","twter":{"nick":"alice","uri":"u","avatar":""},"mentions":["@<alice u>","@<bob b>"]}]}"#;
        let outcome = decode(payload, "alice", &FakeStore::empty()).unwrap();
        assert!(!outcome.posts[0].reply_seed.contains("alice"));
        assert_eq!(outcome.posts[0].reply_seed, "s @<bob b> ");
    }

    #[test]
    fn repeated_decodes_share_no_state() {
        let payload = format!(r#"{{"twts":[{}]}}"#, entry("bob", "hi"));
        let store = FakeStore::empty();
        let first = decode(&payload, "alice", &store).unwrap();
        let second = decode(&payload, "alice", &store).unwrap();
        assert_eq!(first.posts, second.posts);
        assert_eq!(first.fetch_plan, second.fetch_plan);
    }
}
