//! # skein 🧶
//!
//! A terminal client for Yarn.social pods.
//!
//! ## Overview
//!
//! skein logs in to a twtxt/Yarn pod, fetches a named timeline and turns
//! the raw JSON into display-ready posts: sanitized body text, a
//! pre-composed reply seed that never quotes yourself, clickable link
//! anchors, and a plan of avatar/image downloads for the local cache.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                          CLI                                │
//! │   Parses commands and wires the client to the pipeline      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!          ┌───────────────────┼───────────────────┐
//!          ▼                   ▼                   ▼
//! ┌─────────────────┐ ┌─────────────────┐ ┌─────────────────┐
//! │     Config      │ │       API       │ │    Pipeline     │
//! │                 │ │                 │ │                 │
//! │ • Load/Save     │ │ • Auth/whoami   │ │ • Decode twts   │
//! │ • Pod + user    │ │ • Timelines     │ │ • Sanitize      │
//! │ • SSL verify    │ │ • Asset fetch   │ │ • Reply seeds   │
//! └─────────────────┘ └─────────────────┘ └─────────────────┘
//!          │                   │                   │
//!          └───────────────────┴───────────────────┘
//!                              │
//!                              ▼
//!                  ┌─────────────────────┐
//!                  │       Models        │
//!                  │  Post • Author •    │
//!                  │  TimelineName       │
//!                  └─────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`api`] — Pod API client (auth, timelines, posting, asset downloads)
//! - [`config`] — Configuration management
//! - [`error`] — Typed pipeline errors
//! - [`models`] — Data models (Post, Author, TimelineName)
//! - [`pipeline`] — Timeline decoding and post transformation
//! - [`session`] — Explicit logged-in session state
//!
//! ## Example
//!
//! ```no_run
//! use skein::pipeline::{self, DiskStore};
//!
//! fn show(payload: &str) -> anyhow::Result<()> {
//!     let store = DiskStore::new("./cache");
//!     let outcome = pipeline::decode(payload, "alice", &store)?;
//!     for post in &outcome.posts {
//!         println!("{}", post.display_body);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Reply Seeds** — Ready-to-edit reply lines crediting everyone but you
//! - **Idempotent Sanitizer** — Stable, parser-free body cleanup
//! - **Cached Assets** — Avatars and inline images downloaded once
//! - **Fast** — Async networking with Tokio

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::should_implement_trait)]
#![allow(clippy::return_self_not_must_use)]

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod paths;
pub mod pipeline;
pub mod session;

// Re-export main types for convenience
pub use api::YarnClient;
pub use config::Config;
pub use error::{AssetUnavailable, DecodeError, EntryFieldMissing};
pub use models::{Author, Post, TimelineName};
pub use pipeline::{decode, AssetFetch, DecodeOutcome, DiskStore, FetchDecision, FileStore};
pub use session::Session;

/// ASCII logo for the application
pub const LOGO: &str = r"
       __        _
  ___ / /_____  (_)__
 (_-</  '_/ -_) / _ \
/___/_/\_\\__/_/_//_/
";

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Repository URL
pub const REPO_URL: &str = "https://github.com/skein-social/skein";
