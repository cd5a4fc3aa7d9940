//! Data models for skein

mod post;
mod timeline;

pub use post::{Author, Post};
pub use timeline::TimelineName;
