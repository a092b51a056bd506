#![forbid(unsafe_code)]
//! Headless causeway feed client.
//!
//! Two cooperating halves, both free of any UI framework: `FeedPaginator`
//! accumulates pages from the feed endpoint under a strict
//! one-in-flight-fetch discipline, and `FeedWindow` decides which entries
//! are mounted, when to prefetch the next page, and which single entry owns
//! media playback. The embedder supplies scroll/visibility signals and a
//! `PlaybackController`; everything else is plain state.

mod paginator;
mod transport;
mod window;

pub use paginator::{FeedPaginator, FeedView, FetchOutcome, RetryPolicy};
pub use transport::{ClientError, FeedTransport, HttpTransport, ScriptedTransport};
pub use window::{FeedWindow, PlaybackController};

pub const CRATE_NAME: &str = "causeway-client";
