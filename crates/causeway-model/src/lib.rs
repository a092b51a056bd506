#![forbid(unsafe_code)]
//! Causeway domain model SSOT.
//!
//! Value types shared by the query engine, the HTTP surface, and the
//! headless feed client. Everything here is plain data: parsing is strict,
//! serialization is `serde`, and nothing touches I/O.

mod content;
mod ids;
mod time;

pub use content::{
    Category, MediaAsset, MediaType, OrgSummary, OpportunitySummary, PostRow, PostStatus,
    VerificationStatus,
};
pub use ids::{MediaId, OpportunityId, OrgId, ParseError, PostId};
pub use time::{format_timestamp, parse_timestamp, Timestamp};

pub const CRATE_NAME: &str = "causeway-model";
