// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};

use crate::ids::{MediaId, OpportunityId, OrgId, ParseError, PostId};
use crate::time::Timestamp;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum PostStatus {
    Published,
    Draft,
    Removed,
}

impl PostStatus {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "published" => Ok(Self::Published),
            "draft" => Ok(Self::Draft),
            "removed" => Ok(Self::Removed),
            _ => Err(ParseError::InvalidFormat(
                "post status must be one of 'published', 'draft', 'removed'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Published => "published",
            Self::Draft => "draft",
            Self::Removed => "removed",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "pending" => Ok(Self::Pending),
            "verified" => Ok(Self::Verified),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseError::InvalidFormat(
                "verification status must be one of 'pending', 'verified', 'rejected'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Rejected => "rejected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[non_exhaustive]
pub enum MediaType {
    Video,
    Image,
}

impl MediaType {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        match raw {
            "video" => Ok(Self::Video),
            "image" => Ok(Self::Image),
            _ => Err(ParseError::InvalidFormat(
                "media type must be 'video' or 'image'",
            )),
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Video => "video",
            Self::Image => "image",
        }
    }
}

/// One attachment of a post, in explicit display order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MediaAsset {
    pub id: MediaId,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration_seconds: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub display_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OrgSummary {
    pub id: OrgId,
    pub name: String,
    pub logo_url: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OpportunitySummary {
    pub id: OpportunityId,
    pub title: String,
    pub schedule_type: String,
    pub start_date: Option<Timestamp>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub time_commitment: Option<String>,
}

/// A fully hydrated feed entry as produced by the query engine.
///
/// Eligibility (published status, active + verified owner) is a query-time
/// gate, never a field: a `PostRow` only exists because it passed the gate
/// at fetch time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostRow {
    pub id: PostId,
    pub title: String,
    pub description: Option<String>,
    pub media_type: MediaType,
    pub created_at: Timestamp,
    pub media: Vec<MediaAsset>,
    pub organization: OrgSummary,
    pub opportunity: Option<OpportunitySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon_name: Option<String>,
    pub display_order: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_vocabulary_round_trips() {
        for status in [PostStatus::Published, PostStatus::Draft, PostStatus::Removed] {
            assert_eq!(PostStatus::parse(status.as_str()), Ok(status));
        }
        assert!(PostStatus::parse("active").is_err());
    }

    #[test]
    fn verification_vocabulary_round_trips() {
        for status in [
            VerificationStatus::Pending,
            VerificationStatus::Verified,
            VerificationStatus::Rejected,
        ] {
            assert_eq!(VerificationStatus::parse(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn media_type_rejects_unknown() {
        assert!(MediaType::parse("carousel").is_err());
        assert_eq!(MediaType::parse("video"), Ok(MediaType::Video));
    }
}
