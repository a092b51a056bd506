// SPDX-License-Identifier: Apache-2.0

use causeway_model::{format_timestamp, Category, PostRow};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeedMediaDto {
    pub id: String,
    pub url: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<u32>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeedOrganizationDto {
    pub id: String,
    pub name: String,
    pub logo_url: Option<String>,
    pub is_verified: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeedOpportunityDto {
    pub id: String,
    pub title: String,
    pub schedule_type: String,
    pub start_date: Option<String>,
    pub location: Option<String>,
    pub is_remote: bool,
    pub time_commitment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeedItemDto {
    pub post_id: String,
    pub title: String,
    pub description: Option<String>,
    pub media_type: String,
    pub created_at: String,
    pub media: Vec<FeedMediaDto>,
    pub organization: FeedOrganizationDto,
    pub opportunity: Option<FeedOpportunityDto>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FeedPageDto {
    pub data: Vec<FeedItemDto>,
    pub cursor: Option<String>,
    pub has_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub icon_name: Option<String>,
    pub display_order: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CategoryListDto {
    pub data: Vec<CategoryDto>,
}

impl From<PostRow> for FeedItemDto {
    fn from(row: PostRow) -> Self {
        Self {
            post_id: row.id.to_string(),
            title: row.title,
            description: row.description,
            media_type: row.media_type.as_str().to_string(),
            created_at: format_timestamp(&row.created_at),
            media: row
                .media
                .into_iter()
                .map(|m| FeedMediaDto {
                    id: m.id.to_string(),
                    url: m.url,
                    thumbnail_url: m.thumbnail_url,
                    duration: m.duration_seconds,
                    width: m.width,
                    height: m.height,
                })
                .collect(),
            organization: FeedOrganizationDto {
                id: row.organization.id.to_string(),
                name: row.organization.name,
                logo_url: row.organization.logo_url,
                is_verified: row.organization.is_verified,
            },
            opportunity: row.opportunity.map(|o| FeedOpportunityDto {
                id: o.id.to_string(),
                title: o.title,
                schedule_type: o.schedule_type,
                start_date: o.start_date.as_ref().map(format_timestamp),
                location: o.location,
                is_remote: o.is_remote,
                time_commitment: o.time_commitment,
            }),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            icon_name: c.icon_name,
            display_order: c.display_order,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_model::{
        MediaAsset, MediaId, MediaType, OrgId, OrgSummary, PostId,
    };
    use chrono::TimeZone;

    fn sample_row() -> PostRow {
        PostRow {
            id: PostId::parse("3e7c51f0-1111-4222-8333-444455556666").expect("post id"),
            title: "Beach cleanup highlights".to_string(),
            description: Some("Join us next weekend".to_string()),
            media_type: MediaType::Video,
            created_at: chrono::Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            media: vec![MediaAsset {
                id: MediaId::parse("aaaaaaaa-bbbb-4ccc-8ddd-eeeeeeeeeeee").expect("media id"),
                url: "https://cdn.example.org/clip.mp4".to_string(),
                thumbnail_url: Some("https://cdn.example.org/clip.jpg".to_string()),
                duration_seconds: Some(30),
                width: Some(1080),
                height: Some(1920),
                display_order: 0,
            }],
            organization: OrgSummary {
                id: OrgId::generate(),
                name: "Shoreline Trust".to_string(),
                logo_url: None,
                is_verified: true,
            },
            opportunity: None,
        }
    }

    #[test]
    fn wire_field_names_are_camel_case() {
        let dto = FeedItemDto::from(sample_row());
        let value = serde_json::to_value(&dto).expect("serialize");
        assert!(value.get("postId").is_some());
        assert!(value.get("mediaType").is_some());
        assert!(value.get("createdAt").is_some());
        assert!(value["media"][0].get("thumbnailUrl").is_some());
        assert!(value["organization"].get("isVerified").is_some());
        assert!(value.get("opportunity").is_some());
        assert!(value["opportunity"].is_null());
    }

    #[test]
    fn created_at_uses_the_canonical_form() {
        let dto = FeedItemDto::from(sample_row());
        assert_eq!(dto.created_at, "2026-03-01T12:00:00.000000Z");
    }

    #[test]
    fn page_dto_round_trips() {
        let page = FeedPageDto {
            data: vec![FeedItemDto::from(sample_row())],
            cursor: Some("token".to_string()),
            has_more: true,
        };
        let text = serde_json::to_string(&page).expect("serialize");
        assert!(text.contains("\"hasMore\":true"));
        let back: FeedPageDto = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, page);
    }
}
