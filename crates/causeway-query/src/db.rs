// SPDX-License-Identifier: Apache-2.0

use causeway_model::{
    parse_timestamp, Category, MediaAsset, MediaId, MediaType, OpportunityId, OpportunitySummary,
    OrgId, OrgSummary, PostId, PostRow,
};
use rusqlite::types::{Type, Value};
use rusqlite::{params_from_iter, Connection};

use crate::cursor::FeedCursor;

/// Content schema, shared by the seed tool and test fixtures. The serving
/// path never writes; this exists so every writer agrees on one DDL.
pub const CONTENT_SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS organizations (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        logo_url TEXT,
        verification_status TEXT NOT NULL DEFAULT 'pending',
        is_active INTEGER NOT NULL DEFAULT 1,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS opportunities (
        id TEXT PRIMARY KEY,
        organization_id TEXT NOT NULL REFERENCES organizations(id),
        title TEXT NOT NULL,
        description TEXT NOT NULL DEFAULT '',
        schedule_type TEXT NOT NULL DEFAULT 'flexible',
        start_date TEXT,
        location_address TEXT,
        is_remote INTEGER NOT NULL DEFAULT 0,
        time_commitment TEXT,
        created_at TEXT NOT NULL
    );
    CREATE TABLE IF NOT EXISTS posts (
        id TEXT PRIMARY KEY,
        organization_id TEXT NOT NULL REFERENCES organizations(id),
        opportunity_id TEXT REFERENCES opportunities(id),
        title TEXT NOT NULL,
        description TEXT,
        media_type TEXT NOT NULL DEFAULT 'image',
        status TEXT NOT NULL DEFAULT 'draft',
        created_at TEXT NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_posts_feed_order
        ON posts(status, created_at DESC, id DESC);
    CREATE TABLE IF NOT EXISTS post_media (
        id TEXT PRIMARY KEY,
        post_id TEXT NOT NULL REFERENCES posts(id),
        media_url TEXT NOT NULL,
        thumbnail_url TEXT,
        duration_seconds INTEGER,
        width INTEGER,
        height INTEGER,
        display_order INTEGER NOT NULL DEFAULT 0
    );
    CREATE INDEX IF NOT EXISTS idx_post_media_post
        ON post_media(post_id, display_order);
    CREATE TABLE IF NOT EXISTS categories (
        id TEXT PRIMARY KEY,
        name TEXT NOT NULL,
        slug TEXT NOT NULL UNIQUE,
        icon_name TEXT,
        display_order INTEGER NOT NULL DEFAULT 0
    );
";

pub fn create_content_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CONTENT_SCHEMA_SQL)
}

const FEED_SELECT: &str = "SELECT p.id, p.title, p.description, p.media_type, p.created_at, \
     o.id, o.name, o.logo_url, o.verification_status, \
     op.id, op.title, op.schedule_type, op.start_date, op.location_address, op.is_remote, op.time_commitment \
     FROM posts p \
     JOIN organizations o ON o.id = p.organization_id \
     LEFT JOIN opportunities op ON op.id = p.opportunity_id";

pub(crate) fn build_feed_sql(cursor: Option<&FeedCursor>) -> (String, Vec<Value>) {
    let mut sql = String::from(FEED_SELECT);
    let mut where_parts: Vec<String> = Vec::new();
    let mut params: Vec<Value> = Vec::new();

    // Eligibility gate: published post, active + verified owner.
    where_parts.push("p.status = 'published'".to_string());
    where_parts.push("o.is_active = 1".to_string());
    where_parts.push("o.verification_status = 'verified'".to_string());

    if let Some(c) = cursor {
        let created_at = causeway_model::format_timestamp(&c.created_at);
        where_parts
            .push("(p.created_at < ?1 OR (p.created_at = ?1 AND p.id < ?2))".to_string());
        params.push(Value::Text(created_at));
        params.push(Value::Text(c.id.to_string()));
    }

    sql.push_str(" WHERE ");
    sql.push_str(&where_parts.join(" AND "));
    sql.push_str(" ORDER BY p.created_at DESC, p.id DESC LIMIT ?");
    (sql, params)
}

fn conversion_err(
    index: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(err))
}

pub(crate) fn parse_feed_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<PostRow> {
    let id: String = row.get(0)?;
    let created_at: String = row.get(4)?;
    let media_type: String = row.get(3)?;
    let org_id: String = row.get(5)?;
    let verification_status: String = row.get(8)?;

    let opportunity = match row.get::<_, Option<String>>(9)? {
        Some(opp_id) => {
            let start_date: Option<String> = row.get(12)?;
            Some(OpportunitySummary {
                id: OpportunityId::parse(&opp_id).map_err(|e| conversion_err(9, e))?,
                title: row.get(10)?,
                schedule_type: row.get(11)?,
                start_date: start_date
                    .map(|raw| parse_timestamp(&raw).map_err(|e| conversion_err(12, e)))
                    .transpose()?,
                location: row.get(13)?,
                is_remote: row.get::<_, i64>(14)? != 0,
                time_commitment: row.get(15)?,
            })
        }
        None => None,
    };

    Ok(PostRow {
        id: PostId::parse(&id).map_err(|e| conversion_err(0, e))?,
        title: row.get(1)?,
        description: row.get(2)?,
        media_type: MediaType::parse(&media_type).map_err(|e| conversion_err(3, e))?,
        created_at: parse_timestamp(&created_at).map_err(|e| conversion_err(4, e))?,
        media: Vec::new(),
        organization: OrgSummary {
            id: OrgId::parse(&org_id).map_err(|e| conversion_err(5, e))?,
            name: row.get(6)?,
            logo_url: row.get(7)?,
            is_verified: verification_status == "verified",
        },
        opportunity,
    })
}

/// Fills `media` for every entry of the page, in explicit display order.
pub(crate) fn attach_media(conn: &Connection, entries: &mut [PostRow]) -> rusqlite::Result<()> {
    if entries.is_empty() {
        return Ok(());
    }
    let placeholders = vec!["?"; entries.len()].join(", ");
    let sql = format!(
        "SELECT post_id, id, media_url, thumbnail_url, duration_seconds, width, height, display_order \
         FROM post_media WHERE post_id IN ({placeholders}) ORDER BY post_id, display_order"
    );
    let ids: Vec<Value> = entries
        .iter()
        .map(|e| Value::Text(e.id.to_string()))
        .collect();
    let mut stmt = conn.prepare_cached(&sql)?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), |row| {
        let post_id: String = row.get(0)?;
        let media_id: String = row.get(1)?;
        Ok((
            PostId::parse(&post_id).map_err(|e| conversion_err(0, e))?,
            MediaAsset {
                id: MediaId::parse(&media_id).map_err(|e| conversion_err(1, e))?,
                url: row.get(2)?,
                thumbnail_url: row.get(3)?,
                duration_seconds: row.get(4)?,
                width: row.get(5)?,
                height: row.get(6)?,
                display_order: row.get(7)?,
            },
        ))
    })?;

    let mut by_post: std::collections::HashMap<PostId, Vec<MediaAsset>> =
        std::collections::HashMap::new();
    for item in rows {
        let (post_id, asset) = item?;
        by_post.entry(post_id).or_default().push(asset);
    }
    for entry in entries.iter_mut() {
        if let Some(media) = by_post.remove(&entry.id) {
            entry.media = media;
        }
    }
    Ok(())
}

pub fn list_categories(conn: &Connection) -> rusqlite::Result<Vec<Category>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, slug, icon_name, display_order FROM categories ORDER BY display_order, name",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            slug: row.get(2)?,
            icon_name: row.get(3)?,
            display_order: row.get(4)?,
        })
    })?;
    rows.collect()
}
