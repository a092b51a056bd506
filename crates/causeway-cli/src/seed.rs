// SPDX-License-Identifier: Apache-2.0

use causeway_model::format_timestamp;
use causeway_query::create_content_schema;
use chrono::{Duration, TimeZone, Utc};
use rusqlite::{params, Connection};
use std::path::Path;

const CATEGORIES: [(&str, &str); 10] = [
    ("Environment", "environment"),
    ("Education", "education"),
    ("Health", "health"),
    ("Animals", "animals"),
    ("Seniors", "seniors"),
    ("Youth", "youth"),
    ("Disaster Relief", "disaster-relief"),
    ("Arts & Culture", "arts-culture"),
    ("Food Security", "food-security"),
    ("Housing", "housing"),
];

const VERIFIED_ORGS: [(&str, &str); 3] = [
    ("Ocean Guardians", "Coastal cleanups and reef restoration"),
    ("Code for Tomorrow", "Free coding bootcamps for underserved youth"),
    ("Paws & Claws Rescue", "Foster care and adoption for shelter animals"),
];

fn org_id(n: usize) -> String {
    format!("00000054-0001-4000-8000-{n:012}")
}

fn opportunity_id(n: usize) -> String {
    format!("00000054-0002-4000-8000-{n:012}")
}

fn post_id(n: usize) -> String {
    format!("00000054-0003-4000-8000-{n:012}")
}

fn media_id(n: usize) -> String {
    format!("00000054-0004-4000-8000-{n:012}")
}

fn category_id(n: usize) -> String {
    format!("00000054-0005-4000-8000-{n:012}")
}

/// Deterministic demo content: three verified organizations with published
/// posts, plus a pending organization, an inactive organization, and a few
/// drafts that must never surface in the feed.
pub fn run(db: &Path, published_posts: usize) -> Result<(), String> {
    let conn = Connection::open(db).map_err(|e| e.to_string())?;
    create_content_schema(&conn).map_err(|e| e.to_string())?;
    seed_connection(&conn, published_posts).map_err(|e| e.to_string())?;
    println!(
        "seeded {} published posts across {} organizations into {}",
        published_posts,
        VERIFIED_ORGS.len(),
        db.display()
    );
    Ok(())
}

fn seed_connection(conn: &Connection, published_posts: usize) -> rusqlite::Result<()> {
    let base = Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap();
    let now = format_timestamp(&base);

    for (i, (name, slug)) in CATEGORIES.iter().enumerate() {
        conn.execute(
            "INSERT OR IGNORE INTO categories (id, name, slug, display_order) VALUES (?1, ?2, ?3, ?4)",
            params![category_id(i + 1), name, slug, i as i64],
        )?;
    }

    for (i, (name, description)) in VERIFIED_ORGS.iter().enumerate() {
        conn.execute(
            "INSERT OR IGNORE INTO organizations (id, name, description, logo_url, verification_status, is_active, created_at) \
             VALUES (?1, ?2, ?3, ?4, 'verified', 1, ?5)",
            params![
                org_id(i + 1),
                name,
                description,
                format!("https://cdn.causeway.example/logos/org-{}.png", i + 1),
                now,
            ],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO opportunities (id, organization_id, title, description, schedule_type, \
             start_date, location_address, is_remote, time_commitment, created_at) \
             VALUES (?1, ?2, ?3, 'Help out on site', 'one-time', ?4, '123 Harbor Way', 0, '2 hours', ?5)",
            params![
                opportunity_id(i + 1),
                org_id(i + 1),
                format!("{name} volunteer day"),
                format_timestamp(&(base + Duration::days(7))),
                now,
            ],
        )?;
    }
    conn.execute(
        "INSERT OR IGNORE INTO organizations (id, name, description, verification_status, is_active, created_at) \
         VALUES (?1, 'Unvetted Collective', 'Awaiting verification', 'pending', 1, ?2)",
        params![org_id(90), now],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO organizations (id, name, description, verification_status, is_active, created_at) \
         VALUES (?1, 'Dormant Society', 'Deactivated account', 'verified', 0, ?2)",
        params![org_id(91), now],
    )?;

    for n in 0..published_posts {
        let org_index = n % VERIFIED_ORGS.len();
        let (org_name, _) = VERIFIED_ORGS[org_index];
        let created_at = format_timestamp(&(base - Duration::minutes((published_posts - n) as i64)));
        let media_type = if n % 3 == 2 { "image" } else { "video" };
        // Every third post links the organization's opportunity.
        let opportunity: Option<String> =
            (n % 3 == 0).then(|| opportunity_id(org_index + 1));
        conn.execute(
            "INSERT OR IGNORE INTO posts (id, organization_id, opportunity_id, title, description, media_type, status, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, 'published', ?7)",
            params![
                post_id(n + 1),
                org_id(org_index + 1),
                opportunity,
                format!("{org_name} update #{}", n + 1),
                "See what our volunteers accomplished this week.",
                media_type,
                created_at,
            ],
        )?;
        conn.execute(
            "INSERT OR IGNORE INTO post_media (id, post_id, media_url, thumbnail_url, duration_seconds, width, height, display_order) \
             VALUES (?1, ?2, ?3, ?4, ?5, 1080, 1920, 0)",
            params![
                media_id(n + 1),
                post_id(n + 1),
                format!("https://cdn.causeway.example/media/{}.mp4", n + 1),
                format!("https://cdn.causeway.example/media/{}.jpg", n + 1),
                if media_type == "video" { Some(30_i64) } else { None },
            ],
        )?;
    }

    // Ineligible content: a draft, a removed post, and posts owned by the
    // pending/inactive organizations.
    conn.execute(
        "INSERT OR IGNORE INTO posts (id, organization_id, title, media_type, status, created_at) \
         VALUES (?1, ?2, 'Unfinished draft', 'image', 'draft', ?3)",
        params![post_id(900), org_id(1), now],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO posts (id, organization_id, title, media_type, status, created_at) \
         VALUES (?1, ?2, 'Taken down', 'image', 'removed', ?3)",
        params![post_id(901), org_id(1), now],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO posts (id, organization_id, title, media_type, status, created_at) \
         VALUES (?1, ?2, 'From unvetted org', 'image', 'published', ?3)",
        params![post_id(902), org_id(90), now],
    )?;
    conn.execute(
        "INSERT OR IGNORE INTO posts (id, organization_id, title, media_type, status, created_at) \
         VALUES (?1, ?2, 'From dormant org', 'image', 'published', ?3)",
        params![post_id(903), org_id(91), now],
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use causeway_query::{execute_feed_query, FeedQueryRequest, QueryLimits};

    #[test]
    fn seeded_feed_serves_only_eligible_posts() {
        let conn = Connection::open_in_memory().expect("open");
        create_content_schema(&conn).expect("schema");
        seed_connection(&conn, 12).expect("seed");

        let mut total = 0;
        let mut cursor = None;
        loop {
            let page = execute_feed_query(
                &conn,
                &FeedQueryRequest {
                    cursor: cursor.clone(),
                    limit: 5,
                },
                &QueryLimits::default(),
            )
            .expect("page");
            total += page.entries.len();
            for entry in &page.entries {
                assert!(entry.organization.is_verified);
            }
            if !page.has_more {
                break;
            }
            cursor = page.next_cursor;
        }
        assert_eq!(total, 12, "drafts and ineligible orgs never surface");
    }

    #[test]
    fn seeding_twice_is_idempotent() {
        let conn = Connection::open_in_memory().expect("open");
        create_content_schema(&conn).expect("schema");
        seed_connection(&conn, 6).expect("first seed");
        seed_connection(&conn, 6).expect("second seed");

        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM posts WHERE status = 'published'", [], |r| {
                r.get(0)
            })
            .expect("count");
        assert_eq!(count, 6 + 2, "published demo posts plus two ineligible-org posts");
    }

    #[test]
    fn every_published_demo_post_has_media() {
        let conn = Connection::open_in_memory().expect("open");
        create_content_schema(&conn).expect("schema");
        seed_connection(&conn, 9).expect("seed");

        let orphans: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM posts p LEFT JOIN post_media m ON m.post_id = p.id \
                 WHERE p.status = 'published' AND p.id LIKE '00000054-0003-4000-8000-0000000000%' \
                 AND m.id IS NULL",
                [],
                |r| r.get(0),
            )
            .expect("count");
        assert_eq!(orphans, 0);
    }
}
