//! Speaker repository.
//!
//! Speakers are matched by display name truncated to the stored maximum.
//! Unmatched names mint a new speaker with a synthesized placeholder
//! contact and an event profile. Talk membership is additive only.

use frab_core::entities::{Speaker, truncate_name};

use crate::error::DatabaseError;
use crate::generate_id;

fn row_to_speaker(row: &libsql::Row) -> Result<Speaker, DatabaseError> {
    Ok(Speaker {
        id: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        email: row.get::<String>(2)?,
    })
}

/// Find a speaker by truncated display name.
pub async fn find_by_name(
    conn: &libsql::Connection,
    name: &str,
) -> Result<Option<Speaker>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT id, name, email FROM speakers WHERE name = ?1",
            [truncate_name(name)],
        )
        .await?;
    match rows.next().await? {
        Some(row) => Ok(Some(row_to_speaker(&row)?)),
        None => Ok(None),
    }
}

/// Get the speaker with this name, minting one (with a placeholder contact
/// and an event profile) when no match exists. Pre-existing speakers also
/// get a profile for the event if they lack one.
///
/// # Errors
///
/// Returns `DatabaseError` if any lookup or insert fails.
pub async fn get_or_create(
    conn: &libsql::Connection,
    event_id: &str,
    name: &str,
) -> Result<Speaker, DatabaseError> {
    let stored_name = truncate_name(name);
    if let Some(speaker) = find_by_name(conn, stored_name).await? {
        ensure_profile(conn, &speaker.id, event_id).await?;
        return Ok(speaker);
    }

    let id = generate_id(conn, "spk").await?;
    let email = format!("{stored_name}@localhost");
    conn.execute(
        "INSERT INTO speakers (id, name, email) VALUES (?1, ?2, ?3)",
        libsql::params![id.as_str(), stored_name, email.as_str()],
    )
    .await?;
    ensure_profile(conn, &id, event_id).await?;
    Ok(Speaker {
        id,
        name: stored_name.to_string(),
        email,
    })
}

/// Attach a speaker to an event, once.
async fn ensure_profile(
    conn: &libsql::Connection,
    speaker_id: &str,
    event_id: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO speaker_profiles (speaker_id, event_id) VALUES (?1, ?2)",
        libsql::params![speaker_id, event_id],
    )
    .await?;
    Ok(())
}

/// Add a speaker to a talk's speaker set. Membership is additive — the
/// pipeline never removes speakers a run does not re-confirm.
pub async fn add_to_talk(
    conn: &libsql::Connection,
    talk_id: &str,
    speaker_id: &str,
) -> Result<(), DatabaseError> {
    conn.execute(
        "INSERT OR IGNORE INTO talk_speakers (talk_id, speaker_id) VALUES (?1, ?2)",
        libsql::params![talk_id, speaker_id],
    )
    .await?;
    Ok(())
}

/// Speakers attached to a talk, ordered by name.
pub async fn list_for_talk(
    conn: &libsql::Connection,
    talk_id: &str,
) -> Result<Vec<Speaker>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT s.id, s.name, s.email FROM speakers s
             JOIN talk_speakers ts ON ts.speaker_id = s.id
             WHERE ts.talk_id = ?1 ORDER BY s.name",
            [talk_id],
        )
        .await?;
    let mut results = Vec::new();
    while let Some(row) = rows.next().await? {
        results.push(row_to_speaker(&row)?);
    }
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::{submission_types, talks};
    use crate::test_support::helpers::test_db_with_event;

    #[tokio::test]
    async fn mints_with_placeholder_contact() {
        let (db, event) = test_db_with_event().await;
        let speaker = get_or_create(db.conn(), &event.id, "Ada Lovelace")
            .await
            .unwrap();
        assert_eq!(speaker.email, "Ada Lovelace@localhost");
    }

    #[tokio::test]
    async fn long_names_match_on_truncation() {
        let (db, event) = test_db_with_event().await;
        let long_a = format!("{}{}", "x".repeat(60), "first");
        let long_b = format!("{}{}", "x".repeat(60), "second");

        let a = get_or_create(db.conn(), &event.id, &long_a).await.unwrap();
        let b = get_or_create(db.conn(), &event.id, &long_b).await.unwrap();
        assert_eq!(a.id, b.id, "names identical after truncation are one speaker");
    }

    #[tokio::test]
    async fn profile_created_once_per_event() {
        let (db, event) = test_db_with_event().await;
        get_or_create(db.conn(), &event.id, "Ada").await.unwrap();
        get_or_create(db.conn(), &event.id, "Ada").await.unwrap();

        let mut rows = db
            .conn()
            .query(
                "SELECT COUNT(*) FROM speaker_profiles WHERE event_id = ?1",
                [event.id.as_str()],
            )
            .await
            .unwrap();
        let count = rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap();
        assert_eq!(count, 1);
    }

    #[tokio::test]
    async fn talk_membership_is_additive() {
        let (db, event) = test_db_with_event().await;
        let sty = submission_types::create(db.conn(), &event.id, "talk", 30)
            .await
            .unwrap();
        let (talk, _) = talks::get_or_create(db.conn(), &event.id, "ABC", &sty.id)
            .await
            .unwrap();

        let ada = get_or_create(db.conn(), &event.id, "Ada").await.unwrap();
        let grace = get_or_create(db.conn(), &event.id, "Grace").await.unwrap();
        add_to_talk(db.conn(), &talk.id, &ada.id).await.unwrap();
        add_to_talk(db.conn(), &talk.id, &grace.id).await.unwrap();
        // Re-adding an existing speaker is a no-op, not an error.
        add_to_talk(db.conn(), &talk.id, &ada.id).await.unwrap();

        let speakers = list_for_talk(db.conn(), &talk.id).await.unwrap();
        assert_eq!(speakers.len(), 2);
    }
}
