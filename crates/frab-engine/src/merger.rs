//! Talk merge.
//!
//! Applies one parsed talk to storage: resolves its type, track, and room,
//! creates or updates the talk row, attaches speakers additively, and
//! upserts the working time slot. For a pre-existing talk the tracked
//! content fields are diffed first and the old/new pairs reported; a talk
//! created by this run reports no changes.

use frab_client::ParsedTalk;
use frab_core::change::{FieldChange, TalkChanges};
use frab_core::entities::Talk;
use frab_db::error::DatabaseError;
use frab_db::repos::{rooms, slots, speakers, talks};
use serde_json::Value;

use crate::resolver;

/// Locale assumed when upstream supplies none.
const DEFAULT_LOCALE: &str = "en";

/// Merge one parsed talk into the event's working schedule.
///
/// Returns the tracked-field changes when the talk already existed, `None`
/// when this run created it.
///
/// # Errors
///
/// Returns `DatabaseError` if any lookup or write fails.
pub async fn merge_talk(
    conn: &libsql::Connection,
    event_id: &str,
    schedule_id: &str,
    room_name: &str,
    code: &str,
    parsed: &ParsedTalk,
) -> Result<Option<TalkChanges>, DatabaseError> {
    let sty =
        resolver::resolve_submission_type(conn, event_id, &parsed.type_name, parsed.duration_minutes)
            .await?;
    let track = resolver::resolve_track(conn, event_id, &parsed.track_name).await?;
    let room = rooms::get_or_create(conn, event_id, room_name).await?;
    let (talk, created) = talks::get_or_create(conn, event_id, code, &sty.id).await?;

    let title = non_empty(&parsed.title);
    let description = non_empty(&fold_description(&parsed.subtitle, &parsed.description));
    let abstract_text = non_empty(&parsed.abstract_text);
    let locale = if parsed.language.is_empty() {
        DEFAULT_LOCALE.to_string()
    } else {
        parsed.language.clone()
    };

    let changes = if created {
        None
    } else {
        Some(diff_tracked_fields(
            &talk,
            title.as_deref(),
            description.as_deref(),
            abstract_text.as_deref(),
            &locale,
            parsed.do_not_record,
        ))
    };

    talks::update_merged_fields(
        conn,
        &talk.id,
        &sty.id,
        &track.id,
        title.as_deref(),
        description.as_deref(),
        abstract_text.as_deref(),
        &locale,
        parsed.do_not_record,
    )
    .await?;

    for name in &parsed.persons {
        let speaker = speakers::get_or_create(conn, event_id, name).await?;
        speakers::add_to_talk(conn, &talk.id, &speaker.id).await?;
    }

    slots::upsert(conn, &talk.id, schedule_id, &room.id, parsed.start, parsed.end).await?;

    Ok(changes)
}

/// Fold a non-empty subtitle into the description, subtitle first.
fn fold_description(subtitle: &str, description: &str) -> String {
    if subtitle.is_empty() {
        description.to_string()
    } else {
        format!("{subtitle}\n{description}")
    }
}

fn non_empty(s: &str) -> Option<String> {
    if s.is_empty() { None } else { Some(s.to_string()) }
}

fn opt_value(v: Option<&str>) -> Value {
    v.map_or(Value::Null, |s| Value::String(s.to_string()))
}

fn diff_tracked_fields(
    old: &Talk,
    title: Option<&str>,
    description: Option<&str>,
    abstract_text: Option<&str>,
    locale: &str,
    do_not_record: bool,
) -> TalkChanges {
    let mut changes = TalkChanges::new();
    let mut push = |field: &str, old: Value, new: Value| {
        if old != new {
            changes.insert(field.to_string(), FieldChange { old, new });
        }
    };

    push("title", opt_value(old.title.as_deref()), opt_value(title));
    push(
        "description",
        opt_value(old.description.as_deref()),
        opt_value(description),
    );
    push(
        "abstract",
        opt_value(old.abstract_text.as_deref()),
        opt_value(abstract_text),
    );
    push(
        "content_locale",
        Value::String(old.content_locale.clone()),
        Value::String(locale.to_string()),
    );
    push(
        "do_not_record",
        Value::Bool(old.do_not_record),
        Value::Bool(do_not_record),
    );
    changes
}
