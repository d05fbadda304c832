//! Shared test fixtures for the pipeline tests.

use chrono::{NaiveDate, NaiveDateTime};
use frab_client::ParsedTalk;
use frab_core::entities::Event;
use frab_db::FrabDb;
use frab_db::repos::events;

/// In-memory database seeded with one syncable event.
pub(crate) async fn test_db_with_event() -> (FrabDb, Event) {
    let db = FrabDb::open_local(":memory:").await.unwrap();
    let event = events::create(
        db.conn(),
        "democon",
        "DemoCon",
        Some("https://upstream.example/schedule.xml"),
        None,
    )
    .await
    .unwrap();
    (db, event)
}

fn at(time: &str) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 1)
        .unwrap()
        .and_time(time.parse().unwrap())
}

/// A fully-populated parsed talk for direct merger and releaser tests.
pub(crate) fn parsed_talk(id: &str, title: &str) -> ParsedTalk {
    ParsedTalk {
        id: id.to_string(),
        guid: format!("guid-{id}"),
        start: at("09:00:00"),
        end: at("09:30:00"),
        duration_minutes: 30,
        type_name: "talk".to_string(),
        track_name: "Systems".to_string(),
        title: title.to_string(),
        subtitle: String::new(),
        description: "Details".to_string(),
        abstract_text: "Abstract".to_string(),
        language: "en".to_string(),
        do_not_record: false,
        persons: vec!["Ada Lovelace".to_string()],
    }
}

/// One `<event>` element for [`schedule_doc`].
pub(crate) fn talk_xml(id: &str, guid: &str, title: &str) -> String {
    format!(
        r#"<event id="{id}" guid="{guid}">
  <date>2024-01-01</date>
  <start>09:00</start>
  <duration>00:30</duration>
  <type>talk</type>
  <track>Systems</track>
  <title>{title}</title>
  <subtitle></subtitle>
  <description>Details</description>
  <abstract>Abstract</abstract>
  <language>en</language>
  <persons><person>Ada Lovelace</person></persons>
</event>"#
    )
}

/// A complete one-day, one-room schedule document.
pub(crate) fn schedule_doc(version: &str, talks: &[String]) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<schedule>
  <version>{version}</version>
  <day date="2024-01-01" index="1">
    <room name="Main Hall">
{}
    </room>
  </day>
</schedule>"#,
        talks.join("\n")
    )
}
