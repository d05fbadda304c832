//! Shared test utilities for frab-db tests.

pub(crate) mod helpers {
    use frab_core::entities::Event;

    use crate::FrabDb;
    use crate::repos::events;

    /// Create an in-memory database for testing.
    pub async fn test_db() -> FrabDb {
        FrabDb::open_local(":memory:").await.unwrap()
    }

    /// Create an in-memory database with one seeded event.
    pub async fn test_db_with_event() -> (FrabDb, Event) {
        let db = test_db().await;
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
}
