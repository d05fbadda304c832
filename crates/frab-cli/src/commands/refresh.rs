//! `frabsync refresh` — one manual refresh run.

use std::time::Duration;

use frab_client::UpstreamClient;
use frab_config::FrabConfig;
use frab_core::change::ChangeMap;
use frab_db::FrabDb;

pub async fn handle(db: &FrabDb, config: &FrabConfig, slug: &str) -> anyhow::Result<()> {
    let client = UpstreamClient::new(
        &config.sync.user_agent,
        Duration::from_secs(config.sync.fetch_timeout_secs),
    );

    let outcome = frab_engine::refresh_by_slug(&client, db, slug).await?;
    if outcome.unchanged() {
        println!("'{slug}': upstream document unchanged");
        return Ok(());
    }

    if let Some(result) = &outcome.result {
        let changes: ChangeMap = serde_json::from_str(&result.changes).unwrap_or_default();
        println!("'{slug}': merged, {} talk(s) changed", changes.len());
    }
    match &outcome.released {
        Some(schedule) => println!(
            "released schedule version '{}'",
            schedule.version.as_deref().unwrap_or("?")
        ),
        None => println!("schedule version unchanged, no release"),
    }
    Ok(())
}
