//! `frabsync daemon` — the foreground sync loop.

use std::time::Duration;

use frab_client::UpstreamClient;
use frab_config::FrabConfig;
use frab_db::FrabDb;
use frab_engine::trigger;

pub async fn handle(
    db: &FrabDb,
    config: &FrabConfig,
    tick_secs: Option<u64>,
) -> anyhow::Result<()> {
    let mut sync = config.sync.clone();
    if let Some(secs) = tick_secs {
        sync.tick_secs = secs;
    }

    let client = UpstreamClient::new(
        &sync.user_agent,
        Duration::from_secs(sync.fetch_timeout_secs),
    );

    trigger::run(db, &client, &sync).await;
    Ok(())
}
