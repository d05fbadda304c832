//! `frabsync event` subcommands.

use anyhow::Context;
use frab_db::FrabDb;
use frab_db::repos::events;

use crate::cli::EventCommands;

pub async fn handle(action: &EventCommands, db: &FrabDb) -> anyhow::Result<()> {
    match action {
        EventCommands::Add {
            slug,
            name,
            upstream_url,
            interval_minutes,
        } => {
            let event = events::create(
                db.conn(),
                slug,
                name,
                upstream_url.as_deref(),
                *interval_minutes,
            )
            .await
            .with_context(|| format!("failed to create event '{slug}'"))?;
            println!("created event '{}' ({})", event.slug, event.id);
            Ok(())
        }
        EventCommands::List => list(db).await,
        EventCommands::SetUpstream {
            slug,
            url,
            interval_minutes,
        } => {
            let event = events::get_by_slug(db.conn(), slug)
                .await?
                .with_context(|| format!("no event with slug '{slug}'"))?;
            events::set_upstream(db.conn(), &event.id, url, *interval_minutes).await?;
            println!("event '{slug}' now syncs from {url}");
            Ok(())
        }
    }
}

async fn list(db: &FrabDb) -> anyhow::Result<()> {
    let all = events::list(db.conn()).await?;
    if all.is_empty() {
        println!("no events configured");
        return Ok(());
    }
    for event in all {
        let upstream = event.upstream_url.as_deref().unwrap_or("-");
        let last_sync = event
            .last_sync
            .map_or_else(|| "never".to_string(), |t| t.to_rfc3339());
        println!(
            "{}  {}  every {}m  upstream: {}  last sync: {}",
            event.slug,
            event.name,
            event.interval_minutes(),
            upstream,
            last_sync
        );
    }
    Ok(())
}
