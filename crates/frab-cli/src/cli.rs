//! Command-line surface.

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "frabsync", version, about = "Mirror conference schedules from frab upstreams")]
pub struct Cli {
    /// Only log errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Log debug detail.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Manage mirrored events.
    Event {
        #[command(subcommand)]
        action: EventCommands,
    },
    /// Refresh one event from its upstream now.
    Refresh {
        /// Slug of the event to refresh.
        slug: String,
    },
    /// Run the periodic sync loop in the foreground.
    Daemon {
        /// Override the configured tick cadence.
        #[arg(long)]
        tick_secs: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventCommands {
    /// Register a new event.
    Add {
        /// Unique slug for the event.
        slug: String,
        /// Display name.
        name: String,
        /// Upstream schedule document URL.
        #[arg(long)]
        upstream_url: Option<String>,
        /// Per-event sync interval in minutes.
        #[arg(long)]
        interval_minutes: Option<i64>,
    },
    /// List all managed events.
    List,
    /// Point an existing event at an upstream URL.
    SetUpstream {
        /// Slug of the event to update.
        slug: String,
        /// Upstream schedule document URL.
        url: String,
        /// Per-event sync interval in minutes.
        #[arg(long)]
        interval_minutes: Option<i64>,
    },
}
