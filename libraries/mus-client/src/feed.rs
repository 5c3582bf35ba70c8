//! Catalog change polling.

use crate::client::MusClient;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

pub(crate) fn spawn_version_poller(client: MusClient, period: Duration) -> watch::Receiver<u64> {
    let (tx, rx) = watch::channel(0);
    tokio::spawn(poll_versions(client, period, tx));
    rx
}

async fn poll_versions(client: MusClient, period: Duration, tx: watch::Sender<u64>) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = tx.closed() => break,
            _ = ticker.tick() => {}
        }

        // Any version other than the one last forwarded counts, the first
        // poll included: the subscriber's listing may predate it.
        match client.catalog_version().await {
            Ok(version) => {
                let changed = tx.send_if_modified(|current| {
                    if *current == version {
                        return false;
                    }
                    *current = version;
                    true
                });
                if changed {
                    debug!(version, "Catalog changed");
                }
            }
            Err(e) => warn!(error = %e, "Catalog version poll failed"),
        }
    }

    debug!("Catalog subscription closed");
}
