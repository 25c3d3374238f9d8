//! Background tasks
//!
//! The periodic SLA refresh: drifts the metrics on a fixed interval and
//! lets the evaluator raise alerts on band crossings. Stoppable through
//! a [`CancellationToken`].

use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio_util::sync::CancellationToken;

use crate::core::ServerState;

/// Periodic SLA refresh scheduler
pub struct SlaRefreshScheduler {
    state: ServerState,
    shutdown: CancellationToken,
}

impl SlaRefreshScheduler {
    pub fn new(state: ServerState, shutdown: CancellationToken) -> Self {
        Self { state, shutdown }
    }

    /// Main loop: tick, recompute, repeat until cancelled
    pub async fn run(self) {
        let period = Duration::from_secs(self.state.config.sla_refresh_secs.max(1));
        let mut interval = tokio::time::interval(period);
        // the first tick fires immediately; skip it so startup metrics
        // stay at their seeded values until one full period has passed
        interval.tick().await;

        let mut rng = StdRng::from_entropy();
        tracing::info!("SLA refresh scheduler started (period {:?})", period);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    self.state.sla.recompute(&mut rng);
                    tracing::debug!(
                        compliance = self.state.sla.compliance_score(),
                        "SLA metrics refreshed"
                    );
                }
                _ = self.shutdown.cancelled() => {
                    tracing::info!("SLA refresh scheduler received shutdown signal");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::storage::Storage;

    fn test_state() -> ServerState {
        let config = Config::with_overrides("/tmp/unused", 0);
        ServerState::with_storage(&config, Storage::open_in_memory().unwrap()).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_refreshes_on_each_tick() {
        let mut state = test_state();
        state.config.sla_refresh_secs = 5;
        let before = state.sla.metrics();

        let shutdown = CancellationToken::new();
        let scheduler = SlaRefreshScheduler::new(state.clone(), shutdown.clone());
        let handle = tokio::spawn(scheduler.run());

        tokio::time::sleep(Duration::from_secs(11)).await;
        shutdown.cancel();
        handle.await.unwrap();

        // two ticks elapsed; at least one metric must have drifted
        let after = state.sla.metrics();
        assert_ne!(before, after);
    }

    #[tokio::test(start_paused = true)]
    async fn scheduler_stops_after_cancellation() {
        let mut state = test_state();
        state.config.sla_refresh_secs = 5;

        let shutdown = CancellationToken::new();
        let scheduler = SlaRefreshScheduler::new(state.clone(), shutdown.clone());
        let handle = tokio::spawn(scheduler.run());

        shutdown.cancel();
        handle.await.unwrap();

        let frozen = state.sla.metrics();
        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(frozen, state.sla.metrics());
    }
}
