use crate::clock::{Clock, day_key, is_same_day};
use crate::errors::StoreError;
use crate::models::{CompletionEvent, StatsRecord, TodayCount};
use crate::remote::RemoteSync;
use crate::storage::KeyValueStore;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};

pub const TOTAL_KEY: &str = "totalEscapes";
pub const TODAY_KEY: &str = "todayEscapes";

pub struct LocalStatsStore {
    store: Arc<dyn KeyValueStore>,
    remote: Option<RemoteSync>,
    clock: Clock,
    write_lock: Mutex<()>,
}

impl LocalStatsStore {
    pub fn new(store: Arc<dyn KeyValueStore>, remote: Option<RemoteSync>) -> Self {
        Self {
            store,
            remote,
            clock: Clock::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    pub async fn load(&self) -> StatsRecord {
        let today = self.clock.today();
        let total_count = self
            .store
            .get(TOTAL_KEY)
            .await
            .as_deref()
            .map(parse_count)
            .unwrap_or(0);
        let count = match self.stored_today().await {
            Some(stored) if is_same_day(&stored.date, today) => stored.count,
            _ => 0,
        };

        StatsRecord {
            total_count,
            today: TodayCount {
                date: day_key(today),
                count,
            },
        }
    }

    pub async fn record(&self, increment: u64) -> Result<StatsRecord, StoreError> {
        self.record_event(increment, CompletionEvent::completed()).await
    }

    pub async fn record_event(
        &self,
        increment: u64,
        event: CompletionEvent,
    ) -> Result<StatsRecord, StoreError> {
        let _guard = self.write_lock.lock().await;
        let current = self.load().await;
        let updated = StatsRecord {
            total_count: current.total_count.saturating_add(increment),
            today: TodayCount {
                date: current.today.date,
                count: current.today.count.saturating_add(increment),
            },
        };

        self.store
            .set_many(vec![
                (TOTAL_KEY.to_string(), updated.total_count.to_string()),
                (TODAY_KEY.to_string(), serde_json::to_string(&updated.today)?),
            ])
            .await?;
        info!(
            total = updated.total_count,
            today = updated.today.count,
            "recorded completed loop"
        );

        if let Some(remote) = &self.remote {
            remote.spawn_report(event);
        }
        Ok(updated)
    }

    async fn stored_today(&self) -> Option<TodayCount> {
        let raw = self.store.get(TODAY_KEY).await?;
        match serde_json::from_str(&raw) {
            Ok(today) => Some(today),
            Err(err) => {
                debug!("ignoring malformed {TODAY_KEY}: {err}");
                None
            }
        }
    }
}

fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    let digits = trimmed
        .find(|ch: char| !ch.is_ascii_digit())
        .map_or(trimmed, |end| &trimmed[..end]);
    digits.parse().unwrap_or(0)
}
