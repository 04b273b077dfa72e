// In memory implementation of the EventStore and EventLog ports.
//
// Purpose
// - Run the service and its tests without a database.
//
// Responsibilities
// - Store events per stream and in one global log.
// - Enforce optimistic concurrency by checking the expected version.

use crate::shared::infrastructure::event_store::{
    EventLog, EventStore, EventStoreError, LoadedStream, RecordedEvent,
};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;

struct Streams<Event> {
    by_stream: HashMap<String, Vec<Event>>,
    log: Vec<RecordedEvent<Event>>,
}

pub struct InMemoryEventStore<Event: Clone + Send + Sync + 'static> {
    inner: RwLock<Streams<Event>>,
    is_offline: bool,
    delay_append_ms: AtomicU64,
}

impl<Event: Clone + Send + Sync + 'static> Default for InMemoryEventStore<Event> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Event: Clone + Send + Sync + 'static> InMemoryEventStore<Event> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Streams {
                by_stream: HashMap::new(),
                log: Vec::new(),
            }),
            is_offline: false,
            delay_append_ms: AtomicU64::new(0),
        }
    }

    pub fn toggle_offline(&mut self) {
        self.is_offline = !self.is_offline;
    }

    /// Sleep before every append. Lets tests interleave two writers between load and append.
    pub fn set_delay_append_ms(&self, ms: u64) {
        self.delay_append_ms.store(ms, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> Result<(), EventStoreError> {
        if self.is_offline {
            return Err(EventStoreError::Backend("Event store offline".into()));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<Event> EventStore<Event> for InMemoryEventStore<Event>
where
    Event: Clone + Send + Sync + 'static,
{
    async fn load(&self, stream_id: &str) -> Result<LoadedStream<Event>, EventStoreError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        let events = guard.by_stream.get(stream_id).cloned().unwrap_or_default();
        let version = events.len() as i64;
        Ok(LoadedStream { events, version })
    }

    async fn append(
        &self,
        stream_id: &str,
        expected_version: i64,
        new_events: &[Event],
    ) -> Result<(), EventStoreError> {
        self.ensure_online()?;
        let delay = self.delay_append_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }

        let mut guard = self.inner.write().await;
        let Streams { by_stream, log } = &mut *guard;
        let entry = by_stream.entry(stream_id.to_string()).or_default();
        let actual = entry.len() as i64;
        if actual != expected_version {
            return Err(EventStoreError::VersionMismatch {
                expected: expected_version,
                actual,
            });
        }
        for event in new_events {
            entry.push(event.clone());
            log.push(RecordedEvent {
                position: log.len() as u64,
                stream_id: stream_id.to_string(),
                version: entry.len() as i64,
                event: event.clone(),
            });
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl<Event> EventLog<Event> for InMemoryEventStore<Event>
where
    Event: Clone + Send + Sync + 'static,
{
    async fn read_from(
        &self,
        position: u64,
        limit: usize,
    ) -> Result<Vec<RecordedEvent<Event>>, EventStoreError> {
        self.ensure_online()?;
        let guard = self.inner.read().await;
        Ok(guard
            .log
            .iter()
            .skip(position as usize)
            .take(limit)
            .cloned()
            .collect())
    }
}
