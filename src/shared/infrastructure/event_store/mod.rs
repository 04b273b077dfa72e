use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("version mismatch: expected {expected}, actual {actual}")]
    VersionMismatch { expected: i64, actual: i64 },

    #[error("backend error: {0}")]
    Backend(String),
}

#[derive(Debug, Clone)]
pub struct LoadedStream<E> {
    pub events: Vec<E>,
    pub version: i64,
}

/// An event as it sits in the global log. `version` is the stream version
/// after the event was appended, `position` is its offset in the log.
#[derive(Debug, Clone)]
pub struct RecordedEvent<E> {
    pub position: u64,
    pub stream_id: String,
    pub version: i64,
    pub event: E,
}

#[async_trait]
pub trait EventStore<Event: Clone + Send + Sync + 'static>: Send + Sync {
    async fn load(&self, stream_id: &str) -> Result<LoadedStream<Event>, EventStoreError>;
    async fn append(
        &self,
        stream_id: &str,
        expected_version: i64,
        new_events: &[Event],
    ) -> Result<(), EventStoreError>;
}

/// Read side of the store, used by projectors to follow every stream in append order.
#[async_trait]
pub trait EventLog<Event: Clone + Send + Sync + 'static>: Send + Sync {
    async fn read_from(
        &self,
        position: u64,
        limit: usize,
    ) -> Result<Vec<RecordedEvent<Event>>, EventStoreError>;
}

pub mod in_memory;
