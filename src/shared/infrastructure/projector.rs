// Projector runner: follows the global event log, hands each recorded event
// to a projection, and advances the watermark after every event.
//
// A failed event stops the run. The watermark still points at the last
// applied event, so the next run resumes with the failed one.

use crate::shared::infrastructure::event_store::{EventLog, RecordedEvent};
use crate::shared::infrastructure::watermark::WatermarkRepository;
use async_trait::async_trait;
use std::marker::PhantomData;
use std::sync::Arc;
use tokio::sync::Mutex;

const DEFAULT_BATCH_SIZE: usize = 256;

#[async_trait]
pub trait Projection<Event>: Send + Sync {
    async fn apply(&self, recorded: &RecordedEvent<Event>) -> anyhow::Result<()>;
}

pub struct Projector<Event, TLog, TProjection, TWatermarkRepository>
where
    Event: Clone + Send + Sync + 'static,
    TLog: EventLog<Event>,
    TProjection: Projection<Event>,
    TWatermarkRepository: WatermarkRepository,
{
    name: String,
    log: Arc<TLog>,
    projection: Arc<TProjection>,
    watermark_repository: Arc<TWatermarkRepository>,
    batch_size: usize,
    running: Mutex<()>,
    _event: PhantomData<fn() -> Event>,
}

impl<Event, TLog, TProjection, TWatermarkRepository>
    Projector<Event, TLog, TProjection, TWatermarkRepository>
where
    Event: Clone + Send + Sync + 'static,
    TLog: EventLog<Event>,
    TProjection: Projection<Event>,
    TWatermarkRepository: WatermarkRepository,
{
    pub fn new(
        name: impl Into<String>,
        log: Arc<TLog>,
        projection: Arc<TProjection>,
        watermark_repository: Arc<TWatermarkRepository>,
    ) -> Self {
        Self {
            name: name.into(),
            log,
            projection,
            watermark_repository,
            batch_size: DEFAULT_BATCH_SIZE,
            running: Mutex::new(()),
            _event: PhantomData,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply every event recorded after the watermark. Returns how many were applied.
    pub async fn catch_up(&self) -> anyhow::Result<usize> {
        let _running = self.running.lock().await;
        let mut position = match self.watermark_repository.get(&self.name).await? {
            Some(last) => last.parse::<u64>()? + 1,
            None => 0,
        };
        let mut applied = 0;
        loop {
            let batch = self.log.read_from(position, self.batch_size).await?;
            if batch.is_empty() {
                break;
            }
            for recorded in &batch {
                self.projection.apply(recorded).await?;
                self.watermark_repository
                    .set(&self.name, &recorded.position.to_string())
                    .await?;
                position = recorded.position + 1;
                applied += 1;
            }
        }
        if applied > 0 {
            tracing::debug!(projector = %self.name, applied, "projector caught up");
        }
        Ok(applied)
    }
}
