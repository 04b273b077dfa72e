use async_trait::async_trait;

/// Tracks the last processed log position per projector.
#[async_trait]
pub trait WatermarkRepository: Send + Sync {
    async fn get(&self, name: &str) -> anyhow::Result<Option<String>>;
    async fn set(&self, name: &str, last: &str) -> anyhow::Result<()>;
}

pub mod in_memory;
