use async_trait::async_trait;
use super::todo::Todo;

/// Whole-collection storage: every read is a full load, every write a full save.
#[async_trait]
pub trait TodoRepository: Send + Sync + 'static {
    async fn init(&self) -> anyhow::Result<()>;
    async fn load(&self) -> anyhow::Result<Vec<Todo>>;
    async fn save(&self, todos: &[Todo]) -> anyhow::Result<()>;
}
