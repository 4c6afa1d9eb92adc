use crate::domain::repository::TodoRepository;
use crate::domain::todo::{timestamp_now, Todo, TodoFilter, TodoId, UpsertTodo};
use async_trait::async_trait;

/// Store failures never surface here: an unreadable store reads as empty and
/// a failed write leaves the response unchanged. Both are logged.
#[async_trait]
pub trait TodoService: Send + Sync + 'static {
    async fn list(&self, filter: TodoFilter) -> Vec<Todo>;
    async fn get(&self, id: &TodoId) -> Option<Todo>;
    /// Returns the whole collection after the write.
    async fn upsert(&self, input: UpsertTodo) -> Vec<Todo>;
    async fn delete(&self, id: &TodoId) -> bool;
}

#[derive(Clone)]
pub struct TodoServiceImpl<R: TodoRepository> {
    repo: R,
}

impl<R: TodoRepository> TodoServiceImpl<R> {
    pub fn new(repo: R) -> Self { Self { repo } }

    async fn load(&self) -> Vec<Todo> {
        self.repo.load().await.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "todo store unreadable, treating as empty");
            Vec::new()
        })
    }

    async fn save(&self, todos: &[Todo]) {
        if let Err(e) = self.repo.save(todos).await {
            tracing::warn!(error = %e, "todo store write failed");
        }
    }
}

#[async_trait]
impl<R: TodoRepository> TodoService for TodoServiceImpl<R> {
    async fn list(&self, filter: TodoFilter) -> Vec<Todo> {
        self.load().await.into_iter().filter(|t| filter.matches(t)).collect()
    }

    async fn get(&self, id: &TodoId) -> Option<Todo> {
        self.load().await.into_iter().find(|t| &t.id == id)
    }

    async fn upsert(&self, input: UpsertTodo) -> Vec<Todo> {
        let mut todos = self.load().await;
        let now = timestamp_now();
        match todos.iter().position(|t| t.id == input.id) {
            Some(index) => {
                tracing::info!(id = %input.id, "updating todo");
                todos[index].apply(input, &now);
            }
            None => {
                let todo = Todo::create(input, &now);
                tracing::info!(id = %todo.id, "creating todo");
                todos.push(todo);
            }
        }
        self.save(&todos).await;
        todos
    }

    async fn delete(&self, id: &TodoId) -> bool {
        let mut todos = self.load().await;
        let Some(index) = todos.iter().position(|t| &t.id == id) else { return false };
        todos.remove(index);
        tracing::info!(%id, "deleted todo");
        self.save(&todos).await;
        true
    }
}
