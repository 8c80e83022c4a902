//! Blog Persistence
//!
//! The store is the only state shared between pipeline runs. A save replaces
//! the whole record.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::Result;
use crate::model::{BlogId, NewBlog, StoredBlog};

/// Blog store trait for persistence
#[async_trait]
pub trait BlogStore: Send + Sync {
    /// Persist a new blog, assigning id and timestamps
    async fn create(&self, blog: NewBlog) -> Result<StoredBlog>;

    /// Load a blog by id
    async fn find_by_id(&self, id: &str) -> Result<Option<StoredBlog>>;

    /// Replace a stored blog
    async fn save(&self, blog: StoredBlog) -> Result<StoredBlog>;
}

/// In-memory blog store (for development/testing)
#[derive(Default)]
pub struct MemoryBlogStore {
    blogs: RwLock<HashMap<BlogId, StoredBlog>>,
}

impl MemoryBlogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored blogs
    pub async fn len(&self) -> usize {
        self.blogs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.blogs.read().await.is_empty()
    }
}

#[async_trait]
impl BlogStore for MemoryBlogStore {
    async fn create(&self, blog: NewBlog) -> Result<StoredBlog> {
        let stored = StoredBlog::from_new(blog);
        self.blogs.write().await.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<StoredBlog>> {
        Ok(self.blogs.read().await.get(&BlogId::from_string(id)).cloned())
    }

    async fn save(&self, blog: StoredBlog) -> Result<StoredBlog> {
        self.blogs.write().await.insert(blog.id.clone(), blog.clone());
        Ok(blog)
    }
}
