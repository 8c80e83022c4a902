//! Blog Pipeline
//!
//! ```text
//! prompt ─▶ Researcher ─▶ research ─▶ Writer ─▶ draft ─▶ Formatter ─▶ BlogDocument ─▶ store
//! ```
//!
//! Stages run one after another and the first failure ends the run. Nothing
//! is stored unless the formatter succeeds.

use std::sync::Arc;

use crate::agents::{AgentContext, FormatterAgent, ResearcherAgent, WriterAgent};
use crate::error::{BlogError, Result};
use crate::integrations::{
    ImageGenerator, MockImageGenerator, MockScrapeClient, MockSearchClient, MockStockImageClient, ScrapeClient,
    SearchClient, StockImageClient,
};
use crate::model::{EditBlog, NewBlog, StoredBlog};
use crate::store::BlogStore;

/// The external services behind the agents' tools
#[derive(Clone)]
pub struct Integrations {
    pub search: Arc<dyn SearchClient>,
    pub scraper: Arc<dyn ScrapeClient>,
    pub stock_images: Arc<dyn StockImageClient>,
    pub image_generator: Arc<dyn ImageGenerator>,
}

impl Integrations {
    /// Offline integrations returning canned data
    pub fn mock() -> Self {
        Self {
            search: Arc::new(MockSearchClient::new()),
            scraper: Arc::new(MockScrapeClient::new()),
            stock_images: Arc::new(MockStockImageClient::new()),
            image_generator: Arc::new(MockImageGenerator::new()),
        }
    }
}

/// Generates and edits blogs
pub struct BlogPipeline {
    researcher: ResearcherAgent,
    writer: WriterAgent,
    formatter: FormatterAgent,
    store: Arc<dyn BlogStore>,
    owner_id: String,
}

impl BlogPipeline {
    pub fn new(ctx: &AgentContext, integrations: Integrations, store: Arc<dyn BlogStore>) -> Result<Self> {
        Ok(Self {
            researcher: ResearcherAgent::new(ctx, integrations.search, integrations.scraper)?,
            writer: WriterAgent::new(ctx, integrations.stock_images, integrations.image_generator)?,
            formatter: FormatterAgent::new(ctx),
            store,
            owner_id: ctx.settings.owner_id.clone(),
        })
    }

    /// Research, write and format a blog for the prompt, then store it as a draft
    pub async fn generate(&self, prompt: &str) -> Result<StoredBlog> {
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(BlogError::Validation("prompt should not be empty".into()));
        }

        let research = self.researcher.invoke(prompt).await?;
        tracing::info!(chars = research.len(), "Research complete");

        let draft = self.writer.invoke(&research).await?;
        tracing::info!(chars = draft.len(), "Draft complete");

        let document = self.formatter.invoke(&draft).await?;
        tracing::info!(title = %document.title, blocks = document.blocks.len(), "Blog formatted");

        let blog = self.store.create(NewBlog::draft(&self.owner_id, document)).await?;
        tracing::info!(blog_id = %blog.id, "Blog created");
        Ok(blog)
    }

    /// Replace title and content of an existing blog
    pub async fn edit(&self, id: &str, edit: EditBlog) -> Result<StoredBlog> {
        let mut blog = self
            .store
            .find_by_id(id)
            .await?
            .ok_or_else(|| BlogError::NotFound(id.to_string()))?;

        blog.apply_edit(edit);
        let saved = self.store.save(blog).await?;
        tracing::info!(blog_id = %saved.id, "Blog edited");
        Ok(saved)
    }

    pub fn store(&self) -> &Arc<dyn BlogStore> {
        &self.store
    }
}
