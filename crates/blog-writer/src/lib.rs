//! # blog-writer
//!
//! Agentic blog generation: a researcher gathers material, a writer drafts
//! the post with images, and a formatter forces the draft into a strict
//! content-block schema.
//!
//! ## Pipeline
//!
//! ```text
//! "Write about tidal energy"
//!        │
//!        ▼
//! Researcher   web_search, scrape_page        ─▶ research summary
//! Writer       stock_images, generate_image   ─▶ draft (schema requested)
//! Formatter    no tools, schema enforced      ─▶ BlogDocument
//!
//! BlogDocument { title, blocks: [text | image | text-text |
//!                                image-text | text-image | image-image] }
//! ```

pub mod agents;
pub mod config;
pub mod error;
pub mod integrations;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod store;
pub mod svckit;

pub use agents::{AgentContext, FormatterAgent, ResearcherAgent, WriterAgent};
pub use config::BlogSettings;
pub use error::{BlogError, Result};
pub use model::{BlockKind, BlogDocument, BlogId, BlogStatus, ContentBlock, EditBlog, NewBlog, StoredBlog};
pub use pipeline::{BlogPipeline, Integrations};
pub use store::{BlogStore, MemoryBlogStore};

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{GenerateImageTool, ScrapePageTool, StockImagesTool, WebSearchTool};
}

/// System prompt for the researcher agent
pub const RESEARCHER_PROMPT: &str = r"You are an excellent researcher. Your task is to research the provided URLs or topic.

## How to Research

1. If the prompt names URLs, use `scrape_page` on each of them
2. Otherwise use `web_search` to find good sources, then `scrape_page` the most relevant ones
3. Prefer recent, primary sources over aggregators

## Output

Finish with a research summary covering the key facts, figures and quotes, and
list the source URLs you relied on.";

/// System prompt for the writer agent; the blog schema is appended
pub const WRITER_PROMPT: &str = r"You are an excellent blog writer. Your task is to write a blog based on the user prompt and provided research.

You have access to 2 tools to get images for the blog:

- `stock_images` - Find stock photos for a query
- `generate_image` - Generate an image from a prompt

Only use image URLs returned by these tools. Return the response in the following JSON schema:";

/// System prompt for the formatter agent
pub const FORMATTER_PROMPT: &str =
    "Your task is to format the provided response from an LLM into a structured output.";
