//! Service Kit - Agent Tools
//!
//! Tools that implement `agent_core::Tool` for the researcher and writer
//! agents. Each wraps one integration client.

mod generate_image;
mod scrape_page;
mod stock_images;
mod web_search;

pub use generate_image::{GenerateImageTool, GENERATE_IMAGE};
pub use scrape_page::{ScrapePageTool, SCRAPE_PAGE};
pub use stock_images::{StockImagesTool, STOCK_IMAGES};
pub use web_search::{WebSearchTool, WEB_SEARCH};
