//! Blog generator HTTP Server
//!
//! Axum-based server exposing the research / write / format pipeline over a
//! small REST API.

mod handlers;
mod state;

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use agent_core::{LlmProvider, TracingObserver};
use agent_runtime::{OpenAiConfig, OpenAiProvider};
use blog_writer::{
    integrations::{
        FalClient, FalConfig, FirecrawlClient, FirecrawlConfig, PexelsClient, PexelsConfig, TavilyClient,
        TavilyConfig,
    },
    AgentContext, BlogPipeline, BlogSettings, Integrations, MemoryBlogStore,
};

use crate::handlers::{edit_blog, generate_from_prompt, health_check};
use crate::state::AppState;

/// Routes and middleware around the shared state
fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/blog/generateFromPrompt", post(generate_from_prompt))
        .route("/blog/{blog_id}", patch(edit_blog))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(cors))
        .with_state(state)
}

fn integrations_from_env() -> anyhow::Result<Integrations> {
    Ok(Integrations {
        search: Arc::new(TavilyClient::new(TavilyConfig::from_env()?)?),
        scraper: Arc::new(FirecrawlClient::new(FirecrawlConfig::from_env()?)?),
        stock_images: Arc::new(PexelsClient::new(PexelsConfig::from_env()?)?),
        image_generator: Arc::new(FalClient::new(FalConfig::from_env()?)?),
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Initialize LLM provider
    let openai = OpenAiConfig::from_env()?;
    tracing::info!(base_url = %openai.base_url, "Using OpenAI-compatible provider");
    let provider: Arc<dyn LlmProvider> = Arc::new(OpenAiProvider::new(openai)?);

    match provider.health_check().await {
        Ok(true) => tracing::info!("✓ Model provider reachable"),
        Ok(false) | Err(_) => tracing::warn!("⚠ Model provider not reachable - generation will fail"),
    }

    let settings = BlogSettings::from_env();
    tracing::info!(
        model = %settings.model,
        max_iterations = settings.max_iterations,
        owner = %settings.owner_id,
        "Blog settings loaded"
    );

    let ctx = AgentContext::new(provider.clone(), settings).with_observer(Arc::new(TracingObserver));
    let store = Arc::new(MemoryBlogStore::new());
    let pipeline = BlogPipeline::new(&ctx, integrations_from_env()?, store)?;

    let state = AppState {
        pipeline: Arc::new(pipeline),
        provider,
    };
    let app = build_router(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 blog server running on http://{}", addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET   /health                  - Health check");
    tracing::info!("  POST  /blog/generateFromPrompt - Generate a blog from a prompt");
    tracing::info!("  PATCH /blog/{{blogId}}           - Replace title and content");

    axum::serve(listener, app).await?;

    Ok(())
}
