use std::collections::HashMap;
use std::sync::Arc;

use agent_core::mock::ScriptedProvider;
use agent_core::provider::{Completion, ResponseMode};
use agent_core::{AgentEvent, AgentObserver, Role, ToolCall};
use blog_writer::svckit::{STOCK_IMAGES, WEB_SEARCH};
use blog_writer::{
    AgentContext, BlogError, BlogPipeline, BlogSettings, BlogStatus, BlogStore, ContentBlock, EditBlog,
    Integrations, MemoryBlogStore,
};
use serde_json::json;
use std::sync::Mutex;

const PHOTO_URL: &str = "https://images.pexels.com/photos/tidal-energy-1.jpeg";

#[derive(Default)]
struct RecordingObserver {
    events: Mutex<Vec<String>>,
}

impl AgentObserver for RecordingObserver {
    fn on_event(&self, event: &AgentEvent) {
        let label = match event {
            AgentEvent::ModelTurn { agent, .. } => format!("{agent}:turn"),
            AgentEvent::ToolExecuted { agent, tool, .. } => format!("{agent}:{tool}"),
            AgentEvent::Finished { agent, success, .. } => format!("{agent}:finished:{success}"),
        };
        self.events.lock().unwrap().push(label);
    }
}

fn script() -> Vec<Completion> {
    let draft = json!({
        "title": "Tidal Energy",
        "blocks": [
            {"type": "text", "text": "The tides are the most predictable renewable."},
            {"type": "image-text", "image": PHOTO_URL, "imageAlt": "tidal energy photo 1", "text": "Turbines under water."}
        ]
    });

    vec![
        // researcher
        Completion::tool_calls(
            "gpt-4o-mini",
            vec![ToolCall::new(WEB_SEARCH, HashMap::from([("query".to_string(), json!("tidal energy"))]))
                .with_id("call_search")],
        ),
        Completion::text("gpt-4o-mini", "Tidal energy: predictable, 240 MW at La Rance."),
        // writer
        Completion::tool_calls(
            "gpt-4o-mini",
            vec![ToolCall::new(STOCK_IMAGES, HashMap::from([("query".to_string(), json!("tidal energy"))]))
                .with_id("call_photos")],
        ),
        Completion::text("gpt-4o-mini", draft.to_string()),
        // formatter
        Completion::text("gpt-4o-mini", draft.to_string()),
    ]
}

#[tokio::test]
async fn generate_then_edit() {
    let provider = Arc::new(ScriptedProvider::from_completions(script()));
    let observer = Arc::new(RecordingObserver::default());
    let store = Arc::new(MemoryBlogStore::new());
    let ctx = AgentContext::new(provider.clone(), BlogSettings::default()).with_observer(observer.clone());
    let pipeline = BlogPipeline::new(&ctx, Integrations::mock(), store.clone()).unwrap();

    let blog = pipeline.generate("Write a blog about tidal energy").await.unwrap();

    assert_eq!(blog.title, "Tidal Energy");
    assert_eq!(blog.user_id, "user123");
    assert_eq!(blog.status, BlogStatus::Draft);
    assert!(!blog.deleted);
    assert!(!blog.content.is_empty());
    assert!(blog.content.iter().flat_map(ContentBlock::image_urls).any(|url| url == PHOTO_URL));
    assert!(blog.content.iter().all(|b| b.ensure_non_empty().is_ok()));

    let requests = provider.requests().await;
    assert_eq!(requests.len(), 5);
    assert_eq!(provider.remaining().await, 0);

    // writer receives the research summary as its user prompt
    assert_eq!(requests[2].messages[1].role, Role::User);
    assert!(requests[2].messages[1].content.contains("La Rance"));

    // the photo URL reached the writer through a tool message
    let photo_result = requests[3]
        .messages
        .iter()
        .find(|m| m.tool_call_id.as_deref() == Some("call_photos"))
        .unwrap();
    assert!(photo_result.content.contains(PHOTO_URL));

    // only the formatter asks for structured output
    assert!(matches!(requests[4].mode, ResponseMode::Structured(_)));
    assert!(requests[..4].iter().all(|r| matches!(r.mode, ResponseMode::Tools(_))));

    let events = observer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        [
            "researcher:turn",
            "researcher:web_search",
            "researcher:turn",
            "researcher:finished:true",
            "writer:turn",
            "writer:stock_images",
            "writer:turn",
            "writer:finished:true",
            "formatter:turn",
            "formatter:finished:true",
        ]
    );

    let edited = pipeline
        .edit(
            blog.id.as_str(),
            EditBlog {
                title: "Tides, Revisited".into(),
                content: vec![ContentBlock::text("Shorter take.")],
            },
        )
        .await
        .unwrap();

    assert_eq!(edited.id, blog.id);
    assert_eq!(edited.title, "Tides, Revisited");
    assert_eq!(edited.content, vec![ContentBlock::text("Shorter take.")]);
    assert_eq!(edited.created_at, blog.created_at);

    let stored = store.find_by_id(blog.id.as_str()).await.unwrap().unwrap();
    assert_eq!(stored, edited);
}

#[tokio::test]
async fn edit_unknown_id_leaves_store_untouched() {
    let provider = Arc::new(ScriptedProvider::from_completions(script()));
    let store = Arc::new(MemoryBlogStore::new());
    let ctx = AgentContext::new(provider, BlogSettings::default());
    let pipeline = BlogPipeline::new(&ctx, Integrations::mock(), store.clone()).unwrap();

    let blog = pipeline.generate("tidal energy").await.unwrap();

    let err = pipeline
        .edit(
            "00000000-0000-4000-8000-000000000000",
            EditBlog {
                title: "x".into(),
                content: vec![],
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, BlogError::NotFound(_)));
    assert_eq!(err.status_code(), 404);

    assert_eq!(store.len().await, 1);
    let stored = store.find_by_id(blog.id.as_str()).await.unwrap().unwrap();
    assert_eq!(stored, blog);
}
