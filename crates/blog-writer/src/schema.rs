//! Blog JSON Schema
//!
//! One schema describes a blog document. It is embedded as text in the writer
//! prompt, sent as the formatter's mandatory response format, and used to
//! validate whatever comes back. Every block variant lists all of its fields
//! as required and forbids any other property, which also satisfies strict
//! structured-output decoding.

use std::sync::LazyLock;

use agent_core::provider::OutputSchema;
use agent_core::tool::validate_against_schema;
use jsonschema::Validator;
use serde_json::{json, Map, Value};

use crate::model::{BlockKind, BlogDocument, ContentBlock};

pub const SCHEMA_NAME: &str = "blog_post_schema";

const DOCUMENT_DESCRIPTION: &str =
    "Defines the structure of a blog post, including the title and a list of content blocks.";

static DOCUMENT_VALIDATOR: LazyLock<Result<Validator, String>> =
    LazyLock::new(|| Validator::new(&blog_document_schema()).map_err(|e| e.to_string()));

fn field_description(field: &str) -> &'static str {
    match field {
        "text" => "Text content for blocks with type 'text', 'image-text', or 'text-image'.",
        "text1" => "First text section for 'text-text' blocks.",
        "text2" => "Second text section for 'text-text' blocks.",
        "image" => "Image URL for blocks with a single image.",
        "image1" => "First image URL for 'image-image' blocks.",
        "image2" => "Second image URL for 'image-image' blocks.",
        "imageAlt" => "Alt text for the 'image' property.",
        "imageAlt1" => "Alt text for the 'image1' property.",
        "imageAlt2" => "Alt text for the 'image2' property.",
        _ => "",
    }
}

/// Schema of a single block layout
pub fn block_variant_schema(kind: BlockKind) -> Value {
    let mut properties = Map::new();
    properties.insert(
        "type".into(),
        json!({
            "type": "string",
            "description": "The type of content block.",
            "enum": [kind.tag()],
        }),
    );
    for field in kind.fields() {
        properties.insert(
            (*field).to_string(),
            json!({"type": "string", "description": field_description(field)}),
        );
    }

    let required: Vec<&str> = std::iter::once("type").chain(kind.fields().iter().copied()).collect();

    json!({
        "type": "object",
        "properties": properties,
        "required": required,
        "additionalProperties": false,
    })
}

/// Schema of any content block
pub fn block_schema() -> Value {
    let variants: Vec<Value> = BlockKind::ALL.into_iter().map(block_variant_schema).collect();
    json!({ "anyOf": variants })
}

/// Schema of a complete blog document
pub fn blog_document_schema() -> Value {
    json!({
        "type": "object",
        "description": DOCUMENT_DESCRIPTION,
        "properties": {
            "title": {
                "type": "string",
                "description": "The main title of the blog post."
            },
            "blocks": {
                "type": "array",
                "description": "An ordered list of content blocks for a blog post. Each block can be text, image, text-text, image-text, text-image, or image-image.",
                "items": block_schema()
            }
        },
        "required": ["title", "blocks"],
        "additionalProperties": false
    })
}

/// The document schema as a mandatory response format
pub fn output_schema() -> OutputSchema {
    OutputSchema::new(SCHEMA_NAME, DOCUMENT_DESCRIPTION, blog_document_schema())
}

/// The document schema rendered for inclusion in a prompt
pub fn schema_prompt_text() -> String {
    let wrapper = json!({
        "name": SCHEMA_NAME,
        "strict": true,
        "schema": blog_document_schema(),
    });
    serde_json::to_string_pretty(&wrapper).unwrap_or_default()
}

/// Validate an untrusted block: known tag, exact field set, non-blank values
pub fn parse_block(raw: &Value) -> Result<ContentBlock, String> {
    let tag = raw
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| "block must be an object with a string `type`".to_string())?;

    let kind = BlockKind::ALL.into_iter().find(|k| k.tag() == tag).ok_or_else(|| {
        let tags: Vec<_> = BlockKind::ALL.iter().map(|k| k.tag()).collect();
        format!("unknown block type `{tag}`, expected one of {}", tags.join(", "))
    })?;

    validate_against_schema(&block_variant_schema(kind), raw).map_err(|e| format!("invalid {kind} block: {e}"))?;

    let block: ContentBlock = serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;
    block.ensure_non_empty()?;
    Ok(block)
}

/// Validate an untrusted document against the full schema and content rules
pub fn parse_document(raw: &Value) -> Result<BlogDocument, String> {
    let validator = DOCUMENT_VALIDATOR.as_ref().map_err(|e| format!("invalid blog schema: {e}"))?;
    if !validator.is_valid(raw) {
        let errors: Vec<String> = validator.iter_errors(raw).map(|e| e.to_string()).collect();
        return Err(errors.join("; "));
    }

    let document: BlogDocument = serde_json::from_value(raw.clone()).map_err(|e| e.to_string())?;
    document.ensure_complete()?;
    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_compiles() {
        assert!(DOCUMENT_VALIDATOR.is_ok());
    }

    #[test]
    fn test_variants_are_closed() {
        for kind in BlockKind::ALL {
            let schema = block_variant_schema(kind);
            assert_eq!(schema["additionalProperties"], false);
            assert_eq!(schema["required"].as_array().unwrap().len(), kind.fields().len() + 1);
        }
    }

    #[test]
    fn test_parse_block_rejects_bad_shapes() {
        let missing_alt = json!({"type": "image", "image": "https://x/y.jpg"});
        assert!(parse_block(&missing_alt).unwrap_err().contains("image"));

        let extra = json!({"type": "text", "text": "hi", "text1": "nope"});
        assert!(parse_block(&extra).is_err());

        let unknown = json!({"type": "video", "text": "hi"});
        assert!(parse_block(&unknown).unwrap_err().contains("unknown block type"));

        let wrong_type = json!({"type": "text", "text": 42});
        assert!(parse_block(&wrong_type).is_err());
    }

    #[test]
    fn test_parse_document() {
        let doc = parse_document(&json!({
            "title": "Solar Power",
            "blocks": [
                {"type": "text", "text": "Intro"},
                {"type": "image-text", "image": "https://img/p.jpg", "imageAlt": "Panels", "text": "Caption"}
            ]
        }))
        .unwrap();
        assert_eq!(doc.blocks.len(), 2);
        assert_eq!(doc.blocks[1].image_urls(), vec!["https://img/p.jpg"]);
    }

    #[test]
    fn test_parse_document_rejects_incomplete() {
        assert!(parse_document(&json!({"title": "T"})).is_err());
        assert!(parse_document(&json!({"title": "T", "blocks": []})).is_err());
        assert!(parse_document(&json!({"title": " ", "blocks": [{"type": "text", "text": "a"}]})).is_err());
        assert!(parse_document(&json!({"title": "T", "blocks": [], "author": "x"})).is_err());
    }

    #[test]
    fn test_prompt_text_embeds_schema() {
        let text = schema_prompt_text();
        assert!(text.contains(SCHEMA_NAME));
        assert!(text.contains("image-image"));
        assert!(text.contains("imageAlt2"));
    }
}
