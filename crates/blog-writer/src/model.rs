//! Domain Models
//!
//! Content blocks, blog documents and the persisted blog record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::error::{BlogError, Result};
use crate::schema;

/// Layout tag of a content block
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Text,
    Image,
    TextText,
    ImageText,
    TextImage,
    ImageImage,
}

impl BlockKind {
    pub const ALL: [BlockKind; 6] = [
        BlockKind::Text,
        BlockKind::Image,
        BlockKind::TextText,
        BlockKind::ImageText,
        BlockKind::TextImage,
        BlockKind::ImageImage,
    ];

    /// The `type` tag on the wire
    pub fn tag(self) -> &'static str {
        match self {
            BlockKind::Text => "text",
            BlockKind::Image => "image",
            BlockKind::TextText => "text-text",
            BlockKind::ImageText => "image-text",
            BlockKind::TextImage => "text-image",
            BlockKind::ImageImage => "image-image",
        }
    }

    /// Wire names of the fields this layout requires, in display order
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            BlockKind::Text => &["text"],
            BlockKind::Image => &["image", "imageAlt"],
            BlockKind::TextText => &["text1", "text2"],
            BlockKind::ImageText => &["image", "imageAlt", "text"],
            BlockKind::TextImage => &["text", "image", "imageAlt"],
            BlockKind::ImageImage => &["image1", "image2", "imageAlt1", "imageAlt2"],
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// One renderable unit of a blog post
///
/// Each variant carries exactly the fields its layout needs; unknown fields
/// are rejected on deserialization.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    tag = "type",
    rename_all = "kebab-case",
    rename_all_fields = "camelCase",
    deny_unknown_fields
)]
pub enum ContentBlock {
    Text {
        text: String,
    },
    Image {
        image: String,
        image_alt: String,
    },
    TextText {
        text1: String,
        text2: String,
    },
    ImageText {
        image: String,
        image_alt: String,
        text: String,
    },
    TextImage {
        text: String,
        image: String,
        image_alt: String,
    },
    ImageImage {
        image1: String,
        image2: String,
        image_alt1: String,
        image_alt2: String,
    },
}

impl ContentBlock {
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    pub fn image(image: impl Into<String>, alt: impl Into<String>) -> Self {
        ContentBlock::Image {
            image: image.into(),
            image_alt: alt.into(),
        }
    }

    pub fn kind(&self) -> BlockKind {
        match self {
            ContentBlock::Text { .. } => BlockKind::Text,
            ContentBlock::Image { .. } => BlockKind::Image,
            ContentBlock::TextText { .. } => BlockKind::TextText,
            ContentBlock::ImageText { .. } => BlockKind::ImageText,
            ContentBlock::TextImage { .. } => BlockKind::TextImage,
            ContentBlock::ImageImage { .. } => BlockKind::ImageImage,
        }
    }

    /// `(wire name, value)` for every field, in display order
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            ContentBlock::Text { text } => vec![("text", text.as_str())],
            ContentBlock::Image { image, image_alt } => vec![("image", image.as_str()), ("imageAlt", image_alt)],
            ContentBlock::TextText { text1, text2 } => vec![("text1", text1.as_str()), ("text2", text2)],
            ContentBlock::ImageText { image, image_alt, text } => {
                vec![("image", image.as_str()), ("imageAlt", image_alt), ("text", text)]
            }
            ContentBlock::TextImage { text, image, image_alt } => {
                vec![("text", text.as_str()), ("image", image), ("imageAlt", image_alt)]
            }
            ContentBlock::ImageImage {
                image1,
                image2,
                image_alt1,
                image_alt2,
            } => vec![
                ("image1", image1.as_str()),
                ("image2", image2),
                ("imageAlt1", image_alt1),
                ("imageAlt2", image_alt2),
            ],
        }
    }

    /// Image URLs referenced by this block
    pub fn image_urls(&self) -> Vec<&str> {
        self.fields()
            .into_iter()
            .filter(|(name, _)| *name == "image" || *name == "image1" || *name == "image2")
            .map(|(_, value)| value)
            .collect()
    }

    /// Every field must be a non-blank string
    pub fn ensure_non_empty(&self) -> std::result::Result<(), String> {
        match self.fields().into_iter().find(|(_, value)| value.trim().is_empty()) {
            Some((name, _)) => Err(format!("{} block has an empty `{name}`", self.kind())),
            None => Ok(()),
        }
    }
}

/// A formatted blog post: title plus blocks in display order
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BlogDocument {
    pub title: String,
    pub blocks: Vec<ContentBlock>,
}

impl BlogDocument {
    /// Title and at least one block, all fields non-empty
    pub fn ensure_complete(&self) -> std::result::Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("title is empty".into());
        }
        if self.blocks.is_empty() {
            return Err("document has no blocks".into());
        }
        self.blocks
            .iter()
            .enumerate()
            .try_for_each(|(i, block)| block.ensure_non_empty().map_err(|e| format!("blocks[{i}]: {e}")))
    }
}

/// Unique blog identifier (UUID v4)
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlogId(String);

impl BlogId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for BlogId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for BlogId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Publication status
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlogStatus {
    #[default]
    Draft,
    Published,
}

/// A blog ready to be persisted
#[derive(Clone, Debug)]
pub struct NewBlog {
    pub user_id: String,
    pub title: String,
    pub content: Vec<ContentBlock>,
    pub status: BlogStatus,
    pub deleted: bool,
}

impl NewBlog {
    /// A fresh draft owned by `user_id`
    pub fn draft(user_id: impl Into<String>, document: BlogDocument) -> Self {
        Self {
            user_id: user_id.into(),
            title: document.title,
            content: document.blocks,
            status: BlogStatus::Draft,
            deleted: false,
        }
    }
}

/// A persisted blog
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredBlog {
    pub id: BlogId,
    pub user_id: String,
    pub title: String,
    pub content: Vec<ContentBlock>,
    pub status: BlogStatus,
    pub deleted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredBlog {
    pub fn from_new(blog: NewBlog) -> Self {
        let now = Utc::now();
        Self {
            id: BlogId::new(),
            user_id: blog.user_id,
            title: blog.title,
            content: blog.content,
            status: blog.status,
            deleted: blog.deleted,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace title and content together
    pub fn apply_edit(&mut self, edit: EditBlog) {
        self.title = edit.title;
        self.content = edit.content;
        self.updated_at = Utc::now();
    }
}

/// Wholesale replacement of a blog's title and content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditBlog {
    pub title: String,
    pub content: Vec<ContentBlock>,
}

impl EditBlog {
    /// Validate an untrusted request body
    ///
    /// `title` must be a non-blank string and every element of `content` a
    /// valid content block with non-blank fields. An empty `content` list is
    /// accepted.
    pub fn from_value(body: &Value) -> Result<Self> {
        let object = body
            .as_object()
            .ok_or_else(|| BlogError::Validation("body must be a JSON object".into()))?;

        let title = match object.get("title") {
            Some(Value::String(title)) if !title.trim().is_empty() => title.clone(),
            Some(Value::String(_)) => return Err(BlogError::Validation("title should not be empty".into())),
            Some(_) => return Err(BlogError::Validation("title must be a string".into())),
            None => return Err(BlogError::Validation("title is required".into())),
        };

        let raw_blocks = match object.get("content") {
            Some(Value::Array(blocks)) => blocks,
            Some(_) => return Err(BlogError::Validation("content must be an array".into())),
            None => return Err(BlogError::Validation("content is required".into())),
        };

        let content = raw_blocks
            .iter()
            .enumerate()
            .map(|(i, raw)| {
                schema::parse_block(raw).map_err(|e| BlogError::Validation(format!("content[{i}]: {e}")))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { title, content })
    }
}
