use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A node in the catalogue hierarchy. Categories form a tree through
/// `parent_id`; a `None` parent marks a root.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub parent_id: Option<Uuid>,
    pub sort_order: i64,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: String, parent_id: Option<Uuid>, sort_order: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            parent_id,
            sort_order,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptMeta {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub category_id: Option<Uuid>,
    pub tags: Vec<String>,
    pub copy_count: u64,
    // Title lives in metadata so listings never touch content files
    pub title: String,
}

impl ScriptMeta {
    pub fn new(title: String, category_id: Option<Uuid>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            category_id,
            tags: Vec::new(),
            copy_count: 0,
            title,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Script {
    pub metadata: ScriptMeta,
    pub content: String,
}

impl Script {
    pub fn new(title: String, content: String, category_id: Option<Uuid>) -> Self {
        Self {
            metadata: ScriptMeta::new(title, category_id),
            content,
        }
    }
}
