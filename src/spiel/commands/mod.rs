use crate::config::SpielConfig;
use crate::filter::TagUsage;
use crate::index::{DisplayIndex, DisplayScript};
use crate::model::{Category, Script};
use std::path::PathBuf;

pub mod categories;
pub mod config;
pub mod copy;
pub mod create;
pub mod delete;
pub mod doctor;
pub mod export;
pub mod helpers;
pub mod import;
pub mod init;
pub mod list;
pub mod paths;
pub mod search;
pub mod tags;
pub mod update;
pub mod view;

#[derive(Debug, Clone)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One row of the category overview: a category with its depth in the
/// tree and the number of scripts filed under it or its descendants.
#[derive(Debug, Clone)]
pub struct CategoryRow {
    pub category: Category,
    pub depth: usize,
    pub script_count: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_scripts: Vec<Script>,
    pub listed_scripts: Vec<DisplayScript>,
    pub script_paths: Vec<PathBuf>,
    pub category_rows: Vec<CategoryRow>,
    pub tag_usage: Vec<TagUsage>,
    pub config: Option<SpielConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_scripts(mut self, scripts: Vec<Script>) -> Self {
        self.affected_scripts = scripts;
        self
    }

    pub fn with_listed_scripts(mut self, scripts: Vec<DisplayScript>) -> Self {
        self.listed_scripts = scripts;
        self
    }

    pub fn with_script_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.script_paths = paths;
        self
    }

    pub fn with_category_rows(mut self, rows: Vec<CategoryRow>) -> Self {
        self.category_rows = rows;
        self
    }

    pub fn with_tag_usage(mut self, usage: Vec<TagUsage>) -> Self {
        self.tag_usage = usage;
        self
    }

    pub fn with_config(mut self, config: SpielConfig) -> Self {
        self.config = Some(config);
        self
    }
}

#[derive(Debug, Clone)]
pub struct ScriptUpdate {
    pub index: DisplayIndex,
    pub title: String,
    pub content: String,
}

impl ScriptUpdate {
    pub fn new(index: DisplayIndex, title: String, content: String) -> Self {
        Self {
            index,
            title,
            content,
        }
    }
}
