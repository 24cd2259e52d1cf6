//! # Storage Layer
//!
//! This module defines the storage abstraction for spiel. The
//! [`CatalogStore`] trait allows the application to work with different
//! storage backends.
//!
//! ## Design Rationale
//!
//! Storage is abstracted behind a trait to:
//! - Enable **testing** with `InMemoryStore` (no filesystem needed)
//! - Allow **future backends** (database, sync service, etc.) without
//!   changing core logic
//! - Keep business logic **decoupled** from persistence details
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: Production file-based storage
//!   - Categories and script metadata stored in `catalog.json`
//!   - Script content in individual files: `script-{uuid}.{ext}`
//!   - Supports configurable file extensions
//!
//! - [`memory::InMemoryStore`]: In-memory storage for testing
//!   - No persistence
//!   - Fast, isolated test execution
//!
//! ## Storage Format
//!
//! For `FileStore`:
//! ```text
//! <catalog dir>/
//! ├── catalog.json          # Categories + script metadata
//! ├── script-{uuid}.txt     # Individual script content files
//! └── config.json           # Tool configuration
//! ```
//!
//! Metadata and content are stored separately so listing scripts by title
//! or tag doesn't require reading all content files. Search does read
//! content, through `list_scripts`.

use crate::error::Result;
use crate::model::{Category, Script};
use std::path::PathBuf;
use uuid::Uuid;

pub mod fs;
pub mod memory;

/// Report from the `doctor` operation.
#[derive(Debug, Default)]
pub struct DoctorReport {
    /// Indexed scripts whose content file was missing; an empty file was
    /// written back for each.
    pub restored_content_files: usize,
    /// Content files found on disk with no index entry; adopted as new
    /// scripts.
    pub adopted_files: usize,
}

/// Abstract interface for catalogue storage.
///
/// Implementations must handle persistence, retrieval, and consistency for
/// scripts and categories. Ordering of the returned lists is unspecified;
/// callers canonicalize.
pub trait CatalogStore {
    /// Save a script (create or update)
    fn save_script(&mut self, script: &Script) -> Result<()>;

    /// Get a script by ID
    fn get_script(&self, id: &Uuid) -> Result<Script>;

    /// List scripts, optionally restricted to one category
    fn list_scripts(&self, category: Option<&Uuid>) -> Result<Vec<Script>>;

    /// Delete a script permanently
    fn delete_script(&mut self, id: &Uuid) -> Result<()>;

    /// Bump a script's copy counter, returning the new count
    fn increment_copy_count(&mut self, id: &Uuid) -> Result<u64>;

    /// Save a category (create or update)
    fn save_category(&mut self, category: &Category) -> Result<()>;

    /// List all categories
    fn list_categories(&self) -> Result<Vec<Category>>;

    /// Delete a category. Does not touch children or scripts; readers
    /// treat the dangling references gracefully.
    fn delete_category(&mut self, id: &Uuid) -> Result<()>;

    /// Get the content file path for a script (for file-based stores)
    fn get_script_path(&self, id: &Uuid) -> Result<PathBuf>;

    /// Verify and fix storage-level consistency issues
    fn doctor(&mut self) -> Result<DoctorReport>;
}
