//! # Spiel Architecture
//!
//! Spiel is a **UI-agnostic catalogue library** for reusable marketing
//! scripts. This is not a CLI application that happens to have some library
//! code—it's a library that happens to have a CLI client.
//!
//! ## The Three-Layer Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs + args.rs)                              │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! │  - Clipboard writes happen here, after the core resolves    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (ordinals/ranges/title terms → UUIDs)  │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic                                      │
//! │  - Operates on Rust types, returns Rust types               │
//! │  - No I/O assumptions whatsoever                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract CatalogStore trait                              │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## The Pure Core
//!
//! Two modules carry the interesting invariants and sit beside the model,
//! free of any store or I/O dependency:
//!
//! - [`tree`]: assembles the flat category records into a forest. Total
//!   over any input: dangling parents surface as roots, duplicates
//!   collapse, cycles cannot hang or drop records.
//! - [`filter`]: the deterministic listing predicate—case-insensitive
//!   substring search over title and content, tag selection under an
//!   explicit ALL/ANY policy, optional category equality.
//!
//! Both are pure functions recomputed per invocation; callers hand them
//! already-fetched collections and render the fresh output.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward (API, commands, storage trait), code:
//! - Takes regular Rust function arguments
//! - Returns regular Rust types (`Result<CmdResult>`)
//! - **Never** writes to stdout/stderr
//! - **Never** calls `std::process::exit`
//!
//! The same core could serve a web UI or any other client.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade—entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`tree`]: Category forest assembly (the pure core, part 1)
//! - [`filter`]: Script filtering (the pure core, part 2)
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Category`, `Script`, `ScriptMeta`)
//! - [`index`]: Display ordinals and selectors
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`clipboard`]: Cross-platform clipboard support
//! - [`error`]: Error types

pub mod api;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod filter;
pub mod index;
pub mod model;
pub mod store;
pub mod tree;
