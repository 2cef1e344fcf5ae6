//! # Daily Architecture
//!
//! Daily is a **personal journal library**: one free-text entry per calendar
//! date, listed newest first with cursor pagination. The `daily` binary is one
//! client of it; nothing inside the library touches the terminal.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Picks the backend from flags and configuration           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Service Layer (service.rs)                                 │
//! │  - RecordService: thin facade over commands                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One entry per date, non-empty content, not-found rules   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait, shared pagination in store/page.rs    │
//! │  - FileStore (JSON files), DocumentStore (SQLite documents) │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Pagination
//!
//! Pages are ordered by `entry_date` descending, then `created_at` descending.
//! A page that is not the last carries a [`cursor::Cursor`] token naming the
//! position of its last record; passing it back yields the records strictly
//! after that position. The token is opaque base64 and identical across
//! backends for the same data.
//!
//! ## Testing Strategy
//!
//! 1. **Commands**: unit tests of the business rules, run against real stores
//!    in temporary directories or in-memory databases.
//! 2. **Service**: dispatch tests.
//! 3. **Stores**: backend-specific unit tests, plus `tests/store_conformance.rs`
//!    running the same behavioural suite against both backends.
//! 4. **CLI**: `tests/cli.rs` drives the binary with `assert_cmd`.
//!
//! ## Module Overview
//!
//! - [`service`]: The service facade, entry point for all operations
//! - [`commands`]: Business logic for each operation
//! - [`store`]: Storage abstraction, pagination and both backends
//! - [`cursor`]: Cursor token encoding
//! - [`model`]: The `Record` entity and its stored form
//! - [`config`]: Configuration loading
//! - [`error`]: Error types

pub mod commands;
pub mod config;
pub mod cursor;
pub mod error;
pub mod model;
pub mod service;
pub mod store;

#[cfg(test)]
pub mod test_utils;
