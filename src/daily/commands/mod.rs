//! # Command Layer
//!
//! This module contains the **business rules** of daily. Each operation lives in
//! its own submodule as plain functions generic over [`RecordStore`], taking Rust
//! values and returning Rust values.
//!
//! ## Role and Responsibilities
//!
//! - Validate input before anything touches storage (empty content, bad limits)
//! - Keep one entry per date: `create` refuses an occupied date
//! - Resolve dates to records and report what could not be found
//! - Assign identity and timestamps through [`crate::model::Record`]
//!
//! ## What Commands Do NOT Do
//!
//! - **Any I/O** beyond the store: no stdout, no prompts, no exit codes
//! - **Persistence details**: paging, seeking and upserts are the store's job
//!
//! ## Testing Strategy
//!
//! This is where most of the behavioral tests live. They run against
//! [`crate::store::document::DocumentStore::in_memory`] so they need no
//! filesystem; backend equivalence is covered by the conformance suite.
//!
//! [`RecordStore`]: crate::store::RecordStore

pub mod create;
pub mod delete;
pub mod list;
pub mod migrate;
pub mod update;
