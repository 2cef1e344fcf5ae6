//! # CLI Behavior
//!
//! This is **one possible UI client** for daily, not the application itself.
//! It is the only place that knows about terminal I/O, exit codes and colors.
//!
//! For the overall architecture, see the crate-level documentation of `daily`.
//!
//! ## Backend Selection
//!
//! The backend comes from `--backend`, then `DAILY_BACKEND`, then `daily.toml`,
//! and defaults to `file`. Both backends live side by side in the data
//! directory, so `daily migrate --to <backend>` can copy between them.
//!
//! ## Naked Execution (`daily`)
//!
//! Running `daily` with no subcommand shows today's entry.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup, dispatch and per-command handlers
//! - `render`: Output formatting (rows, colors, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
