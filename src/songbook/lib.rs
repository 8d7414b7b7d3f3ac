//! # Songbook Architecture
//!
//! Songbook is a **UI-agnostic song catalog library**. It holds a curated
//! playlist of songs, answers filtered and sorted views over it, and moves the
//! catalog in and out of CSV and JSON. The `songbook` binary is one client of it.
//!
//! ## The Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Normalizes inputs (id prefixes → SongIds)                │
//! │  - Returns structured Result types                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - One module per user action                               │
//! │  - Operates on Rust types, returns CmdResult                │
//! └─────────────────────────────────────────────────────────────┘
//!                    │                         │
//!                    ▼                         ▼
//! ┌──────────────────────────────┐ ┌───────────────────────────┐
//! │  Query Pipeline (query/)     │ │  Storage Layer (store/)   │
//! │  - Pure view functions       │ │  - DataStore trait        │
//! │  - search → filter → sort    │ │  - FileStore, InMemory    │
//! └──────────────────────────────┘ └───────────────────────────┘
//! ```
//!
//! ## Sessions
//!
//! A session loads the catalog once, runs actions against it, and writes it back
//! after each mutation. The CLI runs one action per session. Views are computed
//! from the store on every request; nothing is cached between calls.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code takes regular Rust arguments, returns regular Rust
//! types, and **never** writes to stdout/stderr or exits the process. Diagnostics
//! go through `tracing`; the binary decides where they end up.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`query`]: The view pipeline (search, category filters, advanced filter, sort)
//! - [`store`]: Storage abstraction and implementations
//! - [`model`]: Core data types (`Song`, `MediaLink`, `SongId`) and derived fields
//! - [`form`]: The editable song draft and its validation
//! - [`transfer`]: CSV and JSON import/export codecs
//! - [`config`]: Configuration management
//! - [`editor`]: External editor integration
//! - [`error`]: Error types
//! - `cli`: Argument parsing and printing for the binary (not part of the lib API)

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod form;
pub mod model;
pub mod query;
pub mod store;
pub mod transfer;
