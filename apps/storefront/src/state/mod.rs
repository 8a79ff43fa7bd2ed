//! # State Module
//!
//! Application state for the storefront.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                        AppState                                 │   │
//! │  │                                                                 │   │
//! │  │  ┌──────────────────┐  ┌──────────────┐  ┌──────────────────┐  │   │
//! │  │  │  SessionStore    │  │   Catalog    │  │    AppConfig     │  │   │
//! │  │  │                  │  │              │  │                  │  │   │
//! │  │  │  user, cart,     │  │  products    │  │  data path       │  │   │
//! │  │  │  order history   │  │  (read only) │  │  shipping rule   │  │   │
//! │  │  │  Box<dyn Storage>│  │              │  │  currency        │  │   │
//! │  │  └──────────────────┘  └──────────────┘  └──────────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Single-threaded: commands run one at a time against `&mut AppState`.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod config;

pub use app::{AppState, DynStorage, StartupError};
pub use config::{AppConfig, DataLocation, MEMORY_STORAGE};
