//! # Pulseboard - A Personal Terminal Dashboard
//!
//! A terminal dashboard that aggregates live stock quotes, sports results,
//! and news headlines from three independent providers into a single view.
//!
//! ## Architecture
//!
//! - **App**: Core application lifecycle and the main event loop
//! - **API**: Provider clients (market, sports, news) and the live tick stream
//! - **Search**: Debounced search-as-you-type controller
//! - **Refresh**: Per-domain polling schedules with stale-while-revalidate
//! - **Aggregate**: Parallel per-item fan-out and merge
//! - **Store**: Persisted credentials and preferences (JSON blobs)
//! - **State**: Centralized state management
//! - **Events**: Input handling and event processing
//! - **Config**: Configuration management
//! - **UI**: Layout and rendering logic

pub mod aggregate;
pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod events;
pub mod refresh;
pub mod search;
pub mod state;
pub mod store;
pub mod ui;

pub use app::App;
pub use config::Config;
pub use error::{Error, Result};
