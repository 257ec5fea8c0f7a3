//! Overcast Cloud Providers
//!
//! This crate defines the contract every hosting backend implements so the
//! instance commands can provision machines without knowing which API sits
//! behind them.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │             overcast instance create             │
//! └─────────────────┬───────────────────────────────┘
//!                   │ CreateSpec
//! ┌─────────────────▼───────────────────────────────┐
//! │                 overcast-cloud                   │
//! │  ┌──────────────────────────────────────────┐   │
//! │  │  ProviderRegistry: name → CloudProvider   │   │
//! │  └──────────────────────────────────────────┘   │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//!           ┌───────▼───────┐
//!           │ digitalocean  │  provisions, then registers
//!           │   provider    │  the instance in clusters.json
//!           └───────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod registry;

pub use error::{CloudError, Result};
pub use provider::{CloudProvider, CreateSpec};
pub use registry::ProviderRegistry;
