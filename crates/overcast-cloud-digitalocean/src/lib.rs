//! DigitalOcean provider for Overcast
//!
//! This crate implements the CloudProvider trait for DigitalOcean,
//! creating droplets and registering them in the Overcast cluster
//! registry once they have a public address.
//!
//! # Requirements
//!
//! - `doctl` CLI must be installed and authenticated
//!   (`doctl auth init`, or `DIGITALOCEAN_ACCESS_TOKEN`)
//! - Optionally `DIGITALOCEAN_SSH_KEY_FINGERPRINT` names an SSH key already
//!   uploaded to the account, which is then installed on new droplets
//!
//! # Example
//!
//! ```ignore
//! use overcast_cloud::{CloudProvider, CreateSpec};
//! use overcast_cloud_digitalocean::DigitalOceanProvider;
//!
//! let provider = DigitalOceanProvider::from_env(store, &config_dir);
//! provider.create(&spec).await?;
//! ```

pub mod doctl;
pub mod error;
pub mod provider;

pub use doctl::{CreateDropletConfig, Doctl, DropletInfo};
pub use error::{DigitalOceanError, Result};
pub use provider::{DigitalOceanProvider, PROVIDER_NAME, SSH_KEY_FINGERPRINT_ENV};
