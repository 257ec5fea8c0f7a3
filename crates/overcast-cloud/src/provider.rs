//! Cloud provider trait definition

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Hosting provider abstraction
///
/// A provider turns a [`CreateSpec`] into a running machine. Registering
/// the finished machine in the cluster registry is part of a provider's
/// job: callers hand off the spec and do not write the registry
/// themselves, so a failed `create` never leaves a half-registered
/// instance behind.
#[async_trait]
pub trait CloudProvider: Send + Sync {
    /// Registered provider name (e.g., "digitalocean")
    fn name(&self) -> &str;

    /// Provider display name for UI
    fn display_name(&self) -> &str;

    /// Provision a machine for `spec` and register it once it is reachable
    async fn create(&self, spec: &CreateSpec) -> Result<()>;
}

/// What to provision. Every field has already been sanitized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSpec {
    /// Instance name
    pub name: String,

    /// Cluster the instance joins
    pub cluster: String,

    /// Machine size (e.g., "512mb")
    pub size: String,

    /// OS image (e.g., "ubuntu-12-04-x64")
    pub image: String,

    /// Region (e.g., "nyc2")
    pub region: String,
}
