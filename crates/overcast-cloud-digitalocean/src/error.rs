//! DigitalOcean provider error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigitalOceanError {
    #[error("doctl not found. Please install: https://docs.digitalocean.com/reference/doctl/how-to/install/")]
    DoctlNotFound,

    #[error("doctl command failed: {0}")]
    CommandFailed(String),

    #[error("doctl returned no droplet")]
    NoDroplet,

    #[error("Droplet '{0}' has no public IPv4 address")]
    NoPublicAddress(String),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<DigitalOceanError> for overcast_cloud::CloudError {
    fn from(err: DigitalOceanError) -> Self {
        Self::provisioning(crate::provider::PROVIDER_NAME, err)
    }
}

pub type Result<T> = std::result::Result<T, DigitalOceanError>;
