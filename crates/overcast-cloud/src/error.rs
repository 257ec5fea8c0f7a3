//! Cloud provider error types

use thiserror::Error;

/// Cloud provider errors
#[derive(Error, Debug)]
pub enum CloudError {
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Provisioning failed on {provider}: {message}")]
    ProvisioningError { provider: String, message: String },

    #[error("Instance '{name}' was provisioned but could not be registered: {message}")]
    Registration { name: String, message: String },
}

impl CloudError {
    pub fn provisioning(provider: impl Into<String>, message: impl ToString) -> Self {
        Self::ProvisioningError {
            provider: provider.into(),
            message: message.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CloudError>;
