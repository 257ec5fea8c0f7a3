//! DigitalOcean provider implementation

use crate::doctl::{CreateDropletConfig, Doctl};
use crate::error::DigitalOceanError;
use async_trait::async_trait;
use overcast_cloud::{CloudError, CloudProvider, CreateSpec};
use overcast_registry::{Instance, RegistryError, RegistryStore};
use std::path::Path;
use std::sync::Arc;

/// Name `instance create --provider` selects this provider by
pub const PROVIDER_NAME: &str = "digitalocean";

/// Fingerprint of an account SSH key to install on new droplets
pub const SSH_KEY_FINGERPRINT_ENV: &str = "DIGITALOCEAN_SSH_KEY_FINGERPRINT";

/// DigitalOcean provider
pub struct DigitalOceanProvider {
    doctl: Doctl,
    store: Arc<RegistryStore>,
    ssh_key_path: String,
    ssh_key_fingerprint: Option<String>,
}

impl DigitalOceanProvider {
    /// `ssh_key_path` is recorded on registered instances as their login key
    pub fn new(store: Arc<RegistryStore>, ssh_key_path: impl Into<String>) -> Self {
        Self {
            doctl: Doctl::new(),
            store,
            ssh_key_path: ssh_key_path.into(),
            ssh_key_fingerprint: None,
        }
    }

    /// Provider using the config directory's default key and the
    /// fingerprint from `DIGITALOCEAN_SSH_KEY_FINGERPRINT`, if set
    pub fn from_env(store: Arc<RegistryStore>, config_dir: &Path) -> Self {
        let key_path = overcast_config::default_ssh_key_path(config_dir);
        let provider = Self::new(store, key_path.to_string_lossy());

        match std::env::var(SSH_KEY_FINGERPRINT_ENV) {
            Ok(fingerprint) if !fingerprint.trim().is_empty() => {
                provider.with_ssh_key_fingerprint(fingerprint.trim())
            }
            _ => provider,
        }
    }

    pub fn with_ssh_key_fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.ssh_key_fingerprint = Some(fingerprint.into());
        self
    }

    pub fn with_doctl(mut self, doctl: Doctl) -> Self {
        self.doctl = doctl;
        self
    }

    /// Record a provisioned droplet under the spec's cluster
    async fn register(&self, spec: &CreateSpec, ip: &str) -> Result<(), CloudError> {
        let instance = Instance::new(&spec.name, ip, &self.ssh_key_path);

        self.store
            .update(|clusters| {
                clusters
                    .insert_instance(&spec.cluster, instance)
                    .map(|_| ())
                    .map_err(|_| RegistrationError::ClusterGone)
            })
            .await
            .map_err(|e| CloudError::Registration {
                name: spec.name.clone(),
                message: match e {
                    RegistrationError::ClusterGone => {
                        format!("cluster '{}' no longer exists", spec.cluster)
                    }
                    RegistrationError::Registry(err) => err.to_string(),
                },
            })?;

        tracing::info!(
            instance = %spec.name,
            cluster = %spec.cluster,
            ip = %ip,
            "Registered droplet"
        );
        Ok(())
    }
}

enum RegistrationError {
    ClusterGone,
    Registry(RegistryError),
}

impl From<RegistryError> for RegistrationError {
    fn from(err: RegistryError) -> Self {
        Self::Registry(err)
    }
}

#[async_trait]
impl CloudProvider for DigitalOceanProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn display_name(&self) -> &str {
        "DigitalOcean"
    }

    async fn create(&self, spec: &CreateSpec) -> Result<(), CloudError> {
        let config = CreateDropletConfig {
            name: spec.name.clone(),
            region: spec.region.clone(),
            size: spec.size.clone(),
            image: spec.image.clone(),
            ssh_key_fingerprint: self.ssh_key_fingerprint.clone(),
        };

        tracing::info!(
            instance = %spec.name,
            region = %spec.region,
            size = %spec.size,
            image = %spec.image,
            "Creating droplet"
        );

        let droplet = self.doctl.create_droplet(&config).await?;
        let ip = droplet
            .public_ip()
            .ok_or_else(|| DigitalOceanError::NoPublicAddress(droplet.name.clone()))?
            .to_string();

        self.register(spec, &ip).await
    }
}
