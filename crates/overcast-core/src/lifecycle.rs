//! Instance lifecycle controller

use crate::error::{InstanceError, Result};
use crate::options::{
    CreateOptions, DEFAULT_IMAGE, DEFAULT_PROVIDER, DEFAULT_REGION, DEFAULT_SIZE, ImportOptions,
    RemoveOptions,
};
use overcast_cloud::{CloudError, CreateSpec, ProviderRegistry};
use overcast_registry::{
    Clusters, DEFAULT_SSH_PORT, DEFAULT_USER, Instance, RegistryStore, sanitize_opt,
};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

/// Runs instance commands against one registry and one set of providers
pub struct InstanceController {
    store: Arc<RegistryStore>,
    providers: ProviderRegistry,
    config_dir: PathBuf,
}

/// A provider accepted and finished a `create`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Created {
    pub name: String,
    pub cluster: String,
    pub provider: String,
}

/// An existing machine was added to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Imported {
    pub cluster: String,
    pub instance: Instance,
}

/// An instance record was deleted from the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removed {
    pub name: String,
    pub cluster: String,
}

impl fmt::Display for Created {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instance \"{}\" has been created on {} for the \"{}\" cluster.",
            self.name, self.provider, self.cluster
        )
    }
}

impl fmt::Display for Imported {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instance \"{}\" ({}) has been imported to the \"{}\" cluster.",
            self.instance.name, self.instance.ip, self.cluster
        )
    }
}

impl fmt::Display for Removed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Instance \"{}\" has been deleted from the \"{}\" cluster.",
            self.name, self.cluster
        )
    }
}

impl InstanceController {
    pub fn new(
        store: Arc<RegistryStore>,
        providers: ProviderRegistry,
        config_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            store,
            providers,
            config_dir: config_dir.into(),
        }
    }

    /// Hand a new machine off to a provider
    ///
    /// Checks run in order (name, cluster given, cluster exists, provider
    /// registered) and the first failure is returned. The registry is only
    /// read here; registering the new machine is the provider's job.
    #[tracing::instrument(skip_all, fields(name = ?options.name, cluster = ?options.cluster))]
    pub async fn create(&self, options: CreateOptions) -> Result<Created> {
        let name = required_name(options.name.as_deref())?;
        let cluster = sanitize_opt(options.cluster.as_deref())
            .ok_or(InstanceError::MissingArgument("cluster"))?;

        let clusters = self.store.load().await?;
        if !clusters.contains(&cluster) {
            return Err(InstanceError::UnknownCluster {
                known: known_clusters(&clusters),
                name: cluster,
                hint: false,
            });
        }

        let provider_name = sanitize_opt(options.provider.as_deref())
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());
        let provider = self
            .providers
            .require(&provider_name)
            .map_err(|err| match err {
                CloudError::ProviderNotFound(name) => InstanceError::UnknownProvider {
                    known: self.providers.names().into_iter().map(String::from).collect(),
                    name,
                },
                other => InstanceError::Provisioning(other),
            })?;

        let spec = CreateSpec {
            name,
            cluster,
            size: sanitize_opt(options.size.as_deref()).unwrap_or_else(|| DEFAULT_SIZE.to_string()),
            image: sanitize_opt(options.image.as_deref())
                .unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
            region: sanitize_opt(options.region.as_deref())
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
        };

        tracing::info!(provider = %provider_name, ?spec, "Handing instance to provider");
        provider.create(&spec).await?;

        Ok(Created {
            name: spec.name,
            cluster: spec.cluster,
            provider: provider.display_name().to_string(),
        })
    }

    /// Add an existing machine to a cluster
    ///
    /// An instance with the same name in the target cluster is overwritten.
    /// A same-named instance in another cluster is left in place; the
    /// duplicate is only logged.
    #[tracing::instrument(skip_all, fields(name = ?options.name, cluster = ?options.cluster))]
    pub async fn import(&self, options: ImportOptions) -> Result<Imported> {
        let name = required_name(options.name.as_deref())?;
        let cluster = sanitize_opt(options.cluster.as_deref())
            .ok_or(InstanceError::MissingArgument("cluster"))?;
        let ip =
            sanitize_opt(options.ip.as_deref()).ok_or(InstanceError::MissingArgument("ip"))?;

        let ssh_key = options
            .ssh_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .map(String::from)
            .unwrap_or_else(|| self.default_ssh_key());

        let instance = Instance {
            ip,
            name,
            ssh_port: sanitize_opt(options.ssh_port.as_deref())
                .unwrap_or_else(|| DEFAULT_SSH_PORT.to_string()),
            ssh_key,
            user: sanitize_opt(options.user.as_deref())
                .unwrap_or_else(|| DEFAULT_USER.to_string()),
            extra: Default::default(),
        };

        let record = instance.clone();
        self.store
            .update(|clusters| {
                if let Some((other, _)) = clusters.find_instance(&record.name)
                    && other != cluster
                {
                    tracing::warn!(
                        instance = %record.name,
                        existing_cluster = %other,
                        "Instance name already used in another cluster"
                    );
                }

                match clusters.insert_instance(&cluster, record) {
                    Ok(Some(previous)) => {
                        tracing::info!(instance = %previous.name, "Overwriting existing instance");
                        Ok(())
                    }
                    Ok(None) => Ok(()),
                    Err(_) => Err(InstanceError::UnknownCluster {
                        known: known_clusters(clusters),
                        name: cluster.clone(),
                        hint: true,
                    }),
                }
            })
            .await?;

        Ok(Imported { cluster, instance })
    }

    /// Delete an instance record; the machine itself is not touched
    ///
    /// Only the first cluster (in registry order) holding the name loses
    /// it. Nothing is written when no cluster holds it.
    #[tracing::instrument(skip_all, fields(name = ?options.name))]
    pub async fn remove(&self, options: RemoveOptions) -> Result<Removed> {
        let name = required_name(options.name.as_deref())?;

        let cluster = self
            .store
            .update(|clusters| {
                clusters
                    .remove_instance(&name)
                    .ok_or_else(|| InstanceError::InstanceNotFound(name.clone()))
            })
            .await?;

        tracing::info!(instance = %name, cluster = %cluster, "Removed instance");
        Ok(Removed { name, cluster })
    }

    fn default_ssh_key(&self) -> String {
        overcast_config::default_ssh_key_path(&self.config_dir)
            .to_string_lossy()
            .into_owned()
    }
}

/// Instance names are taken as given; only blank names count as missing
fn required_name(raw: Option<&str>) -> Result<String> {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .ok_or(InstanceError::MissingArgument("name"))
}

fn known_clusters(clusters: &Clusters) -> Vec<String> {
    clusters.cluster_names().into_iter().map(String::from).collect()
}
