//! Registry data model

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Default login user for instances
pub const DEFAULT_USER: &str = "root";

/// Default SSH port for instances
pub const DEFAULT_SSH_PORT: &str = "22";

/// All clusters, in the order they appear in the registry file
///
/// Instance names are expected to be unique across the whole registry,
/// so lookups by instance name scan every cluster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Clusters(IndexMap<String, Cluster>);

/// A named group of instances
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Instances keyed by instance name
    #[serde(default)]
    pub instances: IndexMap<String, Instance>,

    /// Keys written by other tools, kept as-is on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Connection details for one remote machine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Network address
    pub ip: String,

    /// Instance name (unique across all clusters)
    pub name: String,

    /// SSH port, kept as text the way it was entered
    #[serde(deserialize_with = "port_from_text_or_number")]
    pub ssh_port: String,

    /// Path to the private key used to log in
    pub ssh_key: String,

    /// Login user
    pub user: String,

    /// Keys written by other tools (e.g. provider metadata), kept as-is on save
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Instance {
    /// Instance with the default user and port
    pub fn new(
        name: impl Into<String>,
        ip: impl Into<String>,
        ssh_key: impl Into<String>,
    ) -> Self {
        Self {
            ip: ip.into(),
            name: name.into(),
            ssh_port: DEFAULT_SSH_PORT.to_string(),
            ssh_key: ssh_key.into(),
            user: DEFAULT_USER.to_string(),
            extra: Map::new(),
        }
    }
}

impl Clusters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Cluster> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Cluster names in registry order
    pub fn cluster_names(&self) -> Vec<&str> {
        self.0.keys().map(String::as_str).collect()
    }

    /// Add an empty cluster. Returns `false` if it already exists.
    pub fn create_cluster(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.0.contains_key(&name) {
            return false;
        }
        self.0.insert(name, Cluster::default());
        true
    }

    /// Find an instance by name, returning the owning cluster name with it
    pub fn find_instance(&self, name: &str) -> Option<(&str, &Instance)> {
        self.0.iter().find_map(|(cluster_name, cluster)| {
            cluster
                .instances
                .get(name)
                .map(|instance| (cluster_name.as_str(), instance))
        })
    }

    /// Insert or overwrite an instance in an existing cluster
    ///
    /// Returns the previous record under that name in the same cluster.
    /// Returns `Err(instance)` untouched if the cluster does not exist.
    pub fn insert_instance(
        &mut self,
        cluster: &str,
        instance: Instance,
    ) -> Result<Option<Instance>, Instance> {
        match self.0.get_mut(cluster) {
            Some(entry) => Ok(entry.instances.insert(instance.name.clone(), instance)),
            None => Err(instance),
        }
    }

    /// Remove an instance from the first cluster (in registry order) that
    /// contains it, returning that cluster's name
    ///
    /// Only one entry is removed even if the name appears in several clusters.
    pub fn remove_instance(&mut self, name: &str) -> Option<String> {
        for (cluster_name, cluster) in self.0.iter_mut() {
            if cluster.instances.shift_remove(name).is_some() {
                return Some(cluster_name.clone());
            }
        }
        None
    }
}

impl FromIterator<(String, Cluster)> for Clusters {
    fn from_iter<I: IntoIterator<Item = (String, Cluster)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

fn port_from_text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Port {
        Text(String),
        Number(u64),
    }

    Ok(match Port::deserialize(deserializer)? {
        Port::Text(text) => text,
        Port::Number(number) => number.to_string(),
    })
}
