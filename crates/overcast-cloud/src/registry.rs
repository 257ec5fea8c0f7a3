//! Name → provider lookup

use crate::error::{CloudError, Result};
use crate::provider::CloudProvider;
use std::collections::BTreeMap;
use std::sync::Arc;

/// The set of providers `instance create` may dispatch to
#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: BTreeMap<String, Arc<dyn CloudProvider>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a provider under its own name, replacing any earlier one
    pub fn register(&mut self, provider: Arc<dyn CloudProvider>) {
        let name = provider.name().to_string();
        tracing::debug!(provider = %name, "Registered provider");
        self.providers.insert(name, provider);
    }

    pub fn with(mut self, provider: Arc<dyn CloudProvider>) -> Self {
        self.register(provider);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn CloudProvider>> {
        self.providers.get(name).cloned()
    }

    pub fn require(&self, name: &str) -> Result<Arc<dyn CloudProvider>> {
        self.get(name)
            .ok_or_else(|| CloudError::ProviderNotFound(name.to_string()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.providers.keys().map(String::as_str).collect()
    }
}

impl std::fmt::Debug for ProviderRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderRegistry")
            .field("providers", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::CreateSpec;
    use async_trait::async_trait;

    struct NamedProvider(&'static str);

    #[async_trait]
    impl CloudProvider for NamedProvider {
        fn name(&self) -> &str {
            self.0
        }

        fn display_name(&self) -> &str {
            self.0
        }

        async fn create(&self, _spec: &CreateSpec) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_names_are_sorted() {
        let registry = ProviderRegistry::new()
            .with(Arc::new(NamedProvider("vultr")))
            .with(Arc::new(NamedProvider("digitalocean")))
            .with(Arc::new(NamedProvider("linode")));

        assert_eq!(registry.names(), vec!["digitalocean", "linode", "vultr"]);
    }

    #[test]
    fn test_lookup() {
        let registry = ProviderRegistry::new().with(Arc::new(NamedProvider("digitalocean")));

        assert_eq!(registry.get("digitalocean").unwrap().name(), "digitalocean");
        assert!(registry.get("aws").is_none());
        assert!(matches!(
            registry.require("aws"),
            Err(CloudError::ProviderNotFound(name)) if name == "aws"
        ));
    }

    #[tokio::test]
    async fn test_dispatch_through_registry() {
        let registry = ProviderRegistry::new().with(Arc::new(NamedProvider("digitalocean")));
        let spec = CreateSpec {
            name: "web01".to_string(),
            cluster: "web".to_string(),
            size: "512mb".to_string(),
            image: "ubuntu-12-04-x64".to_string(),
            region: "nyc2".to_string(),
        };

        registry
            .require("digitalocean")
            .unwrap()
            .create(&spec)
            .await
            .unwrap();
    }
}
