//! Instance lifecycle error types

use overcast_cloud::CloudError;
use overcast_registry::RegistryError;
use thiserror::Error;

/// Instance command errors
#[derive(Error, Debug)]
pub enum InstanceError {
    #[error("Missing {} parameter.", describe_argument(.0))]
    MissingArgument(&'static str),

    #[error("{}", unknown_cluster_message(.name, .known, .hint))]
    UnknownCluster {
        name: String,
        known: Vec<String>,
        /// Suggest `overcast cluster create` instead of listing clusters
        hint: bool,
    },

    /// Reported like a missing `--provider`, with the names that would work
    #[error("{}", missing_provider_message(.known))]
    UnknownProvider { name: String, known: Vec<String> },

    #[error("No instance found with the name \"{0}\".")]
    InstanceNotFound(String),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Provisioning(#[from] CloudError),
}

pub type Result<T> = std::result::Result<T, InstanceError>;

/// Positional arguments are shown as `[name]`, options as `--flag`
fn describe_argument(field: &str) -> String {
    match field {
        "name" => "[name]".to_string(),
        other => format!("--{}", other.replace('_', "-")),
    }
}

fn unknown_cluster_message(name: &str, known: &[String], hint: &bool) -> String {
    if *hint {
        format!(
            "No \"{name}\" cluster found.\nYou can create one by running: overcast cluster create {name}"
        )
    } else if known.is_empty() {
        format!("No \"{name}\" cluster found. There are no known clusters.")
    } else {
        format!(
            "No \"{name}\" cluster found. Known clusters are: {}.",
            known.join(", ")
        )
    }
}

fn missing_provider_message(known: &[String]) -> String {
    if known.is_empty() {
        "Missing --provider parameter. There are no supported providers.".to_string()
    } else {
        format!(
            "Missing --provider parameter. Supported providers are: {}.",
            known.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_argument_messages() {
        assert_eq!(
            InstanceError::MissingArgument("name").to_string(),
            "Missing [name] parameter."
        );
        assert_eq!(
            InstanceError::MissingArgument("cluster").to_string(),
            "Missing --cluster parameter."
        );
        assert_eq!(
            InstanceError::MissingArgument("ssh_port").to_string(),
            "Missing --ssh-port parameter."
        );
    }

    #[test]
    fn test_unknown_cluster_messages() {
        let listed = InstanceError::UnknownCluster {
            name: "missing".to_string(),
            known: vec!["db".to_string(), "app".to_string()],
            hint: false,
        };
        assert_eq!(
            listed.to_string(),
            "No \"missing\" cluster found. Known clusters are: db, app."
        );

        let hinted = InstanceError::UnknownCluster {
            name: "web".to_string(),
            known: vec!["db".to_string()],
            hint: true,
        };
        assert!(hinted.to_string().contains("overcast cluster create web"));
    }

    #[test]
    fn test_unknown_provider_message() {
        let err = InstanceError::UnknownProvider {
            name: "aws".to_string(),
            known: vec!["digitalocean".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Missing --provider parameter. Supported providers are: digitalocean."
        );

        let none = InstanceError::UnknownProvider {
            name: "aws".to_string(),
            known: Vec::new(),
        };
        assert_eq!(
            none.to_string(),
            "Missing --provider parameter. There are no supported providers."
        );
    }
}
