//! doctl CLI wrapper
//!
//! Wraps the doctl CLI commands for DigitalOcean droplet operations.

use crate::error::{DigitalOceanError, Result};
use serde::{Deserialize, Serialize};
use std::ffi::OsString;
use std::process::Stdio;
use tokio::process::Command;

const DOCTL_BINARY: &str = "doctl";

/// doctl CLI wrapper
#[derive(Debug, Clone)]
pub struct Doctl {
    program: OsString,
    leading_args: Vec<OsString>,
}

impl Default for Doctl {
    fn default() -> Self {
        Self::new()
    }
}

impl Doctl {
    pub fn new() -> Self {
        Self::with_binary(DOCTL_BINARY)
    }

    /// Use a specific doctl executable instead of the one on `PATH`
    pub fn with_binary(binary: impl Into<OsString>) -> Self {
        Self {
            program: binary.into(),
            leading_args: Vec::new(),
        }
    }

    /// Run doctl through another program, e.g. `sh /path/to/doctl-wrapper`
    pub fn with_command<I, A>(program: impl Into<OsString>, leading_args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            leading_args: leading_args.into_iter().map(Into::into).collect(),
        }
    }

    /// Run a doctl command and return stdout
    async fn run_command(&self, args: &[String]) -> Result<String> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.leading_args);
        cmd.args(args);
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        tracing::debug!("Running: doctl {}", args.join(" "));

        let output = cmd.output().await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                DigitalOceanError::DoctlNotFound
            } else {
                DigitalOceanError::IoError(e)
            }
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DigitalOceanError::CommandFailed(stderr.trim().to_string()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    /// Create a droplet and wait until it is active
    pub async fn create_droplet(&self, config: &CreateDropletConfig) -> Result<DropletInfo> {
        let output = self.run_command(&config.to_args()).await?;
        parse_created_droplet(&output)
    }
}

/// Configuration for creating a droplet
#[derive(Debug, Clone)]
pub struct CreateDropletConfig {
    pub name: String,
    pub region: String,
    pub size: String,
    pub image: String,
    pub ssh_key_fingerprint: Option<String>,
}

impl CreateDropletConfig {
    /// Arguments for `doctl compute droplet create`
    pub fn to_args(&self) -> Vec<String> {
        let mut args: Vec<String> = [
            "compute",
            "droplet",
            "create",
            self.name.as_str(),
            "--region",
            self.region.as_str(),
            "--size",
            self.size.as_str(),
            "--image",
            self.image.as_str(),
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        if let Some(ref fingerprint) = self.ssh_key_fingerprint {
            args.push("--ssh-keys".to_string());
            args.push(fingerprint.clone());
        }

        args.push("--wait".to_string());
        args.push("--output".to_string());
        args.push("json".to_string());
        args
    }
}

/// Droplet information from doctl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DropletInfo {
    pub id: u64,

    pub name: String,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub networks: Networks,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Networks {
    #[serde(default)]
    pub v4: Vec<NetworkV4>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkV4 {
    pub ip_address: String,

    #[serde(rename = "type")]
    pub network_type: String,
}

impl DropletInfo {
    /// First public IPv4 address
    pub fn public_ip(&self) -> Option<&str> {
        self.networks
            .v4
            .iter()
            .find(|n| n.network_type == "public")
            .map(|n| n.ip_address.as_str())
    }

    pub fn is_active(&self) -> bool {
        self.status.as_deref() == Some("active")
    }
}

/// doctl prints a JSON array even when a single droplet was created
fn parse_created_droplet(output: &str) -> Result<DropletInfo> {
    let droplets: Vec<DropletInfo> = serde_json::from_str(output.trim())?;
    droplets
        .into_iter()
        .next()
        .ok_or(DigitalOceanError::NoDroplet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREATE_OUTPUT: &str = r#"[
  {
    "id": 3164444,
    "name": "db01",
    "memory": 512,
    "status": "active",
    "networks": {
      "v4": [
        { "ip_address": "10.128.0.5", "netmask": "255.255.0.0", "type": "private" },
        { "ip_address": "104.131.186.241", "netmask": "255.255.240.0", "type": "public" }
      ],
      "v6": []
    }
  }
]"#;

    #[test]
    fn test_parse_created_droplet() {
        let droplet = parse_created_droplet(CREATE_OUTPUT).unwrap();
        assert_eq!(droplet.id, 3164444);
        assert_eq!(droplet.name, "db01");
        assert_eq!(droplet.public_ip(), Some("104.131.186.241"));
        assert!(droplet.is_active());
    }

    #[test]
    fn test_parse_empty_output() {
        let err = parse_created_droplet("[]").unwrap_err();
        assert!(matches!(err, DigitalOceanError::NoDroplet));
    }

    #[test]
    fn test_droplet_without_public_network() {
        let droplet = parse_created_droplet(r#"[{"id": 1, "name": "x", "status": "new"}]"#).unwrap();
        assert_eq!(droplet.public_ip(), None);
        assert!(!droplet.is_active());
    }

    #[test]
    fn test_create_args() {
        let config = CreateDropletConfig {
            name: "db01".to_string(),
            region: "nyc2".to_string(),
            size: "512mb".to_string(),
            image: "ubuntu-12-04-x64".to_string(),
            ssh_key_fingerprint: None,
        };
        assert_eq!(
            config.to_args().join(" "),
            "compute droplet create db01 --region nyc2 --size 512mb \
             --image ubuntu-12-04-x64 --wait --output json"
        );

        let with_key = CreateDropletConfig {
            ssh_key_fingerprint: Some("aa:bb:cc".to_string()),
            ..config
        };
        let args = with_key.to_args();
        let pos = args.iter().position(|a| a == "--ssh-keys").unwrap();
        assert_eq!(args[pos + 1], "aa:bb:cc");
    }

    #[tokio::test]
    async fn test_missing_binary() {
        let doctl = Doctl::with_binary("/nonexistent/overcast-test/doctl");
        let config = CreateDropletConfig {
            name: "db01".to_string(),
            region: "nyc2".to_string(),
            size: "512mb".to_string(),
            image: "ubuntu-12-04-x64".to_string(),
            ssh_key_fingerprint: None,
        };

        let err = doctl.create_droplet(&config).await.unwrap_err();
        assert!(matches!(err, DigitalOceanError::DoctlNotFound));
    }
}
