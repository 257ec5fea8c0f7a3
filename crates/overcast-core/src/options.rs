//! Per-command options
//!
//! Each struct lists exactly the options its command recognizes, as the
//! user supplied them. Sanitizing and defaulting happen in the controller.

pub const DEFAULT_PROVIDER: &str = "digitalocean";
pub const DEFAULT_REGION: &str = "nyc2";
pub const DEFAULT_IMAGE: &str = "ubuntu-12-04-x64";
pub const DEFAULT_SIZE: &str = "512mb";

/// `instance create [name] --cluster=C [--provider=P] [--region=R] [--image=I] [--size=S]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateOptions {
    pub name: Option<String>,
    pub cluster: Option<String>,
    pub provider: Option<String>,
    pub region: Option<String>,
    pub size: Option<String>,
    pub image: Option<String>,
}

/// `instance import [name] --cluster=C --ip=IP [--user=U] [--ssh-port=P] [--ssh-key=PATH]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOptions {
    pub name: Option<String>,
    pub cluster: Option<String>,
    pub ip: Option<String>,
    pub user: Option<String>,
    pub ssh_port: Option<String>,
    pub ssh_key: Option<String>,
}

/// `instance remove [name]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveOptions {
    pub name: Option<String>,
}

impl RemoveOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}
