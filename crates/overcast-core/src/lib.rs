//! Overcast Core — instance lifecycle
//!
//! Orchestrates `create`, `import` and `remove` against the cluster
//! registry and the registered hosting providers. Every operation checks
//! its inputs in a fixed order and stops at the first failure, before any
//! provider is called or any byte of the registry is written.

pub mod error;
pub mod lifecycle;
pub mod options;

pub use error::{InstanceError, Result};
pub use lifecycle::{Created, Imported, InstanceController, Removed};
pub use options::{CreateOptions, ImportOptions, RemoveOptions};
