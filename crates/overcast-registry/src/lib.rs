//! Overcast Registry — clusters and the instances that belong to them
//!
//! The registry is a single JSON document mapping cluster names to
//! clusters, each holding its instances keyed by instance name:
//!
//! ```text
//! {
//!   "db": {
//!     "instances": {
//!       "db01": { "ip": "127.0.0.1", "name": "db01", "ssh_port": "22",
//!                 "ssh_key": "/home/me/.overcast/keys/overcast.key", "user": "root" }
//!     }
//!   }
//! }
//! ```
//!
//! [`RegistryStore`] owns reading and atomically replacing that document;
//! [`sanitize`] is the input filter applied to every user-supplied value
//! before it reaches the store or a provider.

pub mod error;
pub mod model;
pub mod sanitize;
pub mod store;

pub use error::*;
pub use model::*;
pub use sanitize::*;
pub use store::*;
