pub mod cluster;
pub mod instance;
