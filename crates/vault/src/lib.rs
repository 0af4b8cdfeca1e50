//! Vault backends for NoteClaw.
//!
//! - [`InMemoryVault`]: notes held in a map, for tests and scratch sessions
//! - [`FsVault`]: notes stored as files under a directory

pub mod fs;
pub mod in_memory;

pub use fs::FsVault;
pub use in_memory::InMemoryVault;
