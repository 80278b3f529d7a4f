//! RouterFed Infrastructure Layer
//!
//! Adapters behind the application ports: the admin client cache, HTTP admin
//! clients and managers, the static endpoint directory, and the mount table
//! store.
pub mod admin;
pub mod directory;
pub mod mount_table;
