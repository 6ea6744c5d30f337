//! Configuration modules for the Coursiva API.
//!
//! Each submodule handles one aspect of configuration, loaded from
//! environment variables at startup:
//!
//! - [`cors`]: CORS (Cross-Origin Resource Sharing) configuration
//! - [`database`]: PostgreSQL connection pool initialization
//! - [`jwt`]: JWT authentication configuration

pub mod cors;
pub mod database;
pub mod jwt;
