//! ConnectWise client: validated configuration, host resolution and call
//! dispatch.
//!
//! Implementation details are split into submodules under `src/client/`.

pub mod builder;
pub mod core;
pub mod global;

pub use builder::ClientBuilder;
pub use core::{Client, DEFAULT_API_NAMESPACE};
