//! # connectwise-client
//!
//! Thin client core for the ConnectWise PSA SOAP API.
//!
//! ## Overview
//!
//! The SOAP transport and the per-endpoint response types live outside this
//! crate. What lives here is the part with decisions in it:
//!
//! - **Configuration**: [`ClientConfig`] validates the `connectwise` section
//!   (company, host, username, password) and carries opaque SOAP options.
//! - **Host resolution**: [`Client::host`] and [`Client::host_with`] give the
//!   transport its endpoint URLs.
//! - **Dispatch**: [`Client::execute`] turns an API group and function name
//!   into `<namespace>::<Group>::<Function>Response`, looks that name up in a
//!   [`ResponseRegistry`] and builds the registered type from the call
//!   arguments.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use connectwise_client::{Arguments, Client, ClientConfig};
//!
//! fn main() -> connectwise_client::Result<()> {
//!     let config = ClientConfig::from_path("connectwise.yaml")?;
//!     let client = Client::new(config);
//!
//!     let endpoint = client.host_with("/v4_6_release/apis/2.0/CompanyApi.asmx");
//!     println!("{endpoint}");
//!
//!     let result = client.execute("CompanyApi", "GetCompany", Arguments::new())?;
//!     println!("{}", result.type_name());
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Configuration loading and validation |
//! | [`client`] | Client handle, builder and process-wide current client |
//! | [`registry`] | Qualified-name registry of response type factories |
//! | [`results`] | Dispatch results and the `Collection` container |

pub mod client;
pub mod config;
pub mod registry;
pub mod results;

// Re-export main types for convenience
pub use client::{Client, ClientBuilder, DEFAULT_API_NAMESPACE};
pub use config::{ClientConfig, Credentials, RawConfig, SoapOptions};
pub use registry::{global_registry, qualify, Arguments, ResponseFactory, ResponseRegistry};
pub use results::{CallResult, Collection};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
