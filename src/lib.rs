//! Vendor-neutral source-control-management client with a Gitee driver.
//!
//! The [`scm`] module defines the provider-independent surface: domain
//! entities, list options, git reference helpers, the response envelope,
//! the transport seam, and the service traits bundled by [`scm::Client`].
//! The [`gitee`] module supplies the driver that maps that surface onto
//! the Gitee REST API (`https://gitee.com/api/v5`).
//!
//! Construct a client through the factory functions in [`gitee`] and talk
//! to the provider through the service accessors on the returned
//! [`scm::Client`].

pub mod gitee;
pub mod scm;

pub use gitee::GiteeConfig;
pub use scm::{AccessToken, Client, ClientError, Driver, Rate, Response};
