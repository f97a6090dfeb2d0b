//! Infrastructure layer: sandbox paths and host-neutral HTTP plumbing.
//!
//! - [`http`]: Request/response descriptions and response correlation tags
//! - [`paths`]: Zellij sandbox path handling

pub mod http;
pub mod paths;

pub use http::{HttpRequest, HttpResponse, Method, RequestTag};
pub use paths::{expand_tilde, get_data_dir};
