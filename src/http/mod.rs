//! HTTP access for remote release endpoints

mod client;
mod error;
mod types;

pub use client::HttpClient;
pub use error::*;
pub use types::*;
