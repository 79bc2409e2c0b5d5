//! Persisted application settings
//!
//! Settings live in a single JSON file under the per-user configuration
//! directory. OneBot connection configs are stored next to the NapCat
//! install, one file per account.

mod error;
mod store;
mod types;

pub use error::*;
pub use store::*;
pub use types::*;
