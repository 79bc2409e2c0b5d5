//! Version resolution
//!
//! Resolves installed and latest released versions of NapCat, QQ and NCD,
//! their changelogs and the QQ installer download URL. Remote failures are
//! absorbed here: they surface as `None`, one notification and one error log.

mod compare;
mod error;
mod resolver;
mod types;

pub use compare::*;
pub use error::*;
pub use resolver::*;
pub use types::*;
