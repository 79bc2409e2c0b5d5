//! Connection settings binding model
//!
//! A toolkit-independent model of the "Connect" settings page: a declarative
//! field list ([`FieldId`], [`Field`]), a reactive rule table ([`Rule`]) and
//! the [`ConnectPanel`] that binds both to a [`ConnectConfig`]. A UI layer
//! renders `fields()`, forwards edits to `set`/`add_url`/`remove_url` and
//! listens for [`PanelEvent`]s.

mod config;
mod error;
mod field;
mod panel;
mod rules;

pub use config::*;
pub use error::*;
pub use field::*;
pub use panel::*;
pub use rules::*;
