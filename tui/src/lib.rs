//! Terminal front end for the biblioteca REST API.
//!
//! Wires the pure controllers and view models from `biblioteca-core` to a
//! ratatui interface and a ureq transport. Two tabs (books, loans), a form
//! above each table, a transient notification banner and a confirmation
//! modal for destructive actions.

pub mod app;
pub mod transport;
pub mod ui;
