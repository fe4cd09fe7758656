//! Utility types.
//!
//! Layout and control constants shared by the application state and the UI.

pub mod layout_config;
