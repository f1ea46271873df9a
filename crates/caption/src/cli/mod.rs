//! Command implementations.

pub mod check;
pub mod config;
pub mod interactive;
pub mod predict;
pub mod view;
