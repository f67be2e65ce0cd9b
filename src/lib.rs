//! Terminal client for a personal task tracker backed by a REST service.
//!
//! The [`tui`] module provides the interactive list, create and edit views;
//! [`commands`] provides the same operations as one-shot CLI commands. Both
//! talk to the service through the [`api::TaskApi`] trait.

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod ordering;
pub mod tui;
