//! xrender: Interactive Rendering of CLI Output
//!
//! Turns the plain-text output of a wrapped CLI invocation into a structured
//! chat message: row dropdowns with a live preview and row-scoped actions for
//! tabular output, paginated button menus, or a raw code block. Previous UI
//! selections are threaded back in on every invocation, so the pipeline itself
//! stays stateless.

pub mod ansi;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod executor;
pub mod logging;
pub mod message;
pub mod renderer;
pub mod runner;
pub mod state;
pub mod table;
pub mod template;
