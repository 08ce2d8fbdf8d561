//! The two-tab demo application
//!
//! Pages, navigator construction, terminal rendering and the shell command
//! parser used by the `demo` and `interactive` commands.

pub mod app;
pub mod pages;
pub mod shell;
pub mod view;
