//! CLI command implementations

pub mod demo;
pub mod interactive;
pub mod routes;

pub use demo::demo_command;
pub use interactive::interactive_command;
pub use routes::routes_command;
