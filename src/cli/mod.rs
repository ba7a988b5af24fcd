//! Terminal views and commands.

pub mod chart;
pub mod list;
pub mod rate;
pub mod session;
pub mod setup;
pub mod ui;
