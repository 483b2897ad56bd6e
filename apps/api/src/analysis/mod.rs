//! The mocked analysis workflow: session state machine, scoring seam, and
//! the timer drivers that simulate a run.

pub mod analyzer;
pub mod handlers;
pub mod models;
pub mod runner;
pub mod session;
