//! Interview sessions: start, answer, complete, and the dashboard built from
//! completed sessions.

pub mod handlers;
pub mod store;
