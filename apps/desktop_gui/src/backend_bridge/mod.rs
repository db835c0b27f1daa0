//! Bridge between the UI thread and the worker thread that talks to the
//! prediction service.

pub mod commands;
pub mod runtime;
