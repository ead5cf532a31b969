//! Backend bridge: command types and the worker thread that runs avatar decodes.

pub mod commands;
pub mod runtime;
