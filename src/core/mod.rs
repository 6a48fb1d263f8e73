//! Core module - settings, session context, scope, logging and probe serialization

pub mod context;
pub mod gate;
pub mod logging;
pub mod scope;
pub mod settings;
