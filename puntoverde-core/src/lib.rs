//! Core types and service wiring for the Punto Verde recycling directory.

/// Static geographic tables and the coordinate classifier.
pub mod atlas;
/// Static directory of recycling centers keyed by region.
pub mod directory;
/// Domain models shared by resolver, directory, and providers.
pub mod model;
/// Traits describing the external location sources.
pub mod ports;
/// Fallback chain producing a resolved location.
pub mod resolver;
/// High-level service facade used by clients.
pub mod service;

pub use atlas::*;
pub use directory::*;
pub use model::*;
pub use ports::*;
pub use resolver::*;
pub use service::*;
