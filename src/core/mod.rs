// Public modules
pub mod error;
pub mod license;
pub mod naming;
pub mod scaffold;

// Public modules for CLI access
pub mod defaults;
pub mod paths;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
pub use naming::{derive_names, substitute_names, substitute_names_with, MatchMode, NameSet};
