//! configuration for the sitetheme binary
//!
//! library types never read this; they take their inputs through constructors.
pub mod instance;
pub mod options;
pub mod validate;
