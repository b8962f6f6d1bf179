//! Heuristic ad filtering for social timeline JSON response bodies.
//!
//! This library takes a captured timeline response body as bytes, walks the
//! known timeline shapes inside it, removes or neutralizes entries classified
//! as advertising, and re-serializes only when something actually changed.
//! Malformed input and filtering that would empty a timeline both degrade to
//! passing the original bytes through unchanged.

pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod filter;
pub mod lookup;
pub mod paths;

pub use classify::{Classifier, EntryContext, Verdict};
pub use config::{CardPolicy, Config, ConfigBuilder, Strategy, DEFAULT_AD_PATTERNS};
pub use engine::{ScrubEngine, ScrubReport};
pub use error::{Error, Result};
pub use filter::{neutralize_entry, TreeFilter};

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::config::{CardPolicy, Config, ConfigBuilder, Strategy};
    pub use crate::engine::{ScrubEngine, ScrubReport};
    pub use crate::error::{Error, Result};
}
