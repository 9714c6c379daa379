//! Versioned migration rules.
//!
//! A [`Rule`] inspects the project for one major-version step and reports
//! findings plus the fixes it would like to run. [`RuleRegistry`] maps a
//! step to its rule and falls back to [`FallbackRule`] for steps nobody
//! registered, so an unknown step is a completed no-op rather than an error.

pub mod checks;
mod ports;
mod registry;
mod rules;

pub use ports::{FsRepoView, RepoView};
pub use registry::{FallbackRule, Rule, RuleRegistry};
pub use rules::{
    Angular10To11, Angular11To12, Angular12To13, Angular13To14, Angular14To15, Angular15To16,
    Angular16To17, Angular17To18, Angular18To19,
};
