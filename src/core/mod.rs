pub mod allowlist;
pub mod config;
pub mod directives;
pub mod policy;
pub mod source;

pub use allowlist::{AllowlistSet, Category};
pub use config::{EnvironmentMode, SecurityConfig, SecurityConfigBuilder};
pub use directives::Directive;
pub use policy::{CspPolicy, PolicyBuilder};
pub use source::Source;
