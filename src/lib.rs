pub mod constants;
pub mod core;
pub mod error;
pub mod middleware;
pub mod monitoring;
pub mod prelude;
pub mod security;
mod utils;

// Re-export commonly used types for convenience
pub use constants::{HEADER_CSP_NONCE, NONCE_LENGTH};
pub use crate::core::{
    AllowlistSet, Category, CspPolicy, Directive, EnvironmentMode, PolicyBuilder, SecurityConfig,
    SecurityConfigBuilder, Source,
};
pub use error::CspError;
#[cfg(feature = "reporting")]
pub use middleware::{csp_reporting_middleware, CspReportingMiddleware};
pub use middleware::{
    csp_middleware, csp_middleware_from_env, CspExtensions, CspMiddleware, ExclusionRule,
    StaticAssetMatcher,
};
#[cfg(feature = "reporting")]
pub use monitoring::CspViolationReport;
pub use monitoring::CspStats;
pub use security::{
    EntropySource, HeaderApplier, Nonce, NonceGenerator, OsEntropy, PermissionsPolicy,
    RequestNonce, SecurityHeaderSet,
};
