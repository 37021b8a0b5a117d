pub mod csp;
pub mod extensions;
pub mod matcher;
#[cfg(feature = "reporting")]
pub mod reporting;

pub use csp::{csp_middleware, csp_middleware_from_env, CspMiddleware, CspMiddlewareService};
pub use extensions::CspExtensions;
pub use matcher::{ExclusionRule, StaticAssetMatcher};
#[cfg(feature = "reporting")]
pub use reporting::{
    csp_reporting_middleware, CspReportingMiddleware, CspReportingMiddlewareService,
};
