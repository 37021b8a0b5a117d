pub use crate::core::{
    AllowlistSet, Category, EnvironmentMode, SecurityConfig, SecurityConfigBuilder, Source,
};
pub use crate::middleware::{csp_middleware, CspExtensions, CspMiddleware, StaticAssetMatcher};
pub use crate::security::{Nonce, NonceGenerator, RequestNonce};
