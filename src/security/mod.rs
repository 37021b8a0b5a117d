pub mod headers;
pub mod nonce;

pub use headers::{FeatureAllowlist, HeaderApplier, PermissionsPolicy, SecurityHeaderSet};
pub use nonce::{EntropySource, Nonce, NonceGenerator, OsEntropy, RequestNonce};
