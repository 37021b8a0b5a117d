use crate::constants::NONCE_LENGTH;
use crate::core::source::Source;
use crate::error::CspError;
use crate::utils::is_base64_char;
use actix_web::http::header::HeaderValue;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use smallvec::{smallvec, SmallVec};
use std::{borrow::Cow, fmt, ops::Deref, sync::Arc};

// Implementations fail instead of returning weaker randomness.
#[cfg_attr(test, mockall::automock)]
pub trait EntropySource: Send + Sync {
    fn fill(&self, dest: &mut [u8]) -> Result<(), CspError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    #[inline]
    fn fill(&self, dest: &mut [u8]) -> Result<(), CspError> {
        getrandom::getrandom(dest).map_err(|e| CspError::CryptoError(e.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Nonce(String);

impl Nonce {
    pub fn parse(value: impl Into<String>) -> Result<Self, CspError> {
        let value = value.into();
        if value.is_empty() || !value.bytes().all(is_base64_char) {
            return Err(CspError::InvalidNonceValue(value));
        }
        Ok(Self(value))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[inline]
    pub fn into_string(self) -> String {
        self.0
    }

    #[inline]
    pub fn to_source(&self) -> Source {
        Source::Nonce(Cow::Owned(self.0.clone()))
    }

    pub fn header_value(&self) -> Result<HeaderValue, CspError> {
        HeaderValue::from_str(&self.0).map_err(|e| CspError::HeaderError(e.to_string()))
    }
}

impl fmt::Display for Nonce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Nonce {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone)]
pub struct NonceGenerator {
    length: usize,
    entropy: Arc<dyn EntropySource>,
}

impl fmt::Debug for NonceGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NonceGenerator")
            .field("length", &self.length)
            .finish_non_exhaustive()
    }
}

impl NonceGenerator {
    #[inline]
    pub fn new(length: usize) -> Self {
        Self::with_entropy(length, Arc::new(OsEntropy))
    }

    #[inline]
    pub fn with_entropy(length: usize, entropy: Arc<dyn EntropySource>) -> Self {
        Self { length, entropy }
    }

    pub fn generate(&self) -> Result<Nonce, CspError> {
        if self.length == 0 {
            return Err(CspError::InvalidNonceValue(
                "nonce length must be non-zero".to_string(),
            ));
        }

        let mut buffer: SmallVec<[u8; 64]> = smallvec![0u8; self.length];
        self.entropy.fill(&mut buffer)?;

        Ok(Nonce(BASE64.encode(&buffer)))
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn encoded_length(&self) -> usize {
        self.length.div_ceil(3) * 4
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new(NONCE_LENGTH)
    }
}

#[derive(Debug, Clone)]
pub struct RequestNonce(pub String);

impl RequestNonce {
    pub fn meta_tag(&self) -> String {
        format!(r#"<meta name="csp-nonce" content="{}">"#, self.0)
    }

    pub fn attribute(&self) -> String {
        format!(r#"nonce="{}""#, self.0)
    }
}

impl From<&Nonce> for RequestNonce {
    fn from(nonce: &Nonce) -> Self {
        Self(nonce.0.clone())
    }
}

impl Deref for RequestNonce {
    type Target = String;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
