#![allow(dead_code)]

use actix_web::{HttpRequest, HttpResponse};
use actix_web_secure_headers::{
    CspError, CspExtensions, EntropySource, SecurityConfig, SecurityConfigBuilder,
};

/// Echoes the nonce the rendering layer sees, the way a page template would.
pub async fn page(req: HttpRequest) -> HttpResponse {
    let from_extension = req.csp_nonce().unwrap_or_default();
    let from_header = req
        .headers()
        .get("x-csp-nonce")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_owned();

    HttpResponse::Ok()
        .content_type("text/html")
        .body(format!("{}|{}", from_extension, from_header))
}

pub async fn asset() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/javascript")
        .body("console.log(1)")
}

pub fn default_config() -> SecurityConfig {
    SecurityConfigBuilder::new()
        .build()
        .expect("default config must be valid")
}

/// The source list of `name` in a serialized policy.
pub fn directive<'a>(csp: &'a str, name: &str) -> Option<&'a str> {
    csp.split("; ").find(|d| {
        *d == name || (d.starts_with(name) && d.as_bytes().get(name.len()) == Some(&b' '))
    })
}

/// Every `'nonce-…'` value in the policy, in order of appearance.
pub fn nonces_in(csp: &str) -> Vec<String> {
    csp.split(' ')
        .filter_map(|token| {
            token
                .trim_end_matches(';')
                .strip_prefix("'nonce-")
                .and_then(|rest| rest.strip_suffix('\''))
                .map(str::to_owned)
        })
        .collect()
}

pub struct NoEntropy;

impl EntropySource for NoEntropy {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), CspError> {
        Err(CspError::CryptoError("entropy source unavailable".to_string()))
    }
}
