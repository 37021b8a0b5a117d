use crate::security::nonce::RequestNonce;
use actix_web::HttpMessage;

pub trait CspExtensions {
    fn csp_nonce(&self) -> Option<String>;
    fn csp_nonce_meta_tag(&self) -> Option<String>;
    fn csp_nonce_attribute(&self) -> Option<String>;
}

impl<T> CspExtensions for T
where
    T: HttpMessage,
{
    fn csp_nonce(&self) -> Option<String> {
        self.extensions()
            .get::<RequestNonce>()
            .map(|nonce| nonce.0.clone())
    }

    fn csp_nonce_meta_tag(&self) -> Option<String> {
        self.extensions()
            .get::<RequestNonce>()
            .map(RequestNonce::meta_tag)
    }

    fn csp_nonce_attribute(&self) -> Option<String> {
        self.extensions()
            .get::<RequestNonce>()
            .map(RequestNonce::attribute)
    }
}
