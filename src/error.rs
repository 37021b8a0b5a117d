use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CspError {
    #[error("Invalid source expression: {0}")]
    InvalidSource(String),

    #[error("Invalid directive value: {0}")]
    InvalidDirectiveValue(String),

    #[error("Invalid nonce value: {0}")]
    InvalidNonceValue(String),

    #[error("Invalid report URI: {0}")]
    InvalidReportUri(String),

    #[error("Crypto error: {0}")]
    CryptoError(String),

    #[error("Header processing error: {0}")]
    HeaderError(String),

    #[error("Policy validation error: {0}")]
    ValidationError(String),

    #[error("Report processing error: {0}")]
    ReportError(String),

    #[error("Config error: {0}")]
    ConfigError(String),
}

impl ResponseError for CspError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ReportError(_) => StatusCode::BAD_REQUEST,

            Self::InvalidSource(_)
            | Self::InvalidDirectiveValue(_)
            | Self::InvalidNonceValue(_)
            | Self::InvalidReportUri(_)
            | Self::CryptoError(_)
            | Self::HeaderError(_)
            | Self::ValidationError(_)
            | Self::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // Failures are operational log events; the client only sees the status.
    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::new(self.status_code())
    }
}
