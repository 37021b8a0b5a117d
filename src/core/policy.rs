use crate::constants::{
    BASE_URI, DEFAULT_BUFFER_CAPACITY, DEFAULT_SRC, FORM_ACTION, FRAME_ANCESTORS, OBJECT_SRC,
    REPORT_URI, SEMICOLON_SPACE, UPGRADE_INSECURE_REQUESTS,
};
use crate::core::allowlist::{AllowlistSet, Category};
use crate::core::config::EnvironmentMode;
use crate::core::directives::Directive;
use crate::core::source::Source;
use crate::error::CspError;
use crate::security::nonce::Nonce;
use crate::utils::{is_token_safe, BufferWriter};
use actix_web::http::header::HeaderValue;
use bytes::BytesMut;
use indexmap::IndexMap;
use std::{borrow::Cow, fmt};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CspPolicy {
    directives: IndexMap<Cow<'static, str>, Directive>,
    report_uri: Option<Cow<'static, str>>,
    estimated_size: usize,
}

impl CspPolicy {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_directive(&mut self, directive: Directive) -> &mut Self {
        self.estimated_size += directive.estimated_size() + SEMICOLON_SPACE.len();
        let name = Cow::Owned(directive.name().to_owned());
        if let Some(old) = self.directives.insert(name, directive) {
            self.estimated_size -= old.estimated_size() + SEMICOLON_SPACE.len();
        }
        self
    }

    pub fn set_report_uri(&mut self, uri: impl Into<Cow<'static, str>>) -> &mut Self {
        self.report_uri = Some(uri.into());
        self
    }

    #[inline]
    pub fn get_directive(&self, name: &str) -> Option<&Directive> {
        self.directives.get(name)
    }

    #[inline]
    pub fn directives(&self) -> impl Iterator<Item = &Directive> {
        self.directives.values()
    }

    #[inline]
    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(|k| k.as_ref())
    }

    #[inline]
    pub fn report_uri(&self) -> Option<&str> {
        self.report_uri.as_deref()
    }

    #[inline]
    pub fn contains_nonce(&self) -> bool {
        self.directives.values().any(Directive::contains_nonce)
    }

    pub fn validate(&self) -> Result<(), CspError> {
        for directive in self.directives.values() {
            directive.validate()?;
        }
        Ok(())
    }

    pub fn header_value(&self) -> Result<HeaderValue, CspError> {
        let mut buffer = BytesMut::with_capacity(self.estimated_size.max(DEFAULT_BUFFER_CAPACITY));
        self.write_to_buffer(&mut buffer);

        HeaderValue::from_maybe_shared(buffer.freeze()).map_err(|_| {
            CspError::InvalidDirectiveValue("Failed to create header value".to_string())
        })
    }
}

impl BufferWriter for CspPolicy {
    fn write_to_buffer(&self, buffer: &mut BytesMut) {
        let mut first = true;
        for directive in self.directives.values() {
            if !first {
                buffer.extend_from_slice(SEMICOLON_SPACE);
            }
            directive.write_to_buffer(buffer);
            first = false;
        }

        if let Some(uri) = &self.report_uri {
            if !first {
                buffer.extend_from_slice(SEMICOLON_SPACE);
            }
            buffer.extend_from_slice(REPORT_URI.as_bytes());
            buffer.extend_from_slice(b" ");
            buffer.extend_from_slice(uri.as_bytes());
        }
    }
}

impl fmt::Display for CspPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for directive in self.directives.values() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}", directive)?;
            first = false;
        }
        if let Some(uri) = &self.report_uri {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", REPORT_URI, uri)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PolicyBuilder;

impl PolicyBuilder {
    pub fn build(nonce: &Nonce, allowlists: &AllowlistSet, env: &EnvironmentMode) -> CspPolicy {
        let mut policy = CspPolicy::new();

        policy.add_directive(Directive::new(DEFAULT_SRC).with_sources([Source::Self_]));

        for category in Category::ALL {
            let mut directive = Directive::new(category.directive_name());
            for source in allowlists.get(category) {
                if !source.is_well_formed() || source.contains_nonce() {
                    log::warn!("dropping malformed {} source '{}'", category, source);
                    continue;
                }
                if source.is_unsafe_inline() {
                    log::warn!("dropping 'unsafe-inline' from {}", category);
                    continue;
                }
                directive.add_source(source.clone());
            }
            if category.takes_nonce() {
                directive.add_source(nonce.to_source());
            }
            if !directive.sources().is_empty() {
                policy.add_directive(directive);
            }
        }

        policy.add_directive(Directive::new(OBJECT_SRC).with_sources([Source::None]));
        policy.add_directive(Directive::new(FRAME_ANCESTORS).with_sources([Source::None]));
        policy.add_directive(Directive::new(BASE_URI).with_sources([Source::Self_]));
        policy.add_directive(Directive::new(FORM_ACTION).with_sources([Source::Self_]));

        if env.production {
            policy.add_directive(Directive::new(UPGRADE_INSECURE_REQUESTS));
        }

        if let Some(uri) = env.report_uri.as_deref() {
            if is_token_safe(uri) {
                policy.set_report_uri(uri.to_owned());
            } else {
                log::warn!("dropping malformed report-uri '{}'", uri);
            }
        }

        policy
    }

    #[inline]
    pub fn build_string(nonce: &Nonce, allowlists: &AllowlistSet, env: &EnvironmentMode) -> String {
        Self::build(nonce, allowlists, env).to_string()
    }
}
