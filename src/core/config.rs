use crate::constants::{
    ENV_APP_ENV, ENV_CONNECT_SRC, ENV_FONT_SRC, ENV_IMG_SRC, ENV_REPORT_ONLY, ENV_REPORT_URI,
    ENV_SCRIPT_SRC, ENV_STYLE_SRC,
};
use crate::core::allowlist::{AllowlistSet, Category};
use crate::error::CspError;
use crate::middleware::matcher::StaticAssetMatcher;
use crate::security::headers::SecurityHeaderSet;
use crate::utils::is_token_safe;
use std::borrow::Cow;
use url::Url;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentMode {
    pub production: bool,
    pub report_only: bool,
    pub report_uri: Option<Cow<'static, str>>,
}

impl EnvironmentMode {
    #[inline]
    pub fn production() -> Self {
        Self {
            production: true,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    allowlists: AllowlistSet,
    mode: EnvironmentMode,
    headers: SecurityHeaderSet,
    exclusions: StaticAssetMatcher,
}

impl SecurityConfig {
    pub fn new() -> Result<Self, CspError> {
        SecurityConfigBuilder::new().build()
    }

    pub fn from_env() -> Result<Self, CspError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, CspError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = SecurityConfigBuilder::new();

        let production = lookup(ENV_APP_ENV)
            .map(|v| v.trim().eq_ignore_ascii_case("production"))
            .unwrap_or(false);
        builder = builder.production(production);

        let report_only = lookup(ENV_REPORT_ONLY)
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        builder = builder.report_only(report_only);

        if let Some(uri) = lookup(ENV_REPORT_URI).filter(|v| !v.trim().is_empty()) {
            builder = builder.report_uri(uri.trim().to_owned());
        }

        for (key, category) in [
            (ENV_SCRIPT_SRC, Category::Script),
            (ENV_STYLE_SRC, Category::Style),
            (ENV_IMG_SRC, Category::Image),
            (ENV_FONT_SRC, Category::Font),
            (ENV_CONNECT_SRC, Category::Connect),
        ] {
            if let Some(raw) = lookup(key) {
                let sources = AllowlistSet::parse_list(&raw)
                    .map_err(|e| CspError::ConfigError(format!("{}: {}", key, e)))?;
                builder = builder.allow(category, sources);
            }
        }

        builder.build()
    }

    #[inline]
    pub fn allowlists(&self) -> &AllowlistSet {
        &self.allowlists
    }

    #[inline]
    pub fn mode(&self) -> &EnvironmentMode {
        &self.mode
    }

    #[inline]
    pub fn headers(&self) -> &SecurityHeaderSet {
        &self.headers
    }

    #[inline]
    pub fn exclusions(&self) -> &StaticAssetMatcher {
        &self.exclusions
    }
}

#[derive(Debug, Default)]
pub struct SecurityConfigBuilder {
    allowlists: Option<AllowlistSet>,
    mode: EnvironmentMode,
    exclusions: Option<StaticAssetMatcher>,
}

impl SecurityConfigBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn allowlists(mut self, allowlists: AllowlistSet) -> Self {
        self.allowlists = Some(allowlists);
        self
    }

    pub fn allow(
        mut self,
        category: Category,
        sources: impl IntoIterator<Item = crate::core::source::Source>,
    ) -> Self {
        self.allowlists
            .get_or_insert_with(AllowlistSet::default)
            .set(category, sources);
        self
    }

    #[inline]
    pub fn production(mut self, enabled: bool) -> Self {
        self.mode.production = enabled;
        self
    }

    #[inline]
    pub fn report_only(mut self, enabled: bool) -> Self {
        self.mode.report_only = enabled;
        self
    }

    #[inline]
    pub fn report_uri(mut self, uri: impl Into<Cow<'static, str>>) -> Self {
        self.mode.report_uri = Some(uri.into());
        self
    }

    #[inline]
    pub fn exclusions(mut self, exclusions: StaticAssetMatcher) -> Self {
        self.exclusions = Some(exclusions);
        self
    }

    pub fn build(self) -> Result<SecurityConfig, CspError> {
        let allowlists = self.allowlists.unwrap_or_default();
        allowlists.validate()?;

        if let Some(uri) = self.mode.report_uri.as_deref() {
            validate_report_uri(uri)?;
        }

        let headers = SecurityHeaderSet::standard()?;

        log::debug!(
            "security config: production={}, report_only={}, report_uri={:?}",
            self.mode.production,
            self.mode.report_only,
            self.mode.report_uri
        );

        Ok(SecurityConfig {
            allowlists,
            mode: self.mode,
            headers,
            exclusions: self
                .exclusions
                .unwrap_or_else(StaticAssetMatcher::standard),
        })
    }
}

fn validate_report_uri(uri: &str) -> Result<(), CspError> {
    if !is_token_safe(uri) {
        return Err(CspError::InvalidReportUri(uri.to_owned()));
    }

    if uri.starts_with('/') && !uri.starts_with("//") {
        return Ok(());
    }

    match Url::parse(uri) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(CspError::InvalidReportUri(uri.to_owned())),
    }
}

#[inline]
fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
