use actix_web_secure_headers::{
    AllowlistSet, Category, CspError, SecurityConfig, SecurityConfigBuilder, Source,
};
use std::borrow::Cow;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_variables_fall_back_to_defaults() {
        let config = SecurityConfig::from_lookup(lookup_from(&[])).unwrap();

        assert!(!config.mode().production);
        assert!(!config.mode().report_only);
        assert!(config.mode().report_uri.is_none());
        assert_eq!(config.allowlists(), &AllowlistSet::default());
        assert!(config.exclusions().is_excluded("/favicon.ico"));
    }

    #[test]
    fn test_production_flag() {
        let config = SecurityConfig::from_lookup(lookup_from(&[("APP_ENV", "Production")])).unwrap();
        assert!(config.mode().production);

        let config = SecurityConfig::from_lookup(lookup_from(&[("APP_ENV", "staging")])).unwrap();
        assert!(!config.mode().production);
    }

    #[test]
    fn test_report_only_flag() {
        for (raw, expected) in [("1", true), ("true", true), ("on", true), ("0", false), ("no", false)] {
            let config =
                SecurityConfig::from_lookup(lookup_from(&[("CSP_REPORT_ONLY", raw)])).unwrap();
            assert_eq!(config.mode().report_only, expected, "CSP_REPORT_ONLY={}", raw);
        }
    }

    #[test]
    fn test_report_uri_accepted_forms() {
        for uri in ["https://example.test/r", "/csp-report"] {
            let config =
                SecurityConfig::from_lookup(lookup_from(&[("CSP_REPORT_URI", uri)])).unwrap();
            assert_eq!(config.mode().report_uri.as_deref(), Some(uri));
        }
    }

    #[test]
    fn test_blank_report_uri_is_treated_as_missing() {
        let config = SecurityConfig::from_lookup(lookup_from(&[("CSP_REPORT_URI", "  ")])).unwrap();
        assert!(config.mode().report_uri.is_none());
    }

    #[test]
    fn test_report_uri_rejected_forms() {
        for uri in ["ftp://example.test/r", "//evil.test", "https://a.test/r; script-src *", "not a url"] {
            let result = SecurityConfigBuilder::new().report_uri(uri).build();
            assert!(
                matches!(result, Err(CspError::InvalidReportUri(_))),
                "{} should be rejected",
                uri
            );
        }
    }

    #[test]
    fn test_allowlist_override_from_environment() {
        let config = SecurityConfig::from_lookup(lookup_from(&[(
            "CSP_CONNECT_SRC",
            "'self'  https://api.example.test wss:",
        )]))
        .unwrap();

        assert_eq!(
            config.allowlists().get(Category::Connect),
            &[
                Source::Self_,
                Source::Host(Cow::Borrowed("https://api.example.test")),
                Source::Scheme(Cow::Borrowed("wss")),
            ]
        );
        assert_eq!(
            config.allowlists().get(Category::Script),
            AllowlistSet::default().get(Category::Script)
        );
    }

    #[test]
    fn test_empty_override_clears_category() {
        let config = SecurityConfig::from_lookup(lookup_from(&[("CSP_IMG_SRC", "")])).unwrap();
        assert!(config.allowlists().get(Category::Image).is_empty());
    }

    #[test]
    fn test_unsafe_inline_rejected_at_startup() {
        let result =
            SecurityConfig::from_lookup(lookup_from(&[("CSP_STYLE_SRC", "'self' 'unsafe-inline'")]));
        assert!(matches!(result, Err(CspError::ValidationError(_))));
    }

    #[test]
    fn test_unsafe_inline_rejected_in_every_category() {
        for category in Category::ALL {
            let result = SecurityConfigBuilder::new()
                .allow(category, [Source::Self_, Source::UnsafeInline])
                .build();
            assert!(
                matches!(result, Err(CspError::ValidationError(_))),
                "{} accepted 'unsafe-inline'",
                category
            );
        }

        let result = SecurityConfig::from_lookup(lookup_from(&[("CSP_IMG_SRC", "'self' 'unsafe-inline'")]));
        assert!(matches!(result, Err(CspError::ValidationError(_))));
    }

    #[test]
    fn test_malformed_source_rejected_at_startup() {
        let result = SecurityConfig::from_lookup(lookup_from(&[("CSP_FONT_SRC", "'self' fonts\"x")]));
        assert!(matches!(result, Err(CspError::ConfigError(_))));

        let result = SecurityConfigBuilder::new()
            .allow(Category::Image, [Source::Host(Cow::Borrowed("a;b"))])
            .build();
        assert!(matches!(result, Err(CspError::InvalidSource(_))));
    }

    #[test]
    fn test_static_nonce_rejected_at_startup() {
        let result = SecurityConfigBuilder::new()
            .allow(Category::Script, [Source::Nonce(Cow::Borrowed("abc"))])
            .build();
        assert!(matches!(result, Err(CspError::ValidationError(_))));
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!(Source::parse("'self'").unwrap(), Source::Self_);
        assert_eq!(Source::parse("'none'").unwrap(), Source::None);
        assert_eq!(
            Source::parse("data:").unwrap(),
            Source::Scheme(Cow::Borrowed("data"))
        );
        assert_eq!(
            Source::parse("*.example.test").unwrap(),
            Source::Host(Cow::Borrowed("*.example.test"))
        );
        assert!(Source::parse("'bogus'").is_err());
        assert!(Source::parse("a,b").is_err());
    }
}
