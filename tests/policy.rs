mod common;

use actix_web_secure_headers::{
    AllowlistSet, Category, CspPolicy, Directive, EnvironmentMode, Nonce, PolicyBuilder, Source,
};
use common::{directive, nonces_in};
use std::borrow::Cow;

fn nonce() -> Nonce {
    Nonce::parse("r4nd0m+N0nce/Value==").unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy_exact_output() {
        let csp = PolicyBuilder::build_string(
            &nonce(),
            &AllowlistSet::default(),
            &EnvironmentMode::default(),
        );

        assert_eq!(
            csp,
            "default-src 'self'; \
             script-src 'self' 'nonce-r4nd0m+N0nce/Value=='; \
             style-src 'self' https://fonts.googleapis.com 'nonce-r4nd0m+N0nce/Value=='; \
             img-src 'self' data: blob:; \
             font-src 'self' https://fonts.gstatic.com data:; \
             connect-src 'self'; \
             object-src 'none'; \
             frame-ancestors 'none'; \
             base-uri 'self'; \
             form-action 'self'"
        );
    }

    #[test]
    fn test_directive_order_is_fixed() {
        let env = EnvironmentMode {
            production: true,
            report_only: false,
            report_uri: Some(Cow::Borrowed("/csp-report")),
        };
        let policy = PolicyBuilder::build(&nonce(), &AllowlistSet::default(), &env);

        let names: Vec<&str> = policy.directive_names().collect();
        assert_eq!(
            names,
            [
                "default-src",
                "script-src",
                "style-src",
                "img-src",
                "font-src",
                "connect-src",
                "object-src",
                "frame-ancestors",
                "base-uri",
                "form-action",
                "upgrade-insecure-requests",
            ]
        );
        assert!(policy.to_string().ends_with("; report-uri /csp-report"));
    }

    #[test]
    fn test_build_is_deterministic() {
        let allowlists = AllowlistSet::default();
        let env = EnvironmentMode::production();

        let first = PolicyBuilder::build_string(&nonce(), &allowlists, &env);
        let second = PolicyBuilder::build_string(&nonce(), &allowlists, &env);

        assert_eq!(first, second);
    }

    #[test]
    fn test_header_value_matches_display() {
        let policy = PolicyBuilder::build(
            &nonce(),
            &AllowlistSet::default(),
            &EnvironmentMode::production(),
        );

        let header = policy.header_value().unwrap();
        assert_eq!(header.to_str().unwrap(), policy.to_string());
    }

    #[test]
    fn test_production_adds_exactly_upgrade_insecure_requests() {
        let allowlists = AllowlistSet::default();
        let dev = PolicyBuilder::build_string(&nonce(), &allowlists, &EnvironmentMode::default());
        let prod =
            PolicyBuilder::build_string(&nonce(), &allowlists, &EnvironmentMode::production());

        assert!(!dev.contains("upgrade-insecure-requests"));
        assert_eq!(prod, format!("{}; upgrade-insecure-requests", dev));
    }

    #[test]
    fn test_report_uri_absent_when_not_configured() {
        let csp = PolicyBuilder::build_string(
            &nonce(),
            &AllowlistSet::default(),
            &EnvironmentMode::default(),
        );

        assert!(!csp.contains("report-uri"));
    }

    #[test]
    fn test_report_uri_present_when_configured() {
        let env = EnvironmentMode {
            report_uri: Some(Cow::Borrowed("https://example.test/r")),
            ..EnvironmentMode::default()
        };
        let csp = PolicyBuilder::build_string(&nonce(), &AllowlistSet::default(), &env);

        assert_eq!(csp.matches("report-uri https://example.test/r").count(), 1);
        assert_eq!(
            directive(&csp, "report-uri"),
            Some("report-uri https://example.test/r")
        );
    }

    #[test]
    fn test_nonce_in_script_and_style_only() {
        let csp = PolicyBuilder::build_string(
            &nonce(),
            &AllowlistSet::default(),
            &EnvironmentMode::default(),
        );

        assert_eq!(nonces_in(&csp), ["r4nd0m+N0nce/Value==", "r4nd0m+N0nce/Value=="]);
        assert!(directive(&csp, "script-src").unwrap().ends_with("'nonce-r4nd0m+N0nce/Value=='"));
        assert!(directive(&csp, "style-src").unwrap().ends_with("'nonce-r4nd0m+N0nce/Value=='"));
        assert!(!csp.contains("'unsafe-inline'"));
    }

    #[test]
    fn test_fixed_hardening_directives() {
        let csp = PolicyBuilder::build_string(
            &nonce(),
            &AllowlistSet::empty(),
            &EnvironmentMode::default(),
        );

        assert_eq!(directive(&csp, "object-src"), Some("object-src 'none'"));
        assert_eq!(directive(&csp, "frame-ancestors"), Some("frame-ancestors 'none'"));
        assert_eq!(directive(&csp, "base-uri"), Some("base-uri 'self'"));
        assert_eq!(directive(&csp, "form-action"), Some("form-action 'self'"));
    }

    #[test]
    fn test_empty_categories_fall_back_to_default_src() {
        let allowlists = AllowlistSet::default()
            .with(Category::Image, [])
            .with(Category::Connect, []);
        let csp = PolicyBuilder::build_string(&nonce(), &allowlists, &EnvironmentMode::default());

        assert!(directive(&csp, "img-src").is_none());
        assert!(directive(&csp, "connect-src").is_none());
        assert!(directive(&csp, "font-src").is_some());
        assert!(!csp.contains("img-src ;"));
    }

    #[test]
    fn test_script_and_style_survive_empty_allowlists() {
        let csp = PolicyBuilder::build_string(
            &nonce(),
            &AllowlistSet::empty(),
            &EnvironmentMode::default(),
        );

        assert_eq!(
            directive(&csp, "script-src"),
            Some("script-src 'nonce-r4nd0m+N0nce/Value=='")
        );
        assert_eq!(
            directive(&csp, "style-src"),
            Some("style-src 'nonce-r4nd0m+N0nce/Value=='")
        );
    }

    #[test]
    fn test_malformed_entries_are_dropped_at_build_time() {
        let allowlists = AllowlistSet::default()
            .with(
                Category::Connect,
                [
                    Source::Self_,
                    Source::Host(Cow::Borrowed("evil.test; script-src *")),
                    Source::Host(Cow::Borrowed("https://api.example.test")),
                ],
            )
            .with(Category::Script, [Source::Self_, Source::UnsafeInline])
            .with(Category::Font, [Source::Host(Cow::Borrowed("bad host"))]);
        let csp = PolicyBuilder::build_string(&nonce(), &allowlists, &EnvironmentMode::default());

        assert_eq!(
            directive(&csp, "connect-src"),
            Some("connect-src 'self' https://api.example.test")
        );
        assert!(!csp.contains("evil.test"));
        assert!(!csp.contains("'unsafe-inline'"));
        assert!(directive(&csp, "font-src").is_none());
    }

    #[test]
    fn test_unsafe_inline_never_reaches_the_policy() {
        let allowlists = AllowlistSet::default()
            .with(Category::Image, [Source::Self_, Source::UnsafeInline])
            .with(Category::Font, [Source::UnsafeInline])
            .with(Category::Connect, [Source::UnsafeInline, Source::Self_])
            .with(Category::Style, [Source::UnsafeInline]);
        let csp = PolicyBuilder::build_string(&nonce(), &allowlists, &EnvironmentMode::production());

        assert!(!csp.contains("'unsafe-inline'"));
        assert_eq!(directive(&csp, "img-src"), Some("img-src 'self'"));
        assert_eq!(directive(&csp, "connect-src"), Some("connect-src 'self'"));
        assert!(directive(&csp, "font-src").is_none());
        assert_eq!(
            directive(&csp, "style-src"),
            Some("style-src 'nonce-r4nd0m+N0nce/Value=='")
        );
    }

    #[test]
    fn test_static_nonce_in_allowlist_is_ignored() {
        let allowlists = AllowlistSet::default()
            .with(Category::Style, [Source::Nonce(Cow::Borrowed("stale"))]);
        let csp = PolicyBuilder::build_string(&nonce(), &allowlists, &EnvironmentMode::default());

        assert!(!csp.contains("stale"));
    }

    #[test]
    fn test_directive_names_never_repeat() {
        let mut policy = CspPolicy::new();
        policy.add_directive(Directive::new("img-src").with_sources([Source::Self_]));
        policy.add_directive(Directive::new("img-src").with_sources([Source::None]));

        assert_eq!(policy.directives().count(), 1);
        assert_eq!(policy.to_string(), "img-src 'none'");
    }

    #[test]
    fn test_built_policy_validates() {
        let policy = PolicyBuilder::build(
            &nonce(),
            &AllowlistSet::default(),
            &EnvironmentMode::production(),
        );

        assert!(policy.validate().is_ok());
        assert!(policy.contains_nonce());
    }

    #[test]
    fn test_empty_fetch_directive_fails_validation() {
        let mut policy = CspPolicy::new();
        policy.add_directive(Directive::new("img-src"));

        assert!(policy.validate().is_err());
    }
}
