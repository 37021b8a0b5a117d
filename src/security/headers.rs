use crate::constants::{
    CONTENT_TYPE_OPTIONS_VALUE, CORP_VALUE, CROSS_DOMAIN_POLICIES_VALUE,
    DNS_PREFETCH_CONTROL_VALUE, FRAME_OPTIONS_VALUE, HEADER_CONTENT_TYPE_OPTIONS, HEADER_CORP,
    HEADER_CROSS_DOMAIN_POLICIES, HEADER_CSP, HEADER_CSP_NONCE, HEADER_CSP_REPORT_ONLY,
    HEADER_DNS_PREFETCH_CONTROL, HEADER_FRAME_OPTIONS, HEADER_HSTS, HEADER_PERMISSIONS_POLICY,
    HEADER_REFERRER_POLICY, HSTS_VALUE, REFERRER_POLICY_VALUE,
};
use crate::error::CspError;
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureAllowlist {
    Disabled,
    SameOrigin,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionsPolicy {
    features: Vec<(&'static str, FeatureAllowlist)>,
}

impl PermissionsPolicy {
    pub fn least_privilege() -> Self {
        use FeatureAllowlist::{Disabled, SameOrigin};

        Self {
            features: vec![
                ("accelerometer", Disabled),
                ("ambient-light-sensor", Disabled),
                ("autoplay", Disabled),
                ("battery", Disabled),
                ("camera", Disabled),
                ("display-capture", Disabled),
                ("document-domain", Disabled),
                ("encrypted-media", Disabled),
                ("fullscreen", SameOrigin),
                ("geolocation", Disabled),
                ("gyroscope", Disabled),
                ("hid", Disabled),
                ("magnetometer", Disabled),
                ("microphone", Disabled),
                ("midi", Disabled),
                ("payment", Disabled),
                ("picture-in-picture", SameOrigin),
                ("publickey-credentials-get", Disabled),
                ("screen-wake-lock", Disabled),
                ("sync-xhr", Disabled),
                ("usb", Disabled),
                ("vr", Disabled),
                ("xr-spatial-tracking", Disabled),
            ],
        }
    }

    #[inline]
    pub fn get(&self, feature: &str) -> Option<FeatureAllowlist> {
        self.features
            .iter()
            .find(|(name, _)| *name == feature)
            .map(|(_, allow)| *allow)
    }

    #[inline]
    pub fn features(&self) -> impl Iterator<Item = &(&'static str, FeatureAllowlist)> {
        self.features.iter()
    }
}

impl fmt::Display for PermissionsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, allow)) in self.features.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            match allow {
                FeatureAllowlist::Disabled => write!(f, "{}=()", name)?,
                FeatureAllowlist::SameOrigin => write!(f, "{}=(self)", name)?,
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SecurityHeaderSet {
    headers: Vec<(HeaderName, HeaderValue)>,
    permissions: PermissionsPolicy,
}

impl SecurityHeaderSet {
    pub fn standard() -> Result<Self, CspError> {
        let permissions = PermissionsPolicy::least_privilege();
        let permissions_value = HeaderValue::from_str(&permissions.to_string())
            .map_err(|e| CspError::HeaderError(e.to_string()))?;

        let headers = vec![
            (
                HeaderName::from_static(HEADER_REFERRER_POLICY),
                HeaderValue::from_static(REFERRER_POLICY_VALUE),
            ),
            (
                HeaderName::from_static(HEADER_FRAME_OPTIONS),
                HeaderValue::from_static(FRAME_OPTIONS_VALUE),
            ),
            (
                HeaderName::from_static(HEADER_CONTENT_TYPE_OPTIONS),
                HeaderValue::from_static(CONTENT_TYPE_OPTIONS_VALUE),
            ),
            (
                HeaderName::from_static(HEADER_DNS_PREFETCH_CONTROL),
                HeaderValue::from_static(DNS_PREFETCH_CONTROL_VALUE),
            ),
            (
                HeaderName::from_static(HEADER_HSTS),
                HeaderValue::from_static(HSTS_VALUE),
            ),
            (
                HeaderName::from_static(HEADER_PERMISSIONS_POLICY),
                permissions_value,
            ),
            (
                HeaderName::from_static(HEADER_CROSS_DOMAIN_POLICIES),
                HeaderValue::from_static(CROSS_DOMAIN_POLICIES_VALUE),
            ),
            (
                HeaderName::from_static(HEADER_CORP),
                HeaderValue::from_static(CORP_VALUE),
            ),
        ];

        Ok(Self {
            headers,
            permissions,
        })
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = &(HeaderName, HeaderValue)> {
        self.headers.iter()
    }

    #[inline]
    pub fn permissions(&self) -> &PermissionsPolicy {
        &self.permissions
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderApplier;

impl HeaderApplier {
    // csp_value and nonce_value must carry the same nonce.
    pub fn apply(
        headers: &mut HeaderMap,
        set: &SecurityHeaderSet,
        csp_value: HeaderValue,
        nonce_value: HeaderValue,
        report_only: bool,
    ) {
        let (name, other) = if report_only {
            (HEADER_CSP_REPORT_ONLY, HEADER_CSP)
        } else {
            (HEADER_CSP, HEADER_CSP_REPORT_ONLY)
        };
        headers.remove(other);
        headers.insert(HeaderName::from_static(name), csp_value);

        for (name, value) in set.iter() {
            headers.insert(name.clone(), value.clone());
        }

        headers.insert(HeaderName::from_static(HEADER_CSP_NONCE), nonce_value);
    }
}
