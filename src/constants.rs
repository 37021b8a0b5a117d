pub(crate) const HEADER_CSP: &str = "content-security-policy";
pub(crate) const HEADER_CSP_REPORT_ONLY: &str = "content-security-policy-report-only";
pub const HEADER_CSP_NONCE: &str = "x-csp-nonce";

pub(crate) const HEADER_REFERRER_POLICY: &str = "referrer-policy";
pub(crate) const HEADER_FRAME_OPTIONS: &str = "x-frame-options";
pub(crate) const HEADER_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
pub(crate) const HEADER_DNS_PREFETCH_CONTROL: &str = "x-dns-prefetch-control";
pub(crate) const HEADER_HSTS: &str = "strict-transport-security";
pub(crate) const HEADER_PERMISSIONS_POLICY: &str = "permissions-policy";
pub(crate) const HEADER_CROSS_DOMAIN_POLICIES: &str = "x-permitted-cross-domain-policies";
pub(crate) const HEADER_CORP: &str = "cross-origin-resource-policy";

pub(crate) const REFERRER_POLICY_VALUE: &str = "strict-origin-when-cross-origin";
pub(crate) const FRAME_OPTIONS_VALUE: &str = "DENY";
pub(crate) const CONTENT_TYPE_OPTIONS_VALUE: &str = "nosniff";
pub(crate) const DNS_PREFETCH_CONTROL_VALUE: &str = "off";
pub(crate) const HSTS_VALUE: &str = "max-age=63072000; includeSubDomains; preload";
pub(crate) const CROSS_DOMAIN_POLICIES_VALUE: &str = "none";
pub(crate) const CORP_VALUE: &str = "same-origin";

pub(crate) const DEFAULT_SRC: &str = "default-src";
pub(crate) const SCRIPT_SRC: &str = "script-src";
pub(crate) const STYLE_SRC: &str = "style-src";
pub(crate) const IMG_SRC: &str = "img-src";
pub(crate) const FONT_SRC: &str = "font-src";
pub(crate) const CONNECT_SRC: &str = "connect-src";
pub(crate) const OBJECT_SRC: &str = "object-src";
pub(crate) const FRAME_ANCESTORS: &str = "frame-ancestors";
pub(crate) const BASE_URI: &str = "base-uri";
pub(crate) const FORM_ACTION: &str = "form-action";
pub(crate) const UPGRADE_INSECURE_REQUESTS: &str = "upgrade-insecure-requests";

pub(crate) const REPORT_URI: &str = "report-uri";

pub(crate) const NONE_SOURCE: &str = "'none'";
pub(crate) const SELF_SOURCE: &str = "'self'";
pub(crate) const UNSAFE_INLINE_SOURCE: &str = "'unsafe-inline'";
pub(crate) const UNSAFE_EVAL_SOURCE: &str = "'unsafe-eval'";
pub(crate) const STRICT_DYNAMIC_SOURCE: &str = "'strict-dynamic'";
pub(crate) const REPORT_SAMPLE_SOURCE: &str = "'report-sample'";
pub(crate) const WASM_UNSAFE_EVAL_SOURCE: &str = "'wasm-unsafe-eval'";
pub(crate) const NONCE_PREFIX: &str = "'nonce-";
pub(crate) const SUFFIX_QUOTE: &str = "'";

pub const NONCE_LENGTH: usize = 16;

pub(crate) const DEFAULT_MAX_REPORT_SIZE: usize = 16 * 1024;
pub(crate) const DEFAULT_REPORT_PATH: &str = "/csp-report";
pub(crate) const SEMICOLON_SPACE: &[u8] = b"; ";
pub(crate) const DEFAULT_BUFFER_CAPACITY: usize = 512;

pub(crate) const ENV_APP_ENV: &str = "APP_ENV";
pub(crate) const ENV_REPORT_ONLY: &str = "CSP_REPORT_ONLY";
pub(crate) const ENV_REPORT_URI: &str = "CSP_REPORT_URI";
pub(crate) const ENV_SCRIPT_SRC: &str = "CSP_SCRIPT_SRC";
pub(crate) const ENV_STYLE_SRC: &str = "CSP_STYLE_SRC";
pub(crate) const ENV_IMG_SRC: &str = "CSP_IMG_SRC";
pub(crate) const ENV_FONT_SRC: &str = "CSP_FONT_SRC";
pub(crate) const ENV_CONNECT_SRC: &str = "CSP_CONNECT_SRC";
