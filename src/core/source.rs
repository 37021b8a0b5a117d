use crate::constants::{
    NONCE_PREFIX, NONE_SOURCE, REPORT_SAMPLE_SOURCE, SELF_SOURCE, STRICT_DYNAMIC_SOURCE,
    SUFFIX_QUOTE, UNSAFE_EVAL_SOURCE, UNSAFE_INLINE_SOURCE, WASM_UNSAFE_EVAL_SOURCE,
};
use crate::error::CspError;
use crate::utils::{is_base64_char, is_token_safe, BufferWriter};
use bytes::BytesMut;
use std::{borrow::Cow, fmt, str::FromStr};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Source {
    None,
    Self_,
    UnsafeInline,
    UnsafeEval,
    StrictDynamic,
    ReportSample,
    WasmUnsafeEval,
    Host(Cow<'static, str>),
    Scheme(Cow<'static, str>),
    Nonce(Cow<'static, str>),
}

impl Source {
    #[inline(always)]
    pub const fn is_none(&self) -> bool {
        matches!(self, Source::None)
    }

    #[inline(always)]
    pub const fn is_self(&self) -> bool {
        matches!(self, Source::Self_)
    }

    #[inline(always)]
    pub const fn is_unsafe_inline(&self) -> bool {
        matches!(self, Source::UnsafeInline)
    }

    #[inline]
    pub const fn as_static_str(&self) -> Option<&'static str> {
        match self {
            Source::None => Some(NONE_SOURCE),
            Source::Self_ => Some(SELF_SOURCE),
            Source::UnsafeInline => Some(UNSAFE_INLINE_SOURCE),
            Source::UnsafeEval => Some(UNSAFE_EVAL_SOURCE),
            Source::StrictDynamic => Some(STRICT_DYNAMIC_SOURCE),
            Source::ReportSample => Some(REPORT_SAMPLE_SOURCE),
            Source::WasmUnsafeEval => Some(WASM_UNSAFE_EVAL_SOURCE),
            _ => None,
        }
    }

    #[inline]
    pub fn estimated_size(&self) -> usize {
        match self.as_static_str() {
            Some(keyword) => keyword.len(),
            None => match self {
                Source::Host(host) => host.len(),
                Source::Scheme(scheme) => scheme.len() + 1,
                Source::Nonce(nonce) => NONCE_PREFIX.len() + nonce.len() + SUFFIX_QUOTE.len(),
                _ => 0,
            },
        }
    }

    #[inline]
    pub fn contains_nonce(&self) -> bool {
        matches!(self, Source::Nonce(_))
    }

    #[inline]
    pub fn nonce(&self) -> Option<&str> {
        match self {
            Source::Nonce(nonce) => Some(nonce),
            _ => None,
        }
    }

    pub fn is_well_formed(&self) -> bool {
        match self {
            Source::Host(host) => is_token_safe(host) && !host.ends_with(':'),
            Source::Scheme(scheme) => {
                let mut bytes = scheme.bytes();
                matches!(bytes.next(), Some(b) if b.is_ascii_alphabetic())
                    && bytes.all(|b| b.is_ascii_alphanumeric() || matches!(b, b'+' | b'-' | b'.'))
            }
            Source::Nonce(nonce) => !nonce.is_empty() && nonce.bytes().all(is_base64_char),
            _ => true,
        }
    }

    pub fn parse(expr: &str) -> Result<Self, CspError> {
        let source = match expr {
            NONE_SOURCE => Source::None,
            SELF_SOURCE => Source::Self_,
            UNSAFE_INLINE_SOURCE => Source::UnsafeInline,
            UNSAFE_EVAL_SOURCE => Source::UnsafeEval,
            STRICT_DYNAMIC_SOURCE => Source::StrictDynamic,
            REPORT_SAMPLE_SOURCE => Source::ReportSample,
            WASM_UNSAFE_EVAL_SOURCE => Source::WasmUnsafeEval,
            _ if expr.starts_with(NONCE_PREFIX) && expr.ends_with(SUFFIX_QUOTE) => {
                let value = &expr[NONCE_PREFIX.len()..expr.len() - SUFFIX_QUOTE.len()];
                Source::Nonce(Cow::Owned(value.to_owned()))
            }
            _ if expr.len() > 1 && expr.ends_with(':') => {
                Source::Scheme(Cow::Owned(expr[..expr.len() - 1].to_owned()))
            }
            _ => Source::Host(Cow::Owned(expr.to_owned())),
        };

        if source.is_well_formed() {
            Ok(source)
        } else {
            Err(CspError::InvalidSource(expr.to_owned()))
        }
    }
}

impl FromStr for Source {
    type Err = CspError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Source::parse(s)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(keyword) = self.as_static_str() {
            return f.write_str(keyword);
        }
        match self {
            Source::Host(host) => f.write_str(host),
            Source::Scheme(scheme) => write!(f, "{}:", scheme),
            Source::Nonce(nonce) => write!(f, "{}{}{}", NONCE_PREFIX, nonce, SUFFIX_QUOTE),
            _ => Ok(()),
        }
    }
}

impl BufferWriter for Source {
    fn write_to_buffer(&self, buffer: &mut BytesMut) {
        if let Some(keyword) = self.as_static_str() {
            buffer.extend_from_slice(keyword.as_bytes());
            return;
        }
        match self {
            Source::Host(host) => buffer.extend_from_slice(host.as_bytes()),
            Source::Scheme(scheme) => {
                buffer.extend_from_slice(scheme.as_bytes());
                buffer.extend_from_slice(b":");
            }
            Source::Nonce(nonce) => {
                buffer.reserve(NONCE_PREFIX.len() + nonce.len() + SUFFIX_QUOTE.len());
                buffer.extend_from_slice(NONCE_PREFIX.as_bytes());
                buffer.extend_from_slice(nonce.as_bytes());
                buffer.extend_from_slice(SUFFIX_QUOTE.as_bytes());
            }
            _ => {}
        }
    }
}
