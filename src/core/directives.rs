use crate::constants::UPGRADE_INSECURE_REQUESTS;
use crate::core::source::Source;
use crate::error::CspError;
use crate::utils::BufferWriter;
use bytes::BytesMut;
use smallvec::SmallVec;
use std::{borrow::Cow, fmt};

const VALUELESS_DIRECTIVES: &[&str] = &[UPGRADE_INSECURE_REQUESTS];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    name: Cow<'static, str>,
    sources: SmallVec<[Source; 4]>,
}

impl Directive {
    #[inline]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            sources: SmallVec::new(),
        }
    }

    pub fn add_source(&mut self, source: Source) -> &mut Self {
        if source.is_none() {
            self.sources.clear();
            self.sources.push(source);
        } else if !self.sources.is_empty() && self.sources[0].is_none() {
            self.sources.clear();
            self.sources.push(source);
        } else if !self.sources.iter().any(|s| s == &source) {
            self.sources.push(source);
        }
        self
    }

    pub fn add_sources<I>(&mut self, sources: I) -> &mut Self
    where
        I: IntoIterator<Item = Source>,
    {
        for source in sources {
            self.add_source(source);
        }
        self
    }

    #[inline]
    pub fn with_sources<I>(mut self, sources: I) -> Self
    where
        I: IntoIterator<Item = Source>,
    {
        self.add_sources(sources);
        self
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn sources(&self) -> &[Source] {
        &self.sources
    }

    #[inline]
    pub fn is_valueless(&self) -> bool {
        VALUELESS_DIRECTIVES.contains(&self.name.as_ref())
    }

    #[inline]
    pub fn contains_nonce(&self) -> bool {
        self.sources.iter().any(Source::contains_nonce)
    }

    pub fn validate(&self) -> Result<(), CspError> {
        if self.is_valueless() {
            if !self.sources.is_empty() {
                return Err(CspError::ValidationError(format!(
                    "Directive '{}' takes no sources",
                    self.name
                )));
            }
            return Ok(());
        }

        if self.sources.is_empty() {
            return Err(CspError::ValidationError(format!(
                "Directive '{}' has no sources",
                self.name
            )));
        }

        if let Some(bad) = self.sources.iter().find(|s| !s.is_well_formed()) {
            return Err(CspError::InvalidSource(format!(
                "Directive '{}' contains malformed source '{}'",
                self.name, bad
            )));
        }

        Ok(())
    }

    #[inline]
    pub fn estimated_size(&self) -> usize {
        let mut size = self.name.len();
        if !self.sources.is_empty() {
            size += self.sources.len();
            size += self.sources.iter().map(Source::estimated_size).sum::<usize>();
        }
        size
    }
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        for source in &self.sources {
            write!(f, " {}", source)?;
        }
        Ok(())
    }
}

impl BufferWriter for Directive {
    fn write_to_buffer(&self, buffer: &mut BytesMut) {
        buffer.extend_from_slice(self.name.as_bytes());
        for source in &self.sources {
            buffer.extend_from_slice(b" ");
            source.write_to_buffer(buffer);
        }
    }
}
