use crate::constants::{CONNECT_SRC, FONT_SRC, IMG_SRC, SCRIPT_SRC, STYLE_SRC};
use crate::core::source::Source;
use crate::error::CspError;
use std::{borrow::Cow, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Script,
    Style,
    Image,
    Font,
    Connect,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Script,
        Category::Style,
        Category::Image,
        Category::Font,
        Category::Connect,
    ];

    #[inline]
    pub const fn directive_name(&self) -> &'static str {
        match self {
            Category::Script => SCRIPT_SRC,
            Category::Style => STYLE_SRC,
            Category::Image => IMG_SRC,
            Category::Font => FONT_SRC,
            Category::Connect => CONNECT_SRC,
        }
    }

    #[inline]
    pub const fn takes_nonce(&self) -> bool {
        matches!(self, Category::Script | Category::Style)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.directive_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowlistSet {
    script: Vec<Source>,
    style: Vec<Source>,
    image: Vec<Source>,
    font: Vec<Source>,
    connect: Vec<Source>,
}

impl AllowlistSet {
    pub fn empty() -> Self {
        Self {
            script: Vec::new(),
            style: Vec::new(),
            image: Vec::new(),
            font: Vec::new(),
            connect: Vec::new(),
        }
    }

    #[inline]
    pub fn get(&self, category: Category) -> &[Source] {
        match category {
            Category::Script => &self.script,
            Category::Style => &self.style,
            Category::Image => &self.image,
            Category::Font => &self.font,
            Category::Connect => &self.connect,
        }
    }

    pub fn set(&mut self, category: Category, sources: impl IntoIterator<Item = Source>) {
        let slot = match category {
            Category::Script => &mut self.script,
            Category::Style => &mut self.style,
            Category::Image => &mut self.image,
            Category::Font => &mut self.font,
            Category::Connect => &mut self.connect,
        };
        *slot = sources.into_iter().collect();
    }

    pub fn with(mut self, category: Category, sources: impl IntoIterator<Item = Source>) -> Self {
        self.set(category, sources);
        self
    }

    pub fn parse_list(raw: &str) -> Result<Vec<Source>, CspError> {
        raw.split_whitespace().map(Source::parse).collect()
    }

    pub fn validate(&self) -> Result<(), CspError> {
        for category in Category::ALL {
            for source in self.get(category) {
                if !source.is_well_formed() {
                    return Err(CspError::InvalidSource(format!(
                        "{} contains malformed source '{}'",
                        category, source
                    )));
                }
                if source.contains_nonce() {
                    return Err(CspError::ValidationError(format!(
                        "{} must not contain a static nonce",
                        category
                    )));
                }
                if source.is_unsafe_inline() {
                    return Err(CspError::ValidationError(format!(
                        "{} must not allow 'unsafe-inline'",
                        category
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Default for AllowlistSet {
    fn default() -> Self {
        Self {
            script: vec![Source::Self_],
            style: vec![
                Source::Self_,
                Source::Host(Cow::Borrowed("https://fonts.googleapis.com")),
            ],
            image: vec![
                Source::Self_,
                Source::Scheme(Cow::Borrowed("data")),
                Source::Scheme(Cow::Borrowed("blob")),
            ],
            font: vec![
                Source::Self_,
                Source::Host(Cow::Borrowed("https://fonts.gstatic.com")),
                Source::Scheme(Cow::Borrowed("data")),
            ],
            connect: vec![Source::Self_],
        }
    }
}
