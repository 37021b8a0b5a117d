use rustc_hash::FxHashSet;
use std::borrow::Cow;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExclusionRule {
    Exact(Cow<'static, str>),
    Prefix(Cow<'static, str>),
    Segment(Cow<'static, str>),
    Extension(Cow<'static, str>),
}

impl ExclusionRule {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            ExclusionRule::Exact(exact) => path == exact.as_ref(),
            ExclusionRule::Prefix(prefix) => prefix_matches(prefix, path),
            ExclusionRule::Segment(name) => segment_matches(name, path),
            ExclusionRule::Extension(ext) => extension_of(path)
                .map(|e| e.eq_ignore_ascii_case(ext.trim_start_matches('.')))
                .unwrap_or(false),
        }
    }
}

const DEFAULT_EXACT: &[&str] = &["/favicon.ico", "/sitemap.xml", "/robots.txt", "/manifest.json"];
const DEFAULT_PREFIXES: &[&str] = &["/_next/static", "/_next/image"];
const DEFAULT_SEGMENTS: &[&str] = &["assets"];
const DEFAULT_EXTENSIONS: &[&str] = &[
    "js", "css", "map", "png", "jpg", "jpeg", "gif", "svg", "ico", "webp", "avif", "woff",
    "woff2", "ttf", "otf", "eot",
];

#[derive(Debug, Clone, Default)]
pub struct StaticAssetMatcher {
    exact: FxHashSet<Cow<'static, str>>,
    extensions: FxHashSet<Cow<'static, str>>,
    prefixes: Vec<Cow<'static, str>>,
    segments: Vec<Cow<'static, str>>,
}

impl StaticAssetMatcher {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        DEFAULT_EXACT
            .iter()
            .map(|p| ExclusionRule::Exact(Cow::Borrowed(*p)))
            .chain(
                DEFAULT_PREFIXES
                    .iter()
                    .map(|p| ExclusionRule::Prefix(Cow::Borrowed(*p))),
            )
            .chain(
                DEFAULT_SEGMENTS
                    .iter()
                    .map(|s| ExclusionRule::Segment(Cow::Borrowed(*s))),
            )
            .chain(
                DEFAULT_EXTENSIONS
                    .iter()
                    .map(|e| ExclusionRule::Extension(Cow::Borrowed(*e))),
            )
            .collect()
    }

    pub fn add_rule(&mut self, rule: ExclusionRule) -> &mut Self {
        match rule {
            ExclusionRule::Exact(path) => {
                self.exact.insert(path);
            }
            ExclusionRule::Extension(ext) => {
                self.extensions
                    .insert(Cow::Owned(ext.trim_start_matches('.').to_ascii_lowercase()));
            }
            ExclusionRule::Prefix(prefix) => self.prefixes.push(prefix),
            ExclusionRule::Segment(name) => self.segments.push(name),
        }
        self
    }

    #[inline]
    pub fn with_rule(mut self, rule: ExclusionRule) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn matching_rule(&self, path: &str) -> Option<ExclusionRule> {
        if self.exact.contains(path) {
            return Some(ExclusionRule::Exact(Cow::Owned(path.to_owned())));
        }

        if let Some(prefix) = self.prefixes.iter().find(|p| prefix_matches(p, path)) {
            return Some(ExclusionRule::Prefix(prefix.clone()));
        }

        if let Some(name) = self.segments.iter().find(|n| segment_matches(n, path)) {
            return Some(ExclusionRule::Segment(name.clone()));
        }

        let ext = extension_of(path)?.to_ascii_lowercase();
        if self.extensions.contains(ext.as_str()) {
            return Some(ExclusionRule::Extension(Cow::Owned(ext)));
        }

        None
    }

    #[inline]
    pub fn is_excluded(&self, path: &str) -> bool {
        self.matching_rule(path).is_some()
    }
}

impl FromIterator<ExclusionRule> for StaticAssetMatcher {
    fn from_iter<I: IntoIterator<Item = ExclusionRule>>(iter: I) -> Self {
        let mut matcher = Self::empty();
        for rule in iter {
            matcher.add_rule(rule);
        }
        matcher
    }
}

#[inline]
fn prefix_matches(prefix: &str, path: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/') || prefix.ends_with('/'),
        None => false,
    }
}

#[inline]
fn segment_matches(name: &str, path: &str) -> bool {
    path.split('/').any(|s| s == name)
}

fn extension_of(path: &str) -> Option<&str> {
    let last = path.rsplit('/').next()?;
    let (stem, ext) = last.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        None
    } else {
        Some(ext)
    }
}
