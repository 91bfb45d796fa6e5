//! Path pattern segments.

/// Whether a segment must be matched literally or matches anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlugKind {
    Literal,
    Wildcard,
}

/// One `/`-separated segment of a route pattern.
///
/// For `/pets/[id]` the slugs are `""` (literal), `pets` (literal) and
/// `[id]` (wildcard named `id`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slug {
    /// Literal or wildcard
    pub kind: SlugKind,
    /// The segment as declared in the pattern
    pub value: String,
    /// The wildcard name without brackets, or the literal text
    pub name: String,
}

impl Slug {
    /// Classify a single pattern segment.
    pub fn parse(segment: &str) -> Self {
        let is_wildcard = segment.len() >= 2 && segment.starts_with('[') && segment.ends_with(']');
        if is_wildcard {
            Self {
                kind: SlugKind::Wildcard,
                value: segment.to_string(),
                name: segment[1..segment.len() - 1].to_string(),
            }
        } else {
            Self {
                kind: SlugKind::Literal,
                value: segment.to_string(),
                name: segment.to_string(),
            }
        }
    }

    /// Whether a request path segment satisfies this slug.
    pub fn matches(&self, segment: &str) -> bool {
        match self.kind {
            SlugKind::Wildcard => true,
            SlugKind::Literal => self.value == segment,
        }
    }
}
