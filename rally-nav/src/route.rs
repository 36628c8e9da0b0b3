//! Route patterns, typed navigation arguments and back-stack entries.
//!
//! A pattern is a `/`-separated list of segments; each segment is either a
//! literal (`Accounts`) or a placeholder (`{name}`). Concrete routes carry
//! percent-encoded values in placeholder positions, which are decoded while
//! matching.

use std::{
    collections::BTreeMap,
    str::FromStr,
    sync::atomic::{AtomicU64, Ordering},
};

use tracing::trace;

use crate::NavError;

static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A parsed route pattern such as `Accounts/{name}`.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct RoutePattern {
    raw: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Parse a pattern, rejecting empty segments, stray braces and duplicate
    /// placeholder names.
    pub fn parse(pattern: &str) -> Result<Self, NavError> {
        if pattern.is_empty() {
            return Err(NavError::invalid_pattern(pattern, "pattern is empty"));
        }
        let mut segments = Vec::new();
        for part in pattern.split('/') {
            if part.is_empty() {
                return Err(NavError::invalid_pattern(pattern, "empty path segment"));
            }
            if let Some(name) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    return Err(NavError::invalid_pattern(
                        pattern,
                        format!("invalid placeholder `{part}`"),
                    ));
                }
                if segments.contains(&Segment::Param(name.to_owned())) {
                    return Err(NavError::invalid_pattern(
                        pattern,
                        format!("placeholder `{name}` appears twice"),
                    ));
                }
                segments.push(Segment::Param(name.to_owned()));
            } else if part.contains(['{', '}']) {
                return Err(NavError::invalid_pattern(
                    pattern,
                    format!("unbalanced braces in `{part}`"),
                ));
            } else {
                segments.push(Segment::Literal(part.to_owned()));
            }
        }
        Ok(Self {
            raw: pattern.to_owned(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in declaration order.
    pub fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the pattern has no placeholders.
    pub fn is_literal(&self) -> bool {
        self.params().next().is_none()
    }

    /// Match a concrete route, decoding placeholder values.
    pub fn match_route(&self, route: &str) -> Option<NavArguments> {
        self.match_segments(route.split('/'))
    }

    pub(crate) fn match_segments<'a>(
        &self,
        parts: impl Iterator<Item = &'a str>,
    ) -> Option<NavArguments> {
        let mut arguments = NavArguments::default();
        let mut expected = self.segments.iter();
        for part in parts {
            match expected.next()? {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Param(name) => {
                    if part.is_empty() {
                        return None;
                    }
                    let Ok(value) = urlencoding::decode(part) else {
                        trace!(pattern = %self.raw, part, "placeholder is not valid utf-8");
                        return None;
                    };
                    arguments.insert(name.clone(), value.into_owned());
                }
            }
        }
        if expected.next().is_some() {
            return None;
        }
        Some(arguments)
    }

    /// Build a concrete route, percent-encoding every value.
    ///
    /// Every placeholder needs a non-empty value.
    pub fn build(&self, values: &[(&str, &str)]) -> Result<String, NavError> {
        let mut parts = Vec::with_capacity(self.segments.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(literal) => parts.push(literal.clone()),
                Segment::Param(name) => {
                    let value = values
                        .iter()
                        .find(|(key, _)| key == name)
                        .map(|(_, value)| *value)
                        .ok_or_else(|| NavError::invalid_argument(name, "missing value"))?;
                    if value.is_empty() {
                        return Err(NavError::invalid_argument(name, "value is empty"));
                    }
                    parts.push(urlencoding::encode(value).into_owned());
                }
            }
        }
        Ok(parts.join("/"))
    }
}

/// Value type a navigation argument is declared with.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum NavType {
    #[default]
    String,
    Int,
    Bool,
}

impl NavType {
    /// Whether a decoded value is acceptable for this type.
    pub fn accepts(self, value: &str) -> bool {
        match self {
            Self::String => true,
            Self::Int => value.parse::<i64>().is_ok(),
            Self::Bool => value.parse::<bool>().is_ok(),
        }
    }
}

/// A declared destination argument.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavArgument {
    pub name: String,
    pub nav_type: NavType,
}

impl NavArgument {
    pub fn new(name: impl Into<String>, nav_type: NavType) -> Self {
        Self {
            name: name.into(),
            nav_type,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, NavType::String)
    }
}

/// Decoded arguments bound to a back-stack entry.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct NavArguments {
    values: BTreeMap<String, String>,
}

impl NavArguments {
    pub(crate) fn insert(&mut self, key: String, value: String) {
        self.values.insert(key, value);
    }

    /// Decoded value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Parse an argument into `T`, `None` when absent or unparsable.
    pub fn get_as<T: FromStr>(&self, key: &str) -> Option<T> {
        self.get(key)?.parse().ok()
    }

    /// Whether `key` was supplied.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Name/value pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Identifier of one pushed entry; never reused within a process.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct EntryId(u64);

impl EntryId {
    fn new() -> Self {
        Self(NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One entry of the back-stack.
#[derive(Clone, Debug)]
pub struct BackStackEntry {
    id: EntryId,
    route: String,
    destination_route: String,
    arguments: NavArguments,
}

impl BackStackEntry {
    pub(crate) fn new(route: String, destination_route: String, arguments: NavArguments) -> Self {
        Self {
            id: EntryId::new(),
            route,
            destination_route,
            arguments,
        }
    }

    pub fn id(&self) -> EntryId {
        self.id
    }

    /// The concrete route that was navigated to, e.g. `Accounts/Bob`.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// The pattern of the destination this entry shows, e.g.
    /// `Accounts/{name}`.
    pub fn destination_route(&self) -> &str {
        &self.destination_route
    }

    pub fn arguments(&self) -> &NavArguments {
        &self.arguments
    }

    pub fn argument(&self, key: &str) -> Option<&str> {
        self.arguments.get(key)
    }

    /// Whether both entries show the same destination with the same
    /// arguments. Entry identity is ignored.
    pub fn same_destination(&self, other: &BackStackEntry) -> bool {
        self.route == other.route
            && self.destination_route == other.destination_route
            && self.arguments == other.arguments
    }
}
