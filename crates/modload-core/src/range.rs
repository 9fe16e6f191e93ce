//! Version ranges for declared dependencies.
//!
//! A range is an optional lower and an optional upper bound, each inclusive
//! or exclusive. Two spellings are accepted:
//!
//! - comparators: `*`, `>=1.0`, `>=1.0, <=2.0`, `>1.0, <2.0`, `=1.2.3`
//! - intervals: `[1.0, 2.0]`, `(1.0,)`, `(,2.0]`, `[1.2.3]`, or a bare `1.0`
//!   meaning "1.0 or newer"
//!
//! Partial versions are padded with zeros, so `<=2.0` means `<=2.0.0` and
//! `2.0.5` is outside it. Matching is a plain ordered comparison: prerelease
//! versions are not treated specially, and `1.5.0-beta` satisfies `>=1.0`.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// One end of a [`VersionRange`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bound {
    pub version: Version,
    pub inclusive: bool,
}

impl Bound {
    pub fn inclusive(version: Version) -> Self {
        Self {
            version,
            inclusive: true,
        }
    }

    pub fn exclusive(version: Version) -> Self {
        Self {
            version,
            inclusive: false,
        }
    }
}

/// Accepted versions of a dependency.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VersionRange {
    min: Option<Bound>,
    max: Option<Bound>,
}

impl VersionRange {
    /// Every version.
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// Range between two optional bounds.
    pub fn new(min: Option<Bound>, max: Option<Bound>) -> Self {
        Self { min, max }
    }

    /// Exactly `version`.
    pub fn exact(version: Version) -> Self {
        Self {
            min: Some(Bound::inclusive(version.clone())),
            max: Some(Bound::inclusive(version)),
        }
    }

    /// `version` or newer.
    pub fn at_least(version: Version) -> Self {
        Self {
            min: Some(Bound::inclusive(version)),
            max: None,
        }
    }

    /// Parse either spelling.
    ///
    /// # Examples
    ///
    /// ```
    /// use modload_core::{Version, VersionRange};
    ///
    /// let range = VersionRange::parse(">=1.0, <=2.0").unwrap();
    /// assert!(range.matches(&Version::new(2, 0, 0)));
    /// assert!(!range.matches(&Version::new(2, 0, 5)));
    /// assert_eq!(range, VersionRange::parse("[1.0, 2.0]").unwrap());
    /// ```
    pub fn parse(s: &str) -> LoadResult<Self> {
        let trimmed = s.trim();
        let invalid = |reason: String| LoadError::InvalidVersionRange {
            range: s.to_string(),
            reason,
        };

        if trimmed.is_empty() || trimmed == "*" {
            return Ok(Self::ANY);
        }

        if trimmed.starts_with('[') || trimmed.starts_with('(') {
            return parse_interval(trimmed).map_err(invalid);
        }

        if trimmed.starts_with(['>', '<', '=']) {
            return parse_comparators(trimmed).map_err(invalid);
        }

        parse_version(trimmed).map(Self::at_least).map_err(invalid)
    }

    pub fn min(&self) -> Option<&Bound> {
        self.min.as_ref()
    }

    pub fn max(&self) -> Option<&Bound> {
        self.max.as_ref()
    }

    /// Whether `version` lies within the range.
    pub fn matches(&self, version: &Version) -> bool {
        let above_min = self.min.as_ref().map_or(true, |min| {
            match version.cmp(&min.version) {
                Ordering::Greater => true,
                Ordering::Equal => min.inclusive,
                Ordering::Less => false,
            }
        });
        let below_max = self.max.as_ref().map_or(true, |max| {
            match version.cmp(&max.version) {
                Ordering::Less => true,
                Ordering::Equal => max.inclusive,
                Ordering::Greater => false,
            }
        });
        above_min && below_max
    }
}

/// Pad a possibly partial version (`1`, `1.0`, `1.0-beta`) to three components.
fn parse_version(s: &str) -> Result<Version, String> {
    let s = s.trim();
    let split = s.find(['-', '+']).unwrap_or(s.len());
    let (core, suffix) = s.split_at(split);

    let parts = core.split('.').count();
    if core.is_empty() || parts > 3 {
        return Err(format!("'{s}' is not a version"));
    }

    let mut padded = core.to_string();
    for _ in parts..3 {
        padded.push_str(".0");
    }
    padded.push_str(suffix);

    Version::parse(&padded).map_err(|e| format!("'{s}' is not a version: {e}"))
}

fn parse_interval(s: &str) -> Result<VersionRange, String> {
    let min_inclusive = s.starts_with('[');
    let max_inclusive = match s.chars().last() {
        Some(']') => true,
        Some(')') => false,
        _ => return Err("interval must end with ']' or ')'".to_string()),
    };
    let inner = &s[1..s.len() - 1];

    let Some((lower, upper)) = inner.split_once(',') else {
        // `[1.0]` is an exact version; `(1.0)` excludes the one version it names.
        if !(min_inclusive && max_inclusive) {
            return Err("single-version interval must use '[' and ']'".to_string());
        }
        return parse_version(inner).map(VersionRange::exact);
    };

    let bound = |text: &str, inclusive: bool| -> Result<Option<Bound>, String> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        parse_version(text).map(|version| Some(Bound { version, inclusive }))
    };

    let min = bound(lower, min_inclusive)?;
    let max = bound(upper, max_inclusive)?;
    if min.is_none() && max.is_none() {
        return Err("interval needs at least one bound".to_string());
    }
    Ok(VersionRange { min, max })
}

fn parse_comparators(s: &str) -> Result<VersionRange, String> {
    let mut range = VersionRange::ANY;

    for comparator in s.split(',').map(str::trim) {
        let (op, rest) = match comparator {
            c if c.starts_with(">=") => (">=", &c[2..]),
            c if c.starts_with("<=") => ("<=", &c[2..]),
            c if c.starts_with('>') => (">", &c[1..]),
            c if c.starts_with('<') => ("<", &c[1..]),
            c if c.starts_with('=') => ("=", &c[1..]),
            c => return Err(format!("'{c}' has no comparison operator")),
        };
        let version = parse_version(rest)?;

        match op {
            ">=" => range.min = Some(Bound::inclusive(version)),
            ">" => range.min = Some(Bound::exclusive(version)),
            "<=" => range.max = Some(Bound::inclusive(version)),
            "<" => range.max = Some(Bound::exclusive(version)),
            _ => range = VersionRange::exact(version),
        }
    }

    Ok(range)
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.min, &self.max) {
            (None, None) => f.write_str("*"),
            (Some(min), Some(max)) if min == max && min.inclusive => {
                write!(f, "={}", min.version)
            }
            (min, max) => {
                if let Some(min) = min {
                    let op = if min.inclusive { ">=" } else { ">" };
                    write!(f, "{op}{}", min.version)?;
                }
                if let Some(max) = max {
                    if min.is_some() {
                        f.write_str(", ")?;
                    }
                    let op = if max.inclusive { "<=" } else { "<" };
                    write!(f, "{op}{}", max.version)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for VersionRange {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for VersionRange {
    type Error = LoadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<VersionRange> for String {
    fn from(range: VersionRange) -> Self {
        range.to_string()
    }
}
