//! Runtime profile identifiers.
//!
//! A profile names the execution environment modules are built for, written in
//! short form:
//! - `net45` → family `net`, version 4.5 (compact digits, one per component)
//! - `netstandard2.0` → family `netstandard`, version 2.0 (dotted)
//! - `native` → family `native`, no version (0.0.0)
//!
//! The short name is canonical: it is rebuilt from family and version, so
//! `net4.5` and `NET45` both become `net45`. It is also the directory name
//! under `lib/` that holds profile-specific modules. `netstandard`,
//! `netcoreapp` and `net` 5 or later use dotted versions; other families use
//! compact digits unless a component is 10 or more.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::error::{LoadError, LoadResult};

/// A runtime profile such as `net45`.
///
/// Two profiles are equal when family and version are equal, so `net45` and
/// `net4.5` compare equal and share the short name `net45`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Profile {
    family: String,
    version: Version,
    short_name: String,
}

impl Profile {
    /// Parse a short profile name.
    ///
    /// # Examples
    ///
    /// ```
    /// use modload_core::Profile;
    ///
    /// let net45 = Profile::parse("net45").unwrap();
    /// assert_eq!(net45.family(), "net");
    /// assert_eq!(net45.version().to_string(), "4.5.0");
    ///
    /// let std20 = Profile::parse("netstandard2.0").unwrap();
    /// assert_eq!(std20.short_name(), "netstandard2.0");
    /// ```
    pub fn parse(s: &str) -> LoadResult<Self> {
        let input = s.trim().to_ascii_lowercase();
        let invalid = |reason: &str| LoadError::InvalidProfile {
            profile: s.to_string(),
            reason: reason.to_string(),
        };

        if input.is_empty() {
            return Err(invalid("empty profile"));
        }

        let split = input
            .find(|c: char| !c.is_ascii_alphabetic())
            .unwrap_or(input.len());
        let (family, rest) = input.split_at(split);

        if family.is_empty() {
            return Err(invalid("profile must start with a family name"));
        }

        let components: Vec<u64> = if rest.is_empty() {
            Vec::new()
        } else if rest.contains('.') {
            rest.split('.')
                .map(|part| part.parse::<u64>())
                .collect::<Result<_, _>>()
                .map_err(|_| invalid("version components must be numeric"))?
        } else {
            rest.chars()
                .map(|c| c.to_digit(10).map(u64::from))
                .collect::<Option<_>>()
                .ok_or_else(|| invalid("version components must be numeric"))?
        };

        if components.len() > 3 {
            return Err(invalid("at most three version components are supported"));
        }

        let component = |i: usize| components.get(i).copied().unwrap_or(0);
        let version = Version::new(component(0), component(1), component(2));

        Ok(Self {
            short_name: short_name(family, &version),
            family: family.to_string(),
            version,
        })
    }

    /// Framework family (`net`, `netstandard`, ...).
    pub fn family(&self) -> &str {
        &self.family
    }

    /// Framework version.
    pub fn version(&self) -> &Version {
        &self.version
    }

    /// Canonical short name.
    pub fn short_name(&self) -> &str {
        &self.short_name
    }
}

fn short_name(family: &str, version: &Version) -> String {
    if *version == Version::new(0, 0, 0) {
        return family.to_string();
    }

    let dotted = matches!(family, "netstandard" | "netcoreapp")
        || (family == "net" && version.major >= 5)
        || [version.major, version.minor, version.patch]
            .iter()
            .any(|&c| c >= 10);

    let (major, minor, patch) = (version.major, version.minor, version.patch);
    match (dotted, patch) {
        (true, 0) => format!("{family}{major}.{minor}"),
        (true, _) => format!("{family}{major}.{minor}.{patch}"),
        (false, 0) => format!("{family}{major}{minor}"),
        (false, _) => format!("{family}{major}{minor}{patch}"),
    }
}

impl PartialEq for Profile {
    fn eq(&self, other: &Self) -> bool {
        self.family == other.family && self.version == other.version
    }
}

impl Eq for Profile {}

impl Hash for Profile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.family.hash(state);
        self.version.hash(state);
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.short_name)
    }
}

impl FromStr for Profile {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Profile {
    type Error = LoadError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Profile> for String {
    fn from(profile: Profile) -> Self {
        profile.short_name
    }
}
