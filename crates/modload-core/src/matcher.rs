//! Runtime profile matching.
//!
//! Selects which declared groups (dependency sets, module entries) apply to a
//! target profile. Groups are ranked by [`Specificity`]:
//!
//! 1. exact: same family and version as the target
//! 2. compatible: same family, lower version (the highest such version wins)
//! 3. neutral: the group declares no profile at all
//!
//! Only the best rank survives. All groups sharing that rank are returned in
//! declaration order.

use std::cmp::Ordering;

use semver::Version;

use crate::profile::Profile;

/// Something declared for a set of runtime profiles.
pub trait ProfileTagged {
    /// Supported profiles. Empty means the item applies to any profile.
    fn profiles(&self) -> &[Profile];
}

/// How closely a declaration fits a target profile. Greater is better.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Specificity {
    /// Declared for no profile in particular.
    Neutral,
    /// Same family, built against an older version.
    Compatible(Version),
    /// Same family and version.
    Exact,
}

/// Rank a single declared profile against the target.
fn rank(target: &Profile, declared: &Profile) -> Option<Specificity> {
    if declared.family() != target.family() {
        return None;
    }
    match declared.version().cmp(target.version()) {
        Ordering::Equal => Some(Specificity::Exact),
        Ordering::Less => Some(Specificity::Compatible(declared.version().clone())),
        Ordering::Greater => None,
    }
}

/// Specificity of an item for `target`, or `None` if it does not apply.
pub fn specificity<T: ProfileTagged + ?Sized>(target: &Profile, item: &T) -> Option<Specificity> {
    let profiles = item.profiles();
    if profiles.is_empty() {
        return Some(Specificity::Neutral);
    }
    profiles.iter().filter_map(|p| rank(target, p)).max()
}

/// Select the items applicable to `target`, keeping only the most specific.
///
/// Returns `None` when nothing applies.
pub fn select_compatible<'a, T, I>(target: &Profile, items: I) -> Option<Vec<&'a T>>
where
    T: ProfileTagged + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let ranked: Vec<(Specificity, &'a T)> = items
        .into_iter()
        .filter_map(|item| specificity(target, item).map(|s| (s, item)))
        .collect();

    let best = ranked.iter().map(|(s, _)| s).max()?.clone();

    Some(
        ranked
            .into_iter()
            .filter(|(s, _)| *s == best)
            .map(|(_, item)| item)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Group {
        label: &'static str,
        profiles: Vec<Profile>,
    }

    impl ProfileTagged for Group {
        fn profiles(&self) -> &[Profile] {
            &self.profiles
        }
    }

    fn group(label: &'static str, profiles: &[&str]) -> Group {
        Group {
            label,
            profiles: profiles.iter().map(|p| Profile::parse(p).unwrap()).collect(),
        }
    }

    fn labels(selected: Option<Vec<&Group>>) -> Option<Vec<&'static str>> {
        selected.map(|groups| groups.into_iter().map(|g| g.label).collect())
    }

    fn net45() -> Profile {
        Profile::parse("net45").unwrap()
    }

    #[test]
    fn test_specificity_ordering() {
        assert!(Specificity::Exact > Specificity::Compatible(Version::new(4, 0, 0)));
        assert!(
            Specificity::Compatible(Version::new(4, 0, 0))
                > Specificity::Compatible(Version::new(3, 5, 0))
        );
        assert!(Specificity::Compatible(Version::new(2, 0, 0)) > Specificity::Neutral);
    }

    #[test]
    fn test_exact_beats_compatible_and_neutral() {
        let groups = [
            group("any", &[]),
            group("net40", &["net40"]),
            group("net45", &["net45"]),
        ];
        assert_eq!(
            labels(select_compatible(&net45(), &groups)),
            Some(vec!["net45"])
        );
    }

    #[test]
    fn test_highest_compatible_wins() {
        let groups = [
            group("net20", &["net20"]),
            group("net40", &["net40"]),
            group("any", &[]),
        ];
        assert_eq!(
            labels(select_compatible(&net45(), &groups)),
            Some(vec!["net40"])
        );
    }

    #[test]
    fn test_neutral_fallback() {
        let groups = [group("std", &["netstandard2.0"]), group("any", &[])];
        assert_eq!(
            labels(select_compatible(&net45(), &groups)),
            Some(vec!["any"])
        );
    }

    #[test]
    fn test_newer_or_foreign_profiles_do_not_apply() {
        let groups = [group("net461", &["net461"]), group("std", &["netstandard1.0"])];
        assert_eq!(labels(select_compatible(&net45(), &groups)), None);
    }

    #[test]
    fn test_ties_keep_declaration_order() {
        let groups = [
            group("a", &["net45"]),
            group("b", &["net40"]),
            group("c", &["net4.5"]),
        ];
        assert_eq!(
            labels(select_compatible(&net45(), &groups)),
            Some(vec!["a", "c"])
        );
    }

    #[test]
    fn test_multi_profile_item_uses_best_profile() {
        let groups = [group("multi", &["net20", "net45"]), group("net40", &["net40"])];
        assert_eq!(
            labels(select_compatible(&net45(), &groups)),
            Some(vec!["multi"])
        );
    }

    #[test]
    fn test_empty_input() {
        let groups: [Group; 0] = [];
        assert_eq!(labels(select_compatible(&net45(), &groups)), None);
    }
}
