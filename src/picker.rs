//! Selects the release to install from everything the source listed.

use crate::{options::ReleaseOptions, release::Release};
use semver::Version;

/// Parses a `v`-prefixed semver tag. Tags without the prefix or with an
/// invalid version are rejected.
pub(crate) fn parse_tag(tag: &str) -> Option<Version> {
    Version::parse(tag.strip_prefix('v')?).ok()
}

/// Finds the single best release matching `opts`, or `None` when nothing
/// matches. `None` is a valid terminal outcome, not an error.
///
/// Releases with unparseable tags are discarded, the remainder is filtered by
/// the major or minor pin, and the survivors are ranked by semver precedence.
/// Prereleases are skipped unless `opts.prereleases` is set, in which case
/// the unconditionally highest version wins even if it is a prerelease of a
/// version with no stable release yet.
pub(crate) fn find_release<'a>(
    releases: &'a [Release],
    opts: &ReleaseOptions,
) -> Option<&'a Release> {
    let mut candidates: Vec<(&Release, Version)> = releases
        .iter()
        .filter_map(|r| parse_tag(&r.tag_name).map(|v| (r, v)))
        .collect();

    if let Some(major) = opts.major.as_deref() {
        candidates.retain(|(_, v)| format!("v{}", v.major) == major);
    } else if let Some(minor) = opts.minor.as_deref() {
        candidates.retain(|(_, v)| format!("v{}.{}", v.major, v.minor) == minor);
    }

    // A stable sort keeps the original relative order among duplicate tags,
    // so the reverse scan returns the last-listed duplicate.
    candidates.sort_by(|(_, a), (_, b)| a.cmp(b));

    candidates
        .iter()
        .rev()
        .find(|(_, v)| opts.prereleases || v.pre.is_empty())
        .map(|(r, _)| *r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Asset;

    fn releases(tags: &[&str]) -> Vec<Release> {
        tags.iter()
            .map(|t| Release {
                tag_name: (*t).to_string(),
                assets: vec![],
            })
            .collect()
    }

    fn opts(major: Option<&str>, minor: Option<&str>, prereleases: bool) -> ReleaseOptions {
        ReleaseOptions {
            major: major.map(String::from),
            minor: minor.map(String::from),
            prereleases,
        }
    }

    #[test]
    fn no_releases() {
        assert!(find_release(&[], &opts(None, None, false)).is_none());
    }

    #[test]
    fn invalid_tags_never_match() {
        let all = releases(&["no_semver", "1.2.3", "v1.x.0", "latest"]);
        assert!(find_release(&all, &opts(None, None, false)).is_none());
    }

    #[test]
    fn major_pin_selects_maximum_of_that_line() {
        let all = releases(&["v1.7.8", "v2.0.0", "v2.0.5"]);
        let found = find_release(&all, &opts(Some("v2"), None, false)).unwrap();
        assert_eq!(found.tag_name, "v2.0.5");
    }

    #[test]
    fn major_pin_ignores_newer_majors() {
        let all = releases(&["v2.7.8", "v3.0.0", "v3.0.5"]);
        let found = find_release(&all, &opts(Some("v2"), None, false)).unwrap();
        assert_eq!(found.tag_name, "v2.7.8");
    }

    #[test]
    fn major_pin_with_no_match() {
        let all = releases(&["v1.7.8", "v3.0.0"]);
        assert!(find_release(&all, &opts(Some("v2"), None, false)).is_none());
    }

    #[test]
    fn minor_pin_selects_maximum_of_that_line() {
        let all = releases(&[
            "v2.3.8", "v2.5.3", "v2.5.8", "v2.7.8", "v3.0.0", "v3.0.5",
        ]);
        let found = find_release(&all, &opts(None, Some("v2.5"), false)).unwrap();
        assert_eq!(found.tag_name, "v2.5.8");
    }

    #[test]
    fn prereleases_excluded_by_default() {
        let all = releases(&["v1.6.7", "v4.5.7-beta.1", "v4.5.7", "v4.5.8-beta.1"]);
        let found = find_release(&all, &opts(None, None, false)).unwrap();
        assert_eq!(found.tag_name, "v4.5.7");
    }

    #[test]
    fn prereleases_rank_globally_when_accepted() {
        let all = releases(&["v1.6.7", "v4.5.7-beta.1", "v4.5.8-beta.2"]);
        let found = find_release(&all, &opts(None, None, true)).unwrap();
        assert_eq!(found.tag_name, "v4.5.8-beta.2");
    }

    #[test]
    fn stable_still_wins_over_its_own_prerelease() {
        let all = releases(&["v1.6.7", "v4.5.7-beta.1", "v4.5.7"]);
        let found = find_release(&all, &opts(None, None, true)).unwrap();
        assert_eq!(found.tag_name, "v4.5.7");
    }

    #[test]
    fn input_order_does_not_matter() {
        let all = releases(&[
            "v4.7.3",
            "v3.0.5",
            "v1.6.7",
            "v4.5.8-beta.1",
            "v4.5.7",
            "v2.3.8",
        ]);
        let found = find_release(&all, &opts(None, None, false)).unwrap();
        assert_eq!(found.tag_name, "v4.7.3");
    }

    #[test]
    fn duplicate_tags_return_the_later_listed_release() {
        let all = vec![
            Release {
                tag_name: "v1.0.0".to_string(),
                assets: vec![Asset {
                    name: "first".to_string(),
                    download_url: "first-url".to_string(),
                }],
            },
            Release {
                tag_name: "v1.0.0".to_string(),
                assets: vec![Asset {
                    name: "second".to_string(),
                    download_url: "second-url".to_string(),
                }],
            },
        ];
        let found = find_release(&all, &opts(None, None, false)).unwrap();
        assert_eq!(found.assets[0].name, "second");
    }

    #[test]
    fn parse_tag_requires_v_prefix() {
        assert!(parse_tag("v1.2.3").is_some());
        assert!(parse_tag("v1.2.3-beta.1").is_some());
        assert!(parse_tag("1.2.3").is_none());
        assert!(parse_tag("v1.2").is_none());
    }
}
