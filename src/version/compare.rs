//! Lenient version comparison
//!
//! NapCat tags look like `v4.1.0`, QQ versions like `9.9.15-28131`. Plain
//! semver is tried first; anything else is compared by its numeric
//! components, so `9.9.15-28131` orders before `9.9.15-28418`.

use semver::Version;
use std::cmp::Ordering;

use super::types::UpdateStatus;

/// Compares an installed version against the latest release
pub fn compare_versions(local: Option<&str>, remote: Option<&str>) -> UpdateStatus {
    let Some(local) = local else {
        return UpdateStatus::NotInstalled;
    };
    let Some(remote) = remote else {
        return UpdateStatus::Unknown;
    };

    match order_versions(local, remote) {
        Some(Ordering::Less) => UpdateStatus::UpdateAvailable,
        Some(_) => UpdateStatus::UpToDate,
        None if strip_prefix(local) == strip_prefix(remote) => UpdateStatus::UpToDate,
        None => {
            log::warn!("Unable to compare versions '{}' and '{}'", local, remote);
            UpdateStatus::Unknown
        }
    }
}

/// Orders two version strings, `None` when either cannot be read
pub fn order_versions(a: &str, b: &str) -> Option<Ordering> {
    let (a, b) = (strip_prefix(a), strip_prefix(b));

    if let (Ok(va), Ok(vb)) = (Version::parse(a), Version::parse(b)) {
        if va.pre.is_empty() && vb.pre.is_empty() {
            return Some(va.cmp(&vb));
        }
    }

    let (ca, cb) = (numeric_components(a)?, numeric_components(b)?);
    let len = ca.len().max(cb.len());
    let pad = |c: &[u64], i: usize| c.get(i).copied().unwrap_or(0);
    Some(
        (0..len)
            .map(|i| pad(ca.as_slice(), i).cmp(&pad(cb.as_slice(), i)))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal),
    )
}

fn strip_prefix(version: &str) -> &str {
    let trimmed = version.trim();
    trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('V'))
        .unwrap_or(trimmed)
}

fn numeric_components(version: &str) -> Option<Vec<u64>> {
    version
        .split(['.', '-', '+'])
        .map(|part| {
            let digits: String = part.chars().take_while(char::is_ascii_digit).collect();
            digits.parse::<u64>().ok()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semver_tags() {
        assert_eq!(
            compare_versions(Some("v4.0.3"), Some("v4.1.0")),
            UpdateStatus::UpdateAvailable
        );
        assert_eq!(
            compare_versions(Some("v4.1.0"), Some("4.1.0")),
            UpdateStatus::UpToDate
        );
        assert_eq!(
            compare_versions(Some("v4.2.0"), Some("v4.1.9")),
            UpdateStatus::UpToDate
        );
    }

    #[test]
    fn test_qq_build_numbers() {
        assert_eq!(
            compare_versions(Some("9.9.15-28131"), Some("9.9.15-28418")),
            UpdateStatus::UpdateAvailable
        );
        assert_eq!(
            compare_versions(Some("9.9.16-28788"), Some("9.9.15-28418")),
            UpdateStatus::UpToDate
        );
    }

    #[test]
    fn test_missing_sides() {
        assert_eq!(compare_versions(None, Some("v1.0.0")), UpdateStatus::NotInstalled);
        assert_eq!(compare_versions(Some("v1.0.0"), None), UpdateStatus::Unknown);
    }

    #[test]
    fn test_unreadable_versions() {
        assert_eq!(
            compare_versions(Some("nightly"), Some("nightly")),
            UpdateStatus::UpToDate
        );
        assert_eq!(
            compare_versions(Some("nightly"), Some("v1.0.0")),
            UpdateStatus::Unknown
        );
    }
}
