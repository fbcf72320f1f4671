//! Dotted version ordering.
//!
//! Versions are split on `.`, and tokens are compared pairwise: numerically when both sides
//! are unsigned integers, lexicographically otherwise. The shorter sequence is padded with
//! `"0"`, so `5.8` and `5.8.0` are equal.
//!
//! The empty string is a sentinel placed before every real version. Both
//! [`Versioned::is_after_version`] and [`Versioned::is_strictly_before_version`] return `true`
//! for an empty reference; callers rely on either reading, so the overlap stays.

use std::cmp::Ordering;
use tplat_domain::{
    PackageDescriptor, PlatformDescriptor, Target, TargetDescriptor, TargetPackage,
    TargetPackageInfo, TargetPlatform, TargetPlatformInfo, TargetPlatformInstance,
};

const PAD_TOKEN: &str = "0";

/// Compares two dotted versions.
///
/// Not transitive when numeric and alphanumeric tokens meet at the same position.
#[must_use]
pub fn compare_versions(left: &str, right: &str) -> Ordering {
    let mut left = left.split('.');
    let mut right = right.split('.');
    loop {
        let (l, r) = match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (l, r) => (l.unwrap_or(PAD_TOKEN), r.unwrap_or(PAD_TOKEN)),
        };
        match compare_tokens(l, r) {
            Ordering::Equal => {},
            other => return other,
        }
    }
}

fn compare_tokens(left: &str, right: &str) -> Ordering {
    match (left.parse::<u64>(), right.parse::<u64>()) {
        (Ok(l), Ok(r)) => l.cmp(&r),
        // Non-numeric or overflowing tokens.
        _ => left.cmp(right),
    }
}

/// Anything carrying a version string. An absent version reads as `""`.
pub trait Versioned {
    fn version_str(&self) -> &str;

    /// Both versions compare equal.
    fn is_version<R: Versioned + ?Sized>(&self, reference: &R) -> bool {
        compare_versions(self.version_str(), reference.version_str()) == Ordering::Equal
    }

    /// Strictly greater than `reference`, or `reference` is empty.
    fn is_after_version<R: Versioned + ?Sized>(&self, reference: &R) -> bool {
        let reference = reference.version_str();
        reference.is_empty() || compare_versions(self.version_str(), reference) == Ordering::Greater
    }

    /// Strictly lower than `reference`, or `reference` is empty.
    fn is_strictly_before_version<R: Versioned + ?Sized>(&self, reference: &R) -> bool {
        let reference = reference.version_str();
        reference.is_empty() || compare_versions(self.version_str(), reference) == Ordering::Less
    }
}

impl Versioned for str {
    fn version_str(&self) -> &str {
        self
    }
}

impl Versioned for String {
    fn version_str(&self) -> &str {
        self
    }
}

impl Versioned for TargetDescriptor {
    fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }
}

impl Versioned for Target {
    fn version_str(&self) -> &str {
        self.version.as_deref().unwrap_or_default()
    }
}

macro_rules! versioned_via {
    ($($view:ty => $($path:ident).+),* $(,)?) => {
        $(
            impl Versioned for $view {
                fn version_str(&self) -> &str {
                    Versioned::version_str(&self.$($path).+)
                }
            }
        )*
    };
}

versioned_via! {
    PlatformDescriptor => common,
    PackageDescriptor => common,
    TargetPlatform => target,
    TargetPlatformInfo => target,
    TargetPackage => target,
    TargetPackageInfo => target,
    TargetPlatformInstance => platform.target,
}

/// Orders platforms (or any view) by name, then by version.
///
/// Only a total order while versions of one name are all numeric: mixed tokens can cycle
/// (`10 < 1a < 2 < 10`), and `sort_by` over such input yields an unspecified order.
#[must_use]
pub fn cmp_by_name_version(left: &Target, right: &Target) -> Ordering {
    left.name.cmp(&right.name).then_with(|| compare_versions(left.version_str(), right.version_str()))
}
