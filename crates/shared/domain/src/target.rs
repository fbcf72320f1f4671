//! Resolved views handed to callers.
//!
//! A [`Target`] is a descriptor with the overlay applied. The platform and package views wrap
//! it with kind-specific data; the info views are the lightweight projections without parent
//! objects, and [`TargetPlatformInstance`] adds a caller-chosen set of enabled packages.

use crate::descriptor::{TargetDescriptor, date};
use crate::overlay::OverlayRecord;
use chrono::NaiveDate;
use serde::Serialize;
use std::ops::Deref;

/// Display fields and resolved flags common to every view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Target {
    pub id: String,
    pub name: Option<String>,
    pub version: Option<String>,
    pub ref_version: Option<String>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub download_link: Option<String>,
    #[serde(serialize_with = "date::serialize")]
    pub release_date: Option<NaiveDate>,
    #[serde(serialize_with = "date::serialize")]
    pub end_of_availability: Option<NaiveDate>,
    pub status: Option<String>,
    pub types: Vec<String>,
    pub enabled: bool,
    pub deprecated: bool,
    pub restricted: bool,
}

impl Target {
    /// Applies `overlay` on top of the declared flags of `desc`.
    #[must_use]
    pub fn resolve(desc: &TargetDescriptor, overlay: &OverlayRecord) -> Self {
        Self {
            id: desc.id.clone(),
            name: desc.name.clone(),
            version: desc.version.clone(),
            ref_version: desc.ref_version.clone(),
            label: desc.label.clone(),
            description: desc.description.clone(),
            download_link: desc.download_link.clone(),
            release_date: desc.release_date,
            end_of_availability: desc.end_of_availability,
            status: desc.status.clone(),
            types: desc.types.clone(),
            enabled: overlay.enabled(desc.enabled),
            deprecated: desc.deprecated,
            restricted: overlay.restricted(desc.restricted),
        }
    }

    #[must_use]
    pub fn has_type(&self, kind: &str) -> bool {
        self.types.iter().any(|t| t == kind)
    }
}

/// Fully resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPackage {
    #[serde(flatten)]
    pub target: Target,
    pub parent: Option<Box<TargetPackage>>,
    pub target_platforms: Vec<String>,
    pub dependencies: Vec<String>,
    pub trial: bool,
}

/// Lightweight package projection: no parent object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPackageInfo {
    #[serde(flatten)]
    pub target: Target,
    pub target_platforms: Vec<String>,
    pub dependencies: Vec<String>,
}

/// Fully resolved platform with its parent chain and reverse-indexed packages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlatform {
    #[serde(flatten)]
    pub target: Target,
    pub parent: Option<Box<TargetPlatform>>,
    pub fast_track: bool,
    pub test_versions: Vec<String>,
    /// Packages targeting this platform, in package registration order.
    pub packages: Vec<TargetPackage>,
}

impl TargetPlatform {
    #[must_use]
    pub fn available_package_ids(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.id.as_str()).collect()
    }

    #[must_use]
    pub fn package(&self, id: &str) -> Option<&TargetPackage> {
        self.packages.iter().find(|p| p.id == id)
    }
}

/// Lightweight platform projection: no parent object, package infos only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlatformInfo {
    #[serde(flatten)]
    pub target: Target,
    pub fast_track: bool,
    pub test_versions: Vec<String>,
    pub packages: Vec<TargetPackageInfo>,
}

impl TargetPlatformInfo {
    #[must_use]
    pub fn available_package_ids(&self) -> Vec<&str> {
        self.packages.iter().map(|p| p.id.as_str()).collect()
    }
}

/// A platform plus the subset of packages a caller has enabled on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetPlatformInstance {
    #[serde(flatten)]
    pub platform: TargetPlatform,
    pub enabled_packages: Vec<TargetPackage>,
}

impl TargetPlatformInstance {
    #[must_use]
    pub fn enabled_package_ids(&self) -> Vec<&str> {
        self.enabled_packages.iter().map(|p| p.id.as_str()).collect()
    }

    #[must_use]
    pub fn enabled_package(&self, id: &str) -> Option<&TargetPackage> {
        self.enabled_packages.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn has_enabled_packages(&self) -> bool {
        !self.enabled_packages.is_empty()
    }

    /// Matches on the package `name`, not its id.
    #[must_use]
    pub fn has_enabled_package_with_name(&self, name: &str) -> bool {
        self.enabled_packages.iter().any(|p| p.name.as_deref() == Some(name))
    }
}

macro_rules! deref_to {
    ($($view:ty => $field:ident: $target:ty),* $(,)?) => {
        $(
            impl Deref for $view {
                type Target = $target;

                fn deref(&self) -> &Self::Target {
                    &self.$field
                }
            }
        )*
    };
}

deref_to! {
    TargetPackage => target: Target,
    TargetPackageInfo => target: Target,
    TargetPlatform => target: Target,
    TargetPlatformInfo => target: Target,
    TargetPlatformInstance => platform: TargetPlatform,
}
