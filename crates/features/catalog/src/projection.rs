//! Pure projections of fully resolved entities.

use tplat_domain::{
    TargetPackage, TargetPackageInfo, TargetPlatform, TargetPlatformInfo, TargetPlatformInstance,
};

/// Drops the parent object of a package.
#[must_use]
pub fn package_info(package: &TargetPackage) -> TargetPackageInfo {
    TargetPackageInfo {
        target: package.target.clone(),
        target_platforms: package.target_platforms.clone(),
        dependencies: package.dependencies.clone(),
    }
}

/// Drops the parent object of a platform and reduces its packages to infos.
#[must_use]
pub fn platform_info(platform: &TargetPlatform) -> TargetPlatformInfo {
    TargetPlatformInfo {
        target: platform.target.clone(),
        fast_track: platform.fast_track,
        test_versions: platform.test_versions.clone(),
        packages: platform.packages.iter().map(package_info).collect(),
    }
}

#[must_use]
pub const fn instance(
    platform: TargetPlatform,
    enabled_packages: Vec<TargetPackage>,
) -> TargetPlatformInstance {
    TargetPlatformInstance { platform, enabled_packages }
}
