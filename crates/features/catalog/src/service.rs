//! Query and administration surface of the catalog.

use crate::configuration::ConfigurationRegistry;
use crate::contribution::{Contribution, ContributionSink};
use crate::error::CatalogError;
use crate::filter::TargetFilter;
use crate::overlay::OverrideStore;
use crate::packages::PackageCatalog;
use crate::platforms::PlatformCatalog;
use std::sync::Arc;
use tplat_domain::{
    OverlayRecord, TargetPackage, TargetPackageInfo, TargetPlatform, TargetPlatformInfo,
    TargetPlatformInstance,
};
use tplat_kernel::{ContributionRegistry, Registration};
use tplat_storage::{MemoryBackend, OverlayBackend};
use tracing::{debug, info, warn};

#[derive(Debug)]
struct ServiceInner {
    platforms: PlatformCatalog,
    configuration: ConfigurationRegistry,
    overlay: OverrideStore,
}

/// Entry point of the catalog: owns the registries and the overlay.
///
/// Construct one at startup and share it; cloning is cheap and every clone sees the same
/// state.
///
/// ```rust
/// use tplat_catalog::{Contribution, ContributionSink, TargetPlatformService};
/// use tplat_domain::{PlatformDescriptor, TargetDescriptor};
///
/// let service = TargetPlatformService::in_memory();
/// let common = TargetDescriptor::builder().id("cap-5.8").name("cap").version("5.8").build();
/// service.register(Contribution::Platform(PlatformDescriptor::builder().common(common).build()));
///
/// service.disable_platform("cap-5.8").unwrap();
/// let platform = service.get_platform("cap-5.8").unwrap().unwrap();
/// assert!(!platform.enabled);
/// ```
#[derive(Debug, Clone)]
pub struct TargetPlatformService {
    inner: Arc<ServiceInner>,
}

impl TargetPlatformService {
    #[must_use]
    pub fn new(overlay: OverrideStore) -> Self {
        let packages = PackageCatalog::new(ContributionRegistry::new(), overlay.clone());
        let platforms = PlatformCatalog::new(ContributionRegistry::new(), packages, overlay.clone());
        Self {
            inner: Arc::new(ServiceInner {
                platforms,
                configuration: ConfigurationRegistry::new(),
                overlay,
            }),
        }
    }

    #[must_use]
    pub fn with_backend(backend: impl OverlayBackend + 'static) -> Self {
        Self::new(OverrideStore::new(backend))
    }

    /// Service over a volatile overlay named after the default directory.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new(tplat_domain::config::DEFAULT_OVERLAY_DIRECTORY))
    }

    #[must_use]
    pub fn overrides(&self) -> &OverrideStore {
        &self.inner.overlay
    }

    #[must_use]
    pub fn platforms(&self) -> &PlatformCatalog {
        &self.inner.platforms
    }

    #[must_use]
    pub fn packages(&self) -> &PackageCatalog {
        self.inner.platforms.packages()
    }

    #[must_use]
    pub fn configuration(&self) -> &ConfigurationRegistry {
        &self.inner.configuration
    }

    /// Identifier of the overlay store.
    #[must_use]
    pub fn override_directory(&self) -> &str {
        self.inner.overlay.directory()
    }

    /// The configured default platform. A configured id that no longer resolves yields `None`.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn get_default_platform(&self) -> Result<Option<TargetPlatform>, CatalogError> {
        let Some(id) = self.inner.configuration.default_platform_id() else {
            return Ok(None);
        };
        let platform = self.get_platform(&id)?;
        if platform.is_none() {
            debug!(id, "Default target platform is not registered");
        }
        Ok(platform)
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn get_platform(&self, id: &str) -> Result<Option<TargetPlatform>, CatalogError> {
        self.inner.platforms.resolve(id)
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn get_platform_info(&self, id: &str) -> Result<Option<TargetPlatformInfo>, CatalogError> {
        self.inner.platforms.resolve_info(id)
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn get_platform_instance<S: AsRef<str>>(
        &self,
        id: &str,
        package_ids: &[S],
    ) -> Result<Option<TargetPlatformInstance>, CatalogError> {
        self.inner.platforms.resolve_instance(id, package_ids)
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn get_package(&self, id: &str) -> Result<Option<TargetPackage>, CatalogError> {
        self.packages().resolve(id)
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn get_package_info(&self, id: &str) -> Result<Option<TargetPackageInfo>, CatalogError> {
        self.packages().resolve_info(id)
    }

    /// Enabled platforms in registration order, optionally without deprecated or restricted
    /// ones, and optionally only those declaring `kind`.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn list_platforms(
        &self,
        filter_deprecated: bool,
        filter_restricted: bool,
        kind: Option<&str>,
    ) -> Result<Vec<TargetPlatform>, CatalogError> {
        self.inner.platforms.list(&TargetFilter::new(filter_deprecated, filter_restricted, kind))
    }

    /// Info projection of [`TargetPlatformService::list_platforms`].
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn list_platform_infos(
        &self,
        filter_deprecated: bool,
        filter_restricted: bool,
        kind: Option<&str>,
    ) -> Result<Vec<TargetPlatformInfo>, CatalogError> {
        self.inner
            .platforms
            .list_info(&TargetFilter::new(filter_deprecated, filter_restricted, kind))
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn list_packages(
        &self,
        filter_deprecated: bool,
        filter_restricted: bool,
        kind: Option<&str>,
    ) -> Result<Vec<TargetPackage>, CatalogError> {
        self.packages().list(&TargetFilter::new(filter_deprecated, filter_restricted, kind))
    }

    /// Wipes the registries and the overlay store.
    ///
    /// # Errors
    /// [`CatalogError::OverlayUnavailable`] when the overlay cannot be cleared. The registries
    /// are emptied regardless.
    pub fn teardown(&self) -> Result<(), CatalogError> {
        self.inner.platforms.registry().clear();
        self.packages().registry().clear();
        self.inner.configuration.clear();
        self.inner.overlay.clear()?;
        info!(store = self.override_directory(), "Target platform service torn down");
        Ok(())
    }
}

macro_rules! admin_ops {
    ($($(#[doc = $doc:expr])* $name:ident => $op:ident;)*) => {
        impl TargetPlatformService {
            $(
                $(#[doc = $doc])*
                ///
                /// Applies to any id, registered or not, and returns the stored record.
                ///
                /// # Errors
                /// [`CatalogError::OverlayUnavailable`] when the overlay store cannot be reached.
                pub fn $name(&self, id: &str) -> Result<OverlayRecord, CatalogError> {
                    self.inner.overlay.$op(id)
                }
            )*
        }
    };
}

admin_ops! {
    /// Forces the platform disabled, hiding it from listings.
    disable_platform => disable;
    /// Forces the platform enabled, overriding a declared `enabled = false`.
    enable_platform => enable;
    /// Forces the platform restricted.
    restrict_platform => restrict;
    /// Forces the platform unrestricted, overriding a declared `restricted = true`.
    unrestrict_platform => unrestrict;
    /// Drops both overrides of the platform; declared values apply again.
    restore_platform => restore;
    /// Forces the package disabled. It stays attached to its platforms, resolved as disabled.
    disable_package => disable;
    /// Forces the package enabled.
    enable_package => enable;
    /// Forces the package restricted.
    restrict_package => restrict;
    /// Forces the package unrestricted.
    unrestrict_package => unrestrict;
    /// Drops both overrides of the package.
    restore_package => restore;
}

impl ContributionSink for TargetPlatformService {
    fn register(&self, contribution: Contribution) -> Registration {
        match contribution {
            Contribution::Platform(desc) => {
                info!(id = %desc.id(), "Register target platform");
                self.inner.platforms.registry().add(desc)
            },
            Contribution::Package(desc) => {
                info!(id = %desc.id(), "Register target package");
                self.packages().registry().add(desc)
            },
            Contribution::Configuration(config) => {
                info!(
                    default = config.default_target_platform.as_deref().unwrap_or_default(),
                    "Register TargetPlatformService configuration"
                );
                self.inner.configuration.add(config)
            },
        }
    }

    fn unregister(&self, contribution: &Contribution) -> bool {
        let removed = match contribution {
            Contribution::Platform(desc) => {
                info!(id = %desc.id(), "Unregister target platform");
                self.inner.platforms.registry().remove(desc)
            },
            Contribution::Package(desc) => {
                info!(id = %desc.id(), "Unregister target package");
                self.packages().registry().remove(desc)
            },
            Contribution::Configuration(config) => {
                info!(
                    default = config.default_target_platform.as_deref().unwrap_or_default(),
                    "Unregister TargetPlatformService configuration"
                );
                self.inner.configuration.remove(config)
            },
        };
        if !removed {
            warn!(key = contribution.key(), "Stale contribution removal ignored");
        }
        removed
    }
}
