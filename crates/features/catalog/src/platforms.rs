use crate::chain::ParentChain;
use crate::error::CatalogError;
use crate::filter::TargetFilter;
use crate::overlay::OverrideStore;
use crate::packages::PackageCatalog;
use crate::projection;
use fxhash::FxHashSet;
use tplat_domain::{
    PlatformDescriptor, Target, TargetPlatform, TargetPlatformInfo, TargetPlatformInstance,
};
use tplat_kernel::ContributionRegistry;
use tracing::warn;

const KIND: &str = "platform";

/// Resolves registered platform descriptors, attaching the packages that target them.
#[derive(Debug, Clone)]
pub struct PlatformCatalog {
    registry: ContributionRegistry<PlatformDescriptor>,
    packages: PackageCatalog,
    overlay: OverrideStore,
}

impl PlatformCatalog {
    #[must_use]
    pub const fn new(
        registry: ContributionRegistry<PlatformDescriptor>,
        packages: PackageCatalog,
        overlay: OverrideStore,
    ) -> Self {
        Self { registry, packages, overlay }
    }

    #[must_use]
    pub const fn registry(&self) -> &ContributionRegistry<PlatformDescriptor> {
        &self.registry
    }

    #[must_use]
    pub const fn packages(&self) -> &PackageCatalog {
        &self.packages
    }

    /// Fully resolved platform; `None` for an unknown id.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn resolve(&self, id: &str) -> Result<Option<TargetPlatform>, CatalogError> {
        match self.registry.get(id) {
            Some(desc) => self.build(&desc, &mut ParentChain::default()).map(Some),
            None => Ok(None),
        }
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn resolve_info(&self, id: &str) -> Result<Option<TargetPlatformInfo>, CatalogError> {
        Ok(self.resolve(id)?.as_ref().map(projection::platform_info))
    }

    /// Resolves `id` and attaches the requested packages as enabled.
    ///
    /// Duplicate ids are attached once, in first-seen order. Ids that do not resolve are
    /// skipped with a warning.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn resolve_instance<S: AsRef<str>>(
        &self,
        id: &str,
        package_ids: &[S],
    ) -> Result<Option<TargetPlatformInstance>, CatalogError> {
        let Some(platform) = self.resolve(id)? else {
            return Ok(None);
        };

        let mut seen = FxHashSet::default();
        let mut enabled = Vec::new();
        for package_id in package_ids.iter().map(|raw| raw.as_ref()) {
            if !seen.insert(package_id) {
                continue;
            }
            match self.packages.resolve(package_id)? {
                Some(package) => enabled.push(package),
                None => warn!(platform = id, package = package_id, "Referenced target package not found"),
            }
        }

        Ok(Some(projection::instance(platform, enabled)))
    }

    /// Registered platforms kept by `filter`, in registration order.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn list(&self, filter: &TargetFilter) -> Result<Vec<TargetPlatform>, CatalogError> {
        let mut platforms = Vec::new();
        for desc in self.registry.list() {
            let platform = self.build(&desc, &mut ParentChain::default())?;
            if filter.matches(&platform) {
                platforms.push(platform);
            }
        }
        Ok(platforms)
    }

    /// Info projection of [`PlatformCatalog::list`].
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn list_info(&self, filter: &TargetFilter) -> Result<Vec<TargetPlatformInfo>, CatalogError> {
        Ok(self.list(filter)?.iter().map(projection::platform_info).collect())
    }

    fn build(
        &self,
        desc: &PlatformDescriptor,
        chain: &mut ParentChain,
    ) -> Result<TargetPlatform, CatalogError> {
        chain.enter(desc.id());
        let overlay = self.overlay.get(desc.id())?;

        let parent = match desc.common.parent.as_deref().filter(|p| !p.is_empty()) {
            Some(parent_id) => self.parent(desc.id(), parent_id, chain)?,
            None => None,
        };

        Ok(TargetPlatform {
            target: Target::resolve(&desc.common, &overlay),
            parent: parent.map(Box::new),
            fast_track: desc.fast_track,
            test_versions: desc.test_versions.clone(),
            packages: self.packages.packages_for(desc.id())?,
        })
    }

    fn parent(
        &self,
        child: &str,
        parent_id: &str,
        chain: &mut ParentChain,
    ) -> Result<Option<TargetPlatform>, CatalogError> {
        if !chain.admits(KIND, child, parent_id) {
            return Ok(None);
        }
        match self.registry.get(parent_id) {
            Some(desc) => self.build(&desc, chain).map(Some),
            None => {
                warn!(kind = KIND, id = child, parent = parent_id, "Parent not registered, ignoring");
                Ok(None)
            },
        }
    }
}
