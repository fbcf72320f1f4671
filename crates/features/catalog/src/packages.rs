use crate::chain::ParentChain;
use crate::error::CatalogError;
use crate::filter::TargetFilter;
use crate::overlay::OverrideStore;
use crate::projection;
use tplat_domain::{PackageDescriptor, Target, TargetPackage, TargetPackageInfo};
use tplat_kernel::ContributionRegistry;
use tracing::warn;

const KIND: &str = "package";

/// Resolves registered package descriptors against the overlay.
#[derive(Debug, Clone)]
pub struct PackageCatalog {
    registry: ContributionRegistry<PackageDescriptor>,
    overlay: OverrideStore,
}

impl PackageCatalog {
    #[must_use]
    pub const fn new(
        registry: ContributionRegistry<PackageDescriptor>,
        overlay: OverrideStore,
    ) -> Self {
        Self { registry, overlay }
    }

    #[must_use]
    pub const fn registry(&self) -> &ContributionRegistry<PackageDescriptor> {
        &self.registry
    }

    /// Fully resolved package with its parent chain; `None` for an unknown id.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn resolve(&self, id: &str) -> Result<Option<TargetPackage>, CatalogError> {
        match self.registry.get(id) {
            Some(desc) => self.build(&desc, &mut ParentChain::default()).map(Some),
            None => Ok(None),
        }
    }

    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn resolve_info(&self, id: &str) -> Result<Option<TargetPackageInfo>, CatalogError> {
        Ok(self.resolve(id)?.as_ref().map(projection::package_info))
    }

    /// Packages targeting `platform_id`, in registration order.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn packages_for(&self, platform_id: &str) -> Result<Vec<TargetPackage>, CatalogError> {
        self.registry
            .list()
            .iter()
            .filter(|desc| desc.targets(platform_id))
            .map(|desc| self.build(desc, &mut ParentChain::default()))
            .collect()
    }

    /// Registered packages kept by `filter`, in registration order.
    ///
    /// # Errors
    /// Overlay failures, see [`OverrideStore::get`].
    pub fn list(&self, filter: &TargetFilter) -> Result<Vec<TargetPackage>, CatalogError> {
        let mut packages = Vec::new();
        for desc in self.registry.list() {
            let package = self.build(&desc, &mut ParentChain::default())?;
            if filter.matches(&package) {
                packages.push(package);
            }
        }
        Ok(packages)
    }

    fn build(
        &self,
        desc: &PackageDescriptor,
        chain: &mut ParentChain,
    ) -> Result<TargetPackage, CatalogError> {
        chain.enter(desc.id());
        let overlay = self.overlay.get(desc.id())?;

        let parent = match desc.common.parent.as_deref().filter(|p| !p.is_empty()) {
            Some(parent_id) => self.parent(desc.id(), parent_id, chain)?,
            None => None,
        };

        Ok(TargetPackage {
            target: Target::resolve(&desc.common, &overlay),
            parent: parent.map(Box::new),
            target_platforms: desc.target_platforms.clone(),
            dependencies: desc.dependencies.clone(),
            trial: desc.trial,
        })
    }

    fn parent(
        &self,
        child: &str,
        parent_id: &str,
        chain: &mut ParentChain,
    ) -> Result<Option<TargetPackage>, CatalogError> {
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
