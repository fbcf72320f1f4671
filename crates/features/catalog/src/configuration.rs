use std::sync::Arc;
use tplat_domain::ServiceConfiguration;
use tplat_kernel::{ContributionRegistry, Registration};

/// Single-slot registry for the service configuration.
///
/// Every contribution shares [`ServiceConfiguration::KEY`], so a later one replaces the
/// previous value wholesale.
#[derive(Debug, Clone, Default)]
pub struct ConfigurationRegistry {
    slot: ContributionRegistry<ServiceConfiguration>,
}

impl ConfigurationRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, config: ServiceConfiguration) -> Registration {
        self.slot.add(config)
    }

    /// Clears the slot only while it still holds `config`.
    pub fn remove(&self, config: &ServiceConfiguration) -> bool {
        self.slot.remove(config)
    }

    #[must_use]
    pub fn current(&self) -> Option<Arc<ServiceConfiguration>> {
        self.slot.get(ServiceConfiguration::KEY)
    }

    /// Configured default platform id, if any.
    #[must_use]
    pub fn default_platform_id(&self) -> Option<String> {
        self.current()
            .and_then(|config| config.default_target_platform.clone())
            .filter(|id| !id.is_empty())
    }

    pub fn clear(&self) {
        self.slot.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_configuration_replaces_earlier() {
        let registry = ConfigurationRegistry::new();
        assert_eq!(registry.default_platform_id(), None);

        let first = ServiceConfiguration::builder().default_target_platform("cap-5.8").build();
        let second = ServiceConfiguration::builder().default_target_platform("cap-5.9.2").build();
        assert_eq!(registry.add(first.clone()), Registration::Added);
        assert_eq!(registry.add(second.clone()), Registration::Overridden);
        assert_eq!(registry.default_platform_id().as_deref(), Some("cap-5.9.2"));

        assert!(!registry.remove(&first));
        assert!(registry.remove(&second));
        assert_eq!(registry.default_platform_id(), None);
    }
}
