//! Contribution intake.
//!
//! The host delivers an ordered stream of add/remove notifications; how the descriptors were
//! loaded or validated is not the catalog's business.

use tplat_domain::{PackageDescriptor, PlatformDescriptor, ServiceConfiguration};
use tplat_kernel::Registration;

/// One contributed value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Contribution {
    Platform(PlatformDescriptor),
    Package(PackageDescriptor),
    Configuration(ServiceConfiguration),
}

impl Contribution {
    /// Registry key of the contributed value.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Platform(desc) => desc.id(),
            Self::Package(desc) => desc.id(),
            Self::Configuration(_) => ServiceConfiguration::KEY,
        }
    }
}

impl From<PlatformDescriptor> for Contribution {
    fn from(desc: PlatformDescriptor) -> Self {
        Self::Platform(desc)
    }
}

impl From<PackageDescriptor> for Contribution {
    fn from(desc: PackageDescriptor) -> Self {
        Self::Package(desc)
    }
}

impl From<ServiceConfiguration> for Contribution {
    fn from(config: ServiceConfiguration) -> Self {
        Self::Configuration(config)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContributionEvent {
    Added(Contribution),
    Removed(Contribution),
}

/// Receiver of contribution notifications.
pub trait ContributionSink {
    fn register(&self, contribution: Contribution) -> Registration;

    /// Removes `contribution` if it is still the active value for its key.
    fn unregister(&self, contribution: &Contribution) -> bool;
}

/// Forwards a single event to `sink`.
pub fn apply<S: ContributionSink + ?Sized>(sink: &S, event: ContributionEvent) {
    match event {
        ContributionEvent::Added(contribution) => {
            sink.register(contribution);
        },
        ContributionEvent::Removed(contribution) => {
            sink.unregister(&contribution);
        },
    }
}

/// Replays `events` in order.
pub fn apply_all<S, I>(sink: &S, events: I)
where
    S: ContributionSink + ?Sized,
    I: IntoIterator<Item = ContributionEvent>,
{
    for event in events {
        apply(sink, event);
    }
}
