#![allow(dead_code, unreachable_pub)]

use serde_json::json;
use tplat_catalog::{Contribution, ContributionEvent, ContributionSink, TargetPlatformService, apply_all};
use tplat_domain::{PackageDescriptor, PlatformDescriptor, ServiceConfiguration};

/// Platforms in registration order.
#[must_use]
pub fn platforms() -> Vec<PlatformDescriptor> {
    let raw = json!([
        {
            "id": "cap-5.8",
            "name": "cap",
            "version": "5.8",
            "refVersion": "5.8",
            "label": "Nuxeo Platform",
            "status": "supported",
            "releaseDate": "2013/09/23",
            "testVersions": ["5.8.0-HF07-SNAPSHOT", "5.8"]
        },
        {
            "id": "cmf-1.8",
            "name": "cmf",
            "version": "1.8",
            "refVersion": "5.4.2",
            "label": "Case Management",
            "status": "deprecated",
            "types": ["CMF"]
        },
        {
            "id": "cap-5.9.1",
            "name": "cap",
            "version": "5.9.1",
            "status": "supported",
            "deprecated": true
        },
        {
            "id": "cap-5.9.2",
            "name": "cap",
            "version": "5.9.2",
            "status": "new",
            "parent": "cap-5.9.1",
            "fastTrack": true,
            "endOfAvailability": "2014/06/18"
        },
        {
            "id": "cap-5.9.3",
            "name": "cap",
            "version": "5.9.3",
            "restricted": true
        },
        {
            "id": "dm-5.3.0",
            "name": "dm",
            "version": "5.3.0",
            "enabled": false
        }
    ]);
    serde_json::from_value(raw).expect("platform fixtures")
}

/// Packages in registration order.
#[must_use]
pub fn packages() -> Vec<PackageDescriptor> {
    let raw = json!([
        {
            "id": "nuxeo-dm-5.8",
            "name": "nuxeo-dm",
            "version": "5.8",
            "label": "DM",
            "description": "My desc",
            "targetPlatforms": ["cap-5.8"]
        },
        {
            "id": "nuxeo-dam-5.8",
            "name": "nuxeo-dam",
            "version": "5.8",
            "label": "DAM",
            "targetPlatforms": ["cap-5.8"],
            "dependencies": ["nuxeo-dm-5.8"]
        }
    ]);
    serde_json::from_value(raw).expect("package fixtures")
}

#[must_use]
pub fn configuration() -> ServiceConfiguration {
    ServiceConfiguration::builder().default_target_platform("cap-5.8").build()
}

#[must_use]
pub fn events() -> Vec<ContributionEvent> {
    platforms()
        .into_iter()
        .map(Contribution::from)
        .chain(packages().into_iter().map(Contribution::from))
        .chain(std::iter::once(configuration().into()))
        .map(ContributionEvent::Added)
        .collect()
}

/// Loads every fixture into `service`.
pub fn load(service: &impl ContributionSink) {
    apply_all(service, events());
}

/// In-memory service with every fixture registered.
#[must_use]
pub fn setup_service() -> TargetPlatformService {
    let service = TargetPlatformService::in_memory();
    load(&service);
    service
}

#[must_use]
pub fn ids<T: std::ops::Deref<Target = tplat_domain::Target>>(views: &[T]) -> Vec<&str> {
    views.iter().map(|view| view.id.as_str()).collect()
}
