use tplat_domain::Target;

/// Listing filter. Disabled entries are always dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetFilter {
    pub filter_deprecated: bool,
    pub filter_restricted: bool,
    /// Keep only entries declaring this type.
    pub kind: Option<String>,
}

impl TargetFilter {
    #[must_use]
    pub fn new(filter_deprecated: bool, filter_restricted: bool, kind: Option<&str>) -> Self {
        Self { filter_deprecated, filter_restricted, kind: kind.map(str::to_owned) }
    }

    #[must_use]
    pub fn matches(&self, target: &Target) -> bool {
        target.enabled
            && !(self.filter_deprecated && target.deprecated)
            && !(self.filter_restricted && target.restricted)
            && self.kind.as_deref().is_none_or(|kind| target.has_type(kind))
    }
}
