//! Declarative records as contributed by the host.
//!
//! Descriptors are immutable once registered: a later contribution with the same id replaces
//! the whole record. Field names follow the camelCase attributes of the declarative source.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

/// Fields shared by platform and package descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct TargetDescriptor {
    #[builder(setter(into))]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub ref_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub download_link: Option<String>,
    #[serde(default, with = "date")]
    #[builder(default, setter(strip_option))]
    pub release_date: Option<NaiveDate>,
    #[serde(default, with = "date")]
    #[builder(default, setter(strip_option))]
    pub end_of_availability: Option<NaiveDate>,
    /// Free-form lifecycle tag ("new", "supported", "deprecated", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub status: Option<String>,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub types: Vec<String>,
    /// Declared enabled flag; the overlay may force it either way.
    #[serde(default = "enabled_by_default")]
    #[builder(default = true)]
    pub enabled: bool,
    #[serde(default)]
    #[builder(default)]
    pub deprecated: bool,
    #[serde(default)]
    #[builder(default)]
    pub restricted: bool,
    /// Id of the parent descriptor of the same kind.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(default, setter(into, strip_option))]
    pub parent: Option<String>,
}

const fn enabled_by_default() -> bool {
    true
}

/// A declared platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PlatformDescriptor {
    #[serde(flatten)]
    pub common: TargetDescriptor,
    #[serde(default)]
    #[builder(default)]
    pub fast_track: bool,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub test_versions: Vec<String>,
}

/// A declared package, targeting one or more platforms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct PackageDescriptor {
    #[serde(flatten)]
    pub common: TargetDescriptor,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub target_platforms: Vec<String>,
    #[serde(default)]
    #[builder(default, setter(into))]
    pub dependencies: Vec<String>,
    #[serde(default)]
    #[builder(default)]
    pub trial: bool,
}

impl PlatformDescriptor {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.common.id
    }
}

impl PackageDescriptor {
    #[must_use]
    pub fn id(&self) -> &str {
        &self.common.id
    }

    /// Whether this package names `platform_id` among its targets.
    #[must_use]
    pub fn targets(&self, platform_id: &str) -> bool {
        self.target_platforms.iter().any(|target| target == platform_id)
    }
}

/// Service-wide configuration contribution. Only one is active at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
pub struct ServiceConfiguration {
    #[serde(default)]
    #[builder(default, setter(into, strip_option))]
    pub default_target_platform: Option<String>,
}

impl ServiceConfiguration {
    /// Registry key shared by every configuration contribution.
    pub const KEY: &'static str = "configuration";
}

/// Serde glue for optional dates.
///
/// Writes the declarative `yyyy/MM/dd` form and reads either that or ISO `yyyy-MM-dd`.
/// Blank values read as absent.
pub mod date {
    use chrono::NaiveDate;
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const DECLARED_FORMAT: &str = "%Y/%m/%d";
    const ISO_FORMAT: &str = "%Y-%m-%d";

    /// Parses a date in either supported format.
    ///
    /// # Errors
    /// Returns the parse error of the declarative format when neither format matches.
    pub fn parse(raw: &str) -> Result<NaiveDate, chrono::ParseError> {
        let raw = raw.trim();
        NaiveDate::parse_from_str(raw, DECLARED_FORMAT)
            .or_else(|err| NaiveDate::parse_from_str(raw, ISO_FORMAT).map_err(|_| err))
    }

    #[allow(clippy::ref_option)]
    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(date) => serializer.collect_str(&date.format(DECLARED_FORMAT)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) if !raw.trim().is_empty() => parse(&raw).map(Some).map_err(D::Error::custom),
            _ => Ok(None),
        }
    }
}
