//! Feature-set catalog
//!
//! Provides [`FeatureCatalog`], the ordered table of every known
//! [`FeatureSet`]. Declared order is newest first; the selector relies on it
//! when looking for a compatible fallback.
//!
//! # File format
//!
//! ```toml
//! [[feature_set]]
//! id = "EE10_FEATURES"
//! spec_version = "EE10"
//! min_runtime_version = 11
//! features = ["servlet-6.0", "cdi-4.0"]
//! ```

use crate::error::PlanError;
use crate::feature_set::FeatureSet;
use featshift_ident::{FeatureId, RuntimeVersion, SpecVersion};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Id of the built-in Java EE 7 set
pub const EE7_FEATURES: &str = "EE7_FEATURES";
/// Id of the built-in Java EE 8 set
pub const EE8_FEATURES: &str = "EE8_FEATURES";
/// Id of the built-in Jakarta EE 9 set
pub const EE9_FEATURES: &str = "EE9_FEATURES";
/// Id of the built-in Jakarta EE 10 set
pub const EE10_FEATURES: &str = "EE10_FEATURES";
/// Id of the built-in Jakarta EE 11 set
pub const EE11_FEATURES: &str = "EE11_FEATURES";

const EE7: &[&str] = &[
    "servlet-3.1", "jsp-2.3", "el-3.0", "jsf-2.2", "cdi-1.2", "beanvalidation-1.1",
    "jaxrs-2.0", "jaxrsclient-2.0", "jpa-2.1", "jsonp-1.0", "websocket-1.1", "ejblite-3.2",
    "concurrent-1.0", "jms-2.0", "jca-1.7", "javamail-1.5", "batch-1.0", "appsecurity-2.0",
    "jaxws-2.2", "jacc-1.5", "jaspic-1.1", "javaee-7.0", "webprofile-7.0",
];

const EE8: &[&str] = &[
    "servlet-4.0", "jsp-2.3", "el-3.0", "jsf-2.3", "cdi-2.0", "beanvalidation-2.0",
    "jaxrs-2.1", "jaxrsclient-2.1", "jpa-2.2", "jsonp-1.1", "jsonb-1.0", "websocket-1.1",
    "ejblite-3.2", "concurrent-1.0", "jms-2.0", "jca-1.7", "javamail-1.6", "batch-1.0",
    "appsecurity-3.0", "jaxws-2.2", "jaxb-2.2", "jacc-1.5", "jaspic-1.1", "javaee-8.0",
    "webprofile-8.0",
];

const EE9: &[&str] = &[
    "servlet-5.0", "pages-3.0", "expressionlanguage-4.0", "faces-3.0", "cdi-3.0",
    "validation-3.0", "restfulws-3.0", "restfulwsclient-3.0", "persistence-3.0", "jsonp-2.0",
    "jsonb-2.0", "websocket-2.0", "enterprisebeanslite-4.0", "concurrent-2.0", "messaging-3.0",
    "connectors-2.0", "mail-2.0", "batch-2.0", "appsecurity-4.0", "xmlws-3.0",
    "xmlbinding-3.0", "appauthorization-2.0", "appauthentication-2.0", "jakartaee-9.1",
    "webprofile-9.1",
];

const EE10: &[&str] = &[
    "servlet-6.0", "pages-3.1", "expressionlanguage-5.0", "faces-4.0", "cdi-4.0",
    "validation-3.0", "restfulws-3.1", "restfulwsclient-3.1", "persistence-3.1", "jsonp-2.1",
    "jsonb-3.0", "websocket-2.1", "enterprisebeanslite-4.0", "concurrent-3.0", "messaging-3.1",
    "connectors-2.1", "mail-2.1", "batch-2.1", "appsecurity-5.0", "xmlws-4.0",
    "xmlbinding-4.0", "appauthorization-2.1", "appauthentication-3.0", "jakartaee-10.0",
    "webprofile-10.0",
];

const EE11: &[&str] = &[
    "servlet-6.1", "pages-4.0", "expressionlanguage-6.0", "faces-4.1", "cdi-4.1",
    "validation-3.1", "restfulws-4.0", "restfulwsclient-4.0", "persistence-3.2", "jsonp-2.1",
    "jsonb-3.0", "websocket-2.2", "enterprisebeanslite-4.0", "concurrent-3.1", "messaging-3.1",
    "connectors-2.1", "mail-2.1", "batch-2.1", "appsecurity-6.0", "xmlws-4.0",
    "xmlbinding-4.0", "appauthorization-3.0", "appauthentication-3.1", "data-1.0",
    "jakartaee-11.0", "webprofile-11.0",
];

/// On-disk catalog layout
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "feature_set")]
    feature_sets: Vec<FeatureSet>,
}

/// Ordered collection of feature sets with unique ids
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeatureCatalog {
    sets: IndexMap<String, FeatureSet>,
}

impl FeatureCatalog {
    /// Create empty catalog
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            sets: IndexMap::new(),
        }
    }

    /// Catalog of EE11, EE10, EE9, EE8 and EE7, newest first
    #[must_use]
    pub fn builtin() -> Self {
        let tables = [
            (EE11_FEATURES, SpecVersion::Ee11, 17, EE11),
            (EE10_FEATURES, SpecVersion::Ee10, 11, EE10),
            (EE9_FEATURES, SpecVersion::Ee9, 8, EE9),
            (EE8_FEATURES, SpecVersion::Ee8, 8, EE8),
            (EE7_FEATURES, SpecVersion::Ee7, 8, EE7),
        ];

        let mut catalog = Self::new();
        for (id, version, runtime, names) in tables {
            let set = FeatureSet::builder(id)
                .with_spec_version(version)
                .with_min_runtime_version(runtime)
                .add_features(names.iter().filter_map(|name| FeatureId::new(name).ok()))
                .build();
            catalog.sets.insert(id.to_string(), set);
        }
        catalog
    }

    /// Build from sets in declared order
    ///
    /// # Errors
    /// `PlanError::DuplicateFeatureSet` if two sets share an id
    pub fn from_sets(sets: impl IntoIterator<Item = FeatureSet>) -> Result<Self, PlanError> {
        let mut catalog = Self::new();
        for set in sets {
            catalog.insert(set)?;
        }
        Ok(catalog)
    }

    /// Parse TOML catalog text
    ///
    /// # Errors
    /// - `PlanError::Parse` for invalid TOML or unknown feature names
    /// - `PlanError::DuplicateFeatureSet` if two sets share an id
    pub fn from_toml_str(text: &str) -> Result<Self, PlanError> {
        let file: CatalogFile = toml::from_str(text)?;
        Self::from_sets(file.feature_sets)
    }

    /// Load TOML catalog file
    ///
    /// # Errors
    /// `PlanError::Io` if the file cannot be read, otherwise as
    /// [`FeatureCatalog::from_toml_str`]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PlanError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| PlanError::io_error(path, e))?;
        let catalog = Self::from_toml_str(&text)?;
        tracing::debug!(path = %path.display(), sets = catalog.len(), "Loaded feature-set catalog");
        Ok(catalog)
    }

    /// Append a set
    ///
    /// # Errors
    /// `PlanError::DuplicateFeatureSet` if the id is taken
    pub fn insert(&mut self, set: FeatureSet) -> Result<(), PlanError> {
        if self.sets.contains_key(set.id()) {
            return Err(PlanError::DuplicateFeatureSet {
                id: set.id().to_string(),
            });
        }
        self.sets.insert(set.id().to_string(), set);
        Ok(())
    }

    /// Look up by id
    #[inline]
    #[must_use]
    pub fn by_id(&self, id: &str) -> Option<&FeatureSet> {
        self.sets.get(id)
    }

    /// Look up by id, failing on unknown ids
    ///
    /// # Errors
    /// `PlanError::UnknownFeatureSet`
    pub fn require(&self, id: &str) -> Result<&FeatureSet, PlanError> {
        self.by_id(id).ok_or_else(|| PlanError::unknown(id))
    }

    /// Newest set that runs on `runtime`
    #[must_use]
    pub fn newest_compatible(&self, runtime: RuntimeVersion) -> Option<&FeatureSet> {
        self.iter().find(|set| set.runs_on(runtime))
    }

    /// Union of the features of every set except `excluded_id`
    #[must_use]
    pub fn features_except(&self, excluded_id: &str) -> IndexSet<FeatureId> {
        self.iter()
            .filter(|set| set.id() != excluded_id)
            .flat_map(|set| set.features().iter().cloned())
            .collect()
    }

    /// Sets in declared order
    pub fn iter(&self) -> impl Iterator<Item = &FeatureSet> {
        self.sets.values()
    }

    /// Number of sets
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Check if catalog is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
