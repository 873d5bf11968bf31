//! Base names that changed between specification generations
//!
//! Provides [`BaseNameRenames`], consulted only after a direct base-name match
//! has failed. Lookups work in both directions so that moving forward
//! (`jsp` → `pages`) and backward (`pages` → `jsp`) use the same table.

use indexmap::IndexMap;

/// Feature base names renamed for the `jakarta` namespace, `(javax, jakarta)`
pub const JAKARTA_BASE_RENAMES: &[(&str, &str)] = &[
    ("appclientsupport", "appclientsupport"),
    ("beanvalidation", "validation"),
    ("ejb", "enterprisebeans"),
    ("ejbhome", "enterprisebeanshome"),
    ("ejblite", "enterprisebeanslite"),
    ("ejbpersistenttimer", "enterprisebeanspersistenttimer"),
    ("ejbremote", "enterprisebeansremote"),
    ("el", "expressionlanguage"),
    ("jacc", "appauthorization"),
    ("jaspic", "appauthentication"),
    ("javaee", "jakartaee"),
    ("javaeeclient", "jakartaeeclient"),
    ("javamail", "mail"),
    ("jaxb", "xmlbinding"),
    ("jaxrs", "restfulws"),
    ("jaxrsclient", "restfulwsclient"),
    ("jaxws", "xmlws"),
    ("jca", "connectors"),
    ("jcainboundsecurity", "connectorsinboundsecurity"),
    ("jms", "messaging"),
    ("jpa", "persistence"),
    ("jpacontainer", "persistencecontainer"),
    ("jsf", "faces"),
    ("jsfcontainer", "facescontainer"),
    ("jsp", "pages"),
    ("wasjmsclient", "messagingclient"),
    ("wasjmssecurity", "messagingsecurity"),
    ("wasjmsserver", "messagingserver"),
];

/// Bidirectional base-name translation table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BaseNameRenames {
    forward: IndexMap<String, String>,
    backward: IndexMap<String, String>,
}

impl BaseNameRenames {
    /// Create empty table
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            forward: IndexMap::new(),
            backward: IndexMap::new(),
        }
    }

    /// Create table with the `javax` ⇄ `jakarta` feature renames
    #[must_use]
    pub fn builtin() -> Self {
        Self::from_pairs(JAKARTA_BASE_RENAMES.iter().copied())
    }

    /// Build from `(old, new)` pairs
    #[must_use]
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut renames = Self::new();
        for (old, new) in pairs {
            renames.insert(old, new);
        }
        renames
    }

    /// Record that `old` became `new`
    ///
    /// Identity pairs are ignored.
    pub fn insert(&mut self, old: &str, new: &str) {
        let old = old.trim().to_lowercase();
        let new = new.trim().to_lowercase();
        if old.is_empty() || new.is_empty() || old == new {
            return;
        }
        self.forward.insert(old.clone(), new.clone());
        self.backward.insert(new, old);
    }

    /// Translate a base name in either direction
    ///
    /// Forward renames are tried first.
    #[must_use]
    pub fn translate(&self, base: &str) -> Option<&str> {
        let base = base.to_lowercase();
        self.forward
            .get(&base)
            .or_else(|| self.backward.get(&base))
            .map(String::as_str)
    }

    /// Number of rename pairs
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Check if table is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn translates_both_directions() {
        let renames = BaseNameRenames::builtin();
        assert_eq!(renames.translate("jsp"), Some("pages"));
        assert_eq!(renames.translate("pages"), Some("jsp"));
        assert_eq!(renames.translate("EL"), Some("expressionlanguage"));
        assert_eq!(renames.translate("expressionLanguage"), Some("el"));
    }

    #[test]
    fn unknown_and_identity_names() {
        let renames = BaseNameRenames::builtin();
        assert_eq!(renames.translate("servlet"), None);
        assert_eq!(renames.translate("appclientsupport"), None);
    }

    #[test]
    fn insert_ignores_blank() {
        let mut renames = BaseNameRenames::new();
        renames.insert("", "x");
        renames.insert("a", " ");
        assert!(renames.is_empty());
        renames.insert("A", "B");
        assert_eq!(renames.len(), 1);
        assert_eq!(renames.translate("b"), Some("a"));
    }
}
