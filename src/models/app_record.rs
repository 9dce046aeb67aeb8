use serde::{Deserialize, Serialize};
use std::hash::{Hash, Hasher};

/// One launchable application known to the registry.
///
/// Two records are equal when their `(package, component)` pair matches;
/// label and blocked state never take part in identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppRecord {
    /// Human-readable name, used only for presentation.
    pub label: String,
    /// Stable unique identifier of the application.
    pub package: String,
    /// Launchable entry point within the application.
    pub component: String,
    /// Whether this application is currently disallowed.
    pub blocked: bool,
}

impl AppRecord {
    pub fn new(
        label: impl Into<String>,
        package: impl Into<String>,
        component: impl Into<String>,
        blocked: bool,
    ) -> Self {
        Self {
            label: label.into(),
            package: package.into(),
            component: component.into(),
            blocked,
        }
    }

    /// Composite identity of this record.
    pub fn identity(&self) -> (&str, &str) {
        (&self.package, &self.component)
    }

    /// Key used for display ordering. Enforcement never consults it.
    pub fn sort_key(&self) -> String {
        self.label.to_lowercase()
    }
}

impl PartialEq for AppRecord {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for AppRecord {}

impl Hash for AppRecord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.package.hash(state);
        self.component.hash(state);
    }
}
