use std::collections::{BTreeSet, HashMap};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Business capability area used as a permission-map key.
///
/// The set is closed on purpose: the original dashboard re-typed these keys on
/// every page and drifted (misspelled keys silently denied access). An enum
/// makes that bug class unrepresentable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    Products,
    Orders,
    Sales,
    Stocks,
    Adjustments,
    Suppliers,
    Customers,
    Permissions,
}

impl Feature {
    pub const ALL: [Feature; 8] = [
        Feature::Products,
        Feature::Orders,
        Feature::Sales,
        Feature::Stocks,
        Feature::Adjustments,
        Feature::Suppliers,
        Feature::Customers,
        Feature::Permissions,
    ];

    /// Wire key as it appears in the backend's permission map.
    pub fn as_key(&self) -> &'static str {
        match self {
            Feature::Products => "products",
            Feature::Orders => "orders",
            Feature::Sales => "sales",
            Feature::Stocks => "stocks",
            Feature::Adjustments => "adjustments",
            Feature::Suppliers => "suppliers",
            Feature::Customers => "customers",
            Feature::Permissions => "permissions",
        }
    }

    pub fn from_key(key: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.as_key() == key)
    }
}

impl core::fmt::Display for Feature {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Unit of permission granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Create,
    Read,
    Update,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::Create, Action::Read, Action::Update, Action::Delete];

    pub fn as_key(&self) -> &'static str {
        match self {
            Action::Create => "create",
            Action::Read => "read",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }

    pub fn from_key(key: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|a| a.as_key() == key)
    }
}

impl core::fmt::Display for Action {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Feature → granted actions.
///
/// Absence of a feature key, or of an action within its set, means
/// "not granted". The map says nothing about role: admin short-circuiting
/// happens in the evaluator, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionMap {
    grants: HashMap<Feature, BTreeSet<Action>>,
}

impl PermissionMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.values().all(|actions| actions.is_empty())
    }

    pub fn allows(&self, feature: Feature, action: Action) -> bool {
        self.grants
            .get(&feature)
            .is_some_and(|actions| actions.contains(&action))
    }

    pub fn grant(&mut self, feature: Feature, action: Action) {
        self.grants.entry(feature).or_default().insert(action);
    }

    pub fn revoke(&mut self, feature: Feature, action: Action) {
        if let Some(actions) = self.grants.get_mut(&feature) {
            actions.remove(&action);
        }
    }

    /// Builder-style `grant`, convenient for literals.
    pub fn granting(mut self, feature: Feature, action: Action) -> Self {
        self.grant(feature, action);
        self
    }
}

// The wire shape is `{"products": ["read", "create"], ...}`. Serialization is
// deterministic (feature declaration order, actions sorted); deserialization
// is lenient and drops keys/actions outside the closed sets, since older
// backend rows carry misspelled feature keys.

impl Serialize for PermissionMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        for feature in Feature::ALL {
            if let Some(actions) = self.grants.get(&feature) {
                if !actions.is_empty() {
                    let keys: Vec<&str> = actions.iter().map(Action::as_key).collect();
                    map.serialize_entry(feature.as_key(), &keys)?;
                }
            }
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PermissionMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct MapVisitor;

        impl<'de> Visitor<'de> for MapVisitor {
            type Value = PermissionMap;

            fn expecting(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str("a map of feature keys to action lists")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut permissions = PermissionMap::new();
                while let Some((key, actions)) = access.next_entry::<String, Vec<String>>()? {
                    let Some(feature) = Feature::from_key(&key) else {
                        continue;
                    };
                    for action in actions {
                        if let Some(action) = Action::from_key(&action) {
                            permissions.grant(feature, action);
                        }
                    }
                }
                Ok(permissions)
            }
        }

        deserializer.deserialize_map(MapVisitor)
    }
}
