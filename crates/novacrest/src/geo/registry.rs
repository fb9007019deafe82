//! Service branch registry.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::distance::Coordinate;

/// A physical pharmacy branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub location: Coordinate,
}

impl Branch {
    pub fn new(id: i64, name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            id,
            name: name.into(),
            location: Coordinate::new(latitude, longitude),
        }
    }
}

/// Ordered, immutable collection of branches.
///
/// Order is significant: the locator breaks distance ties in favour of the
/// earlier entry. Clones share the same backing slice.
#[derive(Debug, Clone, PartialEq)]
pub struct BranchRegistry {
    branches: Arc<[Branch]>,
}

impl BranchRegistry {
    pub fn new(branches: Vec<Branch>) -> Self {
        Self {
            branches: branches.into(),
        }
    }

    /// The Lagos branches served in production.
    pub fn lagos() -> Self {
        Self::new(vec![
            Branch::new(1, "Ikeja Pharmacy", 6.6020, 3.3515),
            Branch::new(2, "Victoria Island Pharmacy", 6.4281, 3.4216),
            Branch::new(3, "Lekki Pharmacy", 6.4654, 3.4765),
            Branch::new(4, "Surulere Pharmacy", 6.5097, 3.3619),
        ])
    }

    pub fn branches(&self) -> &[Branch] {
        &self.branches
    }

    pub fn get(&self, id: i64) -> Option<&Branch> {
        self.branches.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.branches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.branches.is_empty()
    }
}

impl Default for BranchRegistry {
    fn default() -> Self {
        Self::lagos()
    }
}

impl From<Vec<Branch>> for BranchRegistry {
    fn from(branches: Vec<Branch>) -> Self {
        Self::new(branches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lagos_registry_contents() {
        let registry = BranchRegistry::lagos();
        let ids: Vec<i64> = registry.branches().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);

        let surulere = registry.get(4).unwrap();
        assert_eq!(surulere.name, "Surulere Pharmacy");
        assert_eq!(surulere.location, Coordinate::new(6.5097, 3.3619));
    }

    #[test]
    fn test_clones_share_storage() {
        let a = BranchRegistry::lagos();
        let b = a.clone();
        assert!(std::ptr::eq(a.branches().as_ptr(), b.branches().as_ptr()));
    }

    #[test]
    fn test_branch_json_shape() {
        let json = serde_json::to_value(Branch::new(2, "Victoria Island Pharmacy", 6.4281, 3.4216))
            .unwrap();
        assert_eq!(json["id"], 2);
        assert_eq!(json["name"], "Victoria Island Pharmacy");
        assert_eq!(json["location"]["latitude"], 6.4281);
        assert_eq!(json["location"]["longitude"], 3.4216);
    }
}
