//! Category Tree
//!
//! An arena of category records keyed by id with a parent-to-children index.
//! Every walk keeps a visited set, so a corrupted hierarchy containing a cycle
//! terminates instead of looping.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::domain::categories::records::{CategoryNode, CategoryRecord, CategoryUuid};

/// Separator used when rendering a category's ancestry.
pub const PATH_SEPARATOR: &str = " > ";

#[derive(Debug, Clone, Default)]
pub struct CategoryTree {
    records: FxHashMap<CategoryUuid, CategoryRecord>,
    children: FxHashMap<CategoryUuid, Vec<CategoryUuid>>,
    roots: Vec<CategoryUuid>,
    ordered: Vec<CategoryUuid>,
}

impl CategoryTree {
    /// Index a set of categories. Siblings keep name order.
    pub fn new(records: impl IntoIterator<Item = CategoryRecord>) -> Self {
        let mut records: Vec<CategoryRecord> = records.into_iter().collect();

        records.sort_by(|a, b| a.name.cmp(&b.name).then(a.uuid.cmp(&b.uuid)));

        let mut tree = Self::default();

        for record in records {
            match record.parent_uuid {
                Some(parent) => tree.children.entry(parent).or_default().push(record.uuid),
                None => tree.roots.push(record.uuid),
            }

            tree.ordered.push(record.uuid);
            tree.records.insert(record.uuid, record);
        }

        tree
    }

    pub fn get(&self, category: CategoryUuid) -> Option<&CategoryRecord> {
        self.records.get(&category)
    }

    pub fn contains(&self, category: CategoryUuid) -> bool {
        self.records.contains_key(&category)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Top-level categories in name order.
    pub fn root_ids(&self) -> &[CategoryUuid] {
        &self.roots
    }

    /// Every category in name order.
    pub fn all_ids(&self) -> &[CategoryUuid] {
        &self.ordered
    }

    /// Direct children in name order.
    pub fn child_ids(&self, category: CategoryUuid) -> &[CategoryUuid] {
        self.children
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The category itself followed by all transitive descendants, depth first.
    ///
    /// Unknown categories yield an empty closure.
    pub fn closure(&self, category: CategoryUuid) -> Vec<CategoryUuid> {
        if !self.contains(category) {
            return Vec::new();
        }

        let mut visited = FxHashSet::default();
        let mut stack = vec![category];
        let mut closure = Vec::new();

        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }

            closure.push(current);
            stack.extend(self.child_ids(current).iter().rev());
        }

        closure
    }

    /// All transitive descendants, excluding the category itself.
    pub fn descendants(&self, category: CategoryUuid) -> Vec<CategoryUuid> {
        self.closure(category)
            .into_iter()
            .filter(|uuid| *uuid != category)
            .collect()
    }

    /// Ancestors ordered from the root down to the direct parent.
    pub fn ancestors(&self, category: CategoryUuid) -> Vec<&CategoryRecord> {
        let mut visited = FxHashSet::default();
        let mut ancestors = Vec::new();

        visited.insert(category);

        let mut current = self.get(category).and_then(|record| record.parent_uuid);

        while let Some(parent) = current {
            if !visited.insert(parent) {
                break;
            }

            let Some(record) = self.get(parent) else {
                break;
            };

            ancestors.push(record);
            current = record.parent_uuid;
        }

        ancestors.reverse();
        ancestors
    }

    /// Names from the root down to the category, e.g. `Electronics > Laptops`.
    pub fn full_path(&self, category: CategoryUuid) -> Option<String> {
        let record = self.get(category)?;

        let mut names: Vec<&str> = self
            .ancestors(category)
            .into_iter()
            .map(|ancestor| ancestor.name.as_str())
            .collect();

        names.push(&record.name);

        Some(names.join(PATH_SEPARATOR))
    }

    /// Whether placing `category` under `new_parent` would make it its own ancestor.
    pub fn would_create_cycle(
        &self,
        category: CategoryUuid,
        new_parent: Option<CategoryUuid>,
    ) -> bool {
        new_parent.is_some_and(|parent| {
            parent == category || self.closure(category).contains(&parent)
        })
    }

    /// The category with its path and full subtree attached.
    pub fn node(&self, category: CategoryUuid) -> Option<CategoryNode> {
        let mut visited = FxHashSet::default();

        self.build_node(category, &mut visited)
    }

    fn build_node(
        &self,
        category: CategoryUuid,
        visited: &mut FxHashSet<CategoryUuid>,
    ) -> Option<CategoryNode> {
        if !visited.insert(category) {
            return None;
        }

        let record = self.get(category)?.clone();

        let children = self
            .child_ids(category)
            .iter()
            .filter_map(|child| self.build_node(*child, visited))
            .collect();

        let parent_name = record
            .parent_uuid
            .and_then(|parent| self.get(parent))
            .map(|parent| parent.name.clone());

        Some(CategoryNode {
            full_path: self.full_path(category).unwrap_or_default(),
            parent_name,
            record,
            children,
        })
    }
}
