//! Category Taxonomy
//!
//! Definition-side types for the classification forest: a variable-depth
//! (1-5 level) tree of categories, built once at process start and read-only
//! thereafter. The nested `CategoryNode` shape is what definitions are
//! written in; the [`store::TaxonomyStore`] flattens it into a pre-order
//! arena for lookups.

pub mod definition;
pub mod store;

use serde::{Deserialize, Serialize};

/// A node in the classification forest.
///
/// `id` is globally unique across the whole forest. `display_name` is only
/// unique among siblings; the same label ("Consolas", "Accesorios")
/// legitimately recurs under many parents. Children are ordered: insertion
/// order is the order siblings render in and the tie-break order for
/// ambiguous reverse lookups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryNode {
    pub id: String,
    pub display_name: String,
    /// Empty children marks a leaf, the only kind of node a product may be
    /// directly classified under.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    /// Create a leaf node.
    pub fn leaf(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            children: Vec::new(),
        }
    }

    /// Create an internal node with ordered children.
    pub fn branch(
        id: impl Into<String>,
        display_name: impl Into<String>,
        children: Vec<CategoryNode>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            children,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// An ordered sequence of root categories with their descendants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Forest {
    pub roots: Vec<CategoryNode>,
}

impl Forest {
    pub fn new(roots: Vec<CategoryNode>) -> Self {
        Self { roots }
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_has_no_children() {
        let node = CategoryNode::leaf("pc-juegos", "PC Juegos");
        assert!(node.is_leaf());
        assert_eq!(node.id, "pc-juegos");
        assert_eq!(node.display_name, "PC Juegos");
    }

    #[test]
    fn test_branch_preserves_child_order() {
        let node = CategoryNode::branch(
            "juegos",
            "Juegos",
            vec![
                CategoryNode::leaf("juegos-ps5", "PS5"),
                CategoryNode::leaf("juegos-xbox", "Xbox"),
            ],
        );
        assert!(!node.is_leaf());
        let ids: Vec<&str> = node.children.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["juegos-ps5", "juegos-xbox"]);
    }

    #[test]
    fn test_definition_json_shape() {
        let json = r#"[
            {"id": "juegos", "display_name": "Juegos", "children": [
                {"id": "juegos-retro", "display_name": "Retro"}
            ]},
            {"id": "pc-juegos", "display_name": "PC Juegos"}
        ]"#;
        let forest: Forest = serde_json::from_str(json).unwrap();
        assert_eq!(forest.roots.len(), 2);
        assert!(forest.roots[0].children[0].is_leaf());
        assert!(forest.roots[1].is_leaf());
    }
}
