//! Format resolver output as human-readable text.

use crate::resolver::{FlatValue, PathContext, SelectionChain};
use crate::taxonomy::store::{ForestStats, TaxonomyStore};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading with bold/underline. Respects NO_COLOR and TTY.
pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Breadcrumb, parent and siblings for one resolved category.
pub fn format_context_text(ctx: &PathContext) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Category")));
    let crumbs: Vec<&str> = ctx
        .breadcrumb
        .iter()
        .map(|s| s.display_name.as_str())
        .collect();
    out.push_str(&format!("  Path: {}\n", crumbs.join(" > ")));
    out.push_str(&format!("  Id: {}\n", ctx.node.id));
    out.push_str(&format!("  Leaf: {}\n", if ctx.is_leaf { "yes" } else { "no" }));
    match &ctx.parent {
        Some(parent) => out.push_str(&format!("  Parent: {} ({})\n", parent.display_name, parent.id)),
        None => out.push_str("  Parent: none (root category)\n"),
    }

    out.push_str(&format!("\n{}\n\n", format_section_heading("Siblings")));
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Id", "Name"]);
    for sibling in &ctx.siblings {
        table.add_row(vec![sibling.id.clone(), sibling.display_name.clone()]);
    }
    out.push_str(&format!("{}\n", table));
    out
}

/// A reconstructed per-level selection chain.
pub fn format_chain_text(store: &TaxonomyStore, chain: &SelectionChain) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Selection chain")));
    for (level, id) in chain.iter().enumerate() {
        let name = store
            .find_by_id(id)
            .map(|idx| store.node(idx).display_name.clone())
            .unwrap_or_default();
        out.push_str(&format!("  Level {}: {} ({})\n", level, name, id));
    }
    out
}

/// A derived flat value, or the mid-selection empty state.
pub fn format_flat_value_text(value: Option<&FlatValue>) -> String {
    match value {
        Some(FlatValue::Id(id)) => format!("Committed by id: {}\n", id),
        Some(FlatValue::Name(name)) => format!("Committed by name: {}\n", name),
        None => "No committable value (selection ends on an internal node).\n".to_string(),
    }
}

/// Forest statistics and the duplicate-display-name audit.
pub fn format_validate_text(stats: &ForestStats, duplicates: &[(String, usize)]) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Forest")));
    out.push_str(&format!("  Roots: {}\n", stats.root_count));
    out.push_str(&format!("  Nodes: {}\n", stats.node_count));
    out.push_str(&format!("  Leaves: {}\n", stats.leaf_count));
    out.push_str(&format!("  Max depth: {}\n", stats.max_depth));

    out.push_str(&format!(
        "\n{}\n\n",
        format_section_heading("Duplicate display names")
    ));
    if duplicates.is_empty() {
        out.push_str("None: every display name is forest-unique.\n");
        return out;
    }
    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Name", "Occurrences"]);
    for (name, count) in duplicates {
        table.add_row(vec![name.clone(), count.to_string()]);
    }
    out.push_str(&format!("{}\n", table));
    out.push_str("Bare-name lookups for these resolve to the first pre-order match.\n");
    out
}

/// Indented rendering of the whole forest, leaves marked with their
/// persistence form.
pub fn format_tree_text(store: &TaxonomyStore) -> String {
    let mut out = String::new();
    for idx in store.preorder() {
        let entry = store.node(idx);
        let indent = "  ".repeat(entry.depth);
        if entry.is_leaf() {
            let form = match crate::resolver::selection::persistence_form(store, idx) {
                FlatValue::Id(_) => "id",
                FlatValue::Name(_) => "name",
            };
            out.push_str(&format!(
                "{}{} ({}) [leaf, persists by {}]\n",
                indent, entry.display_name, entry.id, form
            ));
        } else {
            out.push_str(&format!(
                "{}{} ({})\n",
                indent,
                entry.display_name.bold(),
                entry.id
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve_context;
    use crate::taxonomy::definition::default_forest;

    fn store() -> TaxonomyStore {
        TaxonomyStore::from_forest(&default_forest()).unwrap()
    }

    #[test]
    fn test_context_text_includes_path_and_siblings() {
        let store = store();
        let ctx = resolve_context(&store, "gameboy-consolas").unwrap();
        let text = format_context_text(&ctx);
        assert!(text.contains("Juegos > Retro > Nintendo > Game Boy > Consolas"));
        assert!(text.contains("gameboy-juegos"));
    }

    #[test]
    fn test_tree_text_marks_leaves() {
        let store = store();
        let text = format_tree_text(&store);
        assert!(text.contains("[leaf, persists by name]"));
        assert!(text.contains("[leaf, persists by id]"));
    }

    #[test]
    fn test_validate_text_lists_duplicates() {
        let store = store();
        let text = format_validate_text(&store.stats(), &store.duplicate_display_names());
        assert!(text.contains("Consolas"));
        assert!(text.contains("Max depth: 5"));
    }
}
