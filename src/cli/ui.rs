use pantry::{Category, Item, SortMode};
use std::fmt::Write;

const NAME_WIDTH: usize = 24;
const CATEGORY_WIDTH: usize = 18;

/// Render a projection as a fixed-width table.
pub fn render_items(items: &[&Item]) -> String {
    if items.is_empty() {
        return "No items in the pantry.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<NAME_WIDTH$} {:>8}  {:<CATEGORY_WIDTH$} {}",
        "Item", "Quantity", "Category", "Added"
    );
    for item in items {
        let category = item.category.as_ref().map(Category::as_str).unwrap_or("-");
        let _ = writeln!(
            out,
            "{:<NAME_WIDTH$} {:>8}  {:<CATEGORY_WIDTH$} {}",
            item.display_name(),
            item.quantity,
            category,
            item.added_at.format("%Y-%m-%d %H:%M")
        );
    }
    out
}

pub fn render_categories() -> String {
    let mut out = String::from("Categories:\n");
    for category in Category::LISTED {
        let _ = writeln!(out, "  {category}");
    }
    out.push_str("\nSort modes:\n");
    for mode in SortMode::ALL {
        let _ = writeln!(out, "  {:<14} {}", mode.as_str(), mode.label());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use pantry::Document;

    #[test]
    fn test_render_items_capitalizes_names() {
        let added_at = Utc.with_ymd_and_hms(2024, 8, 1, 9, 5, 0).unwrap();
        let item = Item::from_document(
            "oat milk".to_string(),
            Document::new(2, Category::DairyAndEggs, added_at),
        );

        let table = render_items(&[&item]);

        assert!(table.starts_with("Item"));
        assert!(table.contains("Oat milk"));
        assert!(table.contains("Dairy and Eggs"));
        assert!(table.contains("2024-08-01 09:05"));
    }

    #[test]
    fn test_render_empty_pantry() {
        assert_eq!(render_items(&[]), "No items in the pantry.\n");
    }

    #[test]
    fn test_render_categories_lists_sort_modes() {
        let text = render_categories();
        assert!(text.contains("Fish and Seafood"));
        assert!(text.contains("last-added"));
    }
}
