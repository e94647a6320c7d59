//! Groups line items by their product's category and orders the groups by the
//! numeric prefix encoded in the category string ("2: Fruits" sorts by 2).

use std::collections::HashMap;

use super::repo::OrderItem;

/// Bucket for items whose product no longer exists in the catalog.
pub const FALLBACK_CATEGORY: &str = "Other";

#[derive(Debug)]
pub struct CategorySection {
    /// Raw category string as stored on the product.
    pub category: String,
    /// Display name: text after the first ':', or the whole string.
    pub title: String,
    pub items: Vec<OrderItem>,
}

/// Builds the sorted sections used by both the PDF and the notification email.
/// Categories without a parseable numeric prefix keep their insertion order
/// after all numbered categories; the upstream data never mixes the two, so
/// their relative position is deliberately left loose.
pub fn section_items(
    items: &[OrderItem],
    categories: &HashMap<String, String>,
) -> Vec<CategorySection> {
    let mut grouped: Vec<(String, Vec<OrderItem>)> = Vec::new();
    for item in items {
        let category = categories
            .get(&item.product_id)
            .cloned()
            .unwrap_or_else(|| FALLBACK_CATEGORY.to_string());
        match grouped.iter_mut().find(|(c, _)| *c == category) {
            Some((_, bucket)) => bucket.push(item.clone()),
            None => grouped.push((category, vec![item.clone()])),
        }
    }

    grouped.sort_by_key(|(category, _)| match sort_prefix(category) {
        Some(n) => (false, n),
        None => (true, 0),
    });

    grouped
        .into_iter()
        .map(|(category, items)| CategorySection {
            title: display_name(&category).to_string(),
            category,
            items,
        })
        .collect()
}

fn sort_prefix(category: &str) -> Option<i64> {
    category.split(':').next()?.trim().parse().ok()
}

fn display_name(category: &str) -> &str {
    category
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(product_id: &str, name: &str) -> OrderItem {
        OrderItem {
            order_id: "cmd1".into(),
            product_id: product_id.into(),
            product_name: name.into(),
            product_image: None,
            unit: "kg".into(),
            quantity: 1.0,
        }
    }

    fn catalog(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(id, cat)| (id.to_string(), cat.to_string()))
            .collect()
    }

    #[test]
    fn categories_sort_numerically_not_lexicographically() {
        let categories = catalog(&[
            ("p1", "2: Fruits"),
            ("p2", "10: Dairy"),
            ("p3", "1: Vegetables"),
        ]);
        let items = [item("p2", "Milk"), item("p1", "Apple"), item("p3", "Leek")];
        let sections = section_items(&items, &categories);
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Vegetables", "Fruits", "Dairy"]);
    }

    #[test]
    fn deleted_product_falls_back_to_other() {
        let categories = catalog(&[("p1", "1: Vegetables")]);
        let items = [item("p1", "Leek"), item("gone", "Ghost product")];
        let sections = section_items(&items, &categories);
        assert_eq!(sections.len(), 2);
        let other = sections
            .iter()
            .find(|s| s.category == FALLBACK_CATEGORY)
            .unwrap();
        assert_eq!(other.items[0].product_name, "Ghost product");
    }

    #[test]
    fn unparseable_prefix_sorts_after_numbered_categories() {
        let categories = catalog(&[("p1", "Misc"), ("p2", "3: Herbs")]);
        let items = [item("p1", "Crate"), item("p2", "Basil")];
        let sections = section_items(&items, &categories);
        assert_eq!(sections[0].title, "Herbs");
        assert_eq!(sections[1].title, "Misc");
    }

    #[test]
    fn items_in_one_category_share_a_section() {
        let categories = catalog(&[("p1", "1: Vegetables"), ("p2", "1: Vegetables")]);
        let items = [item("p1", "Leek"), item("p2", "Carrot")];
        let sections = section_items(&items, &categories);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].items.len(), 2);
    }

    #[test]
    fn display_name_handles_missing_colon() {
        assert_eq!(display_name("2: Fruits"), "Fruits");
        assert_eq!(display_name("Other"), "Other");
        assert_eq!(display_name("5:"), "5:");
    }
}
