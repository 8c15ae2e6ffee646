//! Display labels and ordering for categories and subcategories.

use std::cmp::Ordering;

use moduledoc_shared::{Category, ModuleGroups};

/// Uppercase the first letter of every whitespace-separated word and leave
/// the rest of each word unchanged.
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if at_word_start && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        at_word_start = c.is_whitespace();
    }
    out
}

/// Display label for a category name.
pub fn category_label(category: &str) -> String {
    capitalize_words(category)
}

/// Display label for a subcategory key: underscores become spaces, then
/// each word is capitalized.
pub fn subcategory_label(subcategory: &str) -> String {
    capitalize_words(&subcategory.replace('_', " "))
}

/// Case-insensitive order on the display label, ties broken by the raw name.
pub fn compare_categories(a: &str, b: &str) -> Ordering {
    category_label(a)
        .to_lowercase()
        .cmp(&category_label(b).to_lowercase())
        .then_with(|| a.cmp(b))
}

/// Categories in display order.
pub fn sorted_categories(groups: &ModuleGroups) -> Vec<(&str, &Category)> {
    let mut categories: Vec<(&str, &Category)> = groups.iter().collect();
    categories.sort_by(|(a, _), (b, _)| compare_categories(a, b));
    categories
}
