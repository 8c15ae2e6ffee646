//! Core domain types: parsed module descriptors, their category grouping,
//! and the rendered page set.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::path::Path;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{ModuleDocError, Result};

/// Subcategory key for modules that belong to no subcategory.
pub const UNCATEGORIZED: &str = "";

// ---------------------------------------------------------------------------
// ModuleDescriptor
// ---------------------------------------------------------------------------

/// One documented module or command, as produced by the upstream parser.
///
/// Unknown keys are rejected so a misspelled field cannot silently drop a
/// section from the rendered page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    /// Module/command name, used for the heading and the usage anchor.
    pub name: String,
    /// Source path relative to the source-tree root.
    pub scope: String,
    /// Free-form documentation (may itself be Markdown).
    #[serde(default)]
    pub documentation: String,
    /// Command-line usage text, rendered verbatim in a code block.
    #[serde(default, alias = "usage_string", alias = "usageString")]
    pub usage: String,
}

impl ModuleDescriptor {
    pub fn new(name: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scope: scope.into(),
            documentation: String::new(),
            usage: String::new(),
        }
    }

    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    pub fn with_usage(mut self, usage: impl Into<String>) -> Self {
        self.usage = usage.into();
        self
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// The subcategories of one category, in the order the parser supplied them.
///
/// Deserialized from a JSON object; keys keep document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Category {
    subcategories: Vec<(String, Vec<ModuleDescriptor>)>,
}

impl Category {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append modules to a subcategory, creating it at the end if new.
    pub fn push(&mut self, subcategory: impl Into<String>, modules: Vec<ModuleDescriptor>) {
        let subcategory = subcategory.into();
        match self.subcategories.iter_mut().find(|(name, _)| *name == subcategory) {
            Some((_, existing)) => existing.extend(modules),
            None => self.subcategories.push((subcategory, modules)),
        }
    }

    /// Number of subcategory keys, including the uncategorized one.
    pub fn len(&self) -> usize {
        self.subcategories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subcategories.is_empty()
    }

    /// Iterate `(subcategory, modules)` in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ModuleDescriptor])> {
        self.subcategories
            .iter()
            .map(|(name, modules)| (name.as_str(), modules.as_slice()))
    }

    /// Look up a subcategory by its exact (case-sensitive) key.
    pub fn get(&self, subcategory: &str) -> Option<&[ModuleDescriptor]> {
        self.subcategories
            .iter()
            .find(|(name, _)| name == subcategory)
            .map(|(_, modules)| modules.as_slice())
    }

    /// Modules filed under the uncategorized (`""`) key.
    ///
    /// `category` is only used to name the category in the error.
    pub fn uncategorized(&self, category: &str) -> Result<&[ModuleDescriptor]> {
        self.get(UNCATEGORIZED)
            .ok_or_else(|| ModuleDocError::missing_subcategory(category))
    }
}

impl<'de> Deserialize<'de> for Category {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CategoryVisitor;

        impl<'de> Visitor<'de> for CategoryVisitor {
            type Value = Category;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of subcategory name to a list of modules")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut category = Category::new();
                while let Some((name, modules)) =
                    map.next_entry::<String, Vec<ModuleDescriptor>>()?
                {
                    category.push(name, modules);
                }
                Ok(category)
            }
        }

        deserializer.deserialize_map(CategoryVisitor)
    }
}

// ---------------------------------------------------------------------------
// ModuleGroups
// ---------------------------------------------------------------------------

/// Category name to [`Category`]. Display order is decided by the page
/// builder, not by this map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct ModuleGroups {
    categories: BTreeMap<String, Category>,
}

impl ModuleGroups {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get a category for editing, creating it with an empty uncategorized
    /// bucket if it does not exist yet.
    pub fn category_mut(&mut self, name: impl Into<String>) -> &mut Category {
        self.categories.entry(name.into()).or_insert_with(|| {
            let mut category = Category::new();
            category.push(UNCATEGORIZED, Vec::new());
            category
        })
    }

    /// Insert a fully built category, replacing any existing one.
    pub fn insert(&mut self, name: impl Into<String>, category: Category) {
        self.categories.insert(name.into(), category);
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.get(name)
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Category)> {
        self.categories.iter().map(|(name, c)| (name.as_str(), c))
    }

    /// Total number of module descriptors across every subcategory.
    pub fn module_count(&self) -> usize {
        self.categories
            .values()
            .flat_map(|c| c.iter())
            .map(|(_, modules)| modules.len())
            .sum()
    }

    /// Parse a module groups JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| ModuleDocError::input(e.to_string()))
    }

    /// Read and parse a module groups JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ModuleDocError::io(path, e))?;
        let groups = serde_json::from_str(&content).map_err(|e| {
            ModuleDocError::input(format!("failed to parse {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "loaded module groups");
        Ok(groups)
    }
}

// ---------------------------------------------------------------------------
// RenderedPages
// ---------------------------------------------------------------------------

/// Page identifier to full Markdown text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedPages {
    pages: BTreeMap<String, String>,
}

impl RenderedPages {
    /// Identifier of the index page.
    pub const MAIN: &'static str = "main";

    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page. Fails if the id is already taken, e.g. a category named
    /// `main`, or category `a_b` next to category `a` with subcategory `b`.
    pub fn insert(&mut self, id: impl Into<String>, text: String) -> Result<()> {
        match self.pages.entry(id.into()) {
            Entry::Occupied(entry) => Err(ModuleDocError::duplicate_page(entry.key().as_str())),
            Entry::Vacant(entry) => {
                entry.insert(text);
                Ok(())
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&str> {
        self.pages.get(id).map(String::as_str)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.pages.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Iterate `(page id, text)` sorted by page id.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pages.iter().map(|(id, text)| (id.as_str(), text.as_str()))
    }

    /// File name a page is persisted under: `modules_<id>.md`.
    pub fn file_name(id: &str) -> String {
        format!("modules_{id}.md")
    }
}
