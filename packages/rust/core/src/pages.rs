//! Reference page builder.
//!
//! Renders the index page, one page per category and one page per named
//! subcategory of categories that have more than one subcategory key:
//!
//! ```text
//! main                      -> modules_main.md
//! <category>                -> modules_<category>.md
//! <category>_<subcategory>  -> modules_<category>_<subcategory>.md
//! ```

use tracing::{debug, info, instrument};

use moduledoc_markdown::{Block, Page, escape_html};
use moduledoc_shared::{
    Category, ModuleDescriptor, ModuleGroups, RenderedPages, Result, SiteConfig, UNCATEGORIZED,
};

use crate::labels::{category_label, sorted_categories, subcategory_label};

/// Builds [`RenderedPages`] from [`ModuleGroups`]. Pure: no I/O, and the same
/// input always renders byte-identical output.
#[derive(Debug, Clone)]
pub struct PageBuilder<'a> {
    site: &'a SiteConfig,
    escape: bool,
}

impl<'a> PageBuilder<'a> {
    pub fn new(site: &'a SiteConfig) -> Self {
        Self {
            site,
            escape: false,
        }
    }

    /// HTML-escape documentation and usage text. Off unless asked for.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape = escape;
        self
    }

    /// Render every page.
    ///
    /// Fails with [`moduledoc_shared::ModuleDocError::MissingSubcategory`] if
    /// a category lacks the uncategorized (`""`) key, and with
    /// [`moduledoc_shared::ModuleDocError::DuplicatePage`] if two pages map to
    /// the same id.
    #[instrument(skip_all, fields(categories = groups.len(), escape = self.escape))]
    pub fn build(&self, groups: &ModuleGroups) -> Result<RenderedPages> {
        let categories = sorted_categories(groups);
        let mut pages = RenderedPages::new();

        pages.insert(RenderedPages::MAIN, self.index_page(&categories).render())?;

        for (name, category) in categories {
            self.render_category(name, category, &mut pages)?;
        }

        info!(pages = pages.len(), "reference pages rendered");
        Ok(pages)
    }

    fn index_page(&self, categories: &[(&str, &Category)]) -> Page {
        let mut page = Page::new();
        page.push(Block::Raw(self.introduction()));
        page.extend(categories.iter().map(|(name, _)| {
            Block::bullet_link(category_label(name), RenderedPages::file_name(name))
        }));
        page
    }

    /// Category page, plus a page per named subcategory when there is more
    /// than one subcategory key.
    fn render_category(
        &self,
        name: &str,
        category: &Category,
        pages: &mut RenderedPages,
    ) -> Result<()> {
        let uncategorized = category.uncategorized(name)?;
        let label = category_label(name);

        let mut page = Page::new();
        page.push(Block::heading(1, format!("Modules Reference: {label}")));

        if category.len() > 1 {
            page.push(Block::Line("Subcategories:".into()));
            for (subcategory, modules) in category.iter() {
                if subcategory == UNCATEGORIZED {
                    continue;
                }
                let sub_label = subcategory_label(subcategory);
                let page_id = format!("{name}_{subcategory}");
                page.push(Block::bullet_link(
                    sub_label.as_str(),
                    RenderedPages::file_name(&page_id),
                ));

                let mut sub_page = Page::new();
                sub_page.push(Block::heading(
                    1,
                    format!("Modules Reference: {sub_label} ({label})"),
                ));
                self.push_modules(&mut sub_page, modules);

                debug!(page = %page_id, modules = modules.len(), "rendered subcategory page");
                pages.insert(page_id, sub_page.render())?;
            }
        }

        page.push(Block::Blank);
        self.push_modules(&mut page, uncategorized);

        debug!(page = %name, modules = uncategorized.len(), "rendered category page");
        pages.insert(name, page.render())
    }

    /// Module list shared by category and subcategory pages.
    fn push_modules(&self, page: &mut Page, modules: &[ModuleDescriptor]) {
        for module in modules {
            page.push(Block::heading(2, module.name.as_str()));
            page.push(Block::source_link(
                module.scope.as_str(),
                self.site.source_url(&module.scope),
            ));
            if !module.documentation.is_empty() {
                page.push(Block::Line(self.text(&module.documentation)));
            }
            if !module.usage.is_empty() {
                page.push(Block::usage(
                    format!("{}_usage", module.name),
                    self.text(&module.usage),
                ));
            }
        }
    }

    fn text(&self, s: &str) -> String {
        if self.escape {
            escape_html(s)
        } else {
            s.to_string()
        }
    }

    fn introduction(&self) -> String {
        let SiteConfig {
            project,
            repository_name,
            repository_url,
            console_name,
            ..
        } = self.site;

        format!(
            r#"
# Modules & Commands Reference

The following pages document the {project} modules, drivers and commands.
They describe the provided functionality, high-level implementation overview and how
to use the command-line interface.

::: info
**This is auto-generated from the source code** and contains the most recent modules documentation.
:::

It is not a complete list and {console_name} provides some additional commands
as well (such as `free`). Use `help` on the console to get a list of all
available commands, and in most cases `command help` will print the usage.

Since this is generated from source, errors must be reported/fixed
in the [{repository_name}]({repository_url}) repository.
The documentation pages can be generated by running the following command from
the root of the {repository_name} directory:

```
make module_documentation
```
The generated files will be written to the `modules` directory.

## Categories
"#
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
