//! Menu list state
//!
//! [`MenuListController`] owns the item list and the two input values. All
//! mutation goes through `add_item`, `set_draft` and `set_filter`; the list
//! shown to the user is derived by `visible_items` on every query.

pub mod filter;

pub use filter::{FilterPattern, InvalidFilterPolicy};

#[derive(Debug, Clone, Default)]
pub struct MenuListController {
    items: Vec<String>,
    draft_item: String,
    filter_text: String,

    // Compiled from `filter_text` whenever it is replaced
    filter: FilterPattern,
    policy: InvalidFilterPolicy,
}

impl MenuListController {
    /// Create a controller seeded with a copy of `initial_menu_items`
    #[allow(dead_code)]
    pub fn new<S: AsRef<str>>(initial_menu_items: &[S]) -> Self {
        Self::with_policy(initial_menu_items, InvalidFilterPolicy::default())
    }

    pub fn with_policy<S: AsRef<str>>(initial_menu_items: &[S], policy: InvalidFilterPolicy) -> Self {
        let items: Vec<String> = initial_menu_items
            .iter()
            .map(|s| s.as_ref().to_string())
            .collect();
        tracing::debug!("Menu created with {} items", items.len());

        Self {
            items,
            draft_item: String::new(),
            filter_text: String::new(),
            filter: FilterPattern::from_text("", policy),
            policy,
        }
    }

    /// Append the current draft to the end of the list and clear it.
    ///
    /// A draft that is empty or all whitespace is ignored and left as is.
    /// The stored item is the draft exactly as typed, not trimmed.
    pub fn add_item(&mut self) {
        if self.draft_item.trim().is_empty() {
            return;
        }
        let item = std::mem::take(&mut self.draft_item);
        tracing::debug!("Adding menu item {:?}", item);
        self.items.push(item);
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft_item = text.into();
    }

    pub fn set_filter(&mut self, text: impl Into<String>) {
        let text = text.into();
        if text != self.filter_text {
            self.filter = FilterPattern::from_text(&text, self.policy);
        }
        self.filter_text = text;
    }

    /// Items whose text matches the filter, in list order
    pub fn visible_items(&self) -> Vec<&str> {
        self.items
            .iter()
            .map(String::as_str)
            .filter(|item| self.filter.is_match(item))
            .collect()
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn draft_item(&self) -> &str {
        &self.draft_item
    }

    pub fn filter_text(&self) -> &str {
        &self.filter_text
    }

    /// False while the filter text is not a valid pattern
    pub fn filter_is_valid(&self) -> bool {
        self.filter.is_valid()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
