// View abstractions
//
// The widget toolkit is an external collaborator. Views render themselves to
// text and a ViewHost owns the tabs that display that text.

use indexmap::IndexMap;

/// Anything that can be drawn by a [`ViewHost`].
pub trait Render {
    fn render(&self) -> String;
}

/// Tab container the controller adds, removes and refreshes views in.
///
/// Implemented by the console front end ([`TextTabs`]) and by mocks in tests.
#[cfg_attr(test, mockall::automock)]
pub trait ViewHost {
    /// Append a tab titled `title` showing `content`.
    fn add_tab(&mut self, title: &str, content: String);

    /// Tear down the tab titled `title`. Returns `false` if there was none.
    fn remove_tab(&mut self, title: &str) -> bool;

    /// Redraw an existing tab in place.
    fn refresh_tab(&mut self, title: &str, content: String);
}

/// In-memory tab container used by the console binary.
#[derive(Debug, Default, Clone)]
pub struct TextTabs {
    tabs: IndexMap<String, String>,
}

impl TextTabs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered content of a tab.
    pub fn content(&self, title: &str) -> Option<&str> {
        self.tabs.get(title).map(String::as_str)
    }

    /// Tab titles in display order.
    pub fn titles(&self) -> Vec<&str> {
        self.tabs.keys().map(String::as_str).collect()
    }

    /// All tabs, each preceded by a `== title ==` header.
    pub fn render_all(&self) -> String {
        self.tabs
            .iter()
            .map(|(title, content)| format!("== {title} ==\n{content}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl ViewHost for TextTabs {
    fn add_tab(&mut self, title: &str, content: String) {
        // Re-adding moves the tab to the end, like remove + add on a tab widget.
        self.tabs.shift_remove(title);
        self.tabs.insert(title.to_string(), content);
    }

    fn remove_tab(&mut self, title: &str) -> bool {
        self.tabs.shift_remove(title).is_some()
    }

    fn refresh_tab(&mut self, title: &str, content: String) {
        if let Some(existing) = self.tabs.get_mut(title) {
            *existing = content;
        } else {
            tracing::debug!("Refresh requested for missing tab '{}'", title);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_tabs_order_and_removal() {
        let mut tabs = TextTabs::new();
        tabs.add_tab("Configuration", "form".to_string());
        tabs.add_tab("Buttons", "grid".to_string());
        assert_eq!(tabs.titles(), vec!["Configuration", "Buttons"]);

        assert!(tabs.remove_tab("Buttons"));
        assert!(!tabs.remove_tab("Buttons"));
        assert_eq!(tabs.titles(), vec!["Configuration"]);
    }

    #[test]
    fn test_refresh_only_touches_existing_tab() {
        let mut tabs = TextTabs::new();
        tabs.add_tab("Buttons", "old".to_string());
        tabs.refresh_tab("Buttons", "new".to_string());
        tabs.refresh_tab("Missing", "ignored".to_string());

        assert_eq!(tabs.content("Buttons"), Some("new"));
        assert_eq!(tabs.content("Missing"), None);
        assert_eq!(tabs.render_all(), "== Buttons ==\nnew");
    }
}
