//! Page driver abstraction — the browser capability the runner executes
//! against. Implementations can target a real browser process; the mock
//! serves declarative fixtures so scenarios run without one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use featurespec_core::error::{HarnessError, HarnessResult};

/// Browser capability behind the runner. One instance drives one page.
pub trait PageDriver {
    fn goto(&mut self, url: &str) -> HarnessResult<()>;
    fn title(&self) -> HarnessResult<String>;
    fn text_visible(&self, text: &str) -> HarnessResult<bool>;
    fn link_visible(&self, text: &str) -> HarnessResult<bool>;
    fn click_text(&mut self, text: &str) -> HarnessResult<()>;
    fn current_url(&self) -> HarnessResult<String>;
    fn wait_for_load(&mut self) -> HarnessResult<()>;
    /// Capture a screenshot artifact; returns its path.
    fn screenshot(&mut self, name: &str) -> HarnessResult<String>;
}

/// Declarative state of one mock page, keyed by URL in [`MockPageDriver`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageFixture {
    pub title: String,
    pub texts: Vec<String>,
    pub links: Vec<String>,
    /// Clickable text mapped to the URL it navigates to.
    pub click_targets: HashMap<String, String>,
}

/// Mock driver backed by [`PageFixture`]s. Navigation always succeeds;
/// lookups against a URL with no fixture see a blank page.
#[derive(Debug, Default)]
pub struct MockPageDriver {
    pages: HashMap<String, PageFixture>,
    current: Option<String>,
}

impl MockPageDriver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the fixture served at `url`.
    pub fn with_page(mut self, url: impl Into<String>, fixture: PageFixture) -> Self {
        self.pages.insert(url.into(), fixture);
        self
    }

    fn fixture(&self) -> Option<&PageFixture> {
        self.current.as_ref().and_then(|url| self.pages.get(url))
    }
}

impl PageDriver for MockPageDriver {
    fn goto(&mut self, url: &str) -> HarnessResult<()> {
        self.current = Some(url.to_string());
        Ok(())
    }

    fn title(&self) -> HarnessResult<String> {
        Ok(self
            .fixture()
            .map(|f| f.title.clone())
            .unwrap_or_default())
    }

    fn text_visible(&self, text: &str) -> HarnessResult<bool> {
        Ok(self
            .fixture()
            .is_some_and(|f| f.texts.iter().any(|t| t.contains(text)) || f.title.contains(text)))
    }

    fn link_visible(&self, text: &str) -> HarnessResult<bool> {
        Ok(self
            .fixture()
            .is_some_and(|f| f.links.iter().any(|l| l.contains(text))))
    }

    fn click_text(&mut self, text: &str) -> HarnessResult<()> {
        let target = self
            .fixture()
            .and_then(|f| f.click_targets.get(text).cloned())
            .ok_or_else(|| HarnessError::Driver(format!("no clickable element '{text}'")))?;
        self.current = Some(target);
        Ok(())
    }

    fn current_url(&self) -> HarnessResult<String> {
        self.current
            .clone()
            .ok_or_else(|| HarnessError::Driver("no page open".into()))
    }

    fn wait_for_load(&mut self) -> HarnessResult<()> {
        Ok(())
    }

    fn screenshot(&mut self, name: &str) -> HarnessResult<String> {
        Ok(format!("reports/screenshots/{name}.png"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn example_driver() -> MockPageDriver {
        MockPageDriver::new().with_page(
            "https://example.com",
            PageFixture {
                title: "Example Domain".into(),
                texts: vec!["This domain is for use in illustrative examples.".into()],
                links: vec!["More information...".into()],
                click_targets: HashMap::from([(
                    "More information...".into(),
                    "https://www.iana.org/domains/example".into(),
                )]),
            },
        )
    }

    #[test]
    fn test_goto_and_title() {
        let mut driver = example_driver();
        driver.goto("https://example.com").unwrap();
        assert_eq!(driver.title().unwrap(), "Example Domain");
        assert_eq!(driver.current_url().unwrap(), "https://example.com");
    }

    #[test]
    fn test_unknown_url_is_blank_page() {
        let mut driver = example_driver();
        driver.goto("https://unknown.test").unwrap();
        assert_eq!(driver.title().unwrap(), "");
        assert!(!driver.text_visible("anything").unwrap());
    }

    #[test]
    fn test_text_and_link_visibility() {
        let mut driver = example_driver();
        driver.goto("https://example.com").unwrap();
        assert!(driver.text_visible("illustrative examples").unwrap());
        assert!(driver.link_visible("More information").unwrap());
        assert!(!driver.link_visible("Missing link").unwrap());
    }

    #[test]
    fn test_click_navigates() {
        let mut driver = example_driver();
        driver.goto("https://example.com").unwrap();
        driver.click_text("More information...").unwrap();
        assert!(driver.current_url().unwrap().contains("iana.org"));
    }

    #[test]
    fn test_click_missing_element_fails() {
        let mut driver = example_driver();
        driver.goto("https://example.com").unwrap();
        assert!(driver.click_text("Nope").is_err());
    }

    #[test]
    fn test_no_page_open() {
        let driver = MockPageDriver::new();
        assert!(driver.current_url().is_err());
    }
}
