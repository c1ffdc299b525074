//! Page Fixtures

use rustc_hash::FxHashSet;
use serde::Deserialize;

use crate::{
    fixtures::FixtureError,
    page::{MemoryPage, SelectorMarkup},
};

/// Wrapper for pages in YAML
#[derive(Debug, Deserialize)]
pub struct PageFixture {
    /// Selector regions in document order
    pub selectors: Vec<SelectorMarkup>,
}

/// Parse a page from YAML.
///
/// # Errors
///
/// Returns an error if the YAML is invalid or a selector id appears twice.
pub fn parse(contents: &str) -> Result<MemoryPage, FixtureError> {
    let fixture: PageFixture = serde_norway::from_str(contents)?;
    let mut seen = FxHashSet::default();

    for markup in &fixture.selectors {
        if !seen.insert(markup.id.as_str()) {
            return Err(FixtureError::DuplicateSelector(markup.id.clone()));
        }
    }

    Ok(MemoryPage::from_markup(fixture.selectors))
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::page::{Marker, Page};

    use super::*;

    #[test]
    fn optional_elements_default_to_present() -> TestResult {
        let page = parse(
            "selectors:
  - id: full
    min: \"1\"
    max: \"4\"
  - id: partial
    increase: false
",
        )?;

        let full = page.card(&"full".into()).ok_or("missing card")?;
        assert!(page.find(&full, Marker::Increase).is_some());

        let partial = page.card(&"partial".into()).ok_or("missing card")?;
        assert!(page.find(&partial, Marker::Increase).is_none());
        assert!(page.find(&partial, Marker::Display).is_some());

        Ok(())
    }

    #[test]
    fn duplicate_selectors_are_rejected() {
        let result = parse("selectors:\n  - id: a\n  - id: a\n");

        assert!(
            matches!(result, Err(FixtureError::DuplicateSelector(ref id)) if id == "a"),
            "expected DuplicateSelector, got {result:?}"
        );
    }
}
