//! In-memory page

use std::collections::{BTreeMap, BTreeSet};

use serde::Deserialize;

use crate::{
    page::{
        CARD_ATTR, CURRENT_ATTR, DECREASE_ATTR, DISABLED_CLASS, DISPLAY_ATTR, INCREASE_ATTR,
        MAX_ATTR, MIN_ATTR, Marker, NEXT_PACKAGE_ATTR, Page, SELECTOR_ATTR,
    },
    quantities::SelectorId,
};

/// Handle to an element of a [`MemoryPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

#[derive(Debug, Default)]
struct MemoryElement {
    parent: Option<ElementId>,
    attributes: BTreeMap<String, String>,
    classes: BTreeSet<String>,
    text: String,
    disabled: bool,
}

/// Markup of one selector region, used to build pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
#[expect(
    clippy::struct_excessive_bools,
    reason = "each flag controls whether one element is present."
)]
pub struct SelectorMarkup {
    /// Selector id (`data-qty-selector` value).
    pub id: String,

    /// Raw `data-qty-min` value.
    #[serde(default)]
    pub min: Option<String>,

    /// Raw `data-qty-max` value.
    #[serde(default)]
    pub max: Option<String>,

    /// Raw `data-qty-current` value.
    #[serde(default)]
    pub current: Option<String>,

    /// Include the card container.
    #[serde(default = "present")]
    pub card: bool,

    /// Include the increase button.
    #[serde(default = "present")]
    pub increase: bool,

    /// Include the decrease button.
    #[serde(default = "present")]
    pub decrease: bool,

    /// Include the display element.
    #[serde(default = "present")]
    pub display: bool,
}

fn present() -> bool {
    true
}

impl SelectorMarkup {
    /// Complete markup with no bound or quantity attributes.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            min: None,
            max: None,
            current: None,
            card: true,
            increase: true,
            decrease: true,
            display: true,
        }
    }

    /// Set `data-qty-min`.
    #[must_use]
    pub fn min(mut self, min: impl Into<String>) -> Self {
        self.min = Some(min.into());
        self
    }

    /// Set `data-qty-max`.
    #[must_use]
    pub fn max(mut self, max: impl Into<String>) -> Self {
        self.max = Some(max.into());
        self
    }

    /// Set `data-qty-current`.
    #[must_use]
    pub fn current(mut self, current: impl Into<String>) -> Self {
        self.current = Some(current.into());
        self
    }

    /// Leave out one of the elements inside the region.
    #[must_use]
    pub fn without(mut self, marker: Marker) -> Self {
        match marker {
            Marker::Card => self.card = false,
            Marker::Increase => self.increase = false,
            Marker::Decrease => self.decrease = false,
            Marker::Display => self.display = false,
        }
        self
    }
}

/// Rendered state of one selector, as read back from a [`MemoryPage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorSnapshot {
    /// Display text, if there is a display element.
    pub display: Option<String>,

    /// `data-qty-current` on the card.
    pub current: Option<String>,

    /// `data-next-package-id` on the card.
    pub next_package: Option<String>,

    /// Increase button disabled property.
    pub increase_disabled: Option<bool>,

    /// Decrease button disabled property.
    pub decrease_disabled: Option<bool>,
}

/// A page held entirely in memory.
///
/// Elements are kept in document order, so lookups return the first match the
/// way a DOM query would.
#[derive(Debug, Default)]
pub struct MemoryPage {
    elements: Vec<MemoryElement>,
}

impl MemoryPage {
    /// Create an empty page.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a page from selector markups.
    pub fn from_markup(markups: impl IntoIterator<Item = SelectorMarkup>) -> Self {
        markups
            .into_iter()
            .fold(Self::new(), |page, markup| page.with_selector(markup))
    }

    /// Append a selector region.
    #[must_use]
    pub fn with_selector(mut self, markup: SelectorMarkup) -> Self {
        self.add_selector(markup);
        self
    }

    /// Append a selector region.
    pub fn add_selector(&mut self, markup: SelectorMarkup) {
        let region = self.append(None, &[(SELECTOR_ATTR, markup.id.as_str())]);

        if !markup.card {
            return;
        }

        let mut card_attributes = vec![(CARD_ATTR, "")];
        for (name, value) in [
            (MIN_ATTR, &markup.min),
            (MAX_ATTR, &markup.max),
            (CURRENT_ATTR, &markup.current),
        ] {
            if let Some(value) = value {
                card_attributes.push((name, value.as_str()));
            }
        }

        let card = self.append(Some(region), &card_attributes);

        for (included, name) in [
            (markup.decrease, DECREASE_ATTR),
            (markup.display, DISPLAY_ATTR),
            (markup.increase, INCREASE_ATTR),
        ] {
            if included {
                self.append(Some(card), &[(name, "")]);
            }
        }
    }

    /// Append an element with the given attributes.
    pub fn append(&mut self, parent: Option<ElementId>, attributes: &[(&str, &str)]) -> ElementId {
        let id = ElementId(self.elements.len());

        self.elements.push(MemoryElement {
            parent,
            attributes: attributes
                .iter()
                .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                .collect(),
            ..MemoryElement::default()
        });

        id
    }

    /// Text content of an element.
    pub fn text(&self, element: ElementId) -> Option<&str> {
        self.elements.get(element.0).map(|e| e.text.as_str())
    }

    /// Disabled property of an element.
    pub fn is_disabled(&self, element: ElementId) -> Option<bool> {
        self.elements.get(element.0).map(|e| e.disabled)
    }

    /// Check whether an element carries a class.
    pub fn has_class(&self, element: ElementId, class: &str) -> bool {
        self.elements
            .get(element.0)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Read back the rendered state of a selector.
    pub fn snapshot(&self, selector: &SelectorId) -> Option<SelectorSnapshot> {
        let card = self.card(selector)?;
        let control = |marker| self.find(&card, marker);

        Some(SelectorSnapshot {
            display: control(Marker::Display)
                .and_then(|display| self.text(display))
                .map(str::to_string),
            current: self.attribute(&card, CURRENT_ATTR),
            next_package: self.attribute(&card, NEXT_PACKAGE_ATTR),
            increase_disabled: control(Marker::Increase).and_then(|b| self.is_disabled(b)),
            decrease_disabled: control(Marker::Decrease).and_then(|b| self.is_disabled(b)),
        })
    }

    fn is_descendant(&self, element: ElementId, ancestor: ElementId) -> bool {
        let mut current = self.elements.get(element.0).and_then(|e| e.parent);

        while let Some(parent) = current {
            if parent == ancestor {
                return true;
            }
            current = self.elements.get(parent.0).and_then(|e| e.parent);
        }

        false
    }

    fn element_mut(&mut self, element: ElementId) -> Option<&mut MemoryElement> {
        self.elements.get_mut(element.0)
    }
}

impl Page for MemoryPage {
    type Element = ElementId;

    fn region(&self, selector: &SelectorId) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| {
                e.attributes
                    .get(SELECTOR_ATTR)
                    .is_some_and(|id| id == selector.as_str())
            })
            .map(ElementId)
    }

    fn find(&self, within: &ElementId, marker: Marker) -> Option<ElementId> {
        let name = marker.attribute();

        self.elements
            .iter()
            .enumerate()
            .find(|(index, e)| {
                e.attributes.contains_key(name) && self.is_descendant(ElementId(*index), *within)
            })
            .map(|(index, _)| ElementId(index))
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.elements.get(element.0)?.attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, element: &ElementId, name: &str, value: &str) {
        if let Some(e) = self.element_mut(*element) {
            e.attributes.insert(name.to_string(), value.to_string());
        }
    }

    fn remove_attribute(&mut self, element: &ElementId, name: &str) {
        if let Some(e) = self.element_mut(*element) {
            e.attributes.remove(name);
        }
    }

    fn set_text(&mut self, element: &ElementId, text: &str) {
        if let Some(e) = self.element_mut(*element) {
            e.text = text.to_string();
        }
    }

    fn set_disabled(&mut self, element: &ElementId, disabled: bool) {
        if let Some(e) = self.element_mut(*element) {
            e.disabled = disabled;

            if disabled {
                e.classes.insert(DISABLED_CLASS.to_string());
            } else {
                e.classes.remove(DISABLED_CLASS);
            }
        }
    }
}
