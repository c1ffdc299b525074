//! Page contract
//!
//! The synchronizer never touches markup directly. It goes through a [`Page`],
//! which locates elements by their data attributes and writes the rendered
//! state back onto them.

use std::fmt;

use crate::quantities::SelectorId;

pub mod memory;

pub use memory::{MemoryPage, SelectorMarkup, SelectorSnapshot};

/// Identifies a selector region; the value is the quantity map key.
pub const SELECTOR_ATTR: &str = "data-qty-selector";

/// Marks the control container inside a selector region.
pub const CARD_ATTR: &str = "data-qty-card";

/// Marks the increase button.
pub const INCREASE_ATTR: &str = "data-qty-increase";

/// Marks the decrease button.
pub const DECREASE_ATTR: &str = "data-qty-decrease";

/// Marks the element whose text shows the quantity.
pub const DISPLAY_ATTR: &str = "data-qty-display";

/// Lower quantity bound, read at wiring time.
pub const MIN_ATTR: &str = "data-qty-min";

/// Upper quantity bound, read at wiring time.
pub const MAX_ATTR: &str = "data-qty-max";

/// Current quantity, read at wiring time and written on every change.
pub const CURRENT_ATTR: &str = "data-qty-current";

/// Package id the selector currently swaps to.
pub const NEXT_PACKAGE_ATTR: &str = "data-next-package-id";

/// Presentation class toggled alongside a button's disabled property.
pub const DISABLED_CLASS: &str = "next-disabled";

/// Elements the synchronizer looks for inside a selector region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Marker {
    /// `data-qty-card`
    Card,

    /// `data-qty-increase`
    Increase,

    /// `data-qty-decrease`
    Decrease,

    /// `data-qty-display`
    Display,
}

impl Marker {
    /// Attribute that marks this element.
    pub fn attribute(self) -> &'static str {
        match self {
            Self::Card => CARD_ATTR,
            Self::Increase => INCREASE_ATTR,
            Self::Decrease => DECREASE_ATTR,
            Self::Display => DISPLAY_ATTR,
        }
    }
}

/// Read/write surface of the host page.
pub trait Page {
    /// Handle to an element of the page.
    type Element: Clone + fmt::Debug;

    /// The region marked `data-qty-selector="<selector>"`, if present.
    fn region(&self, selector: &SelectorId) -> Option<Self::Element>;

    /// First descendant of `within` carrying the marker attribute.
    fn find(&self, within: &Self::Element, marker: Marker) -> Option<Self::Element>;

    /// Read an attribute.
    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    /// Write an attribute.
    fn set_attribute(&mut self, element: &Self::Element, name: &str, value: &str);

    /// Remove an attribute.
    fn remove_attribute(&mut self, element: &Self::Element, name: &str);

    /// Replace the text content.
    fn set_text(&mut self, element: &Self::Element, text: &str);

    /// Set the disabled property and toggle [`DISABLED_CLASS`] to match.
    fn set_disabled(&mut self, element: &Self::Element, disabled: bool);

    /// The card of a selector region.
    fn card(&self, selector: &SelectorId) -> Option<Self::Element> {
        let region = self.region(selector)?;

        self.find(&region, Marker::Card)
    }
}
