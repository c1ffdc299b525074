//! Wired selector controls.

use swapper::{
    packages::PackageId,
    page::{CURRENT_ATTR, MAX_ATTR, MIN_ATTR, Marker, NEXT_PACKAGE_ATTR, Page},
    quantities::SelectorId,
    selectors::{DEFAULT_QUANTITY, QuantityBounds, SelectorState, parse_quantity},
};

/// Controls and in-memory state of one selector.
///
/// Attributes are read once when wiring; afterwards the page is only written.
#[derive(Debug)]
pub(crate) struct SelectorBinding<E> {
    pub(crate) card: E,
    increase: E,
    decrease: E,
    display: E,
    pub(crate) state: SelectorState,
    pub(crate) next_package: Option<PackageId>,

    /// The page quantity was outside the bounds and has not been rendered since.
    pub(crate) clamped: bool,
}

impl<E: Clone> SelectorBinding<E> {
    /// Locate a selector's controls. `None` if any required element is missing.
    pub(crate) fn wire<P>(page: &P, selector: &SelectorId) -> Option<Self>
    where
        P: Page<Element = E>,
    {
        let card = page.card(selector)?;
        let increase = page.find(&card, Marker::Increase)?;
        let decrease = page.find(&card, Marker::Decrease)?;
        let display = page.find(&card, Marker::Display)?;

        let bounds = QuantityBounds::from_attributes(
            page.attribute(&card, MIN_ATTR).as_deref(),
            page.attribute(&card, MAX_ATTR).as_deref(),
        );
        let quantity = parse_quantity(page.attribute(&card, CURRENT_ATTR).as_deref())
            .unwrap_or(DEFAULT_QUANTITY);
        let state = SelectorState::new(bounds, quantity);
        let next_package = page
            .attribute(&card, NEXT_PACKAGE_ATTR)
            .and_then(|raw| raw.trim().parse().ok())
            .map(PackageId);

        Some(Self {
            card,
            increase,
            decrease,
            display,
            clamped: state.quantity() != quantity,
            state,
            next_package,
        })
    }

    /// Write the quantity to the display and the card.
    pub(crate) fn render_quantity<P>(&mut self, page: &mut P)
    where
        P: Page<Element = E>,
    {
        let quantity = self.state.quantity().to_string();

        page.set_text(&self.display, &quantity);
        page.set_attribute(&self.card, CURRENT_ATTR, &quantity);
        self.clamped = false;
    }

    /// Disable the buttons that would leave the bounds.
    pub(crate) fn render_buttons<P>(&self, page: &mut P)
    where
        P: Page<Element = E>,
    {
        let buttons = self.state.buttons();

        page.set_disabled(&self.decrease, buttons.decrease_disabled);
        page.set_disabled(&self.increase, buttons.increase_disabled);
    }

    /// Record the package the selector now swaps to.
    pub(crate) fn render_next_package<P>(&mut self, page: &mut P, package_id: PackageId)
    where
        P: Page<Element = E>,
    {
        self.next_package = Some(package_id);
        page.set_attribute(&self.card, NEXT_PACKAGE_ATTR, &package_id.to_string());
    }

    /// Drop the next package when the current quantity has none.
    pub(crate) fn clear_next_package<P>(&mut self, page: &mut P)
    where
        P: Page<Element = E>,
    {
        self.next_package = None;
        page.remove_attribute(&self.card, NEXT_PACKAGE_ATTR);
    }
}

#[cfg(test)]
mod tests {
    use swapper::page::{DISABLED_CLASS, MemoryPage, SelectorMarkup};
    use testresult::TestResult;

    use super::*;

    #[test]
    fn wiring_reads_bounds_and_quantity() -> TestResult {
        let page =
            MemoryPage::from_markup([SelectorMarkup::new("s").min("2").max("6").current("4")]);

        let binding = SelectorBinding::wire(&page, &"s".into()).ok_or("not wired")?;

        assert_eq!(binding.state.bounds().min(), 2);
        assert_eq!(binding.state.bounds().max(), 6);
        assert_eq!(binding.state.quantity(), 4);
        assert_eq!(binding.next_package, None);
        assert!(!binding.clamped);

        Ok(())
    }

    #[test]
    fn wiring_flags_out_of_bounds_quantity() -> TestResult {
        let mut page =
            MemoryPage::from_markup([SelectorMarkup::new("s").max("10").current("50")]);

        let mut binding = SelectorBinding::wire(&page, &"s".into()).ok_or("not wired")?;
        assert_eq!(binding.state.quantity(), 10);
        assert!(binding.clamped);

        binding.render_quantity(&mut page);

        let snapshot = page.snapshot(&"s".into()).ok_or("missing snapshot")?;
        assert_eq!(snapshot.current.as_deref(), Some("10"));
        assert_eq!(snapshot.display.as_deref(), Some("10"));
        assert!(!binding.clamped);

        Ok(())
    }

    #[test]
    fn wiring_defaults_unparsable_attributes() -> TestResult {
        let page = MemoryPage::from_markup([SelectorMarkup::new("s").min("x").current("")]);

        let binding = SelectorBinding::wire(&page, &"s".into()).ok_or("not wired")?;

        assert_eq!(binding.state.bounds(), QuantityBounds::default());
        assert_eq!(binding.state.quantity(), 1);

        Ok(())
    }

    #[test]
    fn wiring_requires_every_control() {
        for marker in [Marker::Card, Marker::Increase, Marker::Decrease, Marker::Display] {
            let page = MemoryPage::from_markup([SelectorMarkup::new("s").without(marker)]);

            assert!(
                SelectorBinding::wire(&page, &"s".into()).is_none(),
                "wired without {marker:?}"
            );
        }
    }

    #[test]
    fn render_buttons_sets_property_and_class() -> TestResult {
        let mut page = MemoryPage::from_markup([SelectorMarkup::new("s").max("1")]);
        let binding = SelectorBinding::wire(&page, &"s".into()).ok_or("not wired")?;

        binding.render_buttons(&mut page);

        let snapshot = page.snapshot(&"s".into()).ok_or("missing snapshot")?;
        assert_eq!(snapshot.increase_disabled, Some(true));
        assert_eq!(snapshot.decrease_disabled, Some(true));
        assert!(page.has_class(binding.increase, DISABLED_CLASS));

        Ok(())
    }
}
