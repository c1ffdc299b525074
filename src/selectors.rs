//! Selector quantity state

use thiserror::Error;

/// Default lower bound when `data-qty-min` is absent or unparsable.
pub const DEFAULT_MIN_QUANTITY: u32 = 1;

/// Default upper bound when `data-qty-max` is absent or unparsable.
pub const DEFAULT_MAX_QUANTITY: u32 = 999;

/// Default quantity when `data-qty-current` is absent or unparsable.
pub const DEFAULT_QUANTITY: u32 = 1;

/// Errors building quantity bounds.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoundsError {
    /// Minimum is above the maximum.
    #[error("minimum quantity {min} is greater than maximum quantity {max}")]
    Inverted {
        /// Lower bound
        min: u32,
        /// Upper bound
        max: u32,
    },
}

/// Inclusive quantity bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityBounds {
    min: u32,
    max: u32,
}

impl QuantityBounds {
    /// Create bounds.
    ///
    /// # Errors
    ///
    /// Returns a `BoundsError` if `min` is greater than `max`.
    pub fn new(min: u32, max: u32) -> Result<Self, BoundsError> {
        if min > max {
            return Err(BoundsError::Inverted { min, max });
        }

        Ok(Self { min, max })
    }

    /// Build bounds from raw attribute values, falling back to the defaults.
    ///
    /// An inverted pair collapses to `min..=min`.
    pub fn from_attributes(min: Option<&str>, max: Option<&str>) -> Self {
        let min = parse_quantity(min).unwrap_or(DEFAULT_MIN_QUANTITY);
        let max = parse_quantity(max).unwrap_or(DEFAULT_MAX_QUANTITY);

        Self::new(min, max).unwrap_or(Self { min, max: min })
    }

    /// Lower bound.
    pub fn min(&self) -> u32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Clamp a quantity into the bounds.
    pub fn clamp(&self, quantity: u32) -> u32 {
        quantity.clamp(self.min, self.max)
    }
}

impl Default for QuantityBounds {
    fn default() -> Self {
        Self {
            min: DEFAULT_MIN_QUANTITY,
            max: DEFAULT_MAX_QUANTITY,
        }
    }
}

/// Direction of a quantity change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One more.
    Increase,

    /// One fewer.
    Decrease,
}

/// Enabled/disabled state of both buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonStates {
    /// Decrease button is disabled (quantity at minimum).
    pub decrease_disabled: bool,

    /// Increase button is disabled (quantity at maximum).
    pub increase_disabled: bool,
}

/// Current quantity of a selector, always within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectorState {
    bounds: QuantityBounds,
    quantity: u32,
}

impl SelectorState {
    /// Create a state, clamping `quantity` into `bounds`.
    pub fn new(bounds: QuantityBounds, quantity: u32) -> Self {
        Self {
            bounds,
            quantity: bounds.clamp(quantity),
        }
    }

    /// Current quantity.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Quantity bounds.
    pub fn bounds(&self) -> QuantityBounds {
        self.bounds
    }

    /// Apply a step, returning the new quantity.
    ///
    /// Returns `None` and leaves the state untouched if the step would leave the bounds.
    pub fn step(&mut self, step: Step) -> Option<u32> {
        let next = match step {
            Step::Increase if self.quantity < self.bounds.max => self.quantity + 1,
            Step::Decrease if self.quantity > self.bounds.min => self.quantity - 1,
            Step::Increase | Step::Decrease => return None,
        };

        self.quantity = next;

        Some(next)
    }

    /// Button states for the current quantity.
    pub fn buttons(&self) -> ButtonStates {
        ButtonStates {
            decrease_disabled: self.quantity <= self.bounds.min,
            increase_disabled: self.quantity >= self.bounds.max,
        }
    }
}

/// Parse a quantity attribute.
///
/// Leading whitespace is skipped and the longest run of leading digits is used,
/// so `"12px"` parses as 12. Anything without leading digits is `None`.
pub fn parse_quantity(raw: Option<&str>) -> Option<u32> {
    let trimmed = raw?.trim_start();
    let digits = trimmed
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(trimmed.len(), |(index, _)| index);

    trimmed.get(..digits)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quantity_handles_prefixes_and_junk() {
        assert_eq!(parse_quantity(Some("5")), Some(5));
        assert_eq!(parse_quantity(Some("  12px")), Some(12));
        assert_eq!(parse_quantity(Some("abc")), None);
        assert_eq!(parse_quantity(Some("")), None);
        assert_eq!(parse_quantity(Some("-3")), None);
        assert_eq!(parse_quantity(None), None);
    }

    #[test]
    fn bounds_default_when_attributes_missing() {
        let bounds = QuantityBounds::from_attributes(None, Some("nope"));

        assert_eq!(bounds, QuantityBounds::default());
        assert_eq!(bounds.min(), 1);
        assert_eq!(bounds.max(), 999);
    }

    #[test]
    fn inverted_bounds_collapse_to_minimum() {
        let bounds = QuantityBounds::from_attributes(Some("5"), Some("2"));

        assert_eq!((bounds.min(), bounds.max()), (5, 5));
        assert_eq!(
            QuantityBounds::new(5, 2),
            Err(BoundsError::Inverted { min: 5, max: 2 })
        );
    }

    #[test]
    fn state_clamps_initial_quantity() {
        let bounds = QuantityBounds::new(2, 4).unwrap_or_default();

        assert_eq!(SelectorState::new(bounds, 9).quantity(), 4);
        assert_eq!(SelectorState::new(bounds, 0).quantity(), 2);
    }

    #[test]
    fn steps_beyond_bounds_are_rejected() {
        let bounds = QuantityBounds::new(1, 2).unwrap_or_default();
        let mut state = SelectorState::new(bounds, 1);

        assert_eq!(state.step(Step::Decrease), None);
        assert_eq!(state.step(Step::Increase), Some(2));
        assert_eq!(state.step(Step::Increase), None);
        assert_eq!(state.quantity(), 2);
    }

    #[test]
    fn button_states_follow_bounds() {
        let bounds = QuantityBounds::new(1, 3).unwrap_or_default();

        let at_min = SelectorState::new(bounds, 1).buttons();
        assert!(at_min.decrease_disabled);
        assert!(!at_min.increase_disabled);

        let middle = SelectorState::new(bounds, 2).buttons();
        assert!(!middle.decrease_disabled);
        assert!(!middle.increase_disabled);

        let at_max = SelectorState::new(bounds, 3).buttons();
        assert!(!at_max.decrease_disabled);
        assert!(at_max.increase_disabled);
    }

    #[test]
    fn single_value_bounds_disable_both_buttons() {
        let state = SelectorState::new(QuantityBounds::from_attributes(Some("3"), Some("3")), 3);

        assert_eq!(
            state.buttons(),
            ButtonStates {
                decrease_disabled: true,
                increase_disabled: true,
            }
        );
    }
}
