//! Integration tests for selector stepping within bounds

use swapper::selectors::{QuantityBounds, SelectorState, Step};

fn bounds_grid() -> Vec<(u32, u32)> {
    vec![(1, 1), (1, 2), (1, 10), (0, 5), (3, 17), (1, 999)]
}

#[test]
fn increasing_from_min_reaches_max_in_exact_steps() {
    for (min, max) in bounds_grid() {
        let bounds =
            QuantityBounds::from_attributes(Some(&min.to_string()), Some(&max.to_string()));
        let mut state = SelectorState::new(bounds, min);
        let mut steps = 0;

        while state.step(Step::Increase).is_some() {
            steps += 1;
            assert!(state.quantity() <= max, "exceeded max {max}");
        }

        assert_eq!(steps, max - min, "steps for {min}..={max}");
        assert_eq!(state.quantity(), max);
        assert!(state.buttons().increase_disabled);
    }
}

#[test]
fn decreasing_from_max_reaches_min_in_exact_steps() {
    for (min, max) in bounds_grid() {
        let bounds =
            QuantityBounds::from_attributes(Some(&min.to_string()), Some(&max.to_string()));
        let mut state = SelectorState::new(bounds, max);
        let mut steps = 0;

        while state.step(Step::Decrease).is_some() {
            steps += 1;
            assert!(state.quantity() >= min, "went below min {min}");
        }

        assert_eq!(steps, max - min, "steps for {min}..={max}");
        assert_eq!(state.quantity(), min);
        assert!(state.buttons().decrease_disabled);
    }
}

#[test]
fn rejected_step_leaves_state_unchanged() {
    let mut state = SelectorState::new(QuantityBounds::default(), 999);
    let before = state;

    assert_eq!(state.step(Step::Increase), None);
    assert_eq!(state, before);
}
