//! Reusable positioning helpers for the layout engines.

/// Centers of `count` equal-width slots spanning `span` units from `start`.
///
/// The slot width is `span / max(count, 1)`, so an empty input never divides
/// by zero.
///
/// # Examples
///
/// ```
/// use notegraph::layout::positioning::distribute_slots;
///
/// assert_eq!(distribute_slots(60.0, 480.0, 2), vec![180.0, 420.0]);
/// assert!(distribute_slots(60.0, 480.0, 0).is_empty());
/// ```
pub fn distribute_slots(start: f32, span: f32, count: usize) -> Vec<f32> {
    let slot_width = span / count.max(1) as f32;
    (0..count)
        .map(|index| start + slot_width * index as f32 + slot_width / 2.0)
        .collect()
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_single_slot_is_centered() {
        assert_eq!(distribute_slots(60.0, 480.0, 1), vec![300.0]);
    }

    #[test]
    fn test_slots_are_evenly_spaced() {
        let xs = distribute_slots(0.0, 100.0, 4);
        assert_eq!(xs.len(), 4);
        assert_approx_eq!(f32, xs[0], 12.5);
        for pair in xs.windows(2) {
            assert_approx_eq!(f32, pair[1] - pair[0], 25.0);
        }
    }

    #[test]
    fn test_zero_count() {
        assert!(distribute_slots(0.0, 100.0, 0).is_empty());
    }
}
