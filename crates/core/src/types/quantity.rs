//! Quantity coercion rules shared by cart mutation paths.
//!
//! Quantities in a cart line are always positive. Callers pass whatever the
//! UI handed them (absent, zero, negative); these helpers apply one policy
//! in one place instead of each mutation re-deciding it.

/// Coerce a requested add-quantity to a valid line quantity.
///
/// Absent or non-positive requests coerce to 1, the smallest quantity a
/// line can hold.
#[must_use]
pub fn coerce_quantity(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => 1,
        Some(n) => n,
    }
}

/// Interpret an absolute quantity update.
///
/// Returns `None` when the update means "remove the line" (any value below
/// 1), otherwise the new quantity. Values beyond `u32::MAX` saturate.
#[must_use]
pub fn interpret_update(requested: i64) -> Option<u32> {
    if requested < 1 {
        None
    } else {
        Some(u32::try_from(requested).unwrap_or(u32::MAX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coerce_absent_to_one() {
        assert_eq!(coerce_quantity(None), 1);
    }

    #[test]
    fn test_coerce_zero_to_one() {
        assert_eq!(coerce_quantity(Some(0)), 1);
    }

    #[test]
    fn test_coerce_passes_positive_through() {
        assert_eq!(coerce_quantity(Some(7)), 7);
    }

    #[test]
    fn test_update_below_one_removes() {
        assert_eq!(interpret_update(0), None);
        assert_eq!(interpret_update(-3), None);
    }

    #[test]
    fn test_update_positive() {
        assert_eq!(interpret_update(4), Some(4));
    }

    #[test]
    fn test_update_saturates() {
        assert_eq!(interpret_update(i64::MAX), Some(u32::MAX));
    }
}
