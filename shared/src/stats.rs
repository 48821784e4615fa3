//! Display-only aggregates for the dashboard header.

use crate::{LOW_STOCK_THRESHOLD, Sweet};

/// Recomputed from the last successfully fetched list; never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryStats {
    pub total_sweets: usize,
    /// Sum of price x quantity over the whole list.
    pub total_value: f64,
    /// Items at or below [`LOW_STOCK_THRESHOLD`].
    pub low_stock: usize,
}

impl InventoryStats {
    pub fn from_sweets(sweets: &[Sweet]) -> Self {
        Self {
            total_sweets: sweets.len(),
            total_value: sweets
                .iter()
                .map(|s| s.price * f64::from(s.quantity))
                .sum(),
            low_stock: sweets
                .iter()
                .filter(|s| s.quantity <= LOW_STOCK_THRESHOLD)
                .count(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweet(id: u64, price: f64, quantity: u32) -> Sweet {
        Sweet {
            id,
            name: format!("sweet-{id}"),
            category: "test".into(),
            price,
            quantity,
        }
    }

    #[test]
    fn empty_list_yields_zeroes() {
        let stats = InventoryStats::from_sweets(&[]);
        assert_eq!(stats, InventoryStats::default());
    }

    #[test]
    fn totals_are_price_times_quantity() {
        let stats = InventoryStats::from_sweets(&[sweet(1, 2.5, 4), sweet(2, 1.0, 10)]);
        assert_eq!(stats.total_sweets, 2);
        assert_eq!(stats.total_value, 20.0);
    }

    #[test]
    fn low_stock_threshold_is_inclusive() {
        let stats = InventoryStats::from_sweets(&[
            sweet(1, 1.0, LOW_STOCK_THRESHOLD),
            sweet(2, 1.0, LOW_STOCK_THRESHOLD + 1),
            sweet(3, 1.0, 0),
        ]);
        assert_eq!(stats.low_stock, 2);
    }
}
