//! Property-based tests for the inventory store.

use super::Inventory;
use crate::booking::BookingId;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Add { key: u8, tables: u32 },
    Release { key: u8 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..16, 1u32..=12).prop_map(|(key, tables)| Op::Add { key, tables }),
        (0u8..16).prop_map(|key| Op::Release { key }),
    ]
}

fn key(k: u8) -> BookingId {
    BookingId::try_from(format!("BOOKING-{k}")).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 2000,
        .. ProptestConfig::default()
    })]

    // available + reserved == total after every operation, successful or not
    #[test]
    fn conservation_holds_for_any_sequence(
        total in 1u32..=60,
        ops in prop::collection::vec(op_strategy(), 0..64),
    ) {
        let inventory = Inventory::new();
        inventory.initialize(total, 0).unwrap();

        for op in ops {
            let before = inventory.available_count();
            match op {
                Op::Add { key: k, tables } => {
                    match inventory.add_booking(key(k), tables, tables * 4, "0") {
                        Ok(remaining) => {
                            prop_assert_eq!(remaining, before - tables);
                            prop_assert_eq!(inventory.available_count(), remaining);
                        }
                        Err(_) => prop_assert_eq!(inventory.available_count(), before),
                    }
                }
                Op::Release { key: k } => {
                    match inventory.release_booking(&key(k)) {
                        Ok(released) => {
                            prop_assert_eq!(
                                released.remaining_tables,
                                before + released.freed_tables
                            );
                            prop_assert_eq!(inventory.available_count(), released.remaining_tables);
                        }
                        Err(_) => prop_assert_eq!(inventory.available_count(), before),
                    }
                }
            }
            prop_assert!(inventory.is_consistent());
            prop_assert!(inventory.available_count() <= inventory.total_count());
            prop_assert_eq!(inventory.total_count(), total);
        }
    }

    // add then release of the same id restores the free count
    #[test]
    fn add_release_round_trip(total in 1u32..=100, tables in 1u32..=100) {
        let inventory = Inventory::new();
        inventory.initialize(total, 0).unwrap();
        let before = inventory.available_count();

        if inventory.add_booking(key(0), tables, tables, "0").is_ok() {
            prop_assert_eq!(inventory.release_booking(&key(0)).unwrap().freed_tables, tables);
        }
        prop_assert_eq!(inventory.available_count(), before);
    }

    // the cap never changes after initialization
    #[test]
    fn cap_is_fixed_after_initialize(total in 1u32..=100, cap in 0u32..=400, retry in 0u32..=400) {
        let inventory = Inventory::new();
        inventory.initialize(total, cap).unwrap();
        prop_assert!(inventory.initialize(total, retry).is_err());
        prop_assert_eq!(inventory.cap_value(), cap);
        prop_assert_eq!(inventory.cap_enabled(), cap > 0);
    }
}
