// 🗂️ Card Registry - authoritative in-memory store of cards
//
// One card per normalized holder name. Cards are kept in an append-only
// list with a key → index map beside it, so listing keeps insertion order
// while lookups stay O(1).

use crate::card::{normalize_name, Card};
use crate::error::RegistryError;
use crate::luhn;
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Default)]
struct Store {
    /// Cards in insertion order (append-only, never removed)
    cards: Vec<Card>,

    /// Normalized holder name → position in `cards`
    index: HashMap<String, usize>,
}

/// Registry of all cards
///
/// Create one per process and share it (e.g. behind an `Arc`). The
/// uniqueness check and the insert happen under a single write lock, so
/// concurrent `add_card` calls for the same holder cannot both succeed.
#[derive(Debug, Default)]
pub struct CardRegistry {
    store: RwLock<Store>,
}

impl CardRegistry {
    /// Create new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card for `name`.
    ///
    /// The Luhn result is recorded on the card; a failed checksum is not an
    /// error here. Fails with [`RegistryError::DuplicateName`] when a card
    /// already exists for the same trimmed, case-insensitive name, in which
    /// case the registry is left untouched.
    pub fn add_card(
        &self,
        name: &str,
        card_number: &str,
        limit: Decimal,
    ) -> Result<Card, RegistryError> {
        let key = normalize_name(name);
        let mut store = self.write();

        if store.index.contains_key(&key) {
            tracing::warn!(holder = %name.trim(), "rejected duplicate card holder");
            return Err(RegistryError::DuplicateName {
                name: name.trim().to_string(),
            });
        }

        let is_valid = luhn::check(card_number);
        let card = Card::new(name.to_string(), card_number.to_string(), limit, is_valid);

        let position = store.cards.len();
        store.cards.push(card.clone());
        store.index.insert(key, position);

        tracing::info!(
            holder = %card.holder_name(),
            number = %card.masked_number(),
            valid = is_valid,
            "card added"
        );

        Ok(card)
    }

    /// All cards in the order they were added.
    ///
    /// The returned list is a copy; later inserts do not show up in it.
    pub fn list_cards(&self) -> Vec<Card> {
        self.read().cards.clone()
    }

    /// Find a card by holder name (trimmed, case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<Card> {
        let store = self.read();
        store
            .index
            .get(&normalize_name(name))
            .map(|&position| store.cards[position].clone())
    }

    /// Count total cards
    pub fn len(&self) -> usize {
        self.read().cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // A panic while holding the lock cannot leave the store half-written:
    // the push and the index insert cannot fail, so a poisoned lock is safe
    // to keep using.
    fn read(&self) -> RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_add_valid_card() {
        let registry = CardRegistry::new();
        let card = registry
            .add_card("Alice", "4111111111111111", dec!(1000))
            .unwrap();

        assert_eq!(card.holder_name(), "Alice");
        assert!(card.is_valid());
        assert_eq!(card.balance(), Decimal::ZERO);
        assert_eq!(card.credit_limit(), dec!(1000));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_add_invalid_checksum_still_stored() {
        let registry = CardRegistry::new();
        let card = registry
            .add_card("Carol", "1234567812345678", dec!(250))
            .unwrap();

        assert!(!card.is_valid());
        assert_eq!(card.balance(), Decimal::ZERO);
        assert_eq!(registry.list_cards(), vec![card]);
    }

    #[test]
    fn test_validity_matches_luhn() {
        let registry = CardRegistry::new();
        let numbers = ["4111111111111111", "5555555555554444", "1234567812345678", "12ab"];

        for (i, number) in numbers.iter().enumerate() {
            let card = registry
                .add_card(&format!("holder-{}", i), number, dec!(1))
                .unwrap();
            assert_eq!(card.is_valid(), luhn::check(number));
        }
    }

    #[test]
    fn test_add_duplicate_name_fails() {
        let registry = CardRegistry::new();
        registry
            .add_card("Bob", "4111111111111111", dec!(500))
            .unwrap();

        let result = registry.add_card("Bob", "5555555555554444", dec!(800));
        assert_eq!(
            result,
            Err(RegistryError::DuplicateName {
                name: "Bob".to_string()
            })
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_duplicate_detection_is_normalized() {
        let registry = CardRegistry::new();
        registry
            .add_card("Bob", "4111111111111111", dec!(500))
            .unwrap();

        assert!(registry.add_card(" bob ", "5555555555554444", dec!(800)).is_err());
        assert!(registry.add_card("BOB", "5555555555554444", dec!(800)).is_err());
        assert_eq!(registry.len(), 1);

        // The stored card is untouched
        let stored = registry.find_by_name("bOb").unwrap();
        assert_eq!(stored.holder_name(), "Bob");
        assert_eq!(stored.card_number(), "4111111111111111");
        assert_eq!(stored.credit_limit(), dec!(500));
    }

    #[test]
    fn test_original_casing_preserved() {
        let registry = CardRegistry::new();
        let card = registry
            .add_card("  McDonald ", "4111111111111111", dec!(10))
            .unwrap();

        assert_eq!(card.holder_name(), "  McDonald ");
        assert!(registry.find_by_name("mcdonald").is_some());
    }

    #[test]
    fn test_list_preserves_insertion_order() {
        let registry = CardRegistry::new();
        for name in ["Zed", "Alice", "Mike", "Bob", "Yan"] {
            registry.add_card(name, "4111111111111111", dec!(1)).unwrap();
        }

        let names: Vec<String> = registry
            .list_cards()
            .iter()
            .map(|c| c.holder_name().to_string())
            .collect();
        assert_eq!(names, vec!["Zed", "Alice", "Mike", "Bob", "Yan"]);
    }

    #[test]
    fn test_list_is_snapshot() {
        let registry = CardRegistry::new();
        registry
            .add_card("Alice", "4111111111111111", dec!(1000))
            .unwrap();

        let snapshot = registry.list_cards();
        registry
            .add_card("Bob", "5555555555554444", dec!(500))
            .unwrap();

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].holder_name(), "Alice");
        assert_eq!(registry.list_cards().len(), 2);
    }

    #[test]
    fn test_mutating_snapshot_does_not_touch_registry() {
        let registry = CardRegistry::new();
        registry
            .add_card("Alice", "4111111111111111", dec!(1000))
            .unwrap();

        let mut snapshot = registry.list_cards();
        snapshot.clear();

        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_end_to_end_scenario() {
        let registry = CardRegistry::new();

        let alice = registry
            .add_card("Alice", "4111111111111111", dec!(1000))
            .unwrap();
        assert!(alice.is_valid());
        assert_eq!(alice.balance(), Decimal::ZERO);
        assert_eq!(alice.credit_limit(), dec!(1000));

        registry
            .add_card("Bob", "4111111111111111", dec!(500))
            .unwrap();
        let duplicate = registry.add_card("Bob", "5555555555554444", dec!(800));
        assert!(matches!(duplicate, Err(RegistryError::DuplicateName { .. })));

        let cards = registry.list_cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].holder_name(), "Alice");
        assert_eq!(cards[1].holder_name(), "Bob");
        assert_eq!(cards[1].card_number(), "4111111111111111");
        assert_eq!(cards[1].credit_limit(), dec!(500));
    }

    #[test]
    fn test_empty_registry() {
        let registry = CardRegistry::default();
        assert!(registry.is_empty());
        assert!(registry.list_cards().is_empty());
        assert!(registry.find_by_name("nobody").is_none());
    }
}
