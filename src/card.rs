// 💳 Card Entity - one credit-card account
//
// Values are fixed at creation: the registry is the only constructor and
// hands out clones, so nothing outside this crate can change a stored card.

use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Holder name exactly as submitted (casing and spacing preserved)
    holder_name: String,

    /// Card number exactly as submitted
    card_number: String,

    /// Credit limit
    credit_limit: Decimal,

    /// Current balance, always zero in this service
    balance: Decimal,

    /// Luhn result computed when the card was added
    is_valid: bool,
}

impl Card {
    /// Create a card with a zero balance.
    pub(crate) fn new(
        holder_name: String,
        card_number: String,
        credit_limit: Decimal,
        is_valid: bool,
    ) -> Self {
        Card {
            holder_name,
            card_number,
            credit_limit,
            balance: Decimal::ZERO,
            is_valid,
        }
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn card_number(&self) -> &str {
        &self.card_number
    }

    pub fn credit_limit(&self) -> Decimal {
        self.credit_limit
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// Mask card number (show only last 4 digits)
    ///
    /// Example: "4111111111111111" → "*1111"
    pub fn masked_number(&self) -> String {
        let number = self.card_number.trim();
        if number.len() <= 4 || !number.is_ascii() {
            return number.to_string();
        }
        format!("*{}", &number[number.len() - 4..])
    }
}

/// Uniqueness key for a holder name: trimmed and lower-cased.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

// ============================================================================
// TESTS
// ============================================================================
