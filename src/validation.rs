// 📐 Shape Layer - request validation
// Checks the raw fields of a new card before they reach the registry.
// The Luhn checksum is not checked here; see `luhn`.

use crate::luhn::{MAX_LENGTH, MIN_LENGTH};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};
use std::str::FromStr;

// ============================================================================
// VALIDATION RESULT
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: &str, message: &str) -> Self {
        ValidationError {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

pub type ValidationResult = Result<ValidCard, Vec<ValidationError>>;

/// Join field errors into one line for responses and logs
pub fn describe(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

// ============================================================================
// CARD REQUEST
// ============================================================================

/// Untyped payload for adding a card. Every field may be missing.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRequest {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub card_number: Option<String>,

    /// Limit exactly as submitted; parsed during validation
    #[serde(default, deserialize_with = "deserialize_limit")]
    pub limit: Option<String>,
}

/// Accept the limit as a JSON number or string, keeping its original digits.
/// serde_json's `arbitrary_precision` makes `Number` print its source text.
fn deserialize_limit<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<serde_json::Value>::deserialize(deserializer)? {
        None => Ok(None),
        Some(serde_json::Value::Number(n)) => Ok(Some(n.to_string())),
        Some(serde_json::Value::String(s)) => Ok(Some(s)),
        Some(other) => Err(serde::de::Error::custom(format!(
            "limit must be a number, got {}",
            other
        ))),
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LimitError {
    NotANumber,
    TooManyDigits,
}

/// Largest exponent accepted in scientific notation; anything beyond
/// cannot fit a `Decimal` anyway.
const MAX_EXPONENT: i64 = 64;

/// Rewrite `raw` as a plain decimal string (no exponent), keeping every
/// digit and the original scale.
fn plain_decimal(raw: &str) -> Result<String, LimitError> {
    let s = raw.trim();
    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => {
            let exp: i64 = s[i + 1..].parse().map_err(|_| LimitError::NotANumber)?;
            if exp.abs() > MAX_EXPONENT {
                return Err(LimitError::TooManyDigits);
            }
            (&s[..i], exp)
        }
        None => (s, 0),
    };

    let (negative, unsigned) = match mantissa.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, mantissa.strip_prefix('+').unwrap_or(mantissa)),
    };
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned, ""));
    let digits = format!("{}{}", int_part, frac_part);
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(LimitError::NotANumber);
    }

    let scale = frac_part.len() as i64 - exponent;
    let (int_digits, frac_digits) = if scale <= 0 {
        (format!("{}{}", digits, "0".repeat(scale.unsigned_abs() as usize)), String::new())
    } else if scale as usize >= digits.len() {
        (
            "0".to_string(),
            format!("{}{}", "0".repeat(scale as usize - digits.len()), digits),
        )
    } else {
        let split = digits.len() - scale as usize;
        (digits[..split].to_string(), digits[split..].to_string())
    };

    let int_digits = match int_digits.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let sign = if negative { "-" } else { "" };
    if frac_digits.is_empty() {
        Ok(format!("{}{}", sign, int_digits))
    } else {
        Ok(format!("{}{}.{}", sign, int_digits, frac_digits))
    }
}

/// Parse a limit without rounding: input that `Decimal` cannot hold exactly
/// (more than 28 fractional digits, or beyond 96 bits) is rejected.
fn parse_limit(raw: &str) -> Result<Decimal, LimitError> {
    let plain = plain_decimal(raw)?;
    let limit = Decimal::from_str(&plain).map_err(|_| LimitError::TooManyDigits)?;

    let canonical = match plain.split_once('.') {
        Some((int, frac)) => match frac.trim_end_matches('0') {
            "" => int.to_string(),
            frac => format!("{}.{}", int, frac),
        },
        None => plain.clone(),
    };
    let canonical = match canonical.strip_prefix('-') {
        Some(zero) if zero == "0" => zero.to_string(),
        _ => canonical,
    };

    if limit.normalize().to_string() != canonical {
        return Err(LimitError::TooManyDigits);
    }
    Ok(limit)
}

/// Fields that passed every shape rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidCard {
    pub name: String,
    pub card_number: String,
    pub limit: Decimal,
}

impl CardRequest {
    pub fn new(name: &str, card_number: &str, limit: Decimal) -> Self {
        CardRequest {
            name: Some(name.to_string()),
            card_number: Some(card_number.to_string()),
            limit: Some(limit.to_string()),
        }
    }

    /// Run every rule and collect all failures
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();

        let name = match self.name.as_deref() {
            Some(n) if !n.trim().is_empty() => Some(n),
            _ => {
                errors.push(ValidationError::new("name", "Name is required"));
                None
            }
        };

        let card_number = match self.card_number.as_deref() {
            Some(n) if !n.trim().is_empty() => {
                let mut ok = true;
                if !n.chars().all(|c| c.is_ascii_digit()) {
                    errors.push(ValidationError::new(
                        "cardNumber",
                        "Card number must be numeric",
                    ));
                    ok = false;
                }
                if !(MIN_LENGTH..=MAX_LENGTH).contains(&n.chars().count()) {
                    errors.push(ValidationError::new(
                        "cardNumber",
                        "Card number must be between 13 and 19 digits",
                    ));
                    ok = false;
                }
                ok.then_some(n)
            }
            _ => {
                errors.push(ValidationError::new(
                    "cardNumber",
                    "Card number is required",
                ));
                None
            }
        };

        let limit = match self.limit.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => match parse_limit(raw) {
                Ok(l) if l > Decimal::ZERO => Some(l),
                Ok(_) => {
                    errors.push(ValidationError::new("limit", "Limit must be positive"));
                    None
                }
                Err(LimitError::NotANumber) => {
                    errors.push(ValidationError::new(
                        "limit",
                        "Limit must be a decimal number",
                    ));
                    None
                }
                Err(LimitError::TooManyDigits) => {
                    errors.push(ValidationError::new("limit", "Limit has too many digits"));
                    None
                }
            },
            _ => {
                errors.push(ValidationError::new("limit", "Limit is required"));
                None
            }
        };

        match (name, card_number, limit) {
            (Some(name), Some(card_number), Some(limit)) if errors.is_empty() => {
                tracing::debug!(holder = %name, "card request passed shape validation");
                Ok(ValidCard {
                    name: name.to_string(),
                    card_number: card_number.to_string(),
                    limit,
                })
            }
            _ => {
                tracing::debug!(errors = %describe(&errors), "card request rejected");
                Err(errors)
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
