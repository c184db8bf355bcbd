//! # Validation Module
//!
//! Input checks run by the service layer before it touches a collection.
//!
//! ## Where Validation Sits
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front end ──► Service operation                                        │
//! │                   │                                                     │
//! │                   ├── role gate (Session)                               │
//! │                   ├── THIS MODULE: shape of the input                   │
//! │                   └── load → mutate → save (estore-db)                  │
//! │                                                                         │
//! │  A rejected input is a soft failure: the operation returns `false`.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use estore_core::validation::{validate_name, validate_quantity};
//!
//! validate_name("name", "Phone Charger").unwrap();
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_NAME_LEN, MAX_PRICE_CENTS, MAX_USERNAME_LEN, MIN_USERNAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a display name (item, category, supplier, person).
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
pub fn validate_name(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a login name.
///
/// ```rust
/// use estore_core::validation::validate_username;
///
/// assert!(validate_username("cashier1").is_ok());
/// assert!(validate_username("ab").is_err());
/// ```
pub fn validate_username(username: &str) -> ValidationResult<()> {
    let len = username.trim().chars().count();

    if len == 0 {
        return Err(ValidationError::Required {
            field: "username".to_string(),
        });
    }

    if len < MIN_USERNAME_LEN {
        return Err(ValidationError::TooShort {
            field: "username".to_string(),
            min: MIN_USERNAME_LEN,
        });
    }

    if len > MAX_USERNAME_LEN {
        return Err(ValidationError::TooLong {
            field: "username".to_string(),
            max: MAX_USERNAME_LEN,
        });
    }

    Ok(())
}

/// Validates a new password against the configured minimum length.
pub fn validate_password(password: &str, min_len: usize) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }

    if password.chars().count() < min_len {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: min_len,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a bill line quantity. Zero-unit lines are rejected.
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }
    Ok(())
}

/// Validates a price: between zero (free items) and [`MAX_PRICE_CENTS`].
///
/// ```rust
/// use estore_core::validation::validate_price;
/// use estore_core::Money;
///
/// assert!(validate_price("selling_price", Money::zero()).is_ok());
/// assert!(validate_price("selling_price", Money::from_cents(-1)).is_err());
/// ```
pub fn validate_price(field: &str, price: Money) -> ValidationResult<()> {
    if price.is_negative() || price.cents() > MAX_PRICE_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_PRICE_CENTS,
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_name() {
        assert!(validate_name("name", "Headphones").is_ok());
        assert!(validate_name("name", "").is_err());
        assert!(validate_name("name", "   ").is_err());
        assert!(validate_name("name", &"A".repeat(200)).is_ok());
        assert!(matches!(
            validate_name("name", &"A".repeat(201)),
            Err(ValidationError::TooLong { max: 200, .. })
        ));
    }

    #[test]
    fn test_validate_username_bounds() {
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"u".repeat(50)).is_ok());
        assert!(matches!(
            validate_username("ab"),
            Err(ValidationError::TooShort { min: 3, .. })
        ));
        assert!(validate_username(&"u".repeat(51)).is_err());
        assert!(matches!(
            validate_username(""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("1234", 4).is_ok());
        assert!(validate_password("123", 4).is_err());
        assert!(validate_password("", 0).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(0).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("purchase_price", Money::from_cents(1500)).is_ok());
        assert!(validate_price("purchase_price", Money::zero()).is_ok());
        assert!(validate_price("purchase_price", Money::from_cents(-100)).is_err());
        assert!(validate_price("selling_price", Money::from_cents(MAX_PRICE_CENTS)).is_ok());
        assert!(validate_price("selling_price", Money::from_cents(MAX_PRICE_CENTS + 1)).is_err());
        assert!(validate_price("selling_price", Money::from_cents(i64::MAX)).is_err());
    }
}
