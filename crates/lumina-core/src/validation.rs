//! # Validation Module
//!
//! Form checks for the checkout and admin product forms.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Front end          required-field hints, immediate feedback            │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  Storefront command deserialization                                     │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  THIS MODULE        business rules, before any state is touched        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::ProductDraft;
use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_EMAIL_LEN: usize = 254;

// =============================================================================
// Checkout Form
// =============================================================================

/// What the shopper types at checkout.
///
/// The address is required to place an order but is not stored on it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase", default)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub address: String,
}

/// Validates the checkout form.
///
/// ## Rules
/// - name, email and address are required (whitespace doesn't count)
/// - email must look like `local@domain.tld`
pub fn validate_checkout(form: &CheckoutForm) -> ValidationResult<()> {
    validate_required("name", &form.name)?;
    validate_max_len("name", &form.name, MAX_NAME_LEN)?;
    validate_email(&form.email)?;
    validate_required("address", &form.address)?;
    Ok(())
}

/// Validates an email address.
///
/// ## Example
/// ```rust
/// use lumina_core::validation::validate_email;
///
/// assert!(validate_email("alex@example.com").is_ok());
/// assert!(validate_email("alex@localhost").is_err());
/// assert!(validate_email("").is_err());
/// ```
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;
    let email = email.trim();
    validate_max_len("email", email, MAX_EMAIL_LEN)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email.split_once('@').ok_or_else(|| invalid("missing @"))?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid("expected name@domain"));
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() => Ok(()),
        _ => Err(invalid("domain needs a dot, like example.com")),
    }
}

// =============================================================================
// Product Form
// =============================================================================

/// Validates the admin product form.
///
/// ## Rules
/// - name is required
/// - price must be positive
/// - original price, when given, must not be below the price
pub fn validate_product_draft(draft: &ProductDraft) -> ValidationResult<()> {
    validate_required("name", &draft.name)?;
    validate_max_len("name", &draft.name, MAX_NAME_LEN)?;
    validate_price_cents(draft.price_cents)?;

    if let Some(original) = draft.original_price_cents {
        if original < draft.price_cents {
            return Err(ValidationError::OutOfRange {
                field: "original price".to_string(),
                min: draft.price_cents,
                max: i64::MAX,
            });
        }
    }
    Ok(())
}

/// Validates a price in cents (must be > 0).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Helpers
// =============================================================================

fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

fn validate_max_len(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    if value.trim().chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
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

    fn form() -> CheckoutForm {
        CheckoutForm {
            name: "Alex Johnson".to_string(),
            email: "alex@example.com".to_string(),
            address: "1 Market St, San Francisco".to_string(),
        }
    }

    #[test]
    fn test_valid_checkout() {
        assert!(validate_checkout(&form()).is_ok());
    }

    #[test]
    fn test_checkout_requires_every_field() {
        for blank in ["name", "email", "address"] {
            let mut f = form();
            match blank {
                "name" => f.name = "  ".to_string(),
                "email" => f.email = String::new(),
                _ => f.address = String::new(),
            }
            let err = validate_checkout(&f).unwrap_err();
            assert_eq!(err.to_string(), format!("{blank} is required"));
        }
    }

    #[test]
    fn test_email_formats() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("no-at-sign.com").is_err());
        assert!(validate_email("@example.com").is_err());
        assert!(validate_email("a@b@c.com").is_err());
        assert!(validate_email("a b@example.com").is_err());
        assert!(validate_email("a@example.").is_err());
    }

    #[test]
    fn test_product_draft_rules() {
        let ok = ProductDraft {
            name: "Lamp".to_string(),
            price_cents: 4999,
            original_price_cents: Some(7999),
            ..ProductDraft::default()
        };
        assert!(validate_product_draft(&ok).is_ok());

        let inverted = ProductDraft {
            original_price_cents: Some(100),
            ..ok.clone()
        };
        assert!(matches!(
            validate_product_draft(&inverted),
            Err(ValidationError::OutOfRange { .. })
        ));

        let free = ProductDraft {
            price_cents: 0,
            ..ok
        };
        assert!(validate_product_draft(&free).is_err());
    }
}
