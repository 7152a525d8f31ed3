//! Payment method model and DTOs.
//!
//! New payment methods branch on their type; each type has its own
//! required fields and a stored token representation. Raw card numbers
//! are never persisted, only a masked label and an opaque token.

use printforge_core::error::CoreError;
use printforge_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentMethod {
    pub id: DbId,
    pub user_id: DbId,
    pub method_type: String,
    pub label: String,
    pub token: String,
    pub created_at: Timestamp,
}

/// Input for a new payment method, discriminated by type.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "method_type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NewPaymentMethod {
    Card {
        holder: String,
        card_number: String,
    },
    Paypal {
        email: String,
    },
    Invoice {
        billing_email: String,
    },
    Wallet {
        provider: String,
        account: String,
    },
}

/// The validated, storable form of a payment method.
#[derive(Debug, Clone)]
pub struct StoredPaymentMethod {
    pub method_type: &'static str,
    pub label: String,
    pub token: String,
}

impl NewPaymentMethod {
    /// Validate the type-specific fields and derive the stored
    /// representation.
    pub fn into_stored(self) -> Result<StoredPaymentMethod, CoreError> {
        match self {
            NewPaymentMethod::Card {
                holder,
                card_number,
            } => {
                let digits: String =
                    card_number.chars().filter(|c| c.is_ascii_digit()).collect();
                if holder.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "card holder must not be empty".to_string(),
                    ));
                }
                if digits.len() < 12 || digits.len() > 19 {
                    return Err(CoreError::Validation(
                        "card number must have 12 to 19 digits".to_string(),
                    ));
                }
                let last4 = &digits[digits.len() - 4..];
                Ok(StoredPaymentMethod {
                    method_type: "CARD",
                    label: format!("Card ending in {last4}"),
                    token: format!("tok_card_{last4}"),
                })
            }
            NewPaymentMethod::Paypal { email } => {
                require_email(&email)?;
                Ok(StoredPaymentMethod {
                    method_type: "PAYPAL",
                    label: format!("PayPal ({email})"),
                    token: format!("tok_paypal_{email}"),
                })
            }
            NewPaymentMethod::Invoice { billing_email } => {
                require_email(&billing_email)?;
                Ok(StoredPaymentMethod {
                    method_type: "INVOICE",
                    label: format!("Invoice to {billing_email}"),
                    token: format!("tok_invoice_{billing_email}"),
                })
            }
            NewPaymentMethod::Wallet { provider, account } => {
                if provider.trim().is_empty() || account.trim().is_empty() {
                    return Err(CoreError::Validation(
                        "wallet provider and account must not be empty".to_string(),
                    ));
                }
                Ok(StoredPaymentMethod {
                    method_type: "WALLET",
                    label: format!("{provider} wallet"),
                    token: format!("tok_wallet_{provider}_{account}"),
                })
            }
        }
    }
}

fn require_email(value: &str) -> Result<(), CoreError> {
    let value = value.trim();
    if value.is_empty() || !value.contains('@') {
        return Err(CoreError::Validation(format!(
            "'{value}' is not a valid email address"
        )));
    }
    Ok(())
}
