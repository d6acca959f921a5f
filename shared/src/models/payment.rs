//! Payment Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Upi,
    BankTransfer,
    Online,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    #[default]
    Membership,
    Renewal,
    Other,
}

impl PaymentType {
    /// Membership and renewal payments extend the member's subscription
    pub fn renews_subscription(&self) -> bool {
        matches!(self, Self::Membership | Self::Renewal)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    Completed,
    Pending,
    Failed,
    Refunded,
}

/// Stored payment (immutable once written)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub organization_id: String,
    pub member_id: String,
    pub member_name: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(rename = "type")]
    pub payment_type: PaymentType,
    pub status: PaymentStatus,
    /// Unix millis
    pub payment_date: i64,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    /// User id of the staff member who recorded it
    pub created_by: String,
}

/// Record payment payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    #[validate(length(min = 1))]
    pub member_id: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    #[serde(alias = "paymentMethod", default = "default_method")]
    pub method: PaymentMethod,
    #[serde(rename = "type", alias = "paymentType", default)]
    pub payment_type: PaymentType,
    #[validate(length(max = 100))]
    pub transaction_id: Option<String>,
    #[validate(length(max = 500))]
    pub notes: Option<String>,
}

fn default_method() -> PaymentMethod {
    PaymentMethod::Cash
}

/// Revenue aggregates returned next to the payments list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStats {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub monthly_revenue: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub today_revenue: Decimal,
    pub total_payments: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_create_accepts_form_aliases() {
        let json = r#"{
            "memberId": "m1",
            "amount": 1500,
            "paymentMethod": "upi",
            "paymentType": "renewal"
        }"#;
        let payload: PaymentCreate = serde_json::from_str(json).unwrap();
        assert_eq!(payload.method, PaymentMethod::Upi);
        assert_eq!(payload.payment_type, PaymentType::Renewal);
    }

    #[test]
    fn test_payment_type_defaults_to_membership() {
        let payload: PaymentCreate =
            serde_json::from_str(r#"{"memberId": "m1", "amount": 10}"#).unwrap();
        assert_eq!(payload.payment_type, PaymentType::Membership);
        assert_eq!(payload.method, PaymentMethod::Cash);
        assert!(payload.payment_type.renews_subscription());
        assert!(!PaymentType::Other.renews_subscription());
    }

    #[test]
    fn test_bank_transfer_wire_name() {
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"bank_transfer\""
        );
    }
}
