//! Status enums for orders and checkout.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Processing,
    Shipped,
    Delivered,
    Cancelled,
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Processing => write!(f, "processing"),
            Self::Shipped => write!(f, "shipped"),
            Self::Delivered => write!(f, "delivered"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Payment method offered on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    /// Listed but not accepted yet.
    Paypal,
    /// Listed but not accepted yet.
    ApplePay,
}

impl PaymentMethod {
    /// Whether checkout accepts this method.
    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::CreditCard)
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CreditCard => write!(f, "credit_card"),
            Self::Paypal => write!(f, "paypal"),
            Self::ApplePay => write!(f, "apple_pay"),
        }
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "credit_card" => Ok(Self::CreditCard),
            "paypal" => Ok(Self::Paypal),
            "apple_pay" => Ok(Self::ApplePay),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_method_round_trips_through_str() {
        for method in [PaymentMethod::CreditCard, PaymentMethod::Paypal, PaymentMethod::ApplePay] {
            assert_eq!(method.to_string().parse::<PaymentMethod>().unwrap(), method);
        }
        assert!("bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn test_only_credit_card_available() {
        assert!(PaymentMethod::CreditCard.is_available());
        assert!(!PaymentMethod::Paypal.is_available());
        assert!(!PaymentMethod::ApplePay.is_available());
    }
}
