//! Contact and delivery details collected at checkout.

use serde::{Deserialize, Serialize};

/// Details entered on the contact and shipping steps of checkout.
///
/// Every field is required. Values are kept as entered; a field counts as
/// missing when it is blank after trimming.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingDetails {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    /// Street address.
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub country: String,
}

impl ShippingDetails {
    /// Names of the required fields left blank, in form order.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("email", &self.email),
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("address", &self.address),
            ("city", &self.city),
            ("zip_code", &self.zip_code),
            ("country", &self.country),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }
}
