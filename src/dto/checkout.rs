use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{dto::cart::CartLine, validation::FormFields};

/// Delivery details as typed into the checkout form.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    #[serde(alias = "zipCode")]
    pub zip_code: Option<String>,
    pub notes: Option<String>,
}

impl FormFields for CheckoutRequest {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "name" => self.name.as_deref(),
            "email" => self.email.as_deref(),
            "phone" => self.phone.as_deref(),
            "address" => self.address.as_deref(),
            "city" => self.city.as_deref(),
            "zip_code" => self.zip_code.as_deref(),
            "notes" => self.notes.as_deref(),
            _ => None,
        }
    }
}

/// Validated details, trimmed and ready to persist.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryDetails {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    pub notes: Option<String>,
}

impl DeliveryDetails {
    /// Only call after the checkout schema accepted `form`.
    pub fn from_validated(form: &CheckoutRequest) -> Self {
        let trimmed = |v: &Option<String>| v.as_deref().unwrap_or_default().trim().to_string();
        Self {
            name: trimmed(&form.name),
            email: trimmed(&form.email),
            phone: trimmed(&form.phone),
            address: trimmed(&form.address),
            city: trimmed(&form.city),
            zip_code: trimmed(&form.zip_code),
            notes: form
                .notes
                .as_ref()
                .filter(|n| !n.trim().is_empty())
                .cloned(),
        }
    }

    /// Single-line address stored on the order and the profile.
    pub fn full_address(&self) -> String {
        format!("{}, {} - {}", self.address, self.city, self.zip_code)
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CheckoutSummary {
    pub items: Vec<CartLine>,
    pub item_count: u64,
    pub subtotal: f64,
    pub delivery_fee: f64,
    pub total: f64,
    /// Label for the submit button, e.g. `Pay Now - ₹500`.
    pub pay_label: String,
}

/// Values to pre-fill the checkout form with.
#[derive(Debug, Default, PartialEq, Serialize, ToSchema)]
pub struct CheckoutPrefill {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}
