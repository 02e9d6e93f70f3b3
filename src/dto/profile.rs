use serde::Deserialize;
use utoipa::ToSchema;

use crate::validation::FormFields;

/// Editable profile fields. Email comes from the signed-in identity.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SaveProfileRequest {
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub delivery_address: Option<String>,
}

impl FormFields for SaveProfileRequest {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "full_name" => self.full_name.as_deref(),
            "phone" => self.phone.as_deref(),
            "delivery_address" => self.delivery_address.as_deref(),
            _ => None,
        }
    }
}

/// Trimmed value, or `None` when blank.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
