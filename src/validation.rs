//! Field rules described as data and checked by one generic validator.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use utoipa::ToSchema;

pub enum Constraint {
    MinChars(usize),
    MaxChars(usize),
    Pattern(Regex),
    Email,
}

impl Constraint {
    fn holds(&self, value: &str) -> bool {
        match self {
            Constraint::MinChars(min) => value.chars().count() >= *min,
            Constraint::MaxChars(max) => value.chars().count() <= *max,
            Constraint::Pattern(re) => re.is_match(value),
            Constraint::Email => is_email(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Presence {
    Required,
    /// Missing or blank values skip every check.
    Optional,
}

pub struct FieldSpec {
    pub name: &'static str,
    pub presence: Presence,
    /// Checks run against the trimmed value.
    pub trim: bool,
    pub checks: Vec<(Constraint, &'static str)>,
}

impl FieldSpec {
    fn required(name: &'static str) -> Self {
        Self {
            name,
            presence: Presence::Required,
            trim: true,
            checks: Vec::new(),
        }
    }

    fn optional(name: &'static str) -> Self {
        Self {
            presence: Presence::Optional,
            ..Self::required(name)
        }
    }

    fn untrimmed(mut self) -> Self {
        self.trim = false;
        self
    }

    fn check(mut self, constraint: Constraint, message: &'static str) -> Self {
        self.checks.push((constraint, message));
        self
    }

    /// First violated message, if any.
    fn evaluate(&self, raw: Option<&str>) -> Option<&'static str> {
        let value = match raw {
            Some(v) if self.trim => v.trim(),
            Some(v) => v,
            None => "",
        };
        if raw.is_none() {
            return match self.presence {
                Presence::Required => Some(REQUIRED),
                Presence::Optional => None,
            };
        }
        if self.presence == Presence::Optional && value.trim().is_empty() {
            return None;
        }
        self.checks
            .iter()
            .find(|(constraint, _)| !constraint.holds(value))
            .map(|(_, message)| *message)
    }
}

const REQUIRED: &str = "Required";

/// Read access to submitted form values by field name.
pub trait FormFields {
    fn field(&self, name: &str) -> Option<&str>;
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ValidationErrors {
    #[schema(value_type = BTreeMap<String, String>)]
    fields: BTreeMap<String, String>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> &BTreeMap<String, String> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, String> {
        self.fields
    }
}

pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    /// Every field is checked independently; all violations are reported.
    pub fn validate(&self, form: &impl FormFields) -> Result<(), ValidationErrors> {
        let fields: BTreeMap<String, String> = self
            .fields
            .iter()
            .filter_map(|spec| {
                spec.evaluate(form.field(spec.name))
                    .map(|message| (spec.name.to_string(), message.to_string()))
            })
            .collect();
        if fields.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors { fields })
        }
    }
}

fn pattern(re: &str) -> Regex {
    Regex::new(re).expect("static validation pattern")
}

fn name_field(name: &'static str) -> FieldSpec {
    FieldSpec::required(name)
        .check(Constraint::MinChars(2), "Name must be at least 2 characters")
        .check(Constraint::MaxChars(100), "Name must be less than 100 characters")
        .check(
            Constraint::Pattern(pattern(r"^[a-zA-Z\s]+$")),
            "Name can only contain letters and spaces",
        )
}

fn phone_checks(spec: FieldSpec) -> FieldSpec {
    spec.check(Constraint::MinChars(10), "Phone number must be at least 10 digits")
        .check(Constraint::MaxChars(15), "Phone number must be less than 15 digits")
        .check(
            Constraint::Pattern(pattern(r"^[0-9+\-\s()]+$")),
            "Invalid phone number format",
        )
}

/// Delivery details entered at checkout.
pub static CHECKOUT_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        name_field("name"),
        FieldSpec::required("email")
            .check(Constraint::Email, "Invalid email address")
            .check(Constraint::MaxChars(255), "Email must be less than 255 characters"),
        phone_checks(FieldSpec::required("phone")),
        FieldSpec::required("address")
            .check(Constraint::MinChars(10), "Address must be at least 10 characters")
            .check(Constraint::MaxChars(500), "Address must be less than 500 characters"),
        FieldSpec::required("city")
            .check(Constraint::MinChars(2), "City must be at least 2 characters")
            .check(Constraint::MaxChars(100), "City must be less than 100 characters"),
        FieldSpec::required("zip_code")
            .check(Constraint::MinChars(5), "ZIP code must be at least 5 characters")
            .check(Constraint::MaxChars(10), "ZIP code must be less than 10 characters")
            .check(
                Constraint::Pattern(pattern(r"^[0-9]+$")),
                "ZIP code can only contain numbers",
            ),
        FieldSpec::optional("notes")
            .untrimmed()
            .check(Constraint::MaxChars(500), "Notes must be less than 500 characters"),
    ])
});

/// Editable account details on the profile page.
pub static PROFILE_SCHEMA: LazyLock<Schema> = LazyLock::new(|| {
    Schema::new(vec![
        name_field("full_name"),
        phone_checks(FieldSpec::optional("phone")),
        FieldSpec::optional("delivery_address").check(
            Constraint::MaxChars(500),
            "Address must be less than 500 characters",
        ),
    ])
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    pattern(r"^[A-Za-z0-9_'+\-.]+@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
});

fn is_email(value: &str) -> bool {
    let Some((local, _)) = value.split_once('@') else {
        return false;
    };
    !local.starts_with('.')
        && !local.ends_with('.')
        && !value.contains("..")
        && EMAIL_RE.is_match(value)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    struct Form(HashMap<&'static str, &'static str>);

    impl FormFields for Form {
        fn field(&self, name: &str) -> Option<&str> {
            self.0.get(name).copied()
        }
    }

    fn valid_checkout() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("name", "Asha Verma"),
            ("email", "asha@example.in"),
            ("phone", "+91 9876543210"),
            ("address", "12 Lake View Road, Sector 4"),
            ("city", "Pune"),
            ("zip_code", "411001"),
        ])
    }

    fn checkout_with(field: &'static str, value: &'static str) -> Result<(), ValidationErrors> {
        let mut values = valid_checkout();
        values.insert(field, value);
        CHECKOUT_SCHEMA.validate(&Form(values))
    }

    #[test]
    fn accepts_well_formed_details() {
        assert!(CHECKOUT_SCHEMA.validate(&Form(valid_checkout())).is_ok());
    }

    #[test]
    fn rejects_letters_in_phone() {
        let errors = checkout_with("phone", "abc").unwrap_err();
        assert_eq!(errors.get("phone"), Some("Phone number must be at least 10 digits"));

        let errors = checkout_with("phone", "98765abcde12").unwrap_err();
        assert_eq!(errors.get("phone"), Some("Invalid phone number format"));
    }

    #[test]
    fn name_allows_letters_and_spaces_only() {
        let errors = checkout_with("name", "R2 D2").unwrap_err();
        assert_eq!(errors.get("name"), Some("Name can only contain letters and spaces"));
        assert!(checkout_with("name", "  Jo  ").is_ok());
    }

    #[test]
    fn zip_must_be_five_to_ten_digits() {
        assert!(checkout_with("zip_code", "1234").is_err());
        assert!(checkout_with("zip_code", "12345678901").is_err());
        assert!(checkout_with("zip_code", "41100A").is_err());
        assert!(checkout_with("zip_code", "12345").is_ok());
    }

    #[test]
    fn email_syntax_is_checked() {
        assert!(checkout_with("email", "not-an-email").is_err());
        assert!(checkout_with("email", "a..b@example.com").is_err());
        assert!(checkout_with("email", "first.last+milk@dairy.co.in").is_ok());
    }

    #[test]
    fn notes_are_optional_but_bounded() {
        let mut values = valid_checkout();
        values.remove("notes");
        assert!(CHECKOUT_SCHEMA.validate(&Form(values)).is_ok());

        let long: &'static str = Box::leak("x".repeat(501).into_boxed_str());
        let errors = checkout_with("notes", long).unwrap_err();
        assert_eq!(errors.get("notes"), Some("Notes must be less than 500 characters"));
    }

    #[test]
    fn missing_required_fields_are_each_reported() {
        let errors = CHECKOUT_SCHEMA.validate(&Form(HashMap::new())).unwrap_err();
        for field in ["name", "email", "phone", "address", "city", "zip_code"] {
            assert_eq!(errors.get(field), Some("Required"), "{field}");
        }
        assert!(errors.get("notes").is_none());
    }

    #[test]
    fn profile_phone_may_be_blank() {
        let form = Form(HashMap::from([("full_name", "Asha Verma"), ("phone", "  ")]));
        assert!(PROFILE_SCHEMA.validate(&form).is_ok());

        let form = Form(HashMap::from([("full_name", "Asha Verma"), ("phone", "12")]));
        assert!(PROFILE_SCHEMA.validate(&form).is_err());
    }
}
