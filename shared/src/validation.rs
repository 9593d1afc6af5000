//! Input validation helpers
//!
//! Shallow pre-submit checks run by the desk forms before any request is sent.
//! The backend stays the authority; these only catch obvious mistakes early.
//! Messages are user-facing and therefore French.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use crate::models::MeasureField;

// ── Limits ──────────────────────────────────────────────────────────

/// Customer names: at least two characters once trimmed
pub const MIN_CUSTOMER_NAME_LEN: usize = 2;

/// New passwords
pub const MIN_PASSWORD_LEN: usize = 6;

/// Order line quantity (inclusive)
pub const MAX_ITEM_QUANTITY: u32 = 100;

/// Uploaded images (10 MiB)
pub const MAX_IMAGE_SIZE: u64 = 10 * 1024 * 1024;

/// Accepted image MIME types
pub const ALLOWED_IMAGE_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d\s\-+()]{8,15}$").expect("valid phone pattern"));

// ── Field errors ────────────────────────────────────────────────────

/// Field-keyed validation messages; a form is submittable only when empty
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message; the first message of a field wins
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }

    /// Record `message` for `field` when `value` is blank
    pub fn require(&mut self, field: &str, value: &str, message: &str) {
        if is_blank(value) {
            self.add(field, message);
        }
    }

    /// Record the error of a check, if any
    pub fn check(&mut self, field: &str, result: Result<(), String>) {
        if let Err(message) = result {
            self.add(field, message);
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<String> {
        self.0.remove(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Field names, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `Ok(())` when no field failed
    pub fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{field}: {message}")?;
            first = false;
        }
        Ok(())
    }
}

// ── Predicates ──────────────────────────────────────────────────────

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// `None` for blank input
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn validate_customer_name(name: &str) -> Result<(), String> {
    if name.trim().chars().count() < MIN_CUSTOMER_NAME_LEN {
        return Err("Le nom doit contenir au moins 2 caractères".into());
    }
    Ok(())
}

pub fn validate_phone(phone: &str) -> Result<(), String> {
    if !PHONE_RE.is_match(phone) {
        return Err("Le numéro de téléphone doit contenir entre 8 et 15 chiffres".into());
    }
    Ok(())
}

/// Minimal shape check; the backend does the real one
pub fn validate_email(email: &str) -> Result<(), String> {
    let email = email.trim();
    let valid = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.') && !domain.starts_with('.'),
        None => false,
    };
    if !valid {
        return Err("L'adresse email n'est pas valide".into());
    }
    Ok(())
}

pub fn validate_image(content_type: &str, size: u64) -> Result<(), String> {
    let content_type = content_type.trim().to_lowercase();
    if !ALLOWED_IMAGE_TYPES.contains(&content_type.as_str()) {
        return Err("Type de fichier non supporté. Utilisez JPEG, PNG, GIF ou WebP".into());
    }
    if size > MAX_IMAGE_SIZE {
        return Err("La taille du fichier ne doit pas dépasser 10MB".into());
    }
    Ok(())
}

/// Bounds check of one measurement, `0..=max` cm
pub fn validate_measure(field: MeasureField, value: f64) -> Result<(), String> {
    if !value.is_finite() || value < 0.0 || value > field.max() {
        return Err(format!(
            "{} doit être entre 0 et {} cm",
            field.label(),
            field.max()
        ));
    }
    Ok(())
}

/// Parse a measurement typed in a form; blank means "not measured"
pub fn parse_measure(field: MeasureField, raw: &str) -> Result<Option<f64>, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    let value: f64 = raw
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("{} doit être un nombre", field.label()))?;
    validate_measure(field, value)?;
    Ok(Some(value))
}

/// Parse a form amount (accepts a decimal comma)
pub fn parse_amount(raw: &str) -> Option<Decimal> {
    raw.trim().replace(',', ".").parse::<Decimal>().ok()
}

/// Parse an amount that must be strictly positive
pub fn parse_positive_amount(raw: &str, message: &str) -> Result<Decimal, String> {
    match parse_amount(raw) {
        Some(value) if value > Decimal::ZERO => Ok(value),
        _ => Err(message.to_string()),
    }
}

pub fn validate_quantity(quantite: u32) -> Result<(), String> {
    if quantite == 0 {
        return Err("La quantité doit être supérieure à 0".into());
    }
    if quantite > MAX_ITEM_QUANTITY {
        return Err("La quantité ne peut pas dépasser 100".into());
    }
    Ok(())
}

pub fn validate_new_password(new_password: &str, confirm_password: &str) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if new_password.chars().count() < MIN_PASSWORD_LEN {
        errors.add(
            "newPassword",
            "Le nouveau mot de passe doit contenir au moins 6 caractères",
        );
    }
    if new_password != confirm_password {
        errors.add("confirmPassword", "Les mots de passe ne correspondent pas");
    }
    errors
}
