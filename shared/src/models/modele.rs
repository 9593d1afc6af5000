//! Modele Model (catalog item)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Catalog entry: a garment template with a price and an image
///
/// The backend does not always send `nom`; it is kept optional and
/// [`Modele::display_name`] falls back to the numeric id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Modele {
    pub id: i64,
    #[serde(default)]
    pub nom: Option<String>,
    pub price: Decimal,
    pub image_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl Modele {
    pub fn display_name(&self) -> String {
        match self.nom.as_deref().map(str::trim) {
            Some(nom) if !nom.is_empty() => nom.to_string(),
            _ => format!("Modèle #{}", self.id),
        }
    }
}

/// Create modele payload (multipart; the image is mandatory and attached separately)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeleCreate {
    pub price: Decimal,
}

/// Update modele payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeleUpdate {
    pub price: Option<Decimal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_falls_back_to_id() {
        let modele: Modele = serde_json::from_str(r#"{"id":3,"price":5000,"imageUrl":null}"#).unwrap();
        assert_eq!(modele.display_name(), "Modèle #3");
        assert_eq!(modele.price, Decimal::from(5000));

        let named = Modele {
            nom: Some("Boubou brodé".into()),
            ..modele
        };
        assert_eq!(named.display_name(), "Boubou brodé");
    }
}
