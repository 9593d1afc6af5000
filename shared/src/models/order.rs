//! Order Model

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "En cours")]
    EnCours,
    #[serde(rename = "Terminé")]
    Termine,
    #[serde(rename = "Livré")]
    Livre,
    #[serde(rename = "Annulé")]
    Annule,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::EnCours,
        OrderStatus::Termine,
        OrderStatus::Livre,
        OrderStatus::Annule,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::EnCours => "En cours",
            OrderStatus::Termine => "Terminé",
            OrderStatus::Livre => "Livré",
            OrderStatus::Annule => "Annulé",
        }
    }

    /// Accepts the wire label, case-insensitively
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().to_lowercase() == value)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Order line item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub id: i64,
    pub modele_id: i64,
    pub type_tissu: String,
    pub couleur: String,
    /// Price captured from the catalog when the order was placed
    pub prix_unitaire: Decimal,
    pub quantite: u32,
    pub notes: Option<String>,
}

/// Order list row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub date_commande: String,
    pub date_rendez_vous: Option<String>,
    pub total: Decimal,
    pub reduction: Option<Decimal>,
    pub total_final: Decimal,
    pub statut: OrderStatus,
    #[serde(default)]
    pub nombre_items: u32,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Order detail with its items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub customer_name: String,
    pub date_commande: String,
    pub date_rendez_vous: Option<String>,
    pub total: Decimal,
    pub reduction: Option<Decimal>,
    pub total_final: Decimal,
    pub statut: OrderStatus,
    pub notes: Option<String>,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Line item as sent on create/update (price is resolved server-side)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRequest {
    pub modele_id: i64,
    pub type_tissu: String,
    pub couleur: String,
    pub quantite: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Create order payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    pub customer_id: i64,
    pub date_commande: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_rendez_vous: Option<String>,
    pub statut: OrderStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction: Option<Decimal>,
    pub order_items: Vec<OrderItemRequest>,
}

/// Update order payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_commande: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_rendez_vous: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub statut: Option<OrderStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_items: Option<Vec<OrderItemRequest>>,
}

impl From<OrderCreate> for OrderUpdate {
    fn from(create: OrderCreate) -> Self {
        Self {
            customer_id: Some(create.customer_id),
            date_commande: Some(create.date_commande),
            date_rendez_vous: create.date_rendez_vous,
            statut: Some(create.statut),
            notes: create.notes,
            reduction: create.reduction,
            order_items: Some(create.order_items),
        }
    }
}

/// Status quick-update payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub status: OrderStatus,
}

/// Server-side final total request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FinalTotalRequest {
    pub total: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reduction: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalCalculation {
    pub total: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalTotalCalculation {
    pub final_total: Decimal,
}

/// Select option (value, label)
pub type Choice = (&'static str, &'static str);

pub const FABRIC_OPTIONS: [Choice; 9] = [
    ("bazin", "Bazin"),
    ("wax", "Wax"),
    ("coton", "Coton"),
    ("soie", "Soie"),
    ("lin", "Lin"),
    ("polyester", "Polyester"),
    ("jean", "Jean"),
    ("laine", "Laine"),
    ("autre", "Autre"),
];

pub const COLOR_OPTIONS: [Choice; 13] = [
    ("blanc", "Blanc"),
    ("noir", "Noir"),
    ("bleu", "Bleu"),
    ("rouge", "Rouge"),
    ("vert", "Vert"),
    ("jaune", "Jaune"),
    ("orange", "Orange"),
    ("violet", "Violet"),
    ("rose", "Rose"),
    ("gris", "Gris"),
    ("marron", "Marron"),
    ("beige", "Beige"),
    ("multicolore", "Multicolore"),
];

/// Label for a fabric or color value, or the raw value when unknown
pub fn option_label(options: &[Choice], value: &str) -> String {
    options
        .iter()
        .find(|(v, _)| *v == value)
        .map(|(_, label)| label.to_string())
        .unwrap_or_else(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_labels() {
        let json = serde_json::to_string(&OrderStatus::Termine).unwrap();
        assert_eq!(json, "\"Terminé\"");
        let parsed: OrderStatus = serde_json::from_str("\"Livré\"").unwrap();
        assert_eq!(parsed, OrderStatus::Livre);
        assert_eq!(OrderStatus::parse("en cours"), Some(OrderStatus::EnCours));
        assert_eq!(OrderStatus::parse("perdu"), None);
    }

    #[test]
    fn test_create_omits_empty_optionals() {
        let body = serde_json::to_value(OrderCreate {
            customer_id: 1,
            date_commande: "2024-03-01".into(),
            date_rendez_vous: None,
            statut: OrderStatus::EnCours,
            notes: None,
            reduction: None,
            order_items: vec![],
        })
        .unwrap();
        assert!(body.get("dateRendezVous").is_none());
        assert!(body.get("reduction").is_none());
        assert_eq!(body["statut"], "En cours");
    }
}
