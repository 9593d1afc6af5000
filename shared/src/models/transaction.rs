//! Transaction Model (cash ledger)

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entry or exit of the cash register
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    #[default]
    Entree,
    Sortie,
}

impl TransactionType {
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Entree => "ENTREE",
            TransactionType::Sortie => "SORTIE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TransactionType::Entree => "Entrée",
            TransactionType::Sortie => "Sortie",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_uppercase().as_str() {
            "ENTREE" | "ENTRÉE" => Some(TransactionType::Entree),
            "SORTIE" => Some(TransactionType::Sortie),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMode {
    Especes,
    Carte,
    Virement,
    Cheque,
}

impl PaymentMode {
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Especes,
        PaymentMode::Carte,
        PaymentMode::Virement,
        PaymentMode::Cheque,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Especes => "ESPECES",
            PaymentMode::Carte => "CARTE",
            PaymentMode::Virement => "VIREMENT",
            PaymentMode::Cheque => "CHEQUE",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMode::Especes => "Espèces",
            PaymentMode::Carte => "Carte",
            PaymentMode::Virement => "Virement",
            PaymentMode::Cheque => "Chèque",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_uppercase();
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

/// Ledger entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    pub montant: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    pub categorie: Option<String>,
    pub mode_paiement: Option<PaymentMode>,
    pub date_transaction: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub notes: Option<String>,
    /// Server-computed: positive for entries, negative for exits
    pub montant_avec_signe: Decimal,
}

/// Create transaction payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionCreate {
    pub montant: Decimal,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_paiement: Option<PaymentMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_transaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Update transaction payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub montant: Option<Decimal>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_paiement: Option<PaymentMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_transaction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl From<TransactionCreate> for TransactionUpdate {
    fn from(create: TransactionCreate) -> Self {
        Self {
            montant: Some(create.montant),
            kind: Some(create.kind),
            description: Some(create.description),
            categorie: create.categorie,
            mode_paiement: create.mode_paiement,
            date_transaction: create.date_transaction,
            notes: create.notes,
        }
    }
}

/// Sort direction for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// List filters, sent as query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionFilters {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<TransactionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorie: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub montant_min: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub montant_max: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode_paiement: Option<PaymentMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recherche: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_direction: Option<SortDirection>,
}

impl TransactionFilters {
    /// Default listing of the cash screen: first page of 20, newest first
    pub fn cash_screen() -> Self {
        Self {
            page: Some(1),
            page_size: Some(20),
            order_by: Some("dateTransaction".into()),
            order_direction: Some(SortDirection::Desc),
            ..Default::default()
        }
    }
}

/// Period bounds for statistics and weekly grouping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_debut: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_fin: Option<String>,
}

/// Aggregate statistics of the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashStatistics {
    pub total_entrees: Decimal,
    pub total_sorties: Decimal,
    pub solde: Decimal,
    pub nombre_transactions: u32,
    pub moyenne_transactions: Decimal,
    pub periode_debut: Option<String>,
    pub periode_fin: Option<String>,
}

/// Totals of one ISO week
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotals {
    pub nombre_transactions: u32,
    pub nombre_entrees: u32,
    pub nombre_sorties: u32,
    pub total_entrees: Decimal,
    pub total_sorties: Decimal,
    pub solde_net: Decimal,
}

/// Transactions of one ISO week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionWeek {
    pub annee: i32,
    pub numero_semaine: u32,
    pub debut_semaine: String,
    pub fin_semaine: String,
    pub transactions: Vec<Transaction>,
    pub totaux: WeekTotals,
}

/// Totals over every week of a grouping
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrandTotals {
    pub nombre_semaines: u32,
    pub nombre_transactions_total: u32,
    pub total_entrees_generales: Decimal,
    pub total_sorties_generales: Decimal,
    pub solde_net_general: Decimal,
    pub periode_debut: Option<String>,
    pub periode_fin: Option<String>,
}

/// Week-grouped ledger, oldest week first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTransactions {
    pub semaines: Vec<TransactionWeek>,
    pub totaux_generaux: GrandTotals,
}

pub const CATEGORY_SUGGESTIONS: [&str; 12] = [
    "Vente",
    "Achat matières premières",
    "Frais généraux",
    "Transport",
    "Électricité",
    "Eau",
    "Téléphone/Internet",
    "Assurance",
    "Maintenance",
    "Publicité",
    "Formation",
    "Autres",
];
