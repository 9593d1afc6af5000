//! Order price preview
//!
//! The backend computes the authoritative totals. The order form only shows a
//! running preview while items are edited:
//!
//! - line price is the current catalog price when the modele is known,
//!   otherwise the price captured on the line
//! - final total is `max(0, total - reduction)` when a reduction is set

use rust_decimal::Decimal;

use crate::models::Modele;

/// One order line as seen by the preview
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceLine {
    pub modele_id: Option<i64>,
    pub prix_unitaire: Decimal,
    pub quantite: u32,
}

/// Running totals shown under the order form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PricePreview {
    pub total: Decimal,
    pub final_total: Decimal,
}

/// Current catalog price of a modele, if it is in the catalog
pub fn catalog_price(catalog: &[Modele], modele_id: i64) -> Option<Decimal> {
    catalog.iter().find(|m| m.id == modele_id).map(|m| m.price)
}

/// Unit price used by the preview for one line
pub fn unit_price(catalog: &[Modele], line: &PriceLine) -> Decimal {
    line.modele_id
        .and_then(|id| catalog_price(catalog, id))
        .unwrap_or(line.prix_unitaire)
}

/// `Σ price × quantite`
pub fn order_total(catalog: &[Modele], lines: &[PriceLine]) -> Decimal {
    lines
        .iter()
        .map(|line| unit_price(catalog, line) * Decimal::from(line.quantite))
        .sum()
}

/// Total after reduction, never negative
pub fn final_total(total: Decimal, reduction: Option<Decimal>) -> Decimal {
    match reduction {
        Some(r) => (total - r).max(Decimal::ZERO),
        None => total,
    }
}

/// A reduction must be non-negative and cannot exceed the raw total
pub fn check_reduction(total: Decimal, reduction: Decimal) -> Result<(), String> {
    if reduction < Decimal::ZERO {
        return Err("La réduction ne peut pas être négative".into());
    }
    if reduction > total {
        return Err("La réduction ne peut pas être supérieure au total".into());
    }
    Ok(())
}

pub fn preview(catalog: &[Modele], lines: &[PriceLine], reduction: Option<Decimal>) -> PricePreview {
    let total = order_total(catalog, lines);
    PricePreview {
        total,
        final_total: final_total(total, reduction),
    }
}
