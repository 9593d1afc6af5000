//! Measure Model
//!
//! A customer's body measurements in centimetres. The backend stores at most
//! one set per customer and the client always writes it as a single upsert.

use serde::{Deserialize, Serialize};

/// One measurement slot of the tailoring sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeasureField {
    TourPoitrine,
    TourCeinture,
    LongueurManche,
    TourBras,
    LongueurChemise,
    LongueurPantalon,
    LargeurEpaules,
    TourCou,
    TourMachette,
    BasDuPied,
    Cuisse,
}

impl MeasureField {
    pub const ALL: [MeasureField; 11] = [
        MeasureField::TourPoitrine,
        MeasureField::TourCeinture,
        MeasureField::LongueurManche,
        MeasureField::TourBras,
        MeasureField::LongueurChemise,
        MeasureField::LongueurPantalon,
        MeasureField::LargeurEpaules,
        MeasureField::TourCou,
        MeasureField::TourMachette,
        MeasureField::BasDuPied,
        MeasureField::Cuisse,
    ];

    /// Wire / form key
    pub fn key(self) -> &'static str {
        match self {
            MeasureField::TourPoitrine => "tourPoitrine",
            MeasureField::TourCeinture => "tourCeinture",
            MeasureField::LongueurManche => "longueurManche",
            MeasureField::TourBras => "tourBras",
            MeasureField::LongueurChemise => "longueurChemise",
            MeasureField::LongueurPantalon => "longueurPantalon",
            MeasureField::LargeurEpaules => "largeurEpaules",
            MeasureField::TourCou => "tourCou",
            MeasureField::TourMachette => "tourMachette",
            MeasureField::BasDuPied => "basDuPied",
            MeasureField::Cuisse => "cuisse",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MeasureField::TourPoitrine => "Tour de poitrine",
            MeasureField::TourCeinture => "Tour ceinture",
            MeasureField::LongueurManche => "Longueur de manche",
            MeasureField::TourBras => "Tour de bras",
            MeasureField::LongueurChemise => "Longueur de chemise",
            MeasureField::LongueurPantalon => "Longueur de pantalon",
            MeasureField::LargeurEpaules => "Largeur d'épaules",
            MeasureField::TourCou => "Tour de cou",
            MeasureField::TourMachette => "Tour machette",
            MeasureField::BasDuPied => "Bas du pied",
            MeasureField::Cuisse => "Cuisse",
        }
    }

    /// Inclusive upper bound in cm (lower bound is always 0)
    pub fn max(self) -> f64 {
        match self {
            MeasureField::TourPoitrine | MeasureField::TourCeinture => 300.0,
            MeasureField::LongueurChemise => 200.0,
            MeasureField::LongueurManche
            | MeasureField::LongueurPantalon
            | MeasureField::Cuisse => 150.0,
            MeasureField::TourBras
            | MeasureField::LargeurEpaules
            | MeasureField::TourCou
            | MeasureField::TourMachette
            | MeasureField::BasDuPied => 100.0,
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }
}

/// The eleven measurement values, all optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureValues {
    pub tour_poitrine: Option<f64>,
    pub tour_ceinture: Option<f64>,
    pub longueur_manche: Option<f64>,
    pub tour_bras: Option<f64>,
    pub longueur_chemise: Option<f64>,
    pub longueur_pantalon: Option<f64>,
    pub largeur_epaules: Option<f64>,
    pub tour_cou: Option<f64>,
    pub tour_machette: Option<f64>,
    pub bas_du_pied: Option<f64>,
    pub cuisse: Option<f64>,
}

impl MeasureValues {
    pub fn get(&self, field: MeasureField) -> Option<f64> {
        match field {
            MeasureField::TourPoitrine => self.tour_poitrine,
            MeasureField::TourCeinture => self.tour_ceinture,
            MeasureField::LongueurManche => self.longueur_manche,
            MeasureField::TourBras => self.tour_bras,
            MeasureField::LongueurChemise => self.longueur_chemise,
            MeasureField::LongueurPantalon => self.longueur_pantalon,
            MeasureField::LargeurEpaules => self.largeur_epaules,
            MeasureField::TourCou => self.tour_cou,
            MeasureField::TourMachette => self.tour_machette,
            MeasureField::BasDuPied => self.bas_du_pied,
            MeasureField::Cuisse => self.cuisse,
        }
    }

    pub fn set(&mut self, field: MeasureField, value: Option<f64>) {
        let slot = match field {
            MeasureField::TourPoitrine => &mut self.tour_poitrine,
            MeasureField::TourCeinture => &mut self.tour_ceinture,
            MeasureField::LongueurManche => &mut self.longueur_manche,
            MeasureField::TourBras => &mut self.tour_bras,
            MeasureField::LongueurChemise => &mut self.longueur_chemise,
            MeasureField::LongueurPantalon => &mut self.longueur_pantalon,
            MeasureField::LargeurEpaules => &mut self.largeur_epaules,
            MeasureField::TourCou => &mut self.tour_cou,
            MeasureField::TourMachette => &mut self.tour_machette,
            MeasureField::BasDuPied => &mut self.bas_du_pied,
            MeasureField::Cuisse => &mut self.cuisse,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        MeasureField::ALL.iter().all(|f| self.get(*f).is_none())
    }
}

/// Measure entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Measure {
    pub id: i64,
    pub customer_id: i64,
    #[serde(flatten)]
    pub values: MeasureValues,
    pub created_at: String,
    pub updated_at: String,
}

/// Create-or-update measures payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasureUpsert {
    pub customer_id: i64,
    #[serde(flatten)]
    pub values: MeasureValues,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_keys_round_trip() {
        for field in MeasureField::ALL {
            assert_eq!(MeasureField::from_key(field.key()), Some(field));
        }
        assert_eq!(MeasureField::from_key("tourHanches"), None);
    }

    #[test]
    fn test_upsert_flattens_values() {
        let mut values = MeasureValues::default();
        values.set(MeasureField::TourCou, Some(38.5));
        let body = serde_json::to_value(MeasureUpsert {
            customer_id: 7,
            values,
        })
        .unwrap();

        assert_eq!(body["customerId"], 7);
        assert_eq!(body["tourCou"], 38.5);
        assert!(body["tourPoitrine"].is_null());
    }
}
