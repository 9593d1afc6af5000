//! Weekly grouping of the cash ledger
//!
//! Transactions are bucketed by ISO year and ISO week (Monday to Sunday).
//! Weeks come out oldest first; the net balance of a week is the sum of the
//! server-computed signed amounts.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};
use rust_decimal::Decimal;

use crate::format::parse_date;
use crate::models::{
    GrandTotals, Transaction, TransactionType, TransactionWeek, WeekTotals, WeeklyTransactions,
};

/// `(ISO year, ISO week)`
pub type WeekKey = (i32, u32);

pub fn week_key_of(date: NaiveDate) -> WeekKey {
    let iso = date.iso_week();
    (iso.year(), iso.week())
}

pub fn week_key(week: &TransactionWeek) -> WeekKey {
    (week.annee, week.numero_semaine)
}

/// Monday and Sunday of an ISO week
pub fn week_bounds(key: WeekKey) -> Option<(NaiveDate, NaiveDate)> {
    let (year, week) = key;
    let monday = NaiveDate::from_isoywd_opt(year, week, Weekday::Mon)?;
    let sunday = NaiveDate::from_isoywd_opt(year, week, Weekday::Sun)?;
    Some((monday, sunday))
}

pub fn week_totals(transactions: &[Transaction]) -> WeekTotals {
    let mut totals = WeekTotals::default();
    for tx in transactions {
        totals.nombre_transactions += 1;
        match tx.kind {
            TransactionType::Entree => {
                totals.nombre_entrees += 1;
                totals.total_entrees += tx.montant.abs();
            }
            TransactionType::Sortie => {
                totals.nombre_sorties += 1;
                totals.total_sorties += tx.montant.abs();
            }
        }
        totals.solde_net += tx.montant_avec_signe;
    }
    totals
}

/// Group transactions by ISO week, oldest week first
///
/// Transactions whose date cannot be read are left out.
pub fn group_by_iso_week(transactions: Vec<Transaction>) -> WeeklyTransactions {
    let mut buckets: BTreeMap<WeekKey, Vec<(NaiveDate, Transaction)>> = BTreeMap::new();
    for tx in transactions {
        match parse_date(&tx.date_transaction) {
            Some(date) => buckets.entry(week_key_of(date)).or_default().push((date, tx)),
            None => tracing::warn!(
                id = tx.id,
                date = %tx.date_transaction,
                "Skipping transaction with unreadable date"
            ),
        }
    }

    let mut semaines = Vec::with_capacity(buckets.len());
    for (key, mut dated) in buckets {
        let Some((monday, sunday)) = week_bounds(key) else {
            continue;
        };
        dated.sort_by_key(|(date, _)| *date);
        let transactions: Vec<Transaction> = dated.into_iter().map(|(_, tx)| tx).collect();
        semaines.push(TransactionWeek {
            annee: key.0,
            numero_semaine: key.1,
            debut_semaine: monday.format("%Y-%m-%d").to_string(),
            fin_semaine: sunday.format("%Y-%m-%d").to_string(),
            totaux: week_totals(&transactions),
            transactions,
        });
    }

    let totaux_generaux = grand_totals(&semaines);
    WeeklyTransactions {
        semaines,
        totaux_generaux,
    }
}

pub fn grand_totals(semaines: &[TransactionWeek]) -> GrandTotals {
    let mut totals = GrandTotals {
        nombre_semaines: semaines.len() as u32,
        periode_debut: semaines.first().map(|w| w.debut_semaine.clone()),
        periode_fin: semaines.last().map(|w| w.fin_semaine.clone()),
        ..Default::default()
    };
    for week in semaines {
        totals.nombre_transactions_total += week.totaux.nombre_transactions;
        totals.total_entrees_generales += week.totaux.total_entrees;
        totals.total_sorties_generales += week.totaux.total_sorties;
        totals.solde_net_general += week.totaux.solde_net;
    }
    totals
}

/// Key of the most recent week, opened by default after a load
pub fn latest_week(grouped: &WeeklyTransactions) -> Option<WeekKey> {
    grouped.semaines.last().map(week_key)
}

/// Sum of signed amounts, used as a cross-check of the net balance
pub fn signed_sum(transactions: &[Transaction]) -> Decimal {
    transactions.iter().map(|tx| tx.montant_avec_signe).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(id: i64, kind: TransactionType, montant: i64, date: &str) -> Transaction {
        let signed = match kind {
            TransactionType::Entree => montant,
            TransactionType::Sortie => -montant,
        };
        Transaction {
            id,
            montant: Decimal::from(montant),
            kind,
            description: format!("tx {id}"),
            categorie: None,
            mode_paiement: None,
            date_transaction: date.to_string(),
            created_at: None,
            updated_at: None,
            user_id: None,
            notes: None,
            montant_avec_signe: Decimal::from(signed),
        }
    }

    #[test]
    fn test_same_iso_week_forms_one_group() {
        // 2024-01-01 is a Monday, 2024-01-07 the Sunday of ISO week 1
        let grouped = group_by_iso_week(vec![
            tx(1, TransactionType::Entree, 10000, "2024-01-07T18:00:00"),
            tx(2, TransactionType::Sortie, 2500, "2024-01-01T08:00:00"),
            tx(3, TransactionType::Entree, 4000, "2024-01-03"),
        ]);

        assert_eq!(grouped.semaines.len(), 1);
        let week = &grouped.semaines[0];
        assert_eq!(week_key(week), (2024, 1));
        assert_eq!(week.debut_semaine, "2024-01-01");
        assert_eq!(week.fin_semaine, "2024-01-07");
        assert_eq!(week.transactions[0].id, 2);
        assert_eq!(week.totaux.nombre_transactions, 3);
        assert_eq!(week.totaux.nombre_entrees, 2);
        assert_eq!(week.totaux.nombre_sorties, 1);
        assert_eq!(week.totaux.total_entrees, Decimal::from(14000));
        assert_eq!(week.totaux.total_sorties, Decimal::from(2500));
        assert_eq!(week.totaux.solde_net, signed_sum(&week.transactions));
        assert_eq!(week.totaux.solde_net, Decimal::from(11500));
    }

    #[test]
    fn test_weeks_ordered_oldest_first_across_years() {
        // 2020-12-31 belongs to ISO week 53 of 2020, 2021-01-04 to week 1 of 2021
        let grouped = group_by_iso_week(vec![
            tx(1, TransactionType::Entree, 100, "2021-01-04"),
            tx(2, TransactionType::Entree, 200, "2020-12-31"),
        ]);

        let keys: Vec<_> = grouped.semaines.iter().map(week_key).collect();
        assert_eq!(keys, vec![(2020, 53), (2021, 1)]);
        assert_eq!(latest_week(&grouped), Some((2021, 1)));

        let totals = &grouped.totaux_generaux;
        assert_eq!(totals.nombre_semaines, 2);
        assert_eq!(totals.nombre_transactions_total, 2);
        assert_eq!(totals.solde_net_general, Decimal::from(300));
        assert_eq!(totals.periode_debut.as_deref(), Some("2020-12-28"));
        assert_eq!(totals.periode_fin.as_deref(), Some("2021-01-10"));
    }

    #[test]
    fn test_unreadable_dates_are_skipped() {
        let grouped = group_by_iso_week(vec![tx(1, TransactionType::Entree, 100, "bientôt")]);
        assert!(grouped.semaines.is_empty());
        assert_eq!(latest_week(&grouped), None);
        assert_eq!(grouped.totaux_generaux.nombre_semaines, 0);
    }
}
