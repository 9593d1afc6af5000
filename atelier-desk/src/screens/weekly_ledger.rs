//! Weekly ledger screen (Caisse par semaine)

use std::collections::BTreeSet;
use std::sync::Arc;

use atelier_client::{ClientResult, TransactionApi};
use shared::format::{days_ago, today};
use shared::ledger::{WeekKey, group_by_iso_week, latest_week, week_key};
use shared::models::{PeriodQuery, TransactionFilters, TransactionWeek, WeeklyTransactions};

/// Days covered by the default range
pub const DEFAULT_RANGE_DAYS: i64 = 30;

/// Where the weeks are computed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Grouping {
    /// Fetch the transactions and bucket them here
    #[default]
    Local,
    /// Ask the backend for its own grouping
    Server,
}

pub struct WeeklyLedgerScreen {
    api: Arc<dyn TransactionApi>,
    pub date_debut: String,
    pub date_fin: String,
    pub grouping: Grouping,
    pub grouped: Option<WeeklyTransactions>,
    pub open_weeks: BTreeSet<WeekKey>,
    pub loading: bool,
    pub error: Option<String>,
}

impl WeeklyLedgerScreen {
    pub fn new(api: Arc<dyn TransactionApi>) -> Self {
        Self {
            api,
            date_debut: days_ago(DEFAULT_RANGE_DAYS),
            date_fin: today(),
            grouping: Grouping::default(),
            grouped: None,
            open_weeks: BTreeSet::new(),
            loading: false,
            error: None,
        }
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    async fn fetch(&self) -> ClientResult<WeeklyTransactions> {
        match self.grouping {
            Grouping::Local => {
                let filters = TransactionFilters {
                    date_debut: Some(self.date_debut.clone()),
                    date_fin: Some(self.date_fin.clone()),
                    ..Default::default()
                };
                let transactions = self.api.list_transactions(&filters).await?;
                Ok(group_by_iso_week(transactions))
            }
            Grouping::Server => {
                let period = PeriodQuery {
                    date_debut: Some(self.date_debut.clone()),
                    date_fin: Some(self.date_fin.clone()),
                };
                self.api.transactions_by_week(&period).await
            }
        }
    }

    /// Load the range; only the most recent week starts expanded
    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self.fetch().await {
            Ok(grouped) => {
                tracing::debug!(weeks = grouped.semaines.len(), "Weekly ledger loaded");
                self.open_weeks = latest_week(&grouped).into_iter().collect();
                self.grouped = Some(grouped);
            }
            Err(e) => {
                tracing::error!(error = %e, "Weekly ledger load failed");
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
    }

    /// Change the range and reload
    pub async fn set_range(&mut self, date_debut: impl Into<String>, date_fin: impl Into<String>) {
        self.date_debut = date_debut.into();
        self.date_fin = date_fin.into();
        self.load().await;
    }

    pub fn toggle_week(&mut self, key: WeekKey) {
        if !self.open_weeks.remove(&key) {
            self.open_weeks.insert(key);
        }
    }

    pub fn is_open(&self, key: WeekKey) -> bool {
        self.open_weeks.contains(&key)
    }

    /// Weeks, most recent first, as displayed
    pub fn weeks(&self) -> impl Iterator<Item = &TransactionWeek> {
        self.grouped
            .iter()
            .flat_map(|g| g.semaines.iter().rev())
    }

    pub fn week(&self, key: WeekKey) -> Option<&TransactionWeek> {
        self.grouped
            .as_ref()?
            .semaines
            .iter()
            .find(|w| week_key(w) == key)
    }
}
