//! Cash ledger screen (Caisse)

use std::sync::Arc;

use async_trait::async_trait;
use atelier_client::{ClientError, ClientResult, TransactionApi};
use shared::FieldErrors;
use shared::format::{date_only, today};
use shared::models::{
    CATEGORY_SUGGESTIONS, CashStatistics, PaymentMode, PeriodQuery, Transaction,
    TransactionCreate, TransactionFilters, TransactionType, TransactionUpdate,
};
use shared::validation::{is_blank, non_blank, parse_positive_amount};

use super::lifecycle::{AuxLoad, Listing, Resource, ResourceScreen};

const AMOUNT_INVALID: &str = "Le montant doit être un nombre positif";

#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    pub montant: String,
    pub kind: TransactionType,
    pub description: String,
    pub categorie: String,
    pub mode_paiement: Option<PaymentMode>,
    pub date_transaction: String,
    pub notes: String,
}

impl Default for TransactionForm {
    fn default() -> Self {
        Self {
            montant: String::new(),
            kind: TransactionType::Entree,
            description: String::new(),
            categorie: String::new(),
            mode_paiement: Some(PaymentMode::Especes),
            date_transaction: today(),
            notes: String::new(),
        }
    }
}

impl TransactionForm {
    fn to_create(&self) -> Result<TransactionCreate, ClientError> {
        let montant =
            parse_positive_amount(&self.montant, AMOUNT_INVALID).map_err(ClientError::Validation)?;
        Ok(TransactionCreate {
            montant,
            kind: self.kind,
            description: self.description.trim().to_string(),
            categorie: non_blank(&self.categorie),
            mode_paiement: self.mode_paiement,
            date_transaction: non_blank(&self.date_transaction),
            notes: non_blank(&self.notes),
        })
    }
}

/// Statistics and category list shown beside the ledger
#[derive(Debug, Clone, Default)]
pub struct TransactionAux {
    pub statistics: Option<CashStatistics>,
    pub categories: Vec<String>,
}

pub struct TransactionResource {
    api: Arc<dyn TransactionApi>,
    pub filters: TransactionFilters,
}

impl TransactionResource {
    pub fn new(api: Arc<dyn TransactionApi>) -> Self {
        Self {
            api,
            filters: TransactionFilters::cash_screen(),
        }
    }

    fn period(&self) -> PeriodQuery {
        PeriodQuery {
            date_debut: self.filters.date_debut.clone(),
            date_fin: self.filters.date_fin.clone(),
        }
    }
}

pub type TransactionsScreen = ResourceScreen<TransactionResource>;

#[async_trait]
impl Resource for TransactionResource {
    type Summary = Transaction;
    type Detail = Transaction;
    type Form = TransactionForm;
    type Aux = TransactionAux;

    fn name(&self) -> &'static str {
        "transactions"
    }

    fn id_of(transaction: &Transaction) -> i64 {
        transaction.id
    }

    async fn list(&self) -> ClientResult<Listing<Transaction>> {
        self.api
            .list_transactions(&self.filters)
            .await
            .map(Listing::from)
    }

    async fn load_aux(&self) -> AuxLoad<TransactionAux> {
        let period = self.period();
        let (statistics, categories) =
            tokio::join!(self.api.statistics(&period), self.api.categories());
        let mut load = AuxLoad::<TransactionAux>::default();
        match statistics {
            Ok(statistics) => load.data.statistics = Some(statistics),
            Err(e) => load.error = Some(e),
        }
        match categories {
            Ok(categories) => load.data.categories = categories,
            Err(e) => {
                load.error.get_or_insert(e);
            }
        }
        load
    }

    fn new_form(&self) -> TransactionForm {
        TransactionForm::default()
    }

    async fn fetch(&self, id: i64) -> ClientResult<Transaction> {
        self.api.get_transaction(id).await
    }

    fn to_form(&self, transaction: &Transaction) -> TransactionForm {
        TransactionForm {
            montant: transaction.montant.normalize().to_string(),
            kind: transaction.kind,
            description: transaction.description.clone(),
            categorie: transaction.categorie.clone().unwrap_or_default(),
            mode_paiement: transaction.mode_paiement,
            date_transaction: date_only(&transaction.date_transaction).to_string(),
            notes: transaction.notes.clone().unwrap_or_default(),
        }
    }

    fn validate(&self, form: &TransactionForm, _aux: &TransactionAux, _editing: Option<i64>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&form.montant) {
            errors.add("montant", "Le montant est requis");
        } else {
            errors.check(
                "montant",
                parse_positive_amount(&form.montant, AMOUNT_INVALID).map(drop),
            );
        }
        errors.require("description", &form.description, "La description est requise");
        errors
    }

    async fn create(&self, form: &TransactionForm, _aux: &TransactionAux) -> ClientResult<()> {
        self.api.create_transaction(&form.to_create()?).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &TransactionForm, _aux: &TransactionAux) -> ClientResult<()> {
        let request = TransactionUpdate::from(form.to_create()?);
        self.api.update_transaction(id, &request).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete_transaction(id).await
    }

    fn delete_prompt(&self, _id: i64) -> String {
        "Êtes-vous sûr de vouloir supprimer cette transaction ?".to_string()
    }
}

impl ResourceScreen<TransactionResource> {
    pub async fn set_filters(&mut self, filters: TransactionFilters) {
        self.resource.filters = filters;
        self.load().await;
    }

    /// Categories offered by the form: those already used, then the usual ones
    pub fn category_options(&self) -> Vec<String> {
        let mut options = self.aux.categories.clone();
        for suggestion in CATEGORY_SUGGESTIONS {
            if !options.iter().any(|c| c == suggestion) {
                options.push(suggestion.to_string());
            }
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::lifecycle::SubmitOutcome;
    use crate::screens::testing::{FakeBackend, transaction};
    use rust_decimal::Decimal;

    fn screen(backend: &Arc<FakeBackend>) -> TransactionsScreen {
        TransactionsScreen::new(TransactionResource::new(backend.clone()))
    }

    #[tokio::test]
    async fn test_required_fields_block_submit() {
        let backend = Arc::new(FakeBackend::new());
        let mut screen = screen(&backend);

        screen.open_create();
        assert_eq!(screen.submit().await, SubmitOutcome::Blocked);
        let errors = screen.field_errors().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("montant"), Some("Le montant est requis"));
        assert_eq!(errors.get("description"), Some("La description est requise"));
        assert_eq!(backend.total_calls(), 0);

        screen.form_mut().unwrap().montant = "0".into();
        screen.submit().await;
        assert_eq!(screen.field_errors().unwrap().get("montant"), Some(AMOUNT_INVALID));
    }

    #[tokio::test]
    async fn test_load_brings_statistics_and_categories() {
        let backend = Arc::new(FakeBackend::new());
        backend.transactions.lock().unwrap().extend([
            transaction(1, TransactionType::Entree, 10000, "2024-05-02T09:00:00"),
            transaction(2, TransactionType::Sortie, 2500, "2024-05-03T09:00:00"),
        ]);
        let mut screen = screen(&backend);
        screen.load().await;

        assert_eq!(screen.items.len(), 2);
        let statistics = screen.aux.statistics.as_ref().unwrap();
        assert_eq!(statistics.solde, Decimal::from(7500));
        let options = screen.category_options();
        assert_eq!(options[0], "Vente");
        assert_eq!(options.iter().filter(|c| *c == "Vente").count(), 1);
        assert!(options.contains(&"Autres".to_string()));
    }

    #[tokio::test]
    async fn test_create_sends_trimmed_payload() {
        let backend = Arc::new(FakeBackend::new());
        let mut screen = screen(&backend);

        screen.open_create();
        let form = screen.form_mut().unwrap();
        form.montant = "2500,50".into();
        form.kind = TransactionType::Sortie;
        form.description = "  Fil et boutons ".into();

        assert_eq!(screen.submit().await, SubmitOutcome::Saved);
        let sent = backend.created_transactions.lock().unwrap()[0].clone();
        assert_eq!(sent.montant, Decimal::new(250050, 2));
        assert_eq!(sent.description, "Fil et boutons");
        assert_eq!(sent.categorie, None);
        assert_eq!(sent.date_transaction, Some(today()));
        assert_eq!(backend.count("list_transactions"), 1);
        assert!(screen.modal.is_none());
    }
}
