use async_trait::async_trait;
use shared::models::{
    CashStatistics, PeriodQuery, Transaction, TransactionCreate, TransactionFilters,
    TransactionUpdate, WeeklyTransactions,
};

use crate::error::fallback;
use crate::{AtelierClient, ClientResult};

#[async_trait]
pub trait TransactionApi: Send + Sync {
    async fn list_transactions(&self, filters: &TransactionFilters)
    -> ClientResult<Vec<Transaction>>;

    async fn get_transaction(&self, id: i64) -> ClientResult<Transaction>;

    async fn create_transaction(&self, request: &TransactionCreate) -> ClientResult<Transaction>;

    async fn update_transaction(
        &self,
        id: i64,
        request: &TransactionUpdate,
    ) -> ClientResult<Transaction>;

    async fn delete_transaction(&self, id: i64) -> ClientResult<()>;

    async fn statistics(&self, period: &PeriodQuery) -> ClientResult<CashStatistics>;

    /// Categories already used in the ledger
    async fn categories(&self) -> ClientResult<Vec<String>>;

    /// Server-side weekly grouping
    async fn transactions_by_week(&self, period: &PeriodQuery)
    -> ClientResult<WeeklyTransactions>;
}

#[async_trait]
impl TransactionApi for AtelierClient {
    async fn list_transactions(
        &self,
        filters: &TransactionFilters,
    ) -> ClientResult<Vec<Transaction>> {
        self.http()
            .get_query(&["transactions"], filters)
            .await
            .map_err(fallback("Erreur lors du chargement des transactions"))
    }

    async fn get_transaction(&self, id: i64) -> ClientResult<Transaction> {
        self.http()
            .get(&["transactions", &id.to_string()])
            .await
            .map_err(fallback("Transaction non trouvée"))
    }

    async fn create_transaction(&self, request: &TransactionCreate) -> ClientResult<Transaction> {
        self.http()
            .post(&["transactions"], request)
            .await
            .map_err(fallback("Erreur lors de la création de la transaction"))
    }

    async fn update_transaction(
        &self,
        id: i64,
        request: &TransactionUpdate,
    ) -> ClientResult<Transaction> {
        self.http()
            .put(&["transactions", &id.to_string()], request)
            .await
            .map_err(fallback("Erreur lors de la mise à jour de la transaction"))
    }

    async fn delete_transaction(&self, id: i64) -> ClientResult<()> {
        self.http()
            .delete(&["transactions", &id.to_string()])
            .await
            .map_err(fallback("Erreur lors de la suppression de la transaction"))
    }

    async fn statistics(&self, period: &PeriodQuery) -> ClientResult<CashStatistics> {
        self.http()
            .get_query(&["transactions", "statistiques"], period)
            .await
            .map_err(fallback("Erreur lors du chargement des statistiques"))
    }

    async fn categories(&self) -> ClientResult<Vec<String>> {
        self.http()
            .get(&["transactions", "categories"])
            .await
            .map_err(fallback("Erreur lors du chargement des catégories"))
    }

    async fn transactions_by_week(
        &self,
        period: &PeriodQuery,
    ) -> ClientResult<WeeklyTransactions> {
        self.http()
            .get_query(&["transactions", "par-semaine"], period)
            .await
            .map_err(fallback(
                "Erreur lors du chargement des transactions par semaine",
            ))
    }
}
