use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{
    FinalTotalCalculation, FinalTotalRequest, Order, OrderCreate, OrderItemRequest,
    OrderStatus, OrderStatusUpdate, OrderSummary, OrderUpdate, TotalCalculation,
};

use crate::error::fallback;
use crate::{AtelierClient, ClientResult};

#[async_trait]
pub trait OrderApi: Send + Sync {
    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>>;

    /// Order with its line items
    async fn get_order(&self, id: i64) -> ClientResult<Order>;

    async fn create_order(&self, request: &OrderCreate) -> ClientResult<Order>;

    async fn update_order(&self, id: i64, request: &OrderUpdate) -> ClientResult<Order>;

    async fn delete_order(&self, id: i64) -> ClientResult<()>;

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> ClientResult<()>;

    /// Orders with a pickup appointment, optionally bounded (`YYYY-MM-DD`)
    async fn orders_with_appointments(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ClientResult<Vec<OrderSummary>>;

    async fn orders_by_customer(&self, customer_id: i64) -> ClientResult<Vec<OrderSummary>>;

    async fn orders_by_status(&self, status: OrderStatus) -> ClientResult<Vec<OrderSummary>>;

    /// Authoritative raw total of a set of line items
    async fn calculate_total(&self, items: &[OrderItemRequest]) -> ClientResult<Decimal>;

    /// Authoritative total after reduction
    async fn calculate_final_total(
        &self,
        total: Decimal,
        reduction: Option<Decimal>,
    ) -> ClientResult<Decimal>;
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AppointmentRange<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    start_date: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    end_date: Option<&'a str>,
}

#[async_trait]
impl OrderApi for AtelierClient {
    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        self.http()
            .get(&["orders"])
            .await
            .map_err(fallback("Erreur lors de la récupération des commandes"))
    }

    async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.http()
            .get(&["orders", &id.to_string()])
            .await
            .map_err(fallback("Commande non trouvée"))
    }

    async fn create_order(&self, request: &OrderCreate) -> ClientResult<Order> {
        self.http()
            .post(&["orders"], request)
            .await
            .map_err(fallback("Erreur lors de la création de la commande"))
    }

    async fn update_order(&self, id: i64, request: &OrderUpdate) -> ClientResult<Order> {
        self.http()
            .put(&["orders", &id.to_string()], request)
            .await
            .map_err(fallback("Erreur lors de la mise à jour de la commande"))
    }

    async fn delete_order(&self, id: i64) -> ClientResult<()> {
        self.http()
            .delete(&["orders", &id.to_string()])
            .await
            .map_err(fallback("Erreur lors de la suppression de la commande"))
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> ClientResult<()> {
        self.http()
            .patch(&["orders", &id.to_string(), "status"], &OrderStatusUpdate { status })
            .await
            .map_err(fallback("Erreur lors de la mise à jour du statut"))
    }

    async fn orders_with_appointments(
        &self,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ClientResult<Vec<OrderSummary>> {
        let range = AppointmentRange {
            start_date,
            end_date,
        };
        self.http()
            .get_query(&["orders", "appointments"], &range)
            .await
            .map_err(fallback("Erreur lors du chargement des rendez-vous"))
    }

    async fn orders_by_customer(&self, customer_id: i64) -> ClientResult<Vec<OrderSummary>> {
        self.http()
            .get(&["orders", "customer", &customer_id.to_string()])
            .await
            .map_err(fallback(
                "Erreur lors de la récupération des commandes du client",
            ))
    }

    async fn orders_by_status(&self, status: OrderStatus) -> ClientResult<Vec<OrderSummary>> {
        self.http()
            .get(&["orders", "status", status.as_str()])
            .await
            .map_err(fallback(
                "Erreur lors de la récupération des commandes par statut",
            ))
    }

    async fn calculate_total(&self, items: &[OrderItemRequest]) -> ClientResult<Decimal> {
        let result: TotalCalculation = self
            .http()
            .post(&["orders", "calculate-total"], items)
            .await
            .map_err(fallback("Erreur lors du calcul du total"))?;
        Ok(result.total)
    }

    async fn calculate_final_total(
        &self,
        total: Decimal,
        reduction: Option<Decimal>,
    ) -> ClientResult<Decimal> {
        let result: FinalTotalCalculation = self
            .http()
            .post(
                &["orders", "calculate-final-total"],
                &FinalTotalRequest { total, reduction },
            )
            .await
            .map_err(fallback("Erreur lors du calcul du total final"))?;
        Ok(result.final_total)
    }
}
