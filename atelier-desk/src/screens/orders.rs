//! Orders screen
//!
//! The form edits line items against the catalog loaded alongside the list.
//! Totals shown while editing are a preview; the backend prices the order.

use std::sync::Arc;

use async_trait::async_trait;
use atelier_client::{ClientError, ClientResult, CustomerApi, ModeleApi, OrderApi};
use rust_decimal::Decimal;
use shared::FieldErrors;
use shared::format::{date_only, today};
use shared::models::{
    CustomerSummary, Modele, Order, OrderCreate, OrderItemRequest, OrderStatus, OrderSummary,
    OrderUpdate,
};
use shared::pricing::{self, PriceLine, PricePreview, catalog_price, check_reduction};
use shared::validation::{is_blank, non_blank, parse_amount, validate_quantity};

use super::lifecycle::{AuxLoad, Listing, Resource, ResourceScreen};

const CUSTOMER_REQUIRED: &str = "Veuillez sélectionner un client";

#[derive(Debug, Clone, PartialEq)]
pub struct OrderItemForm {
    pub modele_id: Option<i64>,
    pub type_tissu: String,
    pub couleur: String,
    pub quantite: u32,
    /// Price captured from the catalog when the modele was picked
    pub prix_unitaire: Decimal,
    pub notes: String,
}

impl Default for OrderItemForm {
    fn default() -> Self {
        Self {
            modele_id: None,
            type_tissu: String::new(),
            couleur: String::new(),
            quantite: 1,
            prix_unitaire: Decimal::ZERO,
            notes: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderForm {
    pub customer_id: Option<i64>,
    pub date_commande: String,
    pub date_rendez_vous: String,
    pub statut: OrderStatus,
    pub notes: String,
    pub has_reduction: bool,
    pub reduction: String,
    pub items: Vec<OrderItemForm>,
}

impl OrderForm {
    pub fn new() -> Self {
        Self {
            customer_id: None,
            date_commande: today(),
            date_rendez_vous: String::new(),
            statut: OrderStatus::EnCours,
            notes: String::new(),
            has_reduction: false,
            reduction: String::new(),
            items: Vec::new(),
        }
    }

    pub fn add_item(&mut self) -> usize {
        self.items.push(OrderItemForm::default());
        self.items.len() - 1
    }

    pub fn remove_item(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Pick a modele for a line; the line takes the modele's catalog price
    pub fn select_modele(&mut self, index: usize, modele_id: i64, catalog: &[Modele]) -> bool {
        let Some(item) = self.items.get_mut(index) else {
            return false;
        };
        item.modele_id = Some(modele_id);
        if let Some(price) = catalog_price(catalog, modele_id) {
            item.prix_unitaire = price;
        }
        true
    }

    /// Reduction to apply, when enabled and readable
    pub fn reduction_value(&self) -> Option<Decimal> {
        if !self.has_reduction || is_blank(&self.reduction) {
            return None;
        }
        parse_amount(&self.reduction)
    }

    fn price_lines(&self) -> Vec<PriceLine> {
        self.items
            .iter()
            .map(|item| PriceLine {
                modele_id: item.modele_id,
                prix_unitaire: item.prix_unitaire,
                quantite: item.quantite,
            })
            .collect()
    }

    pub fn preview(&self, catalog: &[Modele]) -> PricePreview {
        pricing::preview(catalog, &self.price_lines(), self.reduction_value())
    }

    /// Line items as sent to the backend; lines without a modele are skipped
    pub fn item_requests(&self) -> Vec<OrderItemRequest> {
        self.items
            .iter()
            .filter_map(|item| {
                Some(OrderItemRequest {
                    modele_id: item.modele_id?,
                    type_tissu: item.type_tissu.trim().to_string(),
                    couleur: item.couleur.trim().to_string(),
                    quantite: item.quantite,
                    notes: non_blank(&item.notes),
                })
            })
            .collect()
    }

    fn to_create(&self) -> ClientResult<OrderCreate> {
        let Some(customer_id) = self.customer_id else {
            return Err(ClientError::Validation(CUSTOMER_REQUIRED.into()));
        };
        Ok(OrderCreate {
            customer_id,
            date_commande: self.date_commande.trim().to_string(),
            date_rendez_vous: non_blank(&self.date_rendez_vous),
            statut: self.statut,
            notes: non_blank(&self.notes),
            reduction: self.reduction_value(),
            order_items: self.item_requests(),
        })
    }
}

impl Default for OrderForm {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&Order> for OrderForm {
    fn from(order: &Order) -> Self {
        Self {
            customer_id: Some(order.customer_id),
            date_commande: date_only(&order.date_commande).to_string(),
            date_rendez_vous: order
                .date_rendez_vous
                .as_deref()
                .map(|d| date_only(d).to_string())
                .unwrap_or_default(),
            statut: order.statut,
            notes: order.notes.clone().unwrap_or_default(),
            has_reduction: order.reduction.is_some_and(|r| r > Decimal::ZERO),
            reduction: order
                .reduction
                .map(|r| r.normalize().to_string())
                .unwrap_or_default(),
            items: order
                .order_items
                .iter()
                .map(|item| OrderItemForm {
                    modele_id: Some(item.modele_id),
                    type_tissu: item.type_tissu.clone(),
                    couleur: item.couleur.clone(),
                    quantite: item.quantite,
                    prix_unitaire: item.prix_unitaire,
                    notes: item.notes.clone().unwrap_or_default(),
                })
                .collect(),
        }
    }
}

/// Dropdown data of the order form
#[derive(Debug, Clone, Default)]
pub struct OrderAux {
    pub customers: Vec<CustomerSummary>,
    pub catalog: Vec<Modele>,
}

/// Which orders the list shows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    pub customer_id: Option<i64>,
}

pub struct OrderResource {
    orders: Arc<dyn OrderApi>,
    customers: Arc<dyn CustomerApi>,
    modeles: Arc<dyn ModeleApi>,
    pub filter: OrderFilter,
}

impl OrderResource {
    pub fn new(
        orders: Arc<dyn OrderApi>,
        customers: Arc<dyn CustomerApi>,
        modeles: Arc<dyn ModeleApi>,
    ) -> Self {
        Self {
            orders,
            customers,
            modeles,
            filter: OrderFilter::default(),
        }
    }
}

pub type OrdersScreen = ResourceScreen<OrderResource>;

#[async_trait]
impl Resource for OrderResource {
    type Summary = OrderSummary;
    type Detail = Order;
    type Form = OrderForm;
    type Aux = OrderAux;

    fn name(&self) -> &'static str {
        "orders"
    }

    fn id_of(order: &OrderSummary) -> i64 {
        order.id
    }

    async fn list(&self) -> ClientResult<Listing<OrderSummary>> {
        let orders = match self.filter {
            OrderFilter {
                status: Some(status),
                customer_id,
            } => {
                let mut orders = self.orders.orders_by_status(status).await?;
                if let Some(customer_id) = customer_id {
                    orders.retain(|o| o.customer_id == customer_id);
                }
                orders
            }
            OrderFilter {
                status: None,
                customer_id: Some(customer_id),
            } => self.orders.orders_by_customer(customer_id).await?,
            OrderFilter {
                status: None,
                customer_id: None,
            } => self.orders.list_orders().await?,
        };
        Ok(orders.into())
    }

    async fn load_aux(&self) -> AuxLoad<OrderAux> {
        let (customers, catalog) =
            tokio::join!(self.customers.list_customers(), self.modeles.list_modeles());
        let mut load = AuxLoad::<OrderAux>::default();
        match customers {
            Ok(customers) => load.data.customers = customers,
            Err(e) => load.error = Some(e),
        }
        match catalog {
            Ok(catalog) => load.data.catalog = catalog,
            Err(e) => {
                load.error.get_or_insert(e);
            }
        }
        load
    }

    fn new_form(&self) -> OrderForm {
        OrderForm::new()
    }

    async fn fetch(&self, id: i64) -> ClientResult<Order> {
        self.orders.get_order(id).await
    }

    fn to_form(&self, order: &Order) -> OrderForm {
        OrderForm::from(order)
    }

    fn validate(&self, form: &OrderForm, aux: &OrderAux, _editing: Option<i64>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if form.customer_id.is_none_or(|id| id <= 0) {
            errors.add("customerId", CUSTOMER_REQUIRED);
        }
        errors.require("dateCommande", &form.date_commande, "La date de commande est requise");

        if form.items.is_empty() {
            errors.add("orderItems", "Au moins un article est requis");
        }
        for (index, item) in form.items.iter().enumerate() {
            let problem = if item.modele_id.is_none_or(|id| id <= 0) {
                Err("Veuillez sélectionner un modèle".to_string())
            } else if is_blank(&item.type_tissu) {
                Err("Le type de tissu est requis".to_string())
            } else if is_blank(&item.couleur) {
                Err("La couleur est requise".to_string())
            } else {
                validate_quantity(item.quantite)
            };
            if let Err(message) = problem {
                errors.add(format!("orderItems[{index}]"), format!("Article {}: {message}", index + 1));
            }
        }

        if form.has_reduction && !is_blank(&form.reduction) {
            match parse_amount(&form.reduction) {
                Some(reduction) => {
                    let total = form.preview(&aux.catalog).total;
                    errors.check("reduction", check_reduction(total, reduction));
                }
                None => errors.add("reduction", "La réduction doit être un nombre"),
            }
        }
        errors
    }

    async fn create(&self, form: &OrderForm, _aux: &OrderAux) -> ClientResult<()> {
        let request = form.to_create()?;
        self.orders.create_order(&request).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &OrderForm, _aux: &OrderAux) -> ClientResult<()> {
        let request = form.to_create()?;
        self.orders.update_order(id, &OrderUpdate::from(request)).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.orders.delete_order(id).await
    }

    fn delete_prompt(&self, _id: i64) -> String {
        "Êtes-vous sûr de vouloir supprimer cette commande ?".to_string()
    }
}

/// Totals computed by the backend for the open form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub total: Decimal,
    pub final_total: Decimal,
}

impl ResourceScreen<OrderResource> {
    /// Change the list filter and reload
    pub async fn set_filter(&mut self, filter: OrderFilter) {
        self.resource.filter = filter;
        self.load().await;
    }

    /// Status quick-update from the list
    pub async fn update_status(&mut self, id: i64, status: OrderStatus) -> bool {
        match self.resource.orders.update_order_status(id, status).await {
            Ok(()) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.report("update_status", e);
                false
            }
        }
    }

    /// Preview of the open form against the loaded catalog
    pub fn preview(&self) -> Option<PricePreview> {
        self.modal
            .as_ref()
            .map(|modal| modal.form.preview(&self.aux.catalog))
    }

    /// Ask the backend to price the open form
    pub async fn quote(&mut self) -> Option<Quote> {
        let (items, reduction) = {
            let modal = self.modal.as_ref()?;
            (modal.form.item_requests(), modal.form.reduction_value())
        };
        let api = &self.resource.orders;
        let result = async {
            let total = api.calculate_total(&items).await?;
            let final_total = api.calculate_final_total(total, reduction).await?;
            ClientResult::Ok(Quote { total, final_total })
        }
        .await;
        match result {
            Ok(quote) => Some(quote),
            Err(e) => {
                self.report("quote", e);
                None
            }
        }
    }

    pub fn customer_name(&self, customer_id: i64) -> Option<&str> {
        self.aux
            .customers
            .iter()
            .find(|c| c.id == customer_id)
            .map(|c| c.name.as_str())
    }
}
