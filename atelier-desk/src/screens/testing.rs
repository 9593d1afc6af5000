//! In-memory backend for screen tests

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use atelier_client::{
    AuthApi, ClientError, ClientResult, CustomerApi, ModeleApi, OrderApi, TransactionApi,
    UploadFile, UserApi,
};
use rust_decimal::Decimal;
use shared::models::*;

/// Records every call by operation name; operations listed in `failing`
/// answer with a 500 carrying `"{operation} a échoué"`.
#[derive(Default)]
pub struct FakeBackend {
    calls: Mutex<Vec<&'static str>>,
    failing: Mutex<HashSet<&'static str>>,
    pub customers: Mutex<Vec<CustomerSummary>>,
    pub measure: Mutex<Option<Measure>>,
    pub saved_measures: Mutex<Option<MeasureValues>>,
    pub modeles: Mutex<Vec<Modele>>,
    pub orders: Mutex<Vec<OrderSummary>>,
    pub created_orders: Mutex<Vec<OrderCreate>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub created_transactions: Mutex<Vec<TransactionCreate>>,
    pub weekly: Mutex<WeeklyTransactions>,
    pub users: Mutex<Vec<User>>,
    pub taken: Mutex<HashSet<String>>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_on(&self, operation: &'static str) {
        self.failing.lock().unwrap().insert(operation);
    }

    pub fn recover(&self, operation: &'static str) {
        self.failing.lock().unwrap().remove(operation);
    }

    pub fn count(&self, operation: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == operation).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    fn call(&self, operation: &'static str) -> ClientResult<()> {
        self.calls.lock().unwrap().push(operation);
        if self.failing.lock().unwrap().contains(operation) {
            return Err(ClientError::Api {
                status: 500,
                message: Some(format!("{operation} a échoué")),
            });
        }
        Ok(())
    }
}

// ── Fixtures ────────────────────────────────────────────────────────

pub fn customer(id: i64, name: &str) -> CustomerSummary {
    CustomerSummary {
        id,
        name: name.into(),
        phone_number: "77 123 45 67".into(),
        photo_url: None,
        created_at: "2024-01-05T10:00:00".into(),
        has_measures: false,
    }
}

pub fn modele(id: i64, price: i64) -> Modele {
    Modele {
        id,
        nom: None,
        price: Decimal::from(price),
        image_url: Some(format!("/uploads/modele-{id}.jpg")),
        description: None,
        created_at: None,
        updated_at: None,
    }
}

pub fn order(id: i64, customer_name: &str, statut: OrderStatus, rdv: Option<&str>) -> OrderSummary {
    OrderSummary {
        id,
        customer_id: 1,
        customer_name: customer_name.into(),
        date_commande: "2024-03-01T00:00:00".into(),
        date_rendez_vous: rdv.map(str::to_string),
        total: Decimal::from(10000),
        reduction: None,
        total_final: Decimal::from(10000),
        statut,
        nombre_items: 1,
        created_at: None,
    }
}

pub fn transaction(id: i64, kind: TransactionType, montant: i64, date: &str) -> Transaction {
    let montant = Decimal::from(montant);
    Transaction {
        id,
        montant,
        kind,
        description: format!("Opération {id}"),
        categorie: None,
        mode_paiement: Some(PaymentMode::Especes),
        date_transaction: date.into(),
        created_at: None,
        updated_at: None,
        user_id: None,
        notes: None,
        montant_avec_signe: match kind {
            TransactionType::Entree => montant,
            TransactionType::Sortie => -montant,
        },
    }
}

pub fn user(id: i64, user_name: &str) -> User {
    User {
        id,
        name: "Awa Diop".into(),
        user_name: user_name.into(),
        email: format!("{user_name}@atelier.sn"),
        phone: None,
        role: ROLE_USER.into(),
        country: None,
        city: None,
        status: true,
        picture: None,
        created_at: None,
    }
}

fn customer_detail(summary: &CustomerSummary, measure: Option<Measure>) -> Customer {
    Customer {
        id: summary.id,
        name: summary.name.clone(),
        phone_number: summary.phone_number.clone(),
        photo_url: summary.photo_url.clone(),
        created_at: summary.created_at.clone(),
        updated_at: summary.created_at.clone(),
        measure,
    }
}

fn not_found() -> ClientError {
    ClientError::Api {
        status: 404,
        message: Some("Introuvable".into()),
    }
}

// ── Trait impls ─────────────────────────────────────────────────────

#[async_trait]
impl AuthApi for FakeBackend {
    async fn login(&self, request: &LoginRequest) -> ClientResult<User> {
        self.call("login")?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.user_name == request.email_or_username || u.email == request.email_or_username)
            .cloned()
            .ok_or(ClientError::Rejected {
                message: Some("Identifiants invalides".into()),
            })
    }
}

#[async_trait]
impl CustomerApi for FakeBackend {
    async fn list_customers(&self) -> ClientResult<Vec<CustomerSummary>> {
        self.call("list_customers")?;
        Ok(self.customers.lock().unwrap().clone())
    }

    async fn get_customer(&self, id: i64) -> ClientResult<Customer> {
        self.call("get_customer")?;
        let measure = self.measure.lock().unwrap().clone();
        self.customers
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .map(|c| customer_detail(c, measure))
            .ok_or_else(not_found)
    }

    async fn create_customer(
        &self,
        request: CustomerCreate,
        _photo: Option<UploadFile>,
    ) -> ClientResult<Customer> {
        self.call("create_customer")?;
        let mut customers = self.customers.lock().unwrap();
        let mut summary = customer(customers.len() as i64 + 1, &request.name);
        summary.phone_number = request.phone_number;
        customers.push(summary.clone());
        Ok(customer_detail(&summary, None))
    }

    async fn update_customer(
        &self,
        id: i64,
        request: CustomerUpdate,
        _photo: Option<UploadFile>,
    ) -> ClientResult<Customer> {
        self.call("update_customer")?;
        let mut customers = self.customers.lock().unwrap();
        let summary = customers.iter_mut().find(|c| c.id == id).ok_or_else(not_found)?;
        if let Some(name) = request.name {
            summary.name = name;
        }
        if let Some(phone) = request.phone_number {
            summary.phone_number = phone;
        }
        Ok(customer_detail(summary, None))
    }

    async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        self.call("delete_customer")?;
        self.customers.lock().unwrap().retain(|c| c.id != id);
        Ok(())
    }

    async fn get_measures(&self, _customer_id: i64) -> ClientResult<Option<Measure>> {
        self.call("get_measures")?;
        Ok(self.measure.lock().unwrap().clone())
    }

    async fn save_measures(
        &self,
        customer_id: i64,
        values: MeasureValues,
    ) -> ClientResult<Measure> {
        self.call("save_measures")?;
        *self.saved_measures.lock().unwrap() = Some(values.clone());
        let measure = Measure {
            id: 1,
            customer_id,
            values,
            created_at: "2024-01-05T10:00:00".into(),
            updated_at: "2024-01-05T10:00:00".into(),
        };
        *self.measure.lock().unwrap() = Some(measure.clone());
        Ok(measure)
    }

    async fn delete_measures(&self, _customer_id: i64) -> ClientResult<()> {
        self.call("delete_measures")?;
        *self.measure.lock().unwrap() = None;
        Ok(())
    }
}

#[async_trait]
impl ModeleApi for FakeBackend {
    async fn list_modeles(&self) -> ClientResult<Vec<Modele>> {
        self.call("list_modeles")?;
        Ok(self.modeles.lock().unwrap().clone())
    }

    async fn get_modele(&self, id: i64) -> ClientResult<Modele> {
        self.call("get_modele")?;
        self.modeles
            .lock()
            .unwrap()
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_modele(&self, request: ModeleCreate, _image: UploadFile) -> ClientResult<Modele> {
        self.call("create_modele")?;
        let mut modeles = self.modeles.lock().unwrap();
        let created = modele(modeles.len() as i64 + 1, 0);
        let created = Modele {
            price: request.price,
            ..created
        };
        modeles.push(created.clone());
        Ok(created)
    }

    async fn update_modele(
        &self,
        id: i64,
        request: ModeleUpdate,
        _image: Option<UploadFile>,
    ) -> ClientResult<Modele> {
        self.call("update_modele")?;
        let mut modeles = self.modeles.lock().unwrap();
        let found = modeles.iter_mut().find(|m| m.id == id).ok_or_else(not_found)?;
        if let Some(price) = request.price {
            found.price = price;
        }
        Ok(found.clone())
    }

    async fn delete_modele(&self, id: i64) -> ClientResult<()> {
        self.call("delete_modele")?;
        self.modeles.lock().unwrap().retain(|m| m.id != id);
        Ok(())
    }
}

#[async_trait]
impl OrderApi for FakeBackend {
    async fn list_orders(&self) -> ClientResult<Vec<OrderSummary>> {
        self.call("list_orders")?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn get_order(&self, id: i64) -> ClientResult<Order> {
        self.call("get_order")?;
        let orders = self.orders.lock().unwrap();
        let summary = orders.iter().find(|o| o.id == id).ok_or_else(not_found)?;
        Ok(Order {
            id: summary.id,
            customer_id: summary.customer_id,
            customer_name: summary.customer_name.clone(),
            date_commande: summary.date_commande.clone(),
            date_rendez_vous: summary.date_rendez_vous.clone(),
            total: summary.total,
            reduction: summary.reduction,
            total_final: summary.total_final,
            statut: summary.statut,
            notes: None,
            order_items: vec![OrderItem {
                id: 1,
                modele_id: 1,
                type_tissu: "bazin".into(),
                couleur: "bleu".into(),
                prix_unitaire: Decimal::from(5000),
                quantite: 2,
                notes: None,
            }],
            created_at: None,
            updated_at: None,
        })
    }

    async fn create_order(&self, request: &OrderCreate) -> ClientResult<Order> {
        self.call("create_order")?;
        self.created_orders.lock().unwrap().push(request.clone());
        let id = {
            let mut orders = self.orders.lock().unwrap();
            let id = orders.len() as i64 + 1;
            orders.push(order(id, "Nouveau", request.statut, None));
            id
        };
        self.get_order(id).await
    }

    async fn update_order(&self, id: i64, request: &OrderUpdate) -> ClientResult<Order> {
        self.call("update_order")?;
        if let Some(statut) = request.statut
            && let Some(found) = self.orders.lock().unwrap().iter_mut().find(|o| o.id == id)
        {
            found.statut = statut;
        }
        self.get_order(id).await
    }

    async fn delete_order(&self, id: i64) -> ClientResult<()> {
        self.call("delete_order")?;
        self.orders.lock().unwrap().retain(|o| o.id != id);
        Ok(())
    }

    async fn update_order_status(&self, id: i64, status: OrderStatus) -> ClientResult<()> {
        self.call("update_order_status")?;
        let mut orders = self.orders.lock().unwrap();
        let found = orders.iter_mut().find(|o| o.id == id).ok_or_else(not_found)?;
        found.statut = status;
        Ok(())
    }

    async fn orders_with_appointments(
        &self,
        _start_date: Option<&str>,
        _end_date: Option<&str>,
    ) -> ClientResult<Vec<OrderSummary>> {
        self.call("orders_with_appointments")?;
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn orders_by_customer(&self, customer_id: i64) -> ClientResult<Vec<OrderSummary>> {
        self.call("orders_by_customer")?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.customer_id == customer_id)
            .cloned()
            .collect())
    }

    async fn orders_by_status(&self, status: OrderStatus) -> ClientResult<Vec<OrderSummary>> {
        self.call("orders_by_status")?;
        Ok(self
            .orders
            .lock()
            .unwrap()
            .iter()
            .filter(|o| o.statut == status)
            .cloned()
            .collect())
    }

    async fn calculate_total(&self, items: &[OrderItemRequest]) -> ClientResult<Decimal> {
        self.call("calculate_total")?;
        let modeles = self.modeles.lock().unwrap();
        Ok(items
            .iter()
            .map(|item| {
                let price = modeles
                    .iter()
                    .find(|m| m.id == item.modele_id)
                    .map(|m| m.price)
                    .unwrap_or_default();
                price * Decimal::from(item.quantite)
            })
            .sum())
    }

    async fn calculate_final_total(
        &self,
        total: Decimal,
        reduction: Option<Decimal>,
    ) -> ClientResult<Decimal> {
        self.call("calculate_final_total")?;
        Ok((total - reduction.unwrap_or_default()).max(Decimal::ZERO))
    }
}

#[async_trait]
impl TransactionApi for FakeBackend {
    async fn list_transactions(
        &self,
        _filters: &TransactionFilters,
    ) -> ClientResult<Vec<Transaction>> {
        self.call("list_transactions")?;
        Ok(self.transactions.lock().unwrap().clone())
    }

    async fn get_transaction(&self, id: i64) -> ClientResult<Transaction> {
        self.call("get_transaction")?;
        self.transactions
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_transaction(&self, request: &TransactionCreate) -> ClientResult<Transaction> {
        self.call("create_transaction")?;
        self.created_transactions.lock().unwrap().push(request.clone());
        let mut transactions = self.transactions.lock().unwrap();
        let mut created = transaction(
            transactions.len() as i64 + 1,
            request.kind,
            0,
            request.date_transaction.as_deref().unwrap_or("2024-05-02"),
        );
        created.montant = request.montant;
        transactions.push(created.clone());
        Ok(created)
    }

    async fn update_transaction(
        &self,
        id: i64,
        request: &TransactionUpdate,
    ) -> ClientResult<Transaction> {
        self.call("update_transaction")?;
        let mut transactions = self.transactions.lock().unwrap();
        let found = transactions.iter_mut().find(|t| t.id == id).ok_or_else(not_found)?;
        if let Some(description) = &request.description {
            found.description = description.clone();
        }
        Ok(found.clone())
    }

    async fn delete_transaction(&self, id: i64) -> ClientResult<()> {
        self.call("delete_transaction")?;
        self.transactions.lock().unwrap().retain(|t| t.id != id);
        Ok(())
    }

    async fn statistics(&self, _period: &PeriodQuery) -> ClientResult<CashStatistics> {
        self.call("statistics")?;
        let transactions = self.transactions.lock().unwrap();
        let sum = |kind| {
            transactions
                .iter()
                .filter(|t| t.kind == kind)
                .map(|t| t.montant)
                .sum::<Decimal>()
        };
        let entrees = sum(TransactionType::Entree);
        let sorties = sum(TransactionType::Sortie);
        Ok(CashStatistics {
            total_entrees: entrees,
            total_sorties: sorties,
            solde: entrees - sorties,
            nombre_transactions: transactions.len() as u32,
            moyenne_transactions: Decimal::ZERO,
            periode_debut: None,
            periode_fin: None,
        })
    }

    async fn categories(&self) -> ClientResult<Vec<String>> {
        self.call("categories")?;
        Ok(vec!["Vente".into(), "Transport".into()])
    }

    async fn transactions_by_week(&self, _period: &PeriodQuery) -> ClientResult<WeeklyTransactions> {
        self.call("transactions_by_week")?;
        Ok(self.weekly.lock().unwrap().clone())
    }
}

#[async_trait]
impl UserApi for FakeBackend {
    async fn list_users(&self, _filters: &UserFilters) -> ClientResult<UserList> {
        self.call("list_users")?;
        let users = self.users.lock().unwrap().clone();
        Ok(UserList {
            success: true,
            message: None,
            total_count: users.len() as u64,
            users,
        })
    }

    async fn get_user(&self, id: i64) -> ClientResult<User> {
        self.call("get_user")?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn current_user(&self, user_id: i64) -> ClientResult<User> {
        self.call("current_user")?;
        self.users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_user(&self, request: &UserCreate) -> ClientResult<UserOperation> {
        self.call("create_user")?;
        let mut users = self.users.lock().unwrap();
        let mut created = user(users.len() as i64 + 1, &request.user_name);
        created.name = request.name.clone();
        created.role = request.role.clone();
        users.push(created.clone());
        Ok(UserOperation {
            success: true,
            message: None,
            user: Some(created),
        })
    }

    async fn update_user(&self, id: i64, request: &UserUpdate) -> ClientResult<UserOperation> {
        self.call("update_user")?;
        let mut users = self.users.lock().unwrap();
        let found = users.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
        found.name = request.name.clone();
        found.role = request.role.clone();
        Ok(UserOperation {
            success: true,
            message: None,
            user: Some(found.clone()),
        })
    }

    async fn delete_user(&self, id: i64) -> ClientResult<()> {
        self.call("delete_user")?;
        self.users.lock().unwrap().retain(|u| u.id != id);
        Ok(())
    }

    async fn change_password(&self, _id: i64, _request: &ChangePassword) -> ClientResult<()> {
        self.call("change_password")
    }

    async fn toggle_user_status(&self, id: i64) -> ClientResult<UserOperation> {
        self.call("toggle_user_status")?;
        let mut users = self.users.lock().unwrap();
        let found = users.iter_mut().find(|u| u.id == id).ok_or_else(not_found)?;
        found.status = !found.status;
        Ok(UserOperation {
            success: true,
            message: None,
            user: Some(found.clone()),
        })
    }

    async fn email_exists(&self, email: &str) -> ClientResult<bool> {
        self.call("email_exists")?;
        Ok(self.taken.lock().unwrap().contains(email))
    }

    async fn user_name_exists(&self, user_name: &str) -> ClientResult<bool> {
        self.call("user_name_exists")?;
        Ok(self.taken.lock().unwrap().contains(user_name))
    }
}
