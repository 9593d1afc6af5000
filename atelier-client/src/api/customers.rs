use async_trait::async_trait;
use reqwest::multipart::Form;
use shared::models::{
    Customer, CustomerCreate, CustomerSummary, CustomerUpdate, Measure, MeasureUpsert,
    MeasureValues,
};

use crate::error::fallback;
use crate::{AtelierClient, ClientResult, UploadFile};

#[async_trait]
pub trait CustomerApi: Send + Sync {
    async fn list_customers(&self) -> ClientResult<Vec<CustomerSummary>>;

    /// Customer with its measures
    async fn get_customer(&self, id: i64) -> ClientResult<Customer>;

    async fn create_customer(
        &self,
        request: CustomerCreate,
        photo: Option<UploadFile>,
    ) -> ClientResult<Customer>;

    async fn update_customer(
        &self,
        id: i64,
        request: CustomerUpdate,
        photo: Option<UploadFile>,
    ) -> ClientResult<Customer>;

    async fn delete_customer(&self, id: i64) -> ClientResult<()>;

    /// `None` when the customer has never been measured
    async fn get_measures(&self, customer_id: i64) -> ClientResult<Option<Measure>>;

    /// Create or replace the customer's measures
    async fn save_measures(&self, customer_id: i64, values: MeasureValues)
    -> ClientResult<Measure>;

    async fn delete_measures(&self, customer_id: i64) -> ClientResult<()>;
}

fn photo_part(form: Form, photo: Option<UploadFile>) -> ClientResult<Form> {
    match photo {
        Some(photo) => {
            photo.validate()?;
            Ok(form.part("PhotoFile", photo.into_part()?))
        }
        None => Ok(form),
    }
}

#[async_trait]
impl CustomerApi for AtelierClient {
    async fn list_customers(&self) -> ClientResult<Vec<CustomerSummary>> {
        self.http()
            .get(&["customers"])
            .await
            .map_err(fallback("Erreur lors de la récupération des clients"))
    }

    async fn get_customer(&self, id: i64) -> ClientResult<Customer> {
        self.http()
            .get(&["customers", &id.to_string()])
            .await
            .map_err(fallback("Client non trouvé"))
    }

    async fn create_customer(
        &self,
        request: CustomerCreate,
        photo: Option<UploadFile>,
    ) -> ClientResult<Customer> {
        let on_error = fallback("Erreur lors de la création du client");
        let form = Form::new()
            .text("Name", request.name)
            .text("PhoneNumber", request.phone_number);
        let form = match photo_part(form, photo) {
            Ok(form) => form,
            Err(e) => return Err(on_error(e)),
        };
        self.http()
            .post_multipart(&["customers"], form)
            .await
            .map_err(on_error)
    }

    async fn update_customer(
        &self,
        id: i64,
        request: CustomerUpdate,
        photo: Option<UploadFile>,
    ) -> ClientResult<Customer> {
        let on_error = fallback("Erreur lors de la mise à jour du client");
        let mut form = Form::new();
        if let Some(name) = request.name {
            form = form.text("Name", name);
        }
        if let Some(phone_number) = request.phone_number {
            form = form.text("PhoneNumber", phone_number);
        }
        let form = match photo_part(form, photo) {
            Ok(form) => form,
            Err(e) => return Err(on_error(e)),
        };
        self.http()
            .put_multipart(&["customers", &id.to_string()], form)
            .await
            .map_err(on_error)
    }

    async fn delete_customer(&self, id: i64) -> ClientResult<()> {
        self.http()
            .delete(&["customers", &id.to_string()])
            .await
            .map_err(fallback("Erreur lors de la suppression du client"))
    }

    async fn get_measures(&self, customer_id: i64) -> ClientResult<Option<Measure>> {
        match self
            .http()
            .get::<Option<Measure>>(&["customers", &customer_id.to_string(), "measures"])
            .await
        {
            Ok(measure) => Ok(measure),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e.with_fallback("Mesures non trouvées pour ce client")),
        }
    }

    async fn save_measures(
        &self,
        customer_id: i64,
        values: MeasureValues,
    ) -> ClientResult<Measure> {
        let body = MeasureUpsert {
            customer_id,
            values,
        };
        self.http()
            .post(&["customers", &customer_id.to_string(), "measures"], &body)
            .await
            .map_err(fallback("Erreur lors de la gestion des mesures"))
    }

    async fn delete_measures(&self, customer_id: i64) -> ClientResult<()> {
        self.http()
            .delete(&["customers", &customer_id.to_string(), "measures"])
            .await
            .map_err(fallback("Erreur lors de la suppression des mesures"))
    }
}
