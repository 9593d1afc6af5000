//! Customers screen and the measurement sheet

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use atelier_client::{ClientResult, CustomerApi, UploadFile};
use shared::FieldErrors;
use shared::models::{Customer, CustomerCreate, CustomerSummary, CustomerUpdate, MeasureField, MeasureValues};
use shared::validation::{
    is_blank, parse_measure, validate_customer_name, validate_image, validate_phone,
};

use super::lifecycle::{Confirm, DeleteOutcome, Listing, Resource, ResourceScreen, SubmitOutcome};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomerForm {
    pub name: String,
    pub phone_number: String,
    /// New photo; `None` keeps the current one
    pub photo: Option<UploadFile>,
}

pub struct CustomerResource {
    api: Arc<dyn CustomerApi>,
}

impl CustomerResource {
    pub fn new(api: Arc<dyn CustomerApi>) -> Self {
        Self { api }
    }
}

pub type CustomersScreen = ResourceScreen<CustomerResource>;

#[async_trait]
impl Resource for CustomerResource {
    type Summary = CustomerSummary;
    type Detail = Customer;
    type Form = CustomerForm;
    type Aux = ();

    fn name(&self) -> &'static str {
        "customers"
    }

    fn id_of(summary: &CustomerSummary) -> i64 {
        summary.id
    }

    async fn list(&self) -> ClientResult<Listing<CustomerSummary>> {
        self.api.list_customers().await.map(Listing::from)
    }

    fn new_form(&self) -> CustomerForm {
        CustomerForm::default()
    }

    async fn fetch(&self, id: i64) -> ClientResult<Customer> {
        self.api.get_customer(id).await
    }

    fn to_form(&self, customer: &Customer) -> CustomerForm {
        CustomerForm {
            name: customer.name.clone(),
            phone_number: customer.phone_number.clone(),
            photo: None,
        }
    }

    fn validate(&self, form: &CustomerForm, _aux: &(), _editing: Option<i64>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&form.name) {
            errors.add("name", "Le nom est requis");
        } else {
            errors.check("name", validate_customer_name(&form.name));
        }
        if is_blank(&form.phone_number) {
            errors.add("phoneNumber", "Le numéro de téléphone est requis");
        } else {
            errors.check("phoneNumber", validate_phone(form.phone_number.trim()));
        }
        if let Some(photo) = &form.photo {
            errors.check("photoFile", validate_image(&photo.content_type, photo.size()));
        }
        errors
    }

    async fn create(&self, form: &CustomerForm, _aux: &()) -> ClientResult<()> {
        let request = CustomerCreate {
            name: form.name.trim().to_string(),
            phone_number: form.phone_number.trim().to_string(),
        };
        self.api.create_customer(request, form.photo.clone()).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &CustomerForm, _aux: &()) -> ClientResult<()> {
        let request = CustomerUpdate {
            name: Some(form.name.trim().to_string()),
            phone_number: Some(form.phone_number.trim().to_string()),
        };
        self.api.update_customer(id, request, form.photo.clone()).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete_customer(id).await
    }

    fn delete_prompt(&self, _id: i64) -> String {
        "Êtes-vous sûr de vouloir supprimer ce client ?".to_string()
    }
}

/// Measurement form of one customer
///
/// Inputs are kept as typed; blank means "not measured".
#[derive(Debug, Clone)]
pub struct MeasureSheet {
    pub customer_id: i64,
    /// Measures already recorded on the server
    pub existing: bool,
    pub inputs: BTreeMap<MeasureField, String>,
    pub errors: FieldErrors,
}

impl MeasureSheet {
    pub fn blank(customer_id: i64) -> Self {
        Self {
            customer_id,
            existing: false,
            inputs: BTreeMap::new(),
            errors: FieldErrors::new(),
        }
    }

    pub fn from_values(customer_id: i64, values: &MeasureValues) -> Self {
        let inputs = MeasureField::ALL
            .into_iter()
            .filter_map(|field| values.get(field).map(|v| (field, v.to_string())))
            .collect();
        Self {
            customer_id,
            existing: true,
            inputs,
            errors: FieldErrors::new(),
        }
    }

    pub fn input(&self, field: MeasureField) -> &str {
        self.inputs.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set(&mut self, field: MeasureField, raw: impl Into<String>) {
        self.errors.remove(field.key());
        self.inputs.insert(field, raw.into());
    }

    /// Parsed values, or the per-field errors
    pub fn values(&self) -> Result<MeasureValues, FieldErrors> {
        let mut values = MeasureValues::default();
        let mut errors = FieldErrors::new();
        for field in MeasureField::ALL {
            match parse_measure(field, self.input(field)) {
                Ok(value) => values.set(field, value),
                Err(message) => errors.add(field.key(), message),
            }
        }
        errors.into_result().map(|()| values)
    }
}

impl ResourceScreen<CustomerResource> {
    /// Load the customer's measures; a customer never measured gets a blank sheet
    pub async fn open_measures(&mut self, customer_id: i64) -> Option<MeasureSheet> {
        match self.resource.api.get_measures(customer_id).await {
            Ok(Some(measure)) => Some(MeasureSheet::from_values(customer_id, &measure.values)),
            Ok(None) => Some(MeasureSheet::blank(customer_id)),
            Err(e) => {
                self.report("open_measures", e);
                None
            }
        }
    }

    /// Upsert the sheet, then reload the list (its "measured" column changes)
    pub async fn save_measures(&mut self, sheet: &mut MeasureSheet) -> SubmitOutcome {
        let values = match sheet.values() {
            Ok(values) => values,
            Err(errors) => {
                sheet.errors = errors;
                return SubmitOutcome::Blocked;
            }
        };
        sheet.errors = FieldErrors::new();

        match self.resource.api.save_measures(sheet.customer_id, values).await {
            Ok(_) => {
                sheet.existing = true;
                self.load().await;
                SubmitOutcome::Saved
            }
            Err(e) => {
                self.report("save_measures", e);
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn delete_measures(&mut self, customer_id: i64, confirm: &dyn Confirm) -> DeleteOutcome {
        if !confirm.confirm("Êtes-vous sûr de vouloir supprimer les mesures de ce client ?") {
            return DeleteOutcome::Cancelled;
        }
        match self.resource.api.delete_measures(customer_id).await {
            Ok(()) => {
                self.load().await;
                DeleteOutcome::Deleted
            }
            Err(e) => {
                self.report("delete_measures", e);
                DeleteOutcome::Failed
            }
        }
    }
}
