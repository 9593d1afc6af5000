//! Modeles (catalog) screen

use std::sync::Arc;

use async_trait::async_trait;
use atelier_client::{ClientError, ClientResult, ModeleApi, UploadFile};
use shared::FieldErrors;
use shared::models::{Modele, ModeleCreate, ModeleUpdate};
use shared::validation::{is_blank, parse_positive_amount, validate_image};

use super::lifecycle::{Listing, Resource, ResourceScreen};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModeleForm {
    pub price: String,
    /// Required on create, optional on edit
    pub image: Option<UploadFile>,
    /// Current image, shown while editing
    pub image_url: Option<String>,
}

pub struct ModeleResource {
    api: Arc<dyn ModeleApi>,
}

impl ModeleResource {
    pub fn new(api: Arc<dyn ModeleApi>) -> Self {
        Self { api }
    }
}

pub type ModelesScreen = ResourceScreen<ModeleResource>;

const PRICE_INVALID: &str = "Le prix doit être un nombre positif";

#[async_trait]
impl Resource for ModeleResource {
    type Summary = Modele;
    type Detail = Modele;
    type Form = ModeleForm;
    type Aux = ();

    fn name(&self) -> &'static str {
        "modeles"
    }

    fn id_of(modele: &Modele) -> i64 {
        modele.id
    }

    async fn list(&self) -> ClientResult<Listing<Modele>> {
        self.api.list_modeles().await.map(Listing::from)
    }

    fn new_form(&self) -> ModeleForm {
        ModeleForm::default()
    }

    async fn fetch(&self, id: i64) -> ClientResult<Modele> {
        self.api.get_modele(id).await
    }

    fn to_form(&self, modele: &Modele) -> ModeleForm {
        ModeleForm {
            price: modele.price.normalize().to_string(),
            image: None,
            image_url: modele.image_url.clone(),
        }
    }

    fn validate(&self, form: &ModeleForm, _aux: &(), editing: Option<i64>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        if is_blank(&form.price) {
            errors.add("price", "Le prix est requis");
        } else {
            errors.check(
                "price",
                parse_positive_amount(&form.price, PRICE_INVALID).map(drop),
            );
        }
        match &form.image {
            Some(image) => errors.check("imageFile", validate_image(&image.content_type, image.size())),
            None if editing.is_none() => errors.add("imageFile", "Une image est requise"),
            None => {}
        }
        errors
    }

    async fn create(&self, form: &ModeleForm, _aux: &()) -> ClientResult<()> {
        let price = parse_positive_amount(&form.price, PRICE_INVALID).map_err(ClientError::Validation)?;
        let image = form
            .image
            .clone()
            .ok_or_else(|| ClientError::Validation("Une image est requise".into()))?;
        self.api.create_modele(ModeleCreate { price }, image).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &ModeleForm, _aux: &()) -> ClientResult<()> {
        let price = parse_positive_amount(&form.price, PRICE_INVALID).map_err(ClientError::Validation)?;
        self.api
            .update_modele(id, ModeleUpdate { price: Some(price) }, form.image.clone())
            .await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete_modele(id).await
    }

    fn delete_prompt(&self, _id: i64) -> String {
        "Êtes-vous sûr de vouloir supprimer ce modèle ?".to_string()
    }
}
