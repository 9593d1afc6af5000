use async_trait::async_trait;
use reqwest::multipart::Form;
use shared::models::{Modele, ModeleCreate, ModeleUpdate};

use crate::error::fallback;
use crate::{AtelierClient, ClientResult, UploadFile};

#[async_trait]
pub trait ModeleApi: Send + Sync {
    async fn list_modeles(&self) -> ClientResult<Vec<Modele>>;

    async fn get_modele(&self, id: i64) -> ClientResult<Modele>;

    /// A new catalog entry always comes with its image
    async fn create_modele(&self, request: ModeleCreate, image: UploadFile)
    -> ClientResult<Modele>;

    async fn update_modele(
        &self,
        id: i64,
        request: ModeleUpdate,
        image: Option<UploadFile>,
    ) -> ClientResult<Modele>;

    async fn delete_modele(&self, id: i64) -> ClientResult<()>;
}

fn image_part(form: Form, image: UploadFile) -> ClientResult<Form> {
    image.validate()?;
    Ok(form.part("ImageFile", image.into_part()?))
}

#[async_trait]
impl ModeleApi for AtelierClient {
    async fn list_modeles(&self) -> ClientResult<Vec<Modele>> {
        self.http()
            .get(&["modeles"])
            .await
            .map_err(fallback("Erreur lors de la récupération des modèles"))
    }

    async fn get_modele(&self, id: i64) -> ClientResult<Modele> {
        self.http()
            .get(&["modeles", &id.to_string()])
            .await
            .map_err(fallback("Modèle non trouvé"))
    }

    async fn create_modele(
        &self,
        request: ModeleCreate,
        image: UploadFile,
    ) -> ClientResult<Modele> {
        let on_error = fallback("Erreur lors de la création du modèle");
        let form = Form::new().text("Price", request.price.to_string());
        let form = match image_part(form, image) {
            Ok(form) => form,
            Err(e) => return Err(on_error(e)),
        };
        self.http()
            .post_multipart(&["modeles"], form)
            .await
            .map_err(on_error)
    }

    async fn update_modele(
        &self,
        id: i64,
        request: ModeleUpdate,
        image: Option<UploadFile>,
    ) -> ClientResult<Modele> {
        let on_error = fallback("Erreur lors de la mise à jour du modèle");
        let mut form = Form::new();
        if let Some(price) = request.price {
            form = form.text("Price", price.to_string());
        }
        if let Some(image) = image {
            form = match image_part(form, image) {
                Ok(form) => form,
                Err(e) => return Err(on_error(e)),
            };
        }
        self.http()
            .put_multipart(&["modeles", &id.to_string()], form)
            .await
            .map_err(on_error)
    }

    async fn delete_modele(&self, id: i64) -> ClientResult<()> {
        self.http()
            .delete(&["modeles", &id.to_string()])
            .await
            .map_err(fallback("Erreur lors de la suppression du modèle"))
    }
}
