//! Dashboard home: the featured-model carousel

use std::sync::Arc;

use atelier_client::ModeleApi;

use super::carousel::Carousel;

pub struct DashboardScreen {
    api: Arc<dyn ModeleApi>,
    pub carousel: Carousel,
    pub error: Option<String>,
}

impl DashboardScreen {
    pub fn new(api: Arc<dyn ModeleApi>) -> Self {
        Self {
            api,
            carousel: Carousel::default(),
            error: None,
        }
    }

    /// Feature every catalog entry that has an image
    pub async fn load(&mut self) {
        self.error = None;
        match self.api.list_modeles().await {
            Ok(modeles) => {
                let images = modeles.into_iter().filter_map(|m| m.image_url).collect();
                self.carousel = Carousel::new(images);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Featured models unavailable");
                self.error = Some(e.user_message());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{FakeBackend, modele};

    #[tokio::test]
    async fn test_only_modeles_with_images_are_featured() {
        let backend = Arc::new(FakeBackend::new());
        let mut bare = modele(3, 1000);
        bare.image_url = None;
        backend
            .modeles
            .lock()
            .unwrap()
            .extend([modele(1, 5000), modele(2, 3000), bare]);

        let mut screen = DashboardScreen::new(backend);
        screen.load().await;
        assert_eq!(screen.carousel.len(), 2);
        assert!(!screen.carousel.scrolls());
    }
}
