//! Users administration screen

use std::sync::Arc;

use async_trait::async_trait;
use atelier_client::{ClientResult, UserApi};
use shared::badge::{role_color, user_status_text};
use shared::models::{ChangePassword, ROLE_USER, User, UserCreate, UserFilters, UserUpdate};
use shared::validation::{is_blank, non_blank, validate_email, validate_new_password};
use shared::{FieldErrors, Pagination};

use super::lifecycle::{FormMode, Listing, Resource, ResourceScreen, SubmitOutcome};

#[derive(Debug, Clone, PartialEq)]
pub struct UserForm {
    pub name: String,
    pub user_name: String,
    pub email: String,
    pub phone: String,
    /// Only used when creating
    pub password: String,
    pub role: String,
    pub country: String,
    pub city: String,
    pub status: bool,
    pub picture: String,
}

impl Default for UserForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            user_name: String::new(),
            email: String::new(),
            phone: String::new(),
            password: String::new(),
            role: ROLE_USER.to_string(),
            country: String::new(),
            city: String::new(),
            status: true,
            picture: String::new(),
        }
    }
}

impl From<&User> for UserForm {
    fn from(user: &User) -> Self {
        Self {
            name: user.name.clone(),
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            password: String::new(),
            role: user.role.clone(),
            country: user.country.clone().unwrap_or_default(),
            city: user.city.clone().unwrap_or_default(),
            status: user.status,
            picture: user.picture.clone().unwrap_or_default(),
        }
    }
}

impl UserForm {
    fn to_update(&self) -> UserUpdate {
        UserUpdate {
            name: self.name.trim().to_string(),
            user_name: self.user_name.trim().to_string(),
            phone: non_blank(&self.phone),
            email: self.email.trim().to_string(),
            role: self.role.clone(),
            country: non_blank(&self.country),
            city: non_blank(&self.city),
            status: self.status,
            picture: non_blank(&self.picture),
        }
    }

    fn to_create(&self) -> UserCreate {
        let update = self.to_update();
        UserCreate {
            name: update.name,
            user_name: update.user_name,
            phone: update.phone,
            email: update.email,
            password: self.password.clone(),
            role: update.role,
            country: update.country,
            city: update.city,
            status: update.status,
            picture: update.picture,
        }
    }
}

pub struct UserResource {
    api: Arc<dyn UserApi>,
    pub filters: UserFilters,
}

impl UserResource {
    pub fn new(api: Arc<dyn UserApi>) -> Self {
        Self {
            api,
            filters: UserFilters::default(),
        }
    }
}

pub type UsersScreen = ResourceScreen<UserResource>;

#[async_trait]
impl Resource for UserResource {
    type Summary = User;
    type Detail = User;
    type Form = UserForm;
    type Aux = ();

    fn name(&self) -> &'static str {
        "users"
    }

    fn id_of(user: &User) -> i64 {
        user.id
    }

    async fn list(&self) -> ClientResult<Listing<User>> {
        let list = self.api.list_users(&self.filters).await?;
        Ok(Listing {
            items: list.users,
            total: Some(list.total_count),
        })
    }

    fn new_form(&self) -> UserForm {
        UserForm::default()
    }

    async fn fetch(&self, id: i64) -> ClientResult<User> {
        self.api.get_user(id).await
    }

    fn to_form(&self, user: &User) -> UserForm {
        UserForm::from(user)
    }

    fn validate(&self, form: &UserForm, _aux: &(), editing: Option<i64>) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require("name", &form.name, "Le nom est requis");
        errors.require("userName", &form.user_name, "Le nom d'utilisateur est requis");
        if is_blank(&form.email) {
            errors.add("email", "L'email est requis");
        } else {
            errors.check("email", validate_email(&form.email));
        }
        if editing.is_none() {
            errors.require("password", &form.password, "Le mot de passe est requis");
        }
        errors
    }

    async fn create(&self, form: &UserForm, _aux: &()) -> ClientResult<()> {
        self.api.create_user(&form.to_create()).await?;
        Ok(())
    }

    async fn update(&self, id: i64, form: &UserForm, _aux: &()) -> ClientResult<()> {
        self.api.update_user(id, &form.to_update()).await?;
        Ok(())
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.api.delete_user(id).await
    }

    fn delete_prompt(&self, _id: i64) -> String {
        "Êtes-vous sûr de vouloir supprimer cet utilisateur ?".to_string()
    }
}

/// Change-password dialog of one account
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
    pub confirm_password: String,
    pub errors: FieldErrors,
}

impl PasswordChange {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();
        errors.require(
            "currentPassword",
            &self.current_password,
            "Le mot de passe actuel est requis",
        );
        for (field, message) in validate_new_password(&self.new_password, &self.confirm_password).iter() {
            errors.add(field, message);
        }
        errors
    }
}

impl ResourceScreen<UserResource> {
    pub async fn set_filters(&mut self, filters: UserFilters) {
        self.resource.filters = filters;
        self.load().await;
    }

    pub async fn go_to_page(&mut self, page: u32) {
        self.resource.filters.page = Some(page.max(1));
        self.load().await;
    }

    pub fn pagination(&self) -> Pagination {
        let filters = &self.resource.filters;
        Pagination::new(
            filters.page.unwrap_or(1),
            filters.page_size.unwrap_or(10),
            self.total.unwrap_or(self.items.len() as u64),
        )
    }

    /// Flip a user between active and inactive, then reload
    pub async fn toggle_status(&mut self, id: i64) -> bool {
        match self.resource.api.toggle_user_status(id).await {
            Ok(_) => {
                self.load().await;
                true
            }
            Err(e) => {
                self.report("toggle_status", e);
                false
            }
        }
    }

    pub async fn change_password(&mut self, user_id: i64, change: &mut PasswordChange) -> SubmitOutcome {
        let errors = change.validate();
        if !errors.is_empty() {
            change.errors = errors;
            return SubmitOutcome::Blocked;
        }
        change.errors = FieldErrors::new();

        let request = ChangePassword {
            current_password: change.current_password.clone(),
            new_password: change.new_password.clone(),
            confirm_password: change.confirm_password.clone(),
        };
        match self.resource.api.change_password(user_id, &request).await {
            Ok(()) => SubmitOutcome::Saved,
            Err(e) => {
                self.report("change_password", e);
                SubmitOutcome::Failed
            }
        }
    }

    /// Probe the backend for the email and username typed in the open form
    ///
    /// Values unchanged from the edited record are not probed. Conflicts are
    /// recorded as field errors; returns whether both are free.
    pub async fn check_availability(&mut self) -> bool {
        let Some(modal) = self.modal.as_ref() else {
            return true;
        };
        let original = match modal.mode {
            FormMode::Edit(id) => self.find(id).cloned(),
            FormMode::Create => None,
        };
        let email = modal.form.email.trim().to_string();
        let user_name = modal.form.user_name.trim().to_string();
        let probe_email = !email.is_empty() && original.as_ref().is_none_or(|u| u.email != email);
        let probe_user_name =
            !user_name.is_empty() && original.as_ref().is_none_or(|u| u.user_name != user_name);

        let api = &self.resource.api;
        let (email_taken, user_name_taken) = tokio::join!(
            async {
                if probe_email { api.email_exists(&email).await } else { Ok(false) }
            },
            async {
                if probe_user_name { api.user_name_exists(&user_name).await } else { Ok(false) }
            },
        );

        let mut conflicts = FieldErrors::new();
        let mut failure = None;
        match email_taken {
            Ok(true) => conflicts.add("email", "Cet email est déjà utilisé"),
            Ok(false) => {}
            Err(e) => failure = Some(e),
        }
        match user_name_taken {
            Ok(true) => conflicts.add("userName", "Ce nom d'utilisateur est déjà utilisé"),
            Ok(false) => {}
            Err(e) => {
                failure.get_or_insert(e);
            }
        }
        if let Some(e) = failure {
            self.report("check_availability", e);
        }

        let available = conflicts.is_empty();
        if let Some(modal) = self.modal.as_mut() {
            for (field, message) in conflicts.iter() {
                modal.errors.add(field, message);
            }
        }
        available
    }
}

/// One table row: name, username, email, role, role color, status
pub fn user_row(user: &User) -> [String; 6] {
    [
        user.name.clone(),
        user.user_name.clone(),
        user.email.clone(),
        user.role.clone(),
        role_color(&user.role).name().to_string(),
        user_status_text(user.status).to_string(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screens::testing::{FakeBackend, user};

    fn screen(backend: &Arc<FakeBackend>) -> UsersScreen {
        UsersScreen::new(UserResource::new(backend.clone()))
    }

    #[tokio::test]
    async fn test_password_required_only_on_create() {
        let backend = Arc::new(FakeBackend::new());
        backend.users.lock().unwrap().push(user(1, "awa"));
        let mut screen = screen(&backend);

        screen.open_create();
        let form = screen.form_mut().unwrap();
        form.name = "Moussa".into();
        form.user_name = "moussa".into();
        form.email = "moussa@atelier".into();
        assert_eq!(screen.submit().await, SubmitOutcome::Blocked);
        let errors = screen.field_errors().unwrap();
        assert_eq!(errors.get("password"), Some("Le mot de passe est requis"));
        assert_eq!(errors.get("email"), Some("L'adresse email n'est pas valide"));

        screen.close_modal();
        assert!(screen.open_edit(1).await);
        let form = &screen.modal.as_ref().unwrap().form;
        assert!(form.password.is_empty());
        assert_eq!(screen.submit().await, SubmitOutcome::Saved);
        assert_eq!(backend.count("update_user"), 1);
    }

    #[tokio::test]
    async fn test_total_and_pagination() {
        let backend = Arc::new(FakeBackend::new());
        backend
            .users
            .lock()
            .unwrap()
            .extend((1..=12).map(|id| user(id, &format!("user{id}"))));
        let mut screen = screen(&backend);
        screen.load().await;

        assert_eq!(screen.total, Some(12));
        let pagination = screen.pagination();
        assert_eq!(pagination.total_pages, 2);
        assert!(pagination.has_next());

        screen.go_to_page(2).await;
        assert_eq!(screen.pagination().page, 2);
        assert_eq!(backend.count("list_users"), 2);
    }

    #[tokio::test]
    async fn test_toggle_status_reloads() {
        let backend = Arc::new(FakeBackend::new());
        backend.users.lock().unwrap().push(user(1, "awa"));
        let mut screen = screen(&backend);
        screen.load().await;

        assert!(screen.toggle_status(1).await);
        assert!(!screen.items[0].status);
        assert_eq!(user_row(&screen.items[0])[5], "Inactif");
        assert_eq!(backend.count("list_users"), 2);
    }

    #[tokio::test]
    async fn test_change_password_checks() {
        let backend = Arc::new(FakeBackend::new());
        let mut screen = screen(&backend);

        let mut change = PasswordChange {
            new_password: "abc".into(),
            confirm_password: "abd".into(),
            ..Default::default()
        };
        assert_eq!(screen.change_password(1, &mut change).await, SubmitOutcome::Blocked);
        assert_eq!(change.errors.len(), 3);
        assert_eq!(backend.total_calls(), 0);

        change.current_password = "ancien".into();
        change.new_password = "nouveau1".into();
        change.confirm_password = "nouveau1".into();
        assert_eq!(screen.change_password(1, &mut change).await, SubmitOutcome::Saved);
        assert!(change.errors.is_empty());
    }

    #[tokio::test]
    async fn test_availability_conflicts() {
        let backend = Arc::new(FakeBackend::new());
        backend.users.lock().unwrap().push(user(1, "awa"));
        backend.taken.lock().unwrap().extend(["awa@atelier.sn".to_string(), "awa".to_string()]);
        let mut screen = screen(&backend);
        screen.load().await;

        screen.open_create();
        let form = screen.form_mut().unwrap();
        form.email = "awa@atelier.sn".into();
        form.user_name = "moussa".into();
        assert!(!screen.check_availability().await);
        let errors = screen.field_errors().unwrap();
        assert_eq!(errors.get("email"), Some("Cet email est déjà utilisé"));
        assert!(!errors.contains("userName"));

        screen.close_modal();
        assert!(screen.open_edit(1).await);
        assert!(screen.check_availability().await);
        assert_eq!(backend.count("email_exists"), 1);
        assert_eq!(backend.count("user_name_exists"), 1);
    }
}
