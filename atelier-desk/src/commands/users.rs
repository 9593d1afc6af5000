//! Account administration and the profile page

use anyhow::{Context, bail};
use clap::{Args, Subcommand};
use shared::models::{USER_ROLES, UserFilters};

use super::prompt::read_line;
use super::{AppContext, banner, deleted, edit, finish, mount, render, view};
use crate::core::Route;
use crate::screens::profile::NO_SESSION_USER;
use crate::screens::{
    PasswordChange, ProfileScreen, SubmitOutcome, UserForm, UserResource, UsersScreen,
};

fn parse_role(raw: &str) -> Result<String, String> {
    USER_ROLES
        .iter()
        .find(|(value, label)| value.eq_ignore_ascii_case(raw) || label.eq_ignore_ascii_case(raw))
        .map(|(value, _)| value.to_string())
        .ok_or_else(|| {
            let roles: Vec<&str> = USER_ROLES.iter().map(|(value, _)| *value).collect();
            format!("rôle inconnu `{raw}` ({})", roles.join(", "))
        })
}

/// User form fields; omitted fields keep their current value
#[derive(Debug, Clone, Default, Args)]
pub struct UserArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long = "username")]
    pub user_name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
    /// Required when creating
    #[arg(long)]
    pub password: Option<String>,
    #[arg(long, value_parser = parse_role)]
    pub role: Option<String>,
    #[arg(long)]
    pub country: Option<String>,
    #[arg(long)]
    pub city: Option<String>,
    /// Active (true) or inactive (false)
    #[arg(long)]
    pub status: Option<bool>,
    /// Picture URL
    #[arg(long)]
    pub picture: Option<String>,
}

impl UserArgs {
    fn apply(self, form: &mut UserForm) {
        let fields = [
            (self.name, &mut form.name),
            (self.user_name, &mut form.user_name),
            (self.email, &mut form.email),
            (self.phone, &mut form.phone),
            (self.password, &mut form.password),
            (self.role, &mut form.role),
            (self.country, &mut form.country),
            (self.city, &mut form.city),
            (self.picture, &mut form.picture),
        ];
        for (value, slot) in fields {
            if let Some(value) = value {
                *slot = value;
            }
        }
        if let Some(status) = self.status {
            form.status = status;
        }
    }
}

/// Password fields asked on the terminal when omitted
#[derive(Debug, Clone, Default, Args)]
pub struct PasswordArgs {
    #[arg(long)]
    pub current: Option<String>,
    #[arg(long = "new")]
    pub new_password: Option<String>,
    #[arg(long)]
    pub confirm: Option<String>,
}

impl PasswordArgs {
    fn into_change(self) -> anyhow::Result<PasswordChange> {
        let ask = |value: Option<String>, label: &str| -> anyhow::Result<String> {
            match value {
                Some(value) => Ok(value),
                None => read_line(label).context("Lecture du mot de passe"),
            }
        };
        Ok(PasswordChange {
            current_password: ask(self.current, "Mot de passe actuel : ")?,
            new_password: ask(self.new_password, "Nouveau mot de passe : ")?,
            confirm_password: ask(self.confirm, "Confirmer le mot de passe : ")?,
            ..Default::default()
        })
    }
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    List {
        /// Name, username or email
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_parser = parse_role)]
        role: Option<String>,
        #[arg(long)]
        status: Option<bool>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        page_size: u32,
    },
    Show {
        id: i64,
    },
    Create(UserArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: UserArgs,
    },
    /// Activate or deactivate an account
    Toggle {
        id: i64,
    },
    Password {
        id: i64,
        #[command(flatten)]
        args: PasswordArgs,
    },
    Delete {
        id: i64,
    },
}

pub async fn users(ctx: &AppContext, command: UsersCommand) -> anyhow::Result<()> {
    let mut screen = mount(ctx, Route::Users, UserResource::new(ctx.client.clone())).await?;

    match command {
        UsersCommand::List {
            search,
            role,
            status,
            page,
            page_size,
        } => {
            let filters = UserFilters {
                page: Some(page.max(1)),
                page_size: Some(page_size),
                search,
                role,
                status,
            };
            if filters != screen.resource.filters {
                screen.set_filters(filters).await;
                if screen.error.is_some() {
                    return Err(banner(&screen));
                }
            }
            render::users(&screen.items, &screen.pagination());
        }
        UsersCommand::Show { id } => render::user(view(&mut screen, id).await?),
        UsersCommand::Create(args) => {
            screen.open_create();
            if let Some(form) = screen.form_mut() {
                args.apply(form);
            }
            save(&mut screen, "Utilisateur créé").await?;
        }
        UsersCommand::Update { id, args } => {
            edit(&mut screen, id).await?;
            if let Some(form) = screen.form_mut() {
                args.apply(form);
            }
            save(&mut screen, "Utilisateur mis à jour").await?;
        }
        UsersCommand::Toggle { id } => {
            if !screen.toggle_status(id).await {
                return Err(banner(&screen));
            }
            match screen.find(id) {
                Some(user) => println!("{} : {}", user.user_name, shared::badge::user_status_text(user.status)),
                None => println!("Statut modifié"),
            }
        }
        UsersCommand::Password { id, args } => change_password(&mut screen, id, args).await?,
        UsersCommand::Delete { id } => {
            let outcome = screen.delete(id, &ctx.confirm).await;
            deleted(&screen, outcome, "Utilisateur supprimé")?;
        }
    }
    Ok(())
}

/// Availability probes first, then the lifecycle submit
async fn save(screen: &mut UsersScreen, done: &str) -> anyhow::Result<()> {
    let available = screen.check_availability().await;
    if !available {
        let errors = screen.field_errors().map(render::field_errors).unwrap_or_default();
        bail!("Formulaire invalide :\n{errors}");
    }
    let outcome = screen.submit().await;
    finish(screen, outcome, done)
}

async fn change_password(screen: &mut UsersScreen, user_id: i64, args: PasswordArgs) -> anyhow::Result<()> {
    let mut change = args.into_change()?;
    match screen.change_password(user_id, &mut change).await {
        SubmitOutcome::Saved => {
            println!("Mot de passe modifié");
            Ok(())
        }
        SubmitOutcome::Blocked => bail!("{}", render::field_errors(&change.errors)),
        _ => Err(banner(screen)),
    }
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: Option<ProfileCommand>,
}

#[derive(Debug, Clone, Subcommand)]
pub enum ProfileCommand {
    /// Change the signed-in user's password
    Password(PasswordArgs),
}

pub async fn profile(ctx: &AppContext, args: ProfileArgs) -> anyhow::Result<()> {
    ctx.guard(Route::Profile).await?;

    match args.command {
        None => {
            let mut screen = ProfileScreen::new(ctx.client.clone(), ctx.session.clone());
            screen.load().await;
            match (&screen.user, &screen.error) {
                (Some(user), _) => render::user(user),
                (None, Some(error)) => bail!("{error}"),
                (None, None) => bail!("{NO_SESSION_USER}"),
            }
        }
        Some(ProfileCommand::Password(password)) => {
            let Some(user) = ctx.session.current_user().await else {
                bail!("{NO_SESSION_USER}");
            };
            let mut screen = UsersScreen::new(UserResource::new(ctx.client.clone()));
            change_password(&mut screen, user.id, password).await?;
        }
    }
    Ok(())
}
