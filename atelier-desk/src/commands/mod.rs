//! Command-line front end
//!
//! Each subcommand mounts one screen controller, drives it with the given
//! arguments and prints the resulting state. Protected screens go through the
//! same route guard as `open <path>`.

pub mod catalog;
pub mod ledger;
pub mod orders;
pub mod prompt;
pub mod render;
pub mod users;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use atelier_client::{AtelierClient, UploadFile};
use clap::{Parser, Subcommand};

use crate::core::{ConfigOverrides, Route, SessionContext, router};
use crate::screens::{
    DashboardScreen, DeleteOutcome, Resource, ResourceScreen, SignInForm, SignInOutcome,
    SignInScreen, SubmitOutcome,
};
use prompt::TerminalConfirm;

/// Back-office de l'atelier de couture
#[derive(Debug, Parser)]
#[command(name = "atelier", version)]
pub struct Cli {
    /// Backend base URL
    #[arg(long, global = true, env = "ATELIER_API_URL")]
    pub api_url: Option<String>,

    /// Request timeout in seconds (0 disables it)
    #[arg(long = "timeout", global = true, env = "ATELIER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,

    /// Directory of the local-storage file
    #[arg(long, global = true, env = "ATELIER_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "ATELIER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Write daily log files here instead of stderr
    #[arg(long, global = true, env = "ATELIER_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// Answer yes to every confirmation
    #[arg(short = 'y', long = "yes", global = true)]
    pub assume_yes: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            api_url: self.api_url.clone(),
            timeout_secs: self.timeout_secs,
            data_dir: self.data_dir.clone(),
            log_level: self.log_level.clone(),
            log_dir: self.log_dir.clone(),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and keep the session
    Login {
        /// Email or username
        identifier: String,
        /// Asked on the terminal when omitted
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Resolve a path the way the navigation guard does
    Open { path: String },
    #[command(subcommand)]
    Customers(catalog::CustomersCommand),
    #[command(subcommand)]
    Measures(catalog::MeasuresCommand),
    #[command(subcommand)]
    Modeles(catalog::ModelesCommand),
    #[command(subcommand)]
    Orders(orders::OrdersCommand),
    Calendar(orders::CalendarArgs),
    #[command(subcommand)]
    Ledger(ledger::LedgerCommand),
    #[command(subcommand)]
    Users(users::UsersCommand),
    Profile(users::ProfileArgs),
    /// Featured models carousel
    Dashboard {
        /// Advance the carousel this many times
        #[arg(long, default_value_t = 0)]
        ticks: u32,
    },
}

/// Shared handles of one invocation
pub struct AppContext {
    pub client: Arc<AtelierClient>,
    pub session: SessionContext,
    pub confirm: TerminalConfirm,
}

impl AppContext {
    pub fn new(client: Arc<AtelierClient>, session: SessionContext, assume_yes: bool) -> Self {
        Self {
            client,
            session,
            confirm: TerminalConfirm { assume_yes },
        }
    }

    /// Navigation guard for a protected screen
    pub async fn guard(&self, route: Route) -> anyhow::Result<()> {
        let navigation = router::resolve(route.path(), self.session.is_authenticated().await);
        if navigation.route != route {
            tracing::debug!(requested = %route, resolved = %navigation.route, "Navigation redirected");
            bail!("Veuillez vous connecter (atelier login <identifiant>)");
        }
        Ok(())
    }
}

pub async fn run(command: Command, ctx: &AppContext) -> anyhow::Result<()> {
    match command {
        Command::Login {
            identifier,
            password,
        } => login(ctx, identifier, password).await,
        Command::Logout => {
            ctx.session.logout().await?;
            println!("Déconnecté");
            Ok(())
        }
        Command::Whoami => {
            match ctx.session.current_user().await {
                Some(user) => render::user(&user),
                None => println!("Aucun utilisateur connecté"),
            }
            Ok(())
        }
        Command::Open { path } => {
            let navigation = router::resolve(&path, ctx.session.is_authenticated().await);
            if navigation.redirected {
                println!("Redirection vers {}", navigation.route.path());
            }
            println!("{} ({})", navigation.route.title(), navigation.route.path());
            Ok(())
        }
        Command::Customers(cmd) => catalog::customers(ctx, cmd).await,
        Command::Measures(cmd) => catalog::measures(ctx, cmd).await,
        Command::Modeles(cmd) => catalog::modeles(ctx, cmd).await,
        Command::Orders(cmd) => orders::orders(ctx, cmd).await,
        Command::Calendar(args) => orders::calendar(ctx, args).await,
        Command::Ledger(cmd) => ledger::ledger(ctx, cmd).await,
        Command::Users(cmd) => users::users(ctx, cmd).await,
        Command::Profile(args) => users::profile(ctx, args).await,
        Command::Dashboard { ticks } => dashboard(ctx, ticks).await,
    }
}

async fn login(ctx: &AppContext, identifier: String, password: Option<String>) -> anyhow::Result<()> {
    let password = match password {
        Some(password) => password,
        None => prompt::read_line("Mot de passe : ").context("Lecture du mot de passe")?,
    };
    let form = SignInForm {
        email_or_username: identifier,
        password,
    };
    let screen = SignInScreen::new(ctx.client.clone(), ctx.session.clone());
    match screen.submit(&form).await {
        SignInOutcome::Redirect(route) => {
            if let Some(user) = ctx.session.current_user().await {
                println!("Bienvenue {}", user.name);
            }
            println!("{} ({})", route.title(), route.path());
            Ok(())
        }
        SignInOutcome::Invalid(errors) => bail!("{}", render::field_errors(&errors)),
        SignInOutcome::Failed(message) => bail!("{message}"),
    }
}

async fn dashboard(ctx: &AppContext, ticks: u32) -> anyhow::Result<()> {
    ctx.guard(Route::Home).await?;
    let mut screen = DashboardScreen::new(ctx.client.clone());
    screen.load().await;
    if let Some(error) = &screen.error {
        bail!("{error}");
    }
    render::carousel(&screen.carousel);
    if !screen.carousel.scrolls() {
        return Ok(());
    }
    for _ in 0..ticks {
        tokio::time::sleep(crate::screens::carousel::TICK_INTERVAL).await;
        screen.carousel.tick();
        render::carousel(&screen.carousel);
    }
    Ok(())
}

// ── Helpers shared by the screen commands ───────────────────────────

/// Mount a list screen: guard, then initial load
pub(crate) async fn mount<R: Resource>(
    ctx: &AppContext,
    route: Route,
    resource: R,
) -> anyhow::Result<ResourceScreen<R>> {
    ctx.guard(route).await?;
    let mut screen = ResourceScreen::new(resource);
    screen.load().await;
    if let Some(error) = screen.error.take() {
        bail!("{error}");
    }
    Ok(screen)
}

/// Turn the banner of a failed action into an error
pub(crate) fn banner<R: Resource>(screen: &ResourceScreen<R>) -> anyhow::Error {
    anyhow::anyhow!(
        "{}",
        screen
            .error
            .as_deref()
            .unwrap_or("Une erreur inattendue s'est produite")
    )
}

pub(crate) fn finish<R: Resource>(
    screen: &ResourceScreen<R>,
    outcome: SubmitOutcome,
    done: &str,
) -> anyhow::Result<()> {
    match outcome {
        SubmitOutcome::Saved => {
            println!("{done}");
            Ok(())
        }
        SubmitOutcome::Blocked => {
            let errors = screen.field_errors().map(render::field_errors).unwrap_or_default();
            bail!("Formulaire invalide :\n{errors}")
        }
        SubmitOutcome::Failed => Err(banner(screen)),
        SubmitOutcome::Idle => bail!("Aucun formulaire ouvert"),
    }
}

pub(crate) fn deleted<R: Resource>(
    screen: &ResourceScreen<R>,
    outcome: DeleteOutcome,
    done: &str,
) -> anyhow::Result<()> {
    match outcome {
        DeleteOutcome::Deleted => println!("{done}"),
        DeleteOutcome::Cancelled => println!("Suppression annulée"),
        DeleteOutcome::Failed => return Err(banner(screen)),
    }
    Ok(())
}

/// Open the edit form of a record, or fail with the banner
pub(crate) async fn edit<R: Resource>(screen: &mut ResourceScreen<R>, id: i64) -> anyhow::Result<()> {
    if screen.open_edit(id).await {
        Ok(())
    } else {
        Err(banner(screen))
    }
}

pub(crate) async fn view<R: Resource>(
    screen: &mut ResourceScreen<R>,
    id: i64,
) -> anyhow::Result<&R::Detail> {
    if !screen.view(id).await {
        return Err(banner(screen));
    }
    screen.detail.as_ref().ok_or_else(|| banner(screen))
}

pub(crate) async fn read_upload(path: Option<PathBuf>) -> anyhow::Result<Option<UploadFile>> {
    match path {
        Some(path) => {
            let file = UploadFile::from_path(&path)
                .await
                .with_context(|| format!("Lecture de {}", path.display()))?;
            Ok(Some(file))
        }
        None => Ok(None),
    }
}
