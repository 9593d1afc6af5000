//! Cash ledger: transactions, statistics and the weekly view

use anyhow::bail;
use clap::{Args, Subcommand};
use shared::ledger::week_key;
use shared::models::{PaymentMode, TransactionFilters, TransactionType};

use super::{AppContext, banner, deleted, edit, finish, mount, render, view};
use crate::core::Route;
use crate::screens::{Grouping, TransactionForm, TransactionResource, WeeklyLedgerScreen};

fn parse_kind(raw: &str) -> Result<TransactionType, String> {
    TransactionType::parse(raw).ok_or_else(|| format!("type inconnu `{raw}` (ENTREE ou SORTIE)"))
}

fn parse_mode(raw: &str) -> Result<PaymentMode, String> {
    PaymentMode::parse(raw).ok_or_else(|| {
        let modes: Vec<&str> = PaymentMode::ALL.iter().map(|m| m.as_str()).collect();
        format!("mode de paiement inconnu `{raw}` ({})", modes.join(", "))
    })
}

/// Transaction form fields; omitted fields keep their current value
#[derive(Debug, Clone, Default, Args)]
pub struct TransactionArgs {
    /// Amount in F CFA
    #[arg(long)]
    pub montant: Option<String>,
    #[arg(long = "type", value_parser = parse_kind)]
    pub kind: Option<TransactionType>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long)]
    pub categorie: Option<String>,
    #[arg(long = "mode", value_parser = parse_mode)]
    pub mode_paiement: Option<PaymentMode>,
    /// YYYY-MM-DD, today by default
    #[arg(long = "date")]
    pub date_transaction: Option<String>,
    #[arg(long)]
    pub notes: Option<String>,
}

impl TransactionArgs {
    fn apply(self, form: &mut TransactionForm) {
        if let Some(montant) = self.montant {
            form.montant = montant;
        }
        if let Some(kind) = self.kind {
            form.kind = kind;
        }
        if let Some(description) = self.description {
            form.description = description;
        }
        if let Some(categorie) = self.categorie {
            form.categorie = categorie;
        }
        if self.mode_paiement.is_some() {
            form.mode_paiement = self.mode_paiement;
        }
        if let Some(date) = self.date_transaction {
            form.date_transaction = date;
        }
        if let Some(notes) = self.notes {
            form.notes = notes;
        }
    }
}

#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    #[arg(long = "type", value_parser = parse_kind)]
    pub kind: Option<TransactionType>,
    #[arg(long)]
    pub categorie: Option<String>,
    #[arg(long = "mode", value_parser = parse_mode)]
    pub mode_paiement: Option<PaymentMode>,
    #[arg(long = "from")]
    pub date_debut: Option<String>,
    #[arg(long = "to")]
    pub date_fin: Option<String>,
    /// Free-text search
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub page: Option<u32>,
    #[arg(long)]
    pub page_size: Option<u32>,
}

impl ListArgs {
    fn is_default(&self) -> bool {
        self.kind.is_none()
            && self.categorie.is_none()
            && self.mode_paiement.is_none()
            && self.date_debut.is_none()
            && self.date_fin.is_none()
            && self.search.is_none()
            && self.page.is_none()
            && self.page_size.is_none()
    }

    fn into_filters(self) -> TransactionFilters {
        let defaults = TransactionFilters::cash_screen();
        TransactionFilters {
            kind: self.kind,
            categorie: self.categorie,
            mode_paiement: self.mode_paiement,
            date_debut: self.date_debut,
            date_fin: self.date_fin,
            recherche: self.search,
            page: self.page.or(defaults.page),
            page_size: self.page_size.or(defaults.page_size),
            ..defaults
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum LedgerCommand {
    List(ListArgs),
    Show {
        id: i64,
    },
    Create(TransactionArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: TransactionArgs,
    },
    Delete {
        id: i64,
    },
    /// Entries and exits grouped by ISO week
    Weekly {
        #[arg(long = "from")]
        date_debut: Option<String>,
        #[arg(long = "to")]
        date_fin: Option<String>,
        /// Let the backend do the grouping
        #[arg(long)]
        server: bool,
        /// Expand every week
        #[arg(long)]
        all: bool,
    },
    /// Totals and average over a period
    Stats {
        #[arg(long = "from")]
        date_debut: Option<String>,
        #[arg(long = "to")]
        date_fin: Option<String>,
    },
    /// Categories offered by the form
    Categories,
}

pub async fn ledger(ctx: &AppContext, command: LedgerCommand) -> anyhow::Result<()> {
    if let LedgerCommand::Weekly {
        date_debut,
        date_fin,
        server,
        all,
    } = command
    {
        return weekly(ctx, date_debut, date_fin, server, all).await;
    }

    let mut screen = mount(ctx, Route::Cash, TransactionResource::new(ctx.client.clone())).await?;

    match command {
        LedgerCommand::List(args) => {
            if !args.is_default() {
                screen.set_filters(args.into_filters()).await;
                if screen.error.is_some() {
                    return Err(banner(&screen));
                }
            }
            if let Some(statistics) = &screen.aux.statistics {
                render::statistics(statistics);
                println!();
            }
            render::transactions(&screen.items);
        }
        LedgerCommand::Show { id } => render::transaction(view(&mut screen, id).await?),
        LedgerCommand::Create(args) => {
            screen.open_create();
            if let Some(form) = screen.form_mut() {
                args.apply(form);
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Transaction enregistrée")?;
        }
        LedgerCommand::Update { id, args } => {
            edit(&mut screen, id).await?;
            if let Some(form) = screen.form_mut() {
                args.apply(form);
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Transaction mise à jour")?;
        }
        LedgerCommand::Delete { id } => {
            let outcome = screen.delete(id, &ctx.confirm).await;
            deleted(&screen, outcome, "Transaction supprimée")?;
        }
        LedgerCommand::Stats {
            date_debut,
            date_fin,
        } => {
            if date_debut.is_some() || date_fin.is_some() {
                let filters = TransactionFilters {
                    date_debut,
                    date_fin,
                    ..TransactionFilters::cash_screen()
                };
                screen.set_filters(filters).await;
            }
            match &screen.aux.statistics {
                Some(statistics) => render::statistics(statistics),
                None => return Err(banner(&screen)),
            }
        }
        LedgerCommand::Categories => {
            for category in screen.category_options() {
                println!("{category}");
            }
        }
        LedgerCommand::Weekly { .. } => {}
    }
    Ok(())
}

async fn weekly(
    ctx: &AppContext,
    date_debut: Option<String>,
    date_fin: Option<String>,
    server: bool,
    all: bool,
) -> anyhow::Result<()> {
    ctx.guard(Route::WeeklyCash).await?;
    let grouping = if server { Grouping::Server } else { Grouping::Local };
    let mut screen = WeeklyLedgerScreen::new(ctx.client.clone()).with_grouping(grouping);

    if date_debut.is_some() || date_fin.is_some() {
        let from = date_debut.unwrap_or_else(|| screen.date_debut.clone());
        let to = date_fin.unwrap_or_else(|| screen.date_fin.clone());
        screen.set_range(from, to).await;
    } else {
        screen.load().await;
    }
    if let Some(error) = &screen.error {
        bail!("{error}");
    }

    if all {
        let closed: Vec<_> = screen
            .weeks()
            .map(week_key)
            .filter(|key| !screen.is_open(*key))
            .collect();
        for key in closed {
            screen.toggle_week(key);
        }
    }
    render::weekly(&screen);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_args_keep_cash_screen_ordering() {
        let filters = ListArgs {
            kind: Some(TransactionType::Sortie),
            page: Some(3),
            ..Default::default()
        }
        .into_filters();
        assert_eq!(filters.kind, Some(TransactionType::Sortie));
        assert_eq!(filters.page, Some(3));
        assert_eq!(filters.page_size, Some(20));
        assert_eq!(filters.order_by.as_deref(), Some("dateTransaction"));
    }

    #[test]
    fn test_transaction_args_fill_the_form() {
        let mut form = TransactionForm::default();
        TransactionArgs {
            montant: Some("2500".into()),
            kind: Some(TransactionType::Sortie),
            description: Some("Fil".into()),
            mode_paiement: Some(PaymentMode::Carte),
            ..Default::default()
        }
        .apply(&mut form);
        assert_eq!(form.montant, "2500");
        assert_eq!(form.kind, TransactionType::Sortie);
        assert_eq!(form.mode_paiement, Some(PaymentMode::Carte));
        assert!(!form.date_transaction.is_empty());
    }

    #[test]
    fn test_enum_arguments() {
        assert_eq!(parse_kind("entree"), Ok(TransactionType::Entree));
        assert!(parse_mode("bitcoin").unwrap_err().contains("ESPECES"));
    }
}
