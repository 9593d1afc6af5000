//! Orders and the appointment calendar

use anyhow::bail;
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};
use shared::models::{Modele, OrderStatus};

use super::{AppContext, banner, deleted, edit, finish, mount, render, view};
use crate::core::Route;
use crate::screens::{CalendarScreen, CalendarView, OrderFilter, OrderForm, OrderResource};

/// One line item given as `modeleId:tissu:couleur:quantite[:notes]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInput {
    pub modele_id: i64,
    pub type_tissu: String,
    pub couleur: String,
    pub quantite: u32,
    pub notes: String,
}

pub fn parse_item(raw: &str) -> Result<ItemInput, String> {
    let parts: Vec<&str> = raw.splitn(5, ':').map(str::trim).collect();
    if parts.len() < 4 {
        return Err(format!(
            "article attendu sous la forme modeleId:tissu:couleur:quantite[:notes], reçu `{raw}`"
        ));
    }
    let modele_id = parts[0]
        .parse::<i64>()
        .map_err(|_| format!("identifiant de modèle invalide `{}`", parts[0]))?;
    let quantite = parts[3]
        .parse::<u32>()
        .map_err(|_| format!("quantité invalide `{}`", parts[3]))?;
    Ok(ItemInput {
        modele_id,
        type_tissu: parts[1].to_string(),
        couleur: parts[2].to_string(),
        quantite,
        notes: parts.get(4).map(|n| n.to_string()).unwrap_or_default(),
    })
}

pub fn parse_status(raw: &str) -> Result<OrderStatus, String> {
    OrderStatus::parse(raw).ok_or_else(|| {
        let labels: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        format!("statut inconnu `{raw}` (statuts : {})", labels.join(", "))
    })
}

/// `YYYY-MM`
pub fn parse_month(raw: &str) -> Result<(i32, u32), String> {
    let invalid = || format!("mois attendu sous la forme AAAA-MM, reçu `{raw}`");
    let (year, month) = raw.trim().split_once('-').ok_or_else(invalid)?;
    let year = year.parse::<i32>().map_err(|_| invalid())?;
    let month = month.parse::<u32>().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Order form fields; omitted fields keep their current value
#[derive(Debug, Clone, Default, Args)]
pub struct OrderArgs {
    #[arg(long = "customer")]
    pub customer_id: Option<i64>,
    /// Order date (YYYY-MM-DD), today by default
    #[arg(long = "date")]
    pub date_commande: Option<String>,
    /// Appointment (YYYY-MM-DD or YYYY-MM-DDTHH:MM)
    #[arg(long = "rdv")]
    pub date_rendez_vous: Option<String>,
    #[arg(long, value_parser = parse_status)]
    pub status: Option<OrderStatus>,
    #[arg(long)]
    pub notes: Option<String>,
    /// Discount in F CFA; 0 removes it
    #[arg(long)]
    pub reduction: Option<String>,
    /// Line items; given items replace the current ones
    #[arg(long = "item", value_parser = parse_item)]
    pub items: Vec<ItemInput>,
}

impl OrderArgs {
    fn apply(self, form: &mut OrderForm, catalog: &[Modele]) {
        if let Some(customer_id) = self.customer_id {
            form.customer_id = Some(customer_id);
        }
        if let Some(date) = self.date_commande {
            form.date_commande = date;
        }
        if let Some(rdv) = self.date_rendez_vous {
            form.date_rendez_vous = rdv;
        }
        if let Some(status) = self.status {
            form.statut = status;
        }
        if let Some(notes) = self.notes {
            form.notes = notes;
        }
        if let Some(reduction) = self.reduction {
            form.has_reduction = reduction.trim() != "0";
            form.reduction = reduction;
        }
        if !self.items.is_empty() {
            form.items.clear();
            for input in self.items {
                let index = form.add_item();
                form.select_modele(index, input.modele_id, catalog);
                let item = &mut form.items[index];
                item.type_tissu = input.type_tissu;
                item.couleur = input.couleur;
                item.quantite = input.quantite;
                item.notes = input.notes;
            }
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum OrdersCommand {
    List {
        #[arg(long, value_parser = parse_status)]
        status: Option<OrderStatus>,
        #[arg(long = "customer")]
        customer_id: Option<i64>,
    },
    Show {
        id: i64,
    },
    Create(OrderArgs),
    Update {
        id: i64,
        #[command(flatten)]
        args: OrderArgs,
    },
    /// Quick status change
    Status {
        id: i64,
        #[arg(value_parser = parse_status)]
        status: OrderStatus,
    },
    /// Price a draft without saving it
    Quote(OrderArgs),
    Delete {
        id: i64,
    },
}

pub async fn orders(ctx: &AppContext, command: OrdersCommand) -> anyhow::Result<()> {
    let resource = OrderResource::new(ctx.client.clone(), ctx.client.clone(), ctx.client.clone());
    let mut screen = mount(ctx, Route::Orders, resource).await?;
    let catalog = screen.aux.catalog.clone();

    match command {
        OrdersCommand::List {
            status,
            customer_id,
        } => {
            if status.is_some() || customer_id.is_some() {
                screen.set_filter(OrderFilter { status, customer_id }).await;
                if screen.error.is_some() {
                    return Err(banner(&screen));
                }
            }
            render::orders(&screen.items);
        }
        OrdersCommand::Show { id } => render::order(view(&mut screen, id).await?, &catalog),
        OrdersCommand::Create(args) => {
            screen.open_create();
            if let Some(form) = screen.form_mut() {
                args.apply(form, &catalog);
            }
            if let Some(preview) = screen.preview() {
                render::totals(preview.total, preview.final_total);
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Commande créée")?;
        }
        OrdersCommand::Update { id, args } => {
            edit(&mut screen, id).await?;
            if let Some(form) = screen.form_mut() {
                args.apply(form, &catalog);
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Commande mise à jour")?;
        }
        OrdersCommand::Status { id, status } => {
            if !screen.update_status(id, status).await {
                return Err(banner(&screen));
            }
            println!("Commande #{id} : {status}");
        }
        OrdersCommand::Quote(args) => {
            screen.open_create();
            if let Some(form) = screen.form_mut() {
                args.apply(form, &catalog);
            }
            if let Some(preview) = screen.preview() {
                println!("Aperçu");
                render::totals(preview.total, preview.final_total);
            }
            let Some(quote) = screen.quote().await else {
                return Err(banner(&screen));
            };
            println!("Calcul du serveur");
            render::totals(quote.total, quote.final_total);
        }
        OrdersCommand::Delete { id } => {
            let outcome = screen.delete(id, &ctx.confirm).await;
            deleted(&screen, outcome, "Commande supprimée")?;
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Args)]
pub struct CalendarArgs {
    /// First day (YYYY-MM-DD)
    #[arg(long = "from")]
    pub start_date: Option<String>,
    /// Last day (YYYY-MM-DD)
    #[arg(long = "to")]
    pub end_date: Option<String>,
    /// Month shown (YYYY-MM), current month by default
    #[arg(long, value_parser = parse_month)]
    pub month: Option<(i32, u32)>,
    /// Every appointment in date order instead of the month grid
    #[arg(long)]
    pub list: bool,
}

pub async fn calendar(ctx: &AppContext, args: CalendarArgs) -> anyhow::Result<()> {
    ctx.guard(Route::Calendar).await?;
    let mut screen =
        CalendarScreen::new(ctx.client.clone()).with_range(args.start_date, args.end_date);
    screen.load().await;
    if let Some(error) = &screen.error {
        bail!("{error}");
    }

    if args.list {
        screen.set_view(CalendarView::List);
    } else {
        let (year, month) = args.month.unwrap_or_else(|| {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        });
        screen.set_month(year, month);
        screen.set_view(CalendarView::Month);
    }
    render::calendar(&screen);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_parse_item() {
        let item = parse_item("3:bazin:bleu:2").unwrap();
        assert_eq!(item.modele_id, 3);
        assert_eq!(item.type_tissu, "bazin");
        assert_eq!(item.couleur, "bleu");
        assert_eq!(item.quantite, 2);
        assert!(item.notes.is_empty());

        let item = parse_item("3:wax:rouge:1:col mao: sans poche").unwrap();
        assert_eq!(item.notes, "col mao: sans poche");
    }

    #[test]
    fn test_parse_item_rejects_malformed_input() {
        assert!(parse_item("3:bazin:bleu").is_err());
        assert!(parse_item("x:bazin:bleu:1").is_err());
        assert!(parse_item("3:bazin:bleu:-1").is_err());
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03"), Ok((2024, 3)));
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("mars").is_err());
    }

    #[test]
    fn test_parse_status_accepts_wire_labels() {
        assert_eq!(parse_status("en cours"), Ok(OrderStatus::EnCours));
        assert_eq!(parse_status("Livré"), Ok(OrderStatus::Livre));
        assert!(parse_status("perdu").unwrap_err().contains("Annulé"));
    }

    #[test]
    fn test_apply_replaces_items_with_catalog_prices() {
        let catalog = vec![Modele {
            id: 3,
            nom: None,
            price: Decimal::from(5000),
            image_url: None,
            description: None,
            created_at: None,
            updated_at: None,
        }];
        let mut form = OrderForm::new();
        form.add_item();
        let args = OrderArgs {
            customer_id: Some(1),
            reduction: Some("1000".into()),
            items: vec![parse_item("3:bazin:bleu:2").unwrap()],
            ..Default::default()
        };
        args.apply(&mut form, &catalog);

        assert_eq!(form.customer_id, Some(1));
        assert!(form.has_reduction);
        assert_eq!(form.items.len(), 1);
        assert_eq!(form.items[0].prix_unitaire, Decimal::from(5000));
        let preview = form.preview(&catalog);
        assert_eq!(preview.total, Decimal::from(10000));
        assert_eq!(preview.final_total, Decimal::from(9000));
    }
}
