//! Customers, their measures and the modele catalog

use std::path::PathBuf;

use anyhow::bail;
use clap::Subcommand;
use shared::models::MeasureField;

use super::{AppContext, banner, deleted, edit, finish, mount, read_upload, render, view};
use crate::core::Route;
use crate::screens::{CustomerResource, ModeleResource, SubmitOutcome};

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        /// Photo file (jpeg, png, gif or webp, 10MB max)
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    Update {
        id: i64,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    Delete {
        id: i64,
    },
}

pub async fn customers(ctx: &AppContext, command: CustomersCommand) -> anyhow::Result<()> {
    let mut screen = mount(ctx, Route::Customers, CustomerResource::new(ctx.client.clone())).await?;

    match command {
        CustomersCommand::List => render::customers(&screen.items),
        CustomersCommand::Show { id } => render::customer(view(&mut screen, id).await?),
        CustomersCommand::Create { name, phone, photo } => {
            let photo = read_upload(photo).await?;
            screen.open_create();
            if let Some(form) = screen.form_mut() {
                form.name = name;
                form.phone_number = phone;
                form.photo = photo;
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Client créé")?;
        }
        CustomersCommand::Update {
            id,
            name,
            phone,
            photo,
        } => {
            let photo = read_upload(photo).await?;
            edit(&mut screen, id).await?;
            if let Some(form) = screen.form_mut() {
                if let Some(name) = name {
                    form.name = name;
                }
                if let Some(phone) = phone {
                    form.phone_number = phone;
                }
                form.photo = photo;
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Client mis à jour")?;
        }
        CustomersCommand::Delete { id } => {
            let outcome = screen.delete(id, &ctx.confirm).await;
            deleted(&screen, outcome, "Client supprimé")?;
        }
    }
    Ok(())
}

#[derive(Debug, Subcommand)]
pub enum MeasuresCommand {
    Show {
        customer_id: i64,
    },
    /// Record measures as `champ=valeur` pairs, in centimeters; an empty
    /// value clears the field
    Set {
        customer_id: i64,
        #[arg(value_parser = parse_measure_input, required = true)]
        values: Vec<(MeasureField, String)>,
    },
    Delete {
        customer_id: i64,
    },
}

fn parse_measure_input(raw: &str) -> Result<(MeasureField, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("attendu champ=valeur, reçu `{raw}`"))?;
    let field = MeasureField::from_key(key.trim()).ok_or_else(|| {
        let keys: Vec<&str> = MeasureField::ALL.iter().map(|f| f.key()).collect();
        format!("champ inconnu `{key}` (champs : {})", keys.join(", "))
    })?;
    Ok((field, value.trim().to_string()))
}

pub async fn measures(ctx: &AppContext, command: MeasuresCommand) -> anyhow::Result<()> {
    let mut screen = mount(ctx, Route::Customers, CustomerResource::new(ctx.client.clone())).await?;

    match command {
        MeasuresCommand::Show { customer_id } => {
            let Some(sheet) = screen.open_measures(customer_id).await else {
                return Err(banner(&screen));
            };
            render::measures(&sheet);
        }
        MeasuresCommand::Set {
            customer_id,
            values,
        } => {
            let Some(mut sheet) = screen.open_measures(customer_id).await else {
                return Err(banner(&screen));
            };
            for (field, value) in values {
                sheet.set(field, value);
            }
            match screen.save_measures(&mut sheet).await {
                SubmitOutcome::Saved => {
                    println!("Mesures enregistrées");
                    render::measures(&sheet);
                }
                SubmitOutcome::Blocked => {
                    bail!("Mesures invalides :\n{}", render::field_errors(&sheet.errors))
                }
                _ => return Err(banner(&screen)),
            }
        }
        MeasuresCommand::Delete { customer_id } => {
            let outcome = screen.delete_measures(customer_id, &ctx.confirm).await;
            deleted(&screen, outcome, "Mesures supprimées")?;
        }
    }
    Ok(())
}

#[derive(Debug, Subcommand)]
pub enum ModelesCommand {
    List,
    Show {
        id: i64,
    },
    Create {
        /// Price in F CFA
        #[arg(long)]
        price: String,
        #[arg(long)]
        image: PathBuf,
    },
    Update {
        id: i64,
        #[arg(long)]
        price: Option<String>,
        #[arg(long)]
        image: Option<PathBuf>,
    },
    Delete {
        id: i64,
    },
}

pub async fn modeles(ctx: &AppContext, command: ModelesCommand) -> anyhow::Result<()> {
    let mut screen = mount(ctx, Route::Modeles, ModeleResource::new(ctx.client.clone())).await?;

    match command {
        ModelesCommand::List => render::modeles(&screen.items),
        ModelesCommand::Show { id } => render::modele(view(&mut screen, id).await?),
        ModelesCommand::Create { price, image } => {
            let image = read_upload(Some(image)).await?;
            screen.open_create();
            if let Some(form) = screen.form_mut() {
                form.price = price;
                form.image = image;
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Modèle créé")?;
        }
        ModelesCommand::Update { id, price, image } => {
            let image = read_upload(image).await?;
            edit(&mut screen, id).await?;
            if let Some(form) = screen.form_mut() {
                if let Some(price) = price {
                    form.price = price;
                }
                form.image = image;
            }
            let outcome = screen.submit().await;
            finish(&screen, outcome, "Modèle mis à jour")?;
        }
        ModelesCommand::Delete { id } => {
            let outcome = screen.delete(id, &ctx.confirm).await;
            deleted(&screen, outcome, "Modèle supprimé")?;
        }
    }
    Ok(())
}
