//! Plain-text rendering of screen state

use rust_decimal::Decimal;
use shared::badge::{amount_color, order_status_color, role_color, user_status_text};
use shared::format::{
    format_cfa, format_date, format_date_long, format_date_time, format_day_month,
    format_month_year, format_signed_cfa,
};
use shared::models::{
    COLOR_OPTIONS, CashStatistics, Customer, CustomerSummary, FABRIC_OPTIONS, MeasureField,
    Modele, Order, OrderSummary, Transaction, User, option_label,
};
use shared::{FieldErrors, Pagination};

use crate::screens::users::user_row;
use crate::screens::{CalendarScreen, CalendarView, Carousel, MeasureSheet, WeeklyLedgerScreen};

fn or_dash(value: Option<&str>) -> &str {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => "-",
    }
}

pub fn field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {field}: {message}"))
        .collect::<Vec<_>>()
        .join("\n")
}

// ── Customers ───────────────────────────────────────────────────────

pub fn customers(items: &[CustomerSummary]) {
    println!("{:<6} {:<28} {:<18} {:<8} {:<12}", "ID", "Nom", "Téléphone", "Mesures", "Créé le");
    for c in items {
        println!(
            "{:<6} {:<28} {:<18} {:<8} {:<12}",
            c.id,
            c.name,
            c.phone_number,
            if c.has_measures { "oui" } else { "non" },
            format_date(&c.created_at)
        );
    }
    println!("{} client(s)", items.len());
}

pub fn customer(c: &Customer) {
    println!("Client #{}", c.id);
    println!("  Nom        : {}", c.name);
    println!("  Téléphone  : {}", c.phone_number);
    println!("  Photo      : {}", or_dash(c.photo_url.as_deref()));
    println!("  Créé le    : {}", format_date_long(&c.created_at));
    println!("  Modifié le : {}", format_date_long(&c.updated_at));
    match &c.measure {
        Some(measure) => {
            println!("  Mesures :");
            for field in MeasureField::ALL {
                if let Some(value) = measure.values.get(field) {
                    println!("    {:<22} {value} cm", field.label());
                }
            }
        }
        None => println!("  Mesures    : aucune"),
    }
}

pub fn measures(sheet: &MeasureSheet) {
    if !sheet.existing {
        println!("Aucune mesure enregistrée pour le client #{}", sheet.customer_id);
        return;
    }
    println!("Mesures du client #{}", sheet.customer_id);
    for field in MeasureField::ALL {
        let value = sheet.input(field);
        let value = if value.is_empty() { "-".to_string() } else { format!("{value} cm") };
        println!("  {:<18} {:<22} {value}", field.key(), field.label());
    }
}

// ── Modeles ─────────────────────────────────────────────────────────

pub fn modeles(items: &[Modele]) {
    println!("{:<6} {:<24} {:>16}  {}", "ID", "Modèle", "Prix", "Image");
    for m in items {
        println!(
            "{:<6} {:<24} {:>16}  {}",
            m.id,
            m.display_name(),
            format_cfa(m.price),
            or_dash(m.image_url.as_deref())
        );
    }
    println!("{} modèle(s)", items.len());
}

pub fn modele(m: &Modele) {
    println!("{} (#{})", m.display_name(), m.id);
    println!("  Prix        : {}", format_cfa(m.price));
    println!("  Image       : {}", or_dash(m.image_url.as_deref()));
    println!("  Description : {}", or_dash(m.description.as_deref()));
}

// ── Orders ──────────────────────────────────────────────────────────

pub fn orders(items: &[OrderSummary]) {
    println!(
        "{:<6} {:<22} {:<12} {:<12} {:>16} {:<16}",
        "ID", "Client", "Commande", "RDV", "Total final", "Statut"
    );
    for o in items {
        println!(
            "{:<6} {:<22} {:<12} {:<12} {:>16} {:<16}",
            o.id,
            o.customer_name,
            format_date(&o.date_commande),
            o.date_rendez_vous.as_deref().map(format_date).unwrap_or_else(|| "-".into()),
            format_cfa(o.total_final),
            format!("{} [{}]", o.statut, order_status_color(o.statut).name())
        );
    }
    println!("{} commande(s)", items.len());
}

pub fn order(o: &Order, catalog: &[Modele]) {
    println!("Commande #{} - {}", o.id, o.customer_name);
    println!("  Statut      : {} [{}]", o.statut, order_status_color(o.statut).name());
    println!("  Commandée le: {}", format_date(&o.date_commande));
    println!(
        "  Rendez-vous : {}",
        o.date_rendez_vous.as_deref().map(format_date_long).unwrap_or_else(|| "-".into())
    );
    println!("  Notes       : {}", or_dash(o.notes.as_deref()));
    println!("  Articles :");
    for (index, item) in o.order_items.iter().enumerate() {
        let name = catalog
            .iter()
            .find(|m| m.id == item.modele_id)
            .map(Modele::display_name)
            .unwrap_or_else(|| format!("Modèle #{}", item.modele_id));
        println!(
            "    {}. {name} - {} {} x{} à {} = {}",
            index + 1,
            option_label(&FABRIC_OPTIONS, &item.type_tissu),
            option_label(&COLOR_OPTIONS, &item.couleur),
            item.quantite,
            format_cfa(item.prix_unitaire),
            format_cfa(item.prix_unitaire * Decimal::from(item.quantite))
        );
    }
    println!("  Total       : {}", format_cfa(o.total));
    if let Some(reduction) = o.reduction.filter(|r| !r.is_zero()) {
        println!("  Réduction   : -{}", format_cfa(reduction));
    }
    println!("  Total final : {}", format_cfa(o.total_final));
}

pub fn totals(total: Decimal, final_total: Decimal) {
    println!("Total       : {}", format_cfa(total));
    println!("Total final : {}", format_cfa(final_total));
}

// ── Calendar ────────────────────────────────────────────────────────

pub fn calendar(screen: &CalendarScreen) {
    println!(
        "Rendez-vous : {} | aujourd'hui : {} | 7 prochains jours : {}",
        screen.events.len(),
        screen.count_today(),
        screen.count_this_week()
    );
    if let Some((year, month)) = screen.month {
        println!("{}", format_month_year(year, month));
    }
    match screen.view {
        CalendarView::Month => {
            for (day, events) in screen.events_by_day() {
                println!("{}", day.format("%d/%m/%Y"));
                for event in events {
                    println!("  {} ({}) [{}]", event.title, event.order.statut, event.color.name());
                }
            }
        }
        CalendarView::List => {
            for event in screen.visible() {
                println!(
                    "{:<10} {:<30} {:<22} {}",
                    event.id,
                    event.title,
                    format_date_time(&event.start),
                    event.order.statut
                );
            }
        }
    }
}

// ── Ledger ──────────────────────────────────────────────────────────

pub fn transactions(items: &[Transaction]) {
    println!(
        "{:<6} {:<12} {:<8} {:>18} {:<28} {:<20} {:<10}",
        "ID", "Date", "Type", "Montant", "Description", "Catégorie", "Paiement"
    );
    for t in items {
        println!(
            "{:<6} {:<12} {:<8} {:>18} {:<28} {:<20} {:<10}",
            t.id,
            format_date(&t.date_transaction),
            t.kind.label(),
            format_signed_cfa(t.montant_avec_signe),
            t.description,
            or_dash(t.categorie.as_deref()),
            t.mode_paiement.map(|m| m.label()).unwrap_or("-")
        );
    }
    println!("{} transaction(s)", items.len());
}

pub fn transaction(t: &Transaction) {
    println!("Transaction #{}", t.id);
    println!("  Date        : {}", format_date(&t.date_transaction));
    println!("  Type        : {}", t.kind.label());
    println!(
        "  Montant     : {} [{}]",
        format_signed_cfa(t.montant_avec_signe),
        amount_color(t.montant_avec_signe).name()
    );
    println!("  Description : {}", t.description);
    println!("  Catégorie   : {}", or_dash(t.categorie.as_deref()));
    println!("  Paiement    : {}", t.mode_paiement.map(|m| m.label()).unwrap_or("-"));
    println!("  Notes       : {}", or_dash(t.notes.as_deref()));
}

pub fn statistics(s: &CashStatistics) {
    println!("Entrées      : {}", format_cfa(s.total_entrees));
    println!("Sorties      : {}", format_cfa(s.total_sorties));
    println!("Solde        : {}", format_signed_cfa(s.solde));
    println!("Transactions : {}", s.nombre_transactions);
    println!("Moyenne      : {}", format_cfa(s.moyenne_transactions));
}

pub fn weekly(screen: &WeeklyLedgerScreen) {
    println!("Période du {} au {}", format_date(&screen.date_debut), format_date(&screen.date_fin));
    let Some(grouped) = &screen.grouped else {
        return;
    };
    for week in screen.weeks() {
        let key = (week.annee, week.numero_semaine);
        let totals = &week.totaux;
        println!(
            "{} Semaine {} - {} ({} au {}) : {} transaction(s), {} entrée(s) +{}, {} sortie(s) -{}, solde {}",
            if screen.is_open(key) { "▼" } else { "▶" },
            week.numero_semaine,
            week.annee,
            format_day_month(&week.debut_semaine),
            format_day_month(&week.fin_semaine),
            totals.nombre_transactions,
            totals.nombre_entrees,
            format_cfa(totals.total_entrees),
            totals.nombre_sorties,
            format_cfa(totals.total_sorties),
            format_signed_cfa(totals.solde_net)
        );
        if screen.is_open(key) {
            for t in &week.transactions {
                println!(
                    "    {:<12} {:<8} {:>18}  {}",
                    format_date(&t.date_transaction),
                    t.kind.label(),
                    format_signed_cfa(t.montant_avec_signe),
                    t.description
                );
            }
        }
    }
    let g = &grouped.totaux_generaux;
    println!(
        "Total : {} semaine(s), {} transaction(s), entrées {}, sorties {}, solde {}",
        g.nombre_semaines,
        g.nombre_transactions_total,
        format_cfa(g.total_entrees_generales),
        format_cfa(g.total_sorties_generales),
        format_signed_cfa(g.solde_net_general)
    );
}

// ── Users ───────────────────────────────────────────────────────────

pub fn users(items: &[User], pagination: &Pagination) {
    println!(
        "{:<6} {:<22} {:<16} {:<28} {:<18} {:<8}",
        "ID", "Nom", "Utilisateur", "Email", "Rôle", "Statut"
    );
    for u in items {
        let [name, user_name, email, role, color, status] = user_row(u);
        println!(
            "{:<6} {:<22} {:<16} {:<28} {:<18} {:<8}",
            u.id,
            name,
            user_name,
            email,
            format!("{role} [{color}]"),
            status
        );
    }
    println!(
        "Page {}/{} - {} utilisateur(s)",
        pagination.page,
        pagination.total_pages.max(1),
        pagination.total
    );
}

pub fn user(u: &User) {
    println!("{} (@{}) #{}", u.name, u.user_name, u.id);
    println!("  Email   : {}", u.email);
    println!("  Tél.    : {}", or_dash(u.phone.as_deref()));
    println!("  Rôle    : {} [{}]", u.role, role_color(&u.role).name());
    println!("  Pays    : {}", or_dash(u.country.as_deref()));
    println!("  Ville   : {}", or_dash(u.city.as_deref()));
    println!("  Statut  : {}", user_status_text(u.status));
    if let Some(created_at) = &u.created_at {
        println!("  Créé le : {}", format_date(created_at));
    }
}

// ── Dashboard ───────────────────────────────────────────────────────

pub fn carousel(carousel: &Carousel) {
    let dots: String = (0..carousel.page_count())
        .map(|page| if page == carousel.active_dot() { '●' } else { '○' })
        .collect();
    println!("Nos Modèles en Vedette  {dots}");
    for image in carousel.visible() {
        println!("  {image}");
    }
}
