//! Appointment calendar
//!
//! Pickup appointments are derived from orders: every order with a
//! `dateRendezVous` becomes one event colored by its status.

use std::collections::BTreeMap;
use std::sync::Arc;

use atelier_client::OrderApi;
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Utc};
use shared::badge::{BadgeColor, order_status_color};
use shared::format::{parse_date, parse_datetime};
use shared::models::OrderSummary;

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarEvent {
    /// `order-{id}`
    pub id: String,
    /// `RDV - {customerName}`
    pub title: String,
    pub start: String,
    pub color: BadgeColor,
    pub order: OrderSummary,
}

impl CalendarEvent {
    pub fn from_order(order: &OrderSummary) -> Option<Self> {
        let start = order.date_rendez_vous.as_deref()?.trim();
        if start.is_empty() {
            return None;
        }
        Some(Self {
            id: format!("order-{}", order.id),
            title: format!("RDV - {}", order.customer_name),
            start: start.to_string(),
            color: order_status_color(order.statut),
            order: order.clone(),
        })
    }

    pub fn date(&self) -> Option<NaiveDate> {
        parse_date(&self.start)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CalendarView {
    #[default]
    Month,
    List,
}

pub struct CalendarScreen {
    api: Arc<dyn OrderApi>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub events: Vec<CalendarEvent>,
    pub view: CalendarView,
    /// `(year, month)` shown by the month view; `None` shows everything
    pub month: Option<(i32, u32)>,
    pub selected: Option<CalendarEvent>,
    pub loading: bool,
    pub error: Option<String>,
}

impl CalendarScreen {
    pub fn new(api: Arc<dyn OrderApi>) -> Self {
        Self {
            api,
            start_date: None,
            end_date: None,
            events: Vec::new(),
            view: CalendarView::default(),
            month: None,
            selected: None,
            loading: false,
            error: None,
        }
    }

    pub fn with_range(mut self, start_date: Option<String>, end_date: Option<String>) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }

    pub async fn load(&mut self) {
        self.loading = true;
        self.error = None;
        match self
            .api
            .orders_with_appointments(self.start_date.as_deref(), self.end_date.as_deref())
            .await
        {
            Ok(orders) => {
                self.events = orders.iter().filter_map(CalendarEvent::from_order).collect();
                tracing::debug!(events = self.events.len(), "Appointments loaded");
            }
            Err(e) => {
                tracing::error!(error = %e, "Appointments load failed");
                self.error = Some(e.user_message());
            }
        }
        self.loading = false;
    }

    pub fn set_view(&mut self, view: CalendarView) {
        self.view = view;
    }

    pub fn set_month(&mut self, year: i32, month: u32) {
        self.month = (1..=12).contains(&month).then_some((year, month));
    }

    pub fn select(&mut self, event_id: &str) -> Option<&CalendarEvent> {
        self.selected = self.events.iter().find(|e| e.id == event_id).cloned();
        self.selected.as_ref()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Events of the selected month (all events when none is selected),
    /// earliest first
    pub fn visible(&self) -> Vec<&CalendarEvent> {
        let mut events: Vec<&CalendarEvent> = self
            .events
            .iter()
            .filter(|event| match (self.month, event.date()) {
                (None, _) => true,
                (Some((year, month)), Some(date)) => date.year() == year && date.month() == month,
                (Some(_), None) => false,
            })
            .collect();
        events.sort_by(|a, b| a.start.cmp(&b.start));
        events
    }

    /// Visible events bucketed by day, for the month grid
    pub fn events_by_day(&self) -> BTreeMap<NaiveDate, Vec<&CalendarEvent>> {
        let mut days: BTreeMap<NaiveDate, Vec<&CalendarEvent>> = BTreeMap::new();
        for event in self.visible() {
            if let Some(date) = event.date() {
                days.entry(date).or_default().push(event);
            }
        }
        days
    }

    pub fn count_on(&self, day: NaiveDate) -> usize {
        self.events.iter().filter(|e| e.date() == Some(day)).count()
    }

    /// Appointments between `now` and seven days later
    pub fn count_upcoming_week(&self, now: NaiveDateTime) -> usize {
        let horizon = now + Duration::days(7);
        self.events
            .iter()
            .filter_map(|e| parse_datetime(&e.start))
            .filter(|start| *start >= now && *start <= horizon)
            .count()
    }

    pub fn count_today(&self) -> usize {
        self.count_on(Utc::now().date_naive())
    }

    pub fn count_this_week(&self) -> usize {
        self.count_upcoming_week(Utc::now().naive_utc())
    }
}
