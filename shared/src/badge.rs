//! Status and role badges

use rust_decimal::Decimal;

use crate::models::OrderStatus;

/// Badge palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BadgeColor {
    Blue,
    Green,
    Purple,
    Red,
    Gray,
}

impl BadgeColor {
    pub fn hex(self) -> &'static str {
        match self {
            BadgeColor::Blue => "#3b82f6",
            BadgeColor::Green => "#10b981",
            BadgeColor::Purple => "#8b5cf6",
            BadgeColor::Red => "#ef4444",
            BadgeColor::Gray => "#6b7280",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            BadgeColor::Blue => "blue",
            BadgeColor::Green => "green",
            BadgeColor::Purple => "purple",
            BadgeColor::Red => "red",
            BadgeColor::Gray => "gray",
        }
    }
}

pub fn order_status_color(status: OrderStatus) -> BadgeColor {
    match status {
        OrderStatus::EnCours => BadgeColor::Blue,
        OrderStatus::Termine => BadgeColor::Green,
        OrderStatus::Livre => BadgeColor::Purple,
        OrderStatus::Annule => BadgeColor::Red,
    }
}

/// Color of a raw status label; unknown labels are gray
pub fn status_label_color(label: &str) -> BadgeColor {
    OrderStatus::parse(label)
        .map(order_status_color)
        .unwrap_or(BadgeColor::Gray)
}

pub fn role_color(role: &str) -> BadgeColor {
    match role.trim().to_lowercase().as_str() {
        "admin" => BadgeColor::Purple,
        "manager" => BadgeColor::Blue,
        "client" => BadgeColor::Green,
        _ => BadgeColor::Gray,
    }
}

pub fn user_status_text(active: bool) -> &'static str {
    if active { "Actif" } else { "Inactif" }
}

pub fn user_status_color(active: bool) -> BadgeColor {
    if active { BadgeColor::Green } else { BadgeColor::Red }
}

/// Tone of a signed amount: green when ≥ 0
pub fn amount_color(signed: Decimal) -> BadgeColor {
    if signed >= Decimal::ZERO {
        BadgeColor::Green
    } else {
        BadgeColor::Red
    }
}

pub fn amount_prefix(signed: Decimal) -> &'static str {
    if signed >= Decimal::ZERO { "+" } else { "" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_colors() {
        assert_eq!(order_status_color(OrderStatus::EnCours).hex(), "#3b82f6");
        assert_eq!(order_status_color(OrderStatus::Termine).hex(), "#10b981");
        assert_eq!(order_status_color(OrderStatus::Livre).hex(), "#8b5cf6");
        assert_eq!(order_status_color(OrderStatus::Annule).hex(), "#ef4444");
        assert_eq!(status_label_color("Perdu").hex(), "#6b7280");
    }

    #[test]
    fn test_role_colors_ignore_case() {
        assert_eq!(role_color("Admin"), BadgeColor::Purple);
        assert_eq!(role_color("MANAGER"), BadgeColor::Blue);
        assert_eq!(role_color("user"), BadgeColor::Gray);
        assert_eq!(role_color("Client"), BadgeColor::Green);
        assert_eq!(role_color("stagiaire"), BadgeColor::Gray);
    }

    #[test]
    fn test_amount_tone() {
        assert_eq!(amount_prefix(Decimal::ZERO), "+");
        assert_eq!(amount_color(Decimal::from(-1)), BadgeColor::Red);
        assert_eq!(user_status_text(false), "Inactif");
    }
}
