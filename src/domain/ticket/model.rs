//! Ticket domain entity

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketCategory {
    ContactUs,
    Maintenance,
}

impl TicketCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContactUs => "ContactUs",
            Self::Maintenance => "Maintenance",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "contactus" | "contact" => Some(Self::ContactUs),
            "maintenance" => Some(Self::Maintenance),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TicketStatus {
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl TicketStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "InProgress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().replace(['_', ' ', '-'], "").as_str() {
            "open" => Some(Self::Open),
            "inprogress" => Some(Self::InProgress),
            "resolved" => Some(Self::Resolved),
            "closed" => Some(Self::Closed),
            _ => None,
        }
    }

    /// Closed tickets are final; everything else may move freely.
    pub fn can_transition_to(&self, next: TicketStatus) -> bool {
        *self != Self::Closed && *self != next
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Ticket {
    pub id: i32,
    pub category: TicketCategory,
    pub property_id: Option<i32>,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
    pub status: TicketStatus,
    pub updated_by: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewTicket {
    pub category: TicketCategory,
    pub property_id: Option<i32>,
    pub user_id: Option<i32>,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub category: Option<TicketCategory>,
    pub status: Option<TicketStatus>,
    pub property_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parse_accepts_common_spellings() {
        assert_eq!(TicketStatus::parse("in_progress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::parse("In Progress"), Some(TicketStatus::InProgress));
        assert_eq!(TicketStatus::parse("RESOLVED"), Some(TicketStatus::Resolved));
        assert_eq!(TicketStatus::parse("reopened"), None);
    }

    #[test]
    fn closed_is_terminal() {
        assert!(TicketStatus::Open.can_transition_to(TicketStatus::Closed));
        assert!(TicketStatus::Resolved.can_transition_to(TicketStatus::Open));
        assert!(!TicketStatus::Closed.can_transition_to(TicketStatus::Open));
        assert!(!TicketStatus::Open.can_transition_to(TicketStatus::Open));
    }

    #[test]
    fn category_parse() {
        assert_eq!(TicketCategory::parse("contact"), Some(TicketCategory::ContactUs));
        assert_eq!(TicketCategory::parse("Maintenance"), Some(TicketCategory::Maintenance));
        assert_eq!(TicketCategory::parse("billing"), None);
    }
}
