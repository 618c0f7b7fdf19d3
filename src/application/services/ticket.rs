//! Contact-us messages and maintenance requests
//!
//! Every new ticket is forwarded to the support mailbox. The ticket is
//! stored first; a failed notification is logged and does not fail the
//! request.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::ports::{MailMessage, Mailer};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::ticket::{NewTicket, Ticket, TicketCategory, TicketFilter, TicketStatus};
use crate::domain::{DomainError, DomainResult};
use crate::shared::{require_non_empty, PaginatedResult, PaginationParams};

use super::AuthenticatedUser;

#[derive(Debug, Clone)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct MaintenanceRequest {
    pub property_id: i32,
    pub subject: String,
    pub message: String,
}

pub struct TicketService {
    repos: Arc<dyn RepositoryProvider>,
    mailer: Arc<dyn Mailer>,
    support_address: String,
}

impl TicketService {
    pub fn new(
        repos: Arc<dyn RepositoryProvider>,
        mailer: Arc<dyn Mailer>,
        support_address: impl Into<String>,
    ) -> Self {
        Self {
            repos,
            mailer,
            support_address: support_address.into(),
        }
    }

    async fn notify_support(&self, ticket: &Ticket, property_name: Option<&str>) {
        let mut body = format!(
            "New {} ticket #{}\n\nFrom: {} <{}>\n",
            ticket.category.as_str(),
            ticket.id,
            ticket.name,
            ticket.email
        );
        if let Some(phone) = &ticket.phone {
            body.push_str(&format!("Phone: {}\n", phone));
        }
        if let Some(name) = property_name {
            body.push_str(&format!("Property: {}\n", name));
        }
        body.push_str(&format!("\n{}\n", ticket.message));

        let message = MailMessage::new(
            &self.support_address,
            format!("[{}] {}", ticket.category.as_str(), ticket.subject),
            body,
        );
        if let Err(e) = self.mailer.send(message).await {
            warn!(ticket_id = ticket.id, error = %e, "Ticket notification not delivered");
        }
    }

    pub async fn contact(&self, request: ContactRequest) -> DomainResult<Ticket> {
        let name = require_non_empty("name", &request.name).map_err(DomainError::Validation)?;
        let email = request.email.trim().to_lowercase();
        if !email.contains('@') {
            return Err(DomainError::Validation("A valid email is required".into()));
        }
        let subject = require_non_empty("subject", &request.subject).map_err(DomainError::Validation)?;
        let message = require_non_empty("message", &request.message).map_err(DomainError::Validation)?;

        let ticket = self
            .repos
            .tickets()
            .create(NewTicket {
                category: TicketCategory::ContactUs,
                property_id: None,
                user_id: None,
                name,
                email,
                phone: request.phone,
                subject,
                message,
            })
            .await?;
        self.notify_support(&ticket, None).await;
        Ok(ticket)
    }

    pub async fn maintenance(
        &self,
        caller: &AuthenticatedUser,
        request: MaintenanceRequest,
    ) -> DomainResult<Ticket> {
        let property = self
            .repos
            .properties()
            .find_by_id(request.property_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Property", "id", request.property_id))?;
        let user = self
            .repos
            .users()
            .find_by_id(caller.user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", "id", caller.user_id))?;

        let subject = require_non_empty("subject", &request.subject).map_err(DomainError::Validation)?;
        let message = require_non_empty("message", &request.message).map_err(DomainError::Validation)?;

        let ticket = self
            .repos
            .tickets()
            .create(NewTicket {
                category: TicketCategory::Maintenance,
                property_id: Some(property.id),
                user_id: Some(user.id),
                name: user.full_name(),
                email: user.email.clone(),
                phone: user.phone.clone(),
                subject,
                message,
            })
            .await?;
        self.notify_support(&ticket, Some(&property.property_name)).await;
        Ok(ticket)
    }

    pub async fn list(
        &self,
        caller: &AuthenticatedUser,
        filter: TicketFilter,
        page: PaginationParams,
    ) -> DomainResult<PaginatedResult<Ticket>> {
        caller.require_admin()?;
        self.repos.tickets().list(filter, page).await
    }

    pub async fn get(&self, caller: &AuthenticatedUser, id: i32) -> DomainResult<Ticket> {
        let ticket = self
            .repos
            .tickets()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ticket", "id", id))?;
        if !caller.is_admin() && ticket.user_id != Some(caller.user_id) {
            return Err(DomainError::Forbidden("Not allowed to view this ticket".into()));
        }
        Ok(ticket)
    }

    pub async fn update_status(
        &self,
        caller: &AuthenticatedUser,
        id: i32,
        status: TicketStatus,
    ) -> DomainResult<Ticket> {
        caller.require_admin()?;
        let ticket = self.get(caller, id).await?;
        if !ticket.status.can_transition_to(status) {
            return Err(DomainError::Validation(format!(
                "Ticket cannot move from {} to {}",
                ticket.status, status
            )));
        }
        let updated = self
            .repos
            .tickets()
            .update_status(id, status, Some(caller.user_id))
            .await?;
        info!(ticket_id = id, status = %status, by = caller.user_id, "Ticket updated");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::mailer::testing::RecordingMailer;
    use crate::application::services::test_support::fixture;

    fn contact() -> ContactRequest {
        ContactRequest {
            name: "Sam".into(),
            email: "Sam@Example.com".into(),
            phone: None,
            subject: "Availability".into(),
            message: "Is August free?".into(),
        }
    }

    #[tokio::test]
    async fn contact_ticket_notifies_support() {
        let fx = fixture().await;
        let mailer = Arc::new(RecordingMailer::default());
        let tickets = TicketService::new(fx.repos.clone(), mailer.clone(), "support@example.com");

        let ticket = tickets.contact(contact()).await.unwrap();
        assert_eq!(ticket.category, TicketCategory::ContactUs);
        assert_eq!(ticket.status, TicketStatus::Open);

        let sent = mailer.messages();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].to, "support@example.com");
        assert!(sent[0].subject.contains("Availability"));
        assert!(sent[0].body.contains("sam@example.com"));
    }

    #[tokio::test]
    async fn mail_failure_keeps_the_ticket() {
        let fx = fixture().await;
        let tickets = TicketService::new(
            fx.repos.clone(),
            Arc::new(RecordingMailer::failing()),
            "support@example.com",
        );
        let ticket = tickets.contact(contact()).await.unwrap();
        assert!(tickets.get(&fx.admin_caller(), ticket.id).await.is_ok());
    }

    #[tokio::test]
    async fn maintenance_requires_existing_property() {
        let fx = fixture().await;
        let mailer = Arc::new(RecordingMailer::default());
        let tickets = TicketService::new(fx.repos.clone(), mailer.clone(), "support@example.com");

        let err = tickets
            .maintenance(
                &fx.owner_caller(),
                MaintenanceRequest {
                    property_id: 999,
                    subject: "Leak".into(),
                    message: "Kitchen sink".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        let ticket = tickets
            .maintenance(
                &fx.owner_caller(),
                MaintenanceRequest {
                    property_id: fx.property.id,
                    subject: "Leak".into(),
                    message: "Kitchen sink".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(ticket.user_id, Some(fx.owner.id));
        assert!(mailer.messages()[0].body.contains("Lake House"));
        assert!(tickets.get(&fx.owner_caller(), ticket.id).await.is_ok());
    }

    #[tokio::test]
    async fn closed_tickets_stay_closed() {
        let fx = fixture().await;
        let tickets = TicketService::new(
            fx.repos.clone(),
            Arc::new(RecordingMailer::default()),
            "support@example.com",
        );
        let ticket = tickets.contact(contact()).await.unwrap();

        let err = tickets
            .update_status(&fx.owner_caller(), ticket.id, TicketStatus::Closed)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Forbidden(_)));

        tickets
            .update_status(&fx.admin_caller(), ticket.id, TicketStatus::Closed)
            .await
            .unwrap();
        let err = tickets
            .update_status(&fx.admin_caller(), ticket.id, TicketStatus::Open)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
