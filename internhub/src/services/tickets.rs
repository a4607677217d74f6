//! Support tickets service
//!
//! Student help requests with a threaded, append-only message list.
//! Every message or status change bumps `updated_at`.

use crate::database::{
    shallow_merge, Collection, CreateTicketRequest, MessageSender, Store, SupportMessage,
    SupportTicket, TicketStatus, UpdateTicketRequest, User,
};
use crate::error::{AppError, Result};
use crate::ids::{MessageId, TicketId, UserId};
use chrono::Utc;

#[derive(Clone)]
pub struct TicketsService {
    tickets: Collection<SupportTicket>,
}

impl TicketsService {
    pub fn new(store: Store) -> Self {
        Self {
            tickets: store.collection(),
        }
    }

    pub async fn list(&self) -> Result<Vec<SupportTicket>> {
        self.tickets.list().await
    }

    pub async fn get(&self, id: &TicketId) -> Result<SupportTicket> {
        self.tickets.get(id).await
    }

    pub async fn list_for_student(&self, student_id: &UserId) -> Result<Vec<SupportTicket>> {
        let tickets = self.list().await?;
        Ok(tickets
            .into_iter()
            .filter(|t| &t.student_id == student_id)
            .collect())
    }

    /// Open a ticket; the request message becomes the first message
    pub async fn create(&self, req: CreateTicketRequest, student: &User) -> Result<SupportTicket> {
        if req.message.trim().is_empty() {
            return Err(AppError::InvalidInput("ticket message is empty".to_string()));
        }

        tracing::info!("Opening support ticket for {}: {}", student.id, req.subject);

        let id = TicketId::generate();
        let now = Utc::now();
        let sender = MessageSender::from(student);

        let ticket = SupportTicket {
            messages: vec![SupportMessage {
                id: MessageId::generate(),
                ticket_id: id.clone(),
                sender_id: sender.id,
                sender_name: sender.name,
                sender_role: sender.role,
                message: req.message,
                created_at: now,
            }],
            id,
            student_id: student.id.clone(),
            student_name: student.name.clone(),
            student_email: student.email.clone(),
            subject: req.subject,
            category: req.category,
            status: TicketStatus::Open,
            priority: req.priority,
            created_at: now,
            updated_at: now,
        };

        self.tickets.prepend(ticket).await
    }

    /// Append a reply to the ticket thread. NotFound when the ticket is gone.
    pub async fn add_message(
        &self,
        ticket_id: &TicketId,
        sender: &MessageSender,
        message: &str,
    ) -> Result<SupportTicket> {
        tracing::debug!("New message on ticket {} from {}", ticket_id, sender.id);

        self.tickets
            .modify(ticket_id, |ticket| {
                let now = Utc::now();
                ticket.messages.push(SupportMessage {
                    id: MessageId::generate(),
                    ticket_id: ticket.id.clone(),
                    sender_id: sender.id.clone(),
                    sender_name: sender.name.clone(),
                    sender_role: sender.role,
                    message: message.to_string(),
                    created_at: now,
                });
                ticket.updated_at = now;
                Ok(())
            })
            .await
    }

    /// Patch subject, category or priority. NotFound when the ticket is gone.
    pub async fn update(
        &self,
        id: &TicketId,
        patch: &UpdateTicketRequest,
    ) -> Result<SupportTicket> {
        tracing::info!("Updating support ticket: {}", id);

        self.tickets
            .modify(id, |ticket| {
                *ticket = shallow_merge(ticket, patch)?;
                ticket.updated_at = Utc::now();
                Ok(())
            })
            .await
    }

    pub async fn set_status(
        &self,
        ticket_id: &TicketId,
        status: TicketStatus,
    ) -> Result<SupportTicket> {
        tracing::info!("Ticket {} -> {:?}", ticket_id, status);

        self.tickets
            .modify(ticket_id, |ticket| {
                ticket.status = status;
                ticket.updated_at = Utc::now();
                Ok(())
            })
            .await
    }

    pub async fn remove(&self, id: &TicketId) -> Result<()> {
        tracing::info!("Deleting support ticket: {}", id);
        self.tickets.remove(id).await?;
        Ok(())
    }
}
