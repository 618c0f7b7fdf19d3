//! Ticket aggregate
//!
//! Contact-us messages and maintenance requests share one table,
//! distinguished by [`TicketCategory`].

pub mod model;
pub mod repository;

pub use model::{NewTicket, Ticket, TicketCategory, TicketFilter, TicketStatus};
pub use repository::TicketRepository;
