//! Ticket lifecycle and in-memory collection

mod store;

pub use store::TicketStore;
