//! SMM panel API: request/response model and the HTTP adapter.

pub mod client;
pub mod types;

pub use client::{HttpSmmClient, SmmApi};
pub use types::{Action, ActionRequest, ActionResponse, OrderStatus};
