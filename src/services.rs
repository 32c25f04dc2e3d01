// src/services.rs

pub mod auth;
pub mod client_service;
pub mod contact_service;
pub mod interaction_service;
pub mod opportunity_service;
pub mod rendez_vous_service;
pub mod stats_service;
pub mod user_service;

pub use auth::AuthService;
pub use client_service::ClientService;
pub use contact_service::ContactService;
pub use interaction_service::InteractionService;
pub use opportunity_service::OpportunityService;
pub use rendez_vous_service::RendezVousService;
pub use stats_service::StatsService;
pub use user_service::UserService;
