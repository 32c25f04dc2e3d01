pub mod user_repo;
pub use user_repo::UserRepository;
pub mod client_repo;
pub use client_repo::ClientRepository;
pub mod rendez_vous_repo;
pub use rendez_vous_repo::RendezVousRepository;
pub mod opportunity_repo;
pub use opportunity_repo::OpportunityRepository;
pub mod interaction_repo;
pub use interaction_repo::InteractionRepository;
pub mod contact_repo;
pub use contact_repo::ContactRepository;
pub mod stats_repo;
pub use stats_repo::StatsRepository;
