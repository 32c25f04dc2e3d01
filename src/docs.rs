// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::login,
        handlers::auth::verify,

        // --- Users ---
        handlers::users::list_users,
        handlers::users::create_user,
        handlers::users::toggle_user,
        handlers::users::delete_user,

        // --- Clients ---
        handlers::clients::list_clients,
        handlers::clients::get_client,
        handlers::clients::create_client,
        handlers::clients::update_client,
        handlers::clients::delete_client,

        // --- Rendez-vous ---
        handlers::rendez_vous::list_rendez_vous,
        handlers::rendez_vous::get_calendar,
        handlers::rendez_vous::create_rendez_vous,
        handlers::rendez_vous::update_rendez_vous,
        handlers::rendez_vous::update_statut,
        handlers::rendez_vous::delete_rendez_vous,

        // --- Opportunités ---
        handlers::opportunities::list_opportunites,
        handlers::opportunities::create_opportunite,
        handlers::opportunities::update_opportunite,
        handlers::opportunities::delete_opportunite,

        // --- Interactions ---
        handlers::interactions::list_interactions,
        handlers::interactions::create_interaction,
        handlers::interactions::delete_interaction,

        // --- Contacts ---
        handlers::contacts::list_contacts,
        handlers::contacts::create_contact,
        handlers::contacts::update_contact,
        handlers::contacts::delete_contact,

        // --- Stats ---
        handlers::stats::get_stats,
    ),
    components(
        schemas(
            // --- Shared ---
            models::CreatedResponse,
            models::SuccessResponse,

            // --- Auth ---
            models::auth::Role,
            models::auth::CurrentUser,
            models::auth::PublicUser,
            models::auth::UserSummary,
            models::auth::LoginPayload,
            models::auth::LoginResponse,
            models::auth::VerifyResponse,
            models::auth::CreateUserPayload,
            models::auth::ToggleResponse,

            // --- Clients ---
            models::client::RdvMode,
            models::client::Client,
            models::client::ClientPayload,

            // --- Rendez-vous ---
            models::rendez_vous::RdvStatut,
            models::rendez_vous::RdvType,
            models::rendez_vous::RendezVous,
            models::rendez_vous::RendezVousDetail,
            models::rendez_vous::RendezVousPayload,
            models::rendez_vous::StatutPayload,
            models::rendez_vous::CalendarDay,
            models::rendez_vous::CalendarWeek,

            // --- Opportunités ---
            models::opportunity::Etape,
            models::opportunity::Opportunite,
            models::opportunity::OpportunitePayload,

            // --- Interactions ---
            models::interaction::InteractionType,
            models::interaction::Interaction,
            models::interaction::InteractionPayload,

            // --- Contacts ---
            models::contact::Contact,
            models::contact::ContactPayload,

            // --- Stats ---
            models::stats::Stats,
        )
    ),
    tags(
        (name = "Auth", description = "Connexion et vérification du token"),
        (name = "Users", description = "Comptes utilisateurs (écriture réservée aux admins)"),
        (name = "Clients", description = "Fiches clients et rendez-vous associés"),
        (name = "Rendez-vous", description = "Agenda et vue calendrier"),
        (name = "Opportunités", description = "Pipeline commercial"),
        (name = "Interactions", description = "Historique des échanges"),
        (name = "Contacts", description = "Interlocuteurs des clients"),
        (name = "Stats", description = "Indicateurs du tableau de bord")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(
                Http::new(HttpAuthScheme::Bearer)
            ),
        );
    }
}
