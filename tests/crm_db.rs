//! Database-backed behaviour. Needs `DATABASE_URL` pointing at a Postgres
//! server the tests may create scratch databases on:
//!
//! ```sh
//! cargo test -- --ignored
//! ```

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, test_config};
use chrono::{Days, NaiveDateTime};
use crm_backend::{
    common::{
        calendar::{self, RangeFilter},
        error::AppError,
    },
    config::AppState,
    db::UserRepository,
    models::{
        auth::{CreateUserPayload, CurrentUser, Role},
        client::{ClientInput, ClientPayload},
        contact::ContactPayload,
        interaction::InteractionPayload,
        opportunity::OpportunitePayload,
        rendez_vous::{RdvStatut, RendezVousDetail, RendezVousPayload},
    },
};
use rust_decimal::Decimal;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

fn state(pool: PgPool) -> AppState {
    AppState::from_pool(pool, test_config())
}

fn someone(role: Role) -> CurrentUser {
    CurrentUser {
        id: Uuid::new_v4(),
        username: format!("{role:?}").to_lowercase(),
        role,
    }
}

fn client_input(body: serde_json::Value) -> ClientInput {
    let payload: ClientPayload = serde_json::from_value(body).unwrap();
    ClientInput::try_from(payload).unwrap()
}

async fn rdv_count(pool: &PgPool, client_id: Uuid) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM rendez_vous WHERE client_id = $1")
        .bind(client_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

async fn new_client(app: &AppState, owner: &CurrentUser, nom: &str) -> Uuid {
    app.client_service
        .create_client(owner, &client_input(json!({ "nom": nom })))
        .await
        .unwrap()
}

async fn new_rdv(app: &AppState, owner: &CurrentUser, client_id: Uuid, titre: &str, at: NaiveDateTime) -> Uuid {
    let payload: RendezVousPayload = serde_json::from_value(json!({
        "client_id": client_id,
        "titre": titre,
        "date_heure": at.format("%Y-%m-%dT%H:%M:%S%.f").to_string()
    }))
    .unwrap();
    app.rendez_vous_service.create(owner, payload).await.unwrap()
}

async fn new_opportunite(app: &AppState, owner: &CurrentUser, client_id: Uuid, montant: f64, etape: &str) -> Uuid {
    let payload: OpportunitePayload = serde_json::from_value(json!({
        "client_id": client_id,
        "titre": format!("Affaire {etape}"),
        "montant": montant,
        "etape": etape
    }))
    .unwrap();
    app.opportunity_service.create(owner, payload).await.unwrap()
}

async fn titles_in(app: &AppState, user: &CurrentUser, filter: Option<RangeFilter>) -> Vec<String> {
    let mut titles: Vec<String> = app
        .rendez_vous_service
        .list(user, filter)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.rdv.titre)
        .collect();
    titles.sort_unstable();
    titles
}

// ---------------------------------------------------------------------------
// Clients and their mirrored appointment
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn client_with_date_gets_exactly_one_appointment(pool: PgPool) {
    let app = state(pool.clone());
    let user = someone(Role::User);

    let with_date = client_input(json!({
        "nom": "Durand",
        "entreprise": "Seven Energy",
        "date_rdv": "2025-12-05T10:00",
        "notes_rdv": "Devis toiture"
    }));
    let id = app.client_service.create_client(&user, &with_date).await.unwrap();

    assert_eq!(rdv_count(&pool, id).await, 1);
    let (titre, description, statut, owner): (String, Option<String>, RdvStatut, Option<Uuid>) =
        sqlx::query_as("SELECT titre, description, statut, user_id FROM rendez_vous WHERE client_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(titre, "RDV - Seven Energy");
    assert_eq!(description.as_deref(), Some("Devis toiture"));
    assert_eq!(statut, RdvStatut::Planifie);
    assert_eq!(owner, Some(user.id));

    let blank_date = client_input(json!({ "nom": "Martin", "date_rdv": "  " }));
    let id = app.client_service.create_client(&user, &blank_date).await.unwrap();
    assert_eq!(rdv_count(&pool, id).await, 0);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn updating_a_client_upserts_its_appointment(pool: PgPool) {
    let app = state(pool.clone());
    let user = someone(Role::Manager);

    let id = app
        .client_service
        .create_client(&user, &client_input(json!({ "nom": "Petit" })))
        .await
        .unwrap();
    assert_eq!(rdv_count(&pool, id).await, 0);

    let dated = client_input(json!({ "nom": "Petit", "date_rdv": "2025-12-08 14:00" }));
    app.client_service.update_client(&user, id, &dated).await.unwrap();
    assert_eq!(rdv_count(&pool, id).await, 1);

    let moved = client_input(json!({
        "nom": "Petit",
        "entreprise": "Petit & Fils",
        "date_rdv": "2025-12-09T09:30",
        "statut_rdv": "confirme"
    }));
    app.client_service.update_client(&user, id, &moved).await.unwrap();
    assert_eq!(rdv_count(&pool, id).await, 1);

    let (titre, statut): (String, RdvStatut) =
        sqlx::query_as("SELECT titre, statut FROM rendez_vous WHERE client_id = $1")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(titre, "RDV - Petit & Fils");
    assert_eq!(statut, RdvStatut::Confirme);

    let client = app.client_service.get_client(&user, id).await.unwrap();
    assert_eq!(client.statut_rdv, RdvStatut::Confirme);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn deleting_a_client_removes_everything_attached(pool: PgPool) {
    let app = state(pool.clone());
    let user = someone(Role::Admin);

    let id = app
        .client_service
        .create_client(&user, &client_input(json!({ "nom": "Roux", "date_rdv": "2025-12-05T10:00" })))
        .await
        .unwrap();
    let contact: ContactPayload =
        serde_json::from_value(json!({ "client_id": id, "nom": "Roux", "prenom": "Anne" })).unwrap();
    app.contact_service.create(&user, &contact).await.unwrap();

    app.client_service.delete_client(&user, id).await.unwrap();

    assert_eq!(rdv_count(&pool, id).await, 0);
    let contacts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM contacts WHERE client_id = $1")
        .bind(id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(contacts, 0);

    let again = app.client_service.delete_client(&user, id).await;
    assert!(matches!(again, Err(AppError::NotFound("Client"))));
}

// ---------------------------------------------------------------------------
// Visibility per role
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn teleprospecteur_only_sees_its_clients(pool: PgPool) {
    let app = state(pool);
    let tele = someone(Role::Teleprospecteur);
    let colleague = someone(Role::User);

    let mine = app
        .client_service
        .create_client(&tele, &client_input(json!({ "nom": "Mien" })))
        .await
        .unwrap();
    let theirs = app
        .client_service
        .create_client(&colleague, &client_input(json!({ "nom": "Autre" })))
        .await
        .unwrap();

    let visible = app.client_service.list_clients(&tele).await.unwrap();
    assert_eq!(visible.iter().map(|c| c.id).collect::<Vec<_>>(), vec![mine]);

    assert!(app.client_service.get_client(&tele, theirs).await.is_err());
    assert_eq!(app.client_service.list_clients(&colleague).await.unwrap().len(), 2);
    assert_eq!(app.client_service.list_clients(&someone(Role::Manager)).await.unwrap().len(), 2);

    let stats = app.stats_service.get_stats(&tele).await.unwrap();
    assert_eq!(stats.total_clients, 1);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn appointments_are_flagged_per_role(pool: PgPool) {
    let app = state(pool);
    let owner = someone(Role::User);
    let other_user = someone(Role::User);
    let manager = someone(Role::Manager);

    let client_id = app
        .client_service
        .create_client(&owner, &client_input(json!({ "nom": "Bernard" })))
        .await
        .unwrap();
    let payload: RendezVousPayload = serde_json::from_value(json!({
        "client_id": client_id,
        "titre": "Présentation",
        "date_heure": "2025-12-03T11:00"
    }))
    .unwrap();
    let rdv_id = app.rendez_vous_service.create(&owner, payload).await.unwrap();

    let is_mine = |rows: Vec<RendezVousDetail>| {
        rows.into_iter().find(|r| r.rdv.id == rdv_id).map(|r| r.is_mine)
    };
    assert_eq!(is_mine(app.rendez_vous_service.list(&owner, None).await.unwrap()), Some(true));
    assert_eq!(is_mine(app.rendez_vous_service.list(&other_user, None).await.unwrap()), Some(false));
    assert_eq!(is_mine(app.rendez_vous_service.list(&manager, None).await.unwrap()), Some(true));

    // Locked for the other user, open to the manager
    let denied = app
        .rendez_vous_service
        .update_statut(&other_user, rdv_id, RdvStatut::Annule)
        .await;
    assert!(matches!(denied, Err(AppError::Forbidden)));
    app.rendez_vous_service
        .update_statut(&manager, rdv_id, RdvStatut::Confirme)
        .await
        .unwrap();

    let week = app
        .rendez_vous_service
        .calendar(&owner, chrono::NaiveDate::from_ymd_opt(2025, 12, 5))
        .await
        .unwrap();
    assert_eq!(week.week_start.to_string(), "2025-12-01");
    assert_eq!(week.days[2].rendez_vous.len(), 1);
    assert_eq!(week.days[2].rendez_vous[0].rdv.statut, RdvStatut::Confirme);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn appointment_filters_bound_today_week_and_month(pool: PgPool) {
    let app = state(pool);
    let user = someone(Role::User);
    let client_id = new_client(&app, &user, "Lambert").await;

    let today = calendar::today();
    let monday = calendar::week_start(today).unwrap();
    let later = today.checked_add_days(Days::new(40)).unwrap();

    new_rdv(&app, &user, client_id, "a-matin", today.and_hms_opt(10, 0, 0).unwrap()).await;
    new_rdv(&app, &user, client_id, "b-minuit-moins", today.and_hms_micro_opt(23, 59, 59, 999_900).unwrap()).await;
    new_rdv(&app, &user, client_id, "c-plus-tard", later.and_hms_opt(9, 0, 0).unwrap()).await;
    new_rdv(&app, &user, client_id, "d-lundi", monday.and_hms_opt(0, 0, 0).unwrap()).await;

    let has = |titles: &[String], titre: &str| titles.iter().any(|t| t == titre);

    let all = titles_in(&app, &user, None).await;
    assert_eq!(all, vec!["a-matin", "b-minuit-moins", "c-plus-tard", "d-lundi"]);

    let day = titles_in(&app, &user, Some(RangeFilter::Today)).await;
    assert!(has(&day, "a-matin") && has(&day, "b-minuit-moins"), "{day:?}");
    assert!(!has(&day, "c-plus-tard"));
    assert_eq!(has(&day, "d-lundi"), today == monday);

    let week = titles_in(&app, &user, Some(RangeFilter::Week)).await;
    assert_eq!(week, vec!["a-matin", "b-minuit-moins", "d-lundi"]);

    let month = titles_in(&app, &user, Some(RangeFilter::Month)).await;
    assert!(has(&month, "a-matin") && has(&month, "b-minuit-moins"));
    assert!(!has(&month, "c-plus-tard"));

    // The last microseconds of the day still count as today.
    let stats = app.stats_service.get_stats(&user).await.unwrap();
    assert_eq!(stats.rdv_aujourdhui, if today == monday { 3 } else { 2 });
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn teleprospecteur_is_confined_to_its_clients_children(pool: PgPool) {
    let app = state(pool);
    let tele = someone(Role::Teleprospecteur);
    let colleague = someone(Role::User);

    let mine = new_client(&app, &tele, "Mien").await;
    let theirs = new_client(&app, &colleague, "Autre").await;

    let my_opp = new_opportunite(&app, &tele, mine, 100.0, "prospection").await;
    let their_opp = new_opportunite(&app, &colleague, theirs, 200.0, "prospection").await;

    let interaction = |client_id: Uuid| -> InteractionPayload {
        serde_json::from_value(json!({ "client_id": client_id, "type": "appel", "contenu": "Rappel" })).unwrap()
    };
    let my_note = app.interaction_service.create(&tele, &interaction(mine)).await.unwrap();
    let their_note = app.interaction_service.create(&colleague, &interaction(theirs)).await.unwrap();

    let contact = |client_id: Uuid| -> ContactPayload {
        serde_json::from_value(json!({ "client_id": client_id, "nom": "Garnier", "prenom": "Luc" })).unwrap()
    };
    let my_contact = app.contact_service.create(&tele, &contact(mine)).await.unwrap();
    let their_contact = app.contact_service.create(&colleague, &contact(theirs)).await.unwrap();

    // Lists only show what hangs off the teleprospecteur's clients
    let opps = app.opportunity_service.list(&tele, None).await.unwrap();
    assert_eq!(opps.iter().map(|o| o.id).collect::<Vec<_>>(), vec![my_opp]);
    let notes = app.interaction_service.list(&tele, None).await.unwrap();
    assert_eq!(notes.iter().map(|i| i.id).collect::<Vec<_>>(), vec![my_note]);
    let contacts = app.contact_service.list(&tele, None).await.unwrap();
    assert_eq!(contacts.iter().map(|c| c.id).collect::<Vec<_>>(), vec![my_contact]);
    assert!(app.opportunity_service.list(&tele, Some(theirs)).await.unwrap().is_empty());

    // A plain user still sees everything
    assert_eq!(app.opportunity_service.list(&colleague, None).await.unwrap().len(), 2);
    assert_eq!(app.interaction_service.list(&colleague, None).await.unwrap().len(), 2);
    assert_eq!(app.contact_service.list(&colleague, None).await.unwrap().len(), 2);

    // Creating under a foreign client looks like a missing client
    let created = app.interaction_service.create(&tele, &interaction(theirs)).await;
    assert!(matches!(created, Err(AppError::NotFound("Client"))));
    let created = app.contact_service.create(&tele, &contact(theirs)).await;
    assert!(matches!(created, Err(AppError::NotFound("Client"))));
    let payload: OpportunitePayload =
        serde_json::from_value(json!({ "client_id": theirs, "titre": "Intrusion" })).unwrap();
    let created = app.opportunity_service.create(&tele, payload).await;
    assert!(matches!(created, Err(AppError::NotFound("Client"))));

    // Deleting foreign children is a 404 and leaves them in place
    assert!(matches!(
        app.opportunity_service.delete(&tele, their_opp).await,
        Err(AppError::NotFound("Opportunité"))
    ));
    assert!(matches!(
        app.interaction_service.delete(&tele, their_note).await,
        Err(AppError::NotFound("Interaction"))
    ));
    assert!(matches!(
        app.contact_service.delete(&tele, their_contact).await,
        Err(AppError::NotFound("Contact"))
    ));
    assert_eq!(app.opportunity_service.list(&colleague, Some(theirs)).await.unwrap().len(), 1);

    app.opportunity_service.delete(&tele, my_opp).await.unwrap();
    app.interaction_service.delete(&tele, my_note).await.unwrap();
    app.contact_service.delete(&tele, my_contact).await.unwrap();
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn pipeline_stats_count_open_opportunities_only(pool: PgPool) {
    let app = state(pool);
    let manager = someone(Role::Manager);
    let tele = someone(Role::Teleprospecteur);

    let big = new_client(&app, &manager, "Grand Compte").await;
    new_opportunite(&app, &manager, big, 1000.50, "prospection").await;
    new_opportunite(&app, &manager, big, 250.0, "negotiation").await;
    new_opportunite(&app, &manager, big, 5000.0, "gagne").await;
    new_opportunite(&app, &manager, big, 300.0, "perdu").await;

    let small = new_client(&app, &tele, "Petit Compte").await;
    new_opportunite(&app, &tele, small, 99.99, "proposition").await;

    let stats = app.stats_service.get_stats(&manager).await.unwrap();
    assert_eq!(stats.opportunites_ouvertes, 3);
    assert_eq!(stats.montant_pipeline, Decimal::new(135049, 2));

    let stats = app.stats_service.get_stats(&tele).await.unwrap();
    assert_eq!(stats.total_clients, 1);
    assert_eq!(stats.opportunites_ouvertes, 1);
    assert_eq!(stats.montant_pipeline, Decimal::new(9999, 2));
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn only_one_principal_contact_per_client(pool: PgPool) {
    let app = state(pool);
    let user = someone(Role::User);
    let client_id = app
        .client_service
        .create_client(&user, &client_input(json!({ "nom": "Moreau" })))
        .await
        .unwrap();

    for prenom in ["Alice", "Bruno"] {
        let payload: ContactPayload = serde_json::from_value(json!({
            "client_id": client_id,
            "nom": "Moreau",
            "prenom": prenom,
            "est_principal": true
        }))
        .unwrap();
        app.contact_service.create(&user, &payload).await.unwrap();
    }

    let contacts = app.contact_service.list(&user, Some(client_id)).await.unwrap();
    let principals: Vec<&str> = contacts
        .iter()
        .filter(|c| c.est_principal)
        .map(|c| c.prenom.as_str())
        .collect();
    assert_eq!(principals, vec!["Bruno"]);
    assert_eq!(contacts[0].prenom, "Bruno");
}

// ---------------------------------------------------------------------------
// Users and login
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn toggling_a_user_flips_its_flag(pool: PgPool) {
    let app = state(pool);
    let admin = someone(Role::Admin);

    let payload: CreateUserPayload =
        serde_json::from_value(json!({ "username": "camille", "password": "secret123" })).unwrap();
    let id = app.user_service.create_user(&payload).await.unwrap();

    assert!(!app.user_service.toggle_active(&admin, id).await.unwrap());
    assert!(app.user_service.toggle_active(&admin, id).await.unwrap());

    let duplicate = app.user_service.create_user(&payload).await;
    assert!(matches!(duplicate, Err(AppError::UsernameAlreadyExists)));

    let missing = app.user_service.toggle_active(&admin, Uuid::new_v4()).await;
    assert!(matches!(missing, Err(AppError::NotFound("Utilisateur"))));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn concurrent_toggles_both_apply(pool: PgPool) {
    let app = state(pool);
    let admin = someone(Role::Admin);

    let payload: CreateUserPayload =
        serde_json::from_value(json!({ "username": "dominique", "password": "secret123" })).unwrap();
    let id = app.user_service.create_user(&payload).await.unwrap();

    let (first, second) = tokio::join!(
        app.user_service.toggle_active(&admin, id),
        app.user_service.toggle_active(&admin, id),
    );
    let mut seen = vec![first.unwrap(), second.unwrap()];
    seen.sort_unstable();
    assert_eq!(seen, vec![false, true]);

    let users = app.user_service.list_users().await.unwrap();
    let user = users.iter().find(|u| u.id == id).unwrap();
    assert!(user.is_active);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore]
async fn bootstrap_admin_can_log_in_once_and_inactive_cannot(pool: PgPool) {
    let app = state(pool.clone());

    assert!(app.user_service.ensure_admin("Admin123!").await.unwrap());
    assert!(!app.user_service.ensure_admin("Admin123!").await.unwrap());

    let router = build_test_app(pool.clone());
    let ok = post_json(
        router.clone(),
        "/api/auth/login",
        None,
        json!({ "username": "admin", "password": "Admin123!" }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    let body = body_json(ok).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "admin");
    assert!(body["token"].is_string());

    let wrong = post_json(
        router.clone(),
        "/api/auth/login",
        None,
        json!({ "username": "admin", "password": "admin" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

    let admin = UserRepository::new(pool)
        .find_active_by_username("admin")
        .await
        .unwrap()
        .unwrap();
    app.user_service
        .toggle_active(&someone(Role::Admin), admin.id)
        .await
        .unwrap();

    let inactive = post_json(
        router,
        "/api/auth/login",
        None,
        json!({ "username": "admin", "password": "Admin123!" }),
    )
    .await;
    assert_eq!(inactive.status(), StatusCode::UNAUTHORIZED);
}
