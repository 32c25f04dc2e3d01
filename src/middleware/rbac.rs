// src/middleware/rbac.rs

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{CurrentUser, Role},
};

/// A set of roles allowed through a route.
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: Role) -> bool;
}

/// Extractor guard: rejects with 403 unless the caller's role passes `T`.
/// Must run before the body extractor so that a forbidden request is never
/// validated.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<CurrentUser>()
            .ok_or(AppError::MissingToken)?;

        if !T::allows(user.role) {
            tracing::warn!("⛔ {} ({:?}) refusé sur une route réservée", user.username, user.role);
            return Err(AppError::Forbidden);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// Role sets
// ---

pub struct AdminOnly;
impl RoleDef for AdminOnly {
    fn allows(role: Role) -> bool {
        role == Role::Admin
    }
}
