// src/handlers.rs

pub mod auth;
pub mod clients;
pub mod contacts;
pub mod interactions;
pub mod opportunities;
pub mod rendez_vous;
pub mod stats;
pub mod users;
