// src/common.rs

pub mod calendar;
pub mod error;
pub mod extract;
