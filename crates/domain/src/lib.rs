//! Domain layer for the FightPicks backend.
//!
//! This crate contains:
//! - Domain models (Event, Fighter, Fight, Prediction, Group, GroupInvite)
//! - Business logic services (scoring, ranking, membership, banner)
//! - Domain error types

pub mod models;
pub mod services;
