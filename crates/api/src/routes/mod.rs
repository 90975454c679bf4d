//! HTTP route handlers.

pub mod events;
pub mod fighters;
pub mod groups;
pub mod health;
pub mod invites;
pub mod leaderboard;
pub mod predictions;
