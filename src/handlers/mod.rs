pub mod auth;
pub mod diary;
pub mod health;
pub mod stats;
