pub mod diary_entry;
pub mod mood;
pub mod user;
