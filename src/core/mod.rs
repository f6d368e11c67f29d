pub mod application;
pub mod filter;
pub mod form;
pub mod hackathon;
pub mod listing;
pub mod membership;
pub mod notification;
pub mod project;
pub mod task;
pub mod user;
