pub mod applicants;
pub mod hackathon_details;
pub mod hackathons;
pub mod login;
pub mod notifications;
pub mod profile;
pub mod project_details;
pub mod projects;
pub mod register;
pub mod settings;
pub mod workspace;
pub mod workspace_select;
