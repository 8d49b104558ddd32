// Business domains
pub mod advertisers;
pub mod auth;
pub mod contents;
pub mod notifications;
