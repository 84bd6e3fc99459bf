pub mod agent;
pub mod configuration;
pub mod errors;
pub mod keyword;
pub mod models;
pub mod providers;
pub mod responder;
pub mod systems;
pub mod weather;
