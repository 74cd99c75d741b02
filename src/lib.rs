pub mod configuration;
pub mod domain;
pub mod routes;
pub mod scoring;
pub mod startup;
