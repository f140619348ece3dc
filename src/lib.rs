#![doc = "The `tasktracker` library crate."]
#![doc = ""]
#![doc = "This crate contains the core business logic, domain models, authentication and"]
#![doc = "session machinery, persistence traits, routing configuration, and error handling"]
#![doc = "for the task tracker application. It is used by the main binary (`main.rs`) to"]
#![doc = "construct and run the service."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;
