// src/handlers/mod.rs

pub mod auth;
pub mod classes;
pub mod quiz;
pub mod results;
pub mod students;
