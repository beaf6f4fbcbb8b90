// src/models/mod.rs

pub mod result;
pub mod roster;
pub mod task;
pub mod teacher;
