// src/quiz/mod.rs

pub mod generator;
pub mod report;
pub mod scoring;
pub mod session;
