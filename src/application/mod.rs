/// Application layer - Use cases, DTOs and hosting services
///
/// This layer orchestrates the snapshot engine and coordinates with
/// infrastructure through ports.
pub mod dto;
pub mod factories;
pub mod read_models;
pub mod services;
pub mod use_cases;
