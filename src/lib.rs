//! Internship placement service built around a role-aware user registry.
//!
//! `directory` owns identities (students, staff, company representatives) and the
//! registry that keeps them unique. `placements` owns the entities those users act on:
//! listings, applications, and representative accounts.

pub mod app;
pub mod config;
pub mod directory;
pub mod error;
pub mod placements;
pub mod telemetry;
