//! Database repositories
//!
//! Provides data access layer for database operations.

pub mod job;
pub mod profile;
pub mod user;

pub use job::{ApplyOutcome, CreateJob, JobRecord, JobRepository, JobWithPosterRecord};
pub use profile::{ProfileRecord, ProfileRepository, UpsertProfile};
pub use user::{CreateUser, UserRecord, UserRepository};
