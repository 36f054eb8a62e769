//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories and external systems.

pub mod job;
pub mod resume;
pub mod user;

pub use job::JobService;
pub use resume::ResumeService;
pub use user::UserService;
