//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod attendance_repo;
pub mod complaint_repo;
pub mod connection_repo;
pub mod feedback_repo;
pub mod message_repo;
pub mod session_repo;
pub mod task_repo;
pub mod time_slot_repo;
pub mod user_repo;

pub use attendance_repo::AttendanceRepo;
pub use complaint_repo::ComplaintRepo;
pub use connection_repo::ConnectionRepo;
pub use feedback_repo::FeedbackRepo;
pub use message_repo::MessageRepo;
pub use session_repo::SessionRepo;
pub use task_repo::TaskRepo;
pub use time_slot_repo::TimeSlotRepo;
pub use user_repo::UserRepo;
