//! Database repositories.

pub mod challenge;
pub mod daily_log;
pub mod user;

pub use challenge::ChallengeRepository;
pub use daily_log::DailyLogRepository;
pub use user::UserRepository;
