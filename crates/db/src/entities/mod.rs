//! Database entities.

pub mod challenge;
pub mod challenge_participant;
pub mod daily_log;
pub mod user;

pub use challenge::Entity as Challenge;
pub use challenge_participant::Entity as ChallengeParticipant;
pub use daily_log::Entity as DailyLog;
pub use user::Entity as User;
