//! Business logic services.

#![allow(missing_docs)]

pub mod challenge;
pub mod habit;
pub mod moderation;
pub mod user;

pub use challenge::{
    ChallengeService, ChallengeStats, CreateChallengeInput, UpdateProgressInput,
};
pub use habit::{ConsistencySummary, HabitService};
pub use moderation::{
    AppBanInput, ExportData, FeedBanInput, ModerationService, MuteUserInput, PenalizePointsInput,
    PermanentBanInput, UserWithStatus,
};
pub use user::{CreateUserInput, UpdateUserInput, UserService};

use slimfit_common::AppError;
use slimfit_engine::EngineError;

/// Map an engine failure into the application error taxonomy.
pub(crate) fn engine_error(err: EngineError) -> AppError {
    match err {
        EngineError::AlreadyParticipating { .. } => AppError::Conflict(err.to_string()),
        EngineError::ParticipationNotFound { .. } => AppError::NotFound(err.to_string()),
    }
}
