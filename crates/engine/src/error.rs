//! Engine error type.

use thiserror::Error;

/// Failures signalled by the pure state transforms.
///
/// Lookups (`is_participating`, `get_progress`) never error; they return
/// defaults on absence. Commands error when the target state makes the
/// command meaningless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// A participation for this (user, challenge) pair already exists.
    #[error("user {user_id} is already participating in challenge {challenge_id}")]
    AlreadyParticipating {
        /// The joining user.
        user_id: String,
        /// The challenge being joined.
        challenge_id: String,
    },

    /// No participation exists for this (user, challenge) pair.
    #[error("user {user_id} has no participation in challenge {challenge_id}")]
    ParticipationNotFound {
        /// The acting user.
        user_id: String,
        /// The challenge being updated.
        challenge_id: String,
    },
}
