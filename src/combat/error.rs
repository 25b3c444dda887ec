//! Error types for combat stat mutation.

use thiserror::Error;

/// Errors raised at the stat model's call boundary.
///
/// Out-of-range results are clamped silently; only malformed magnitudes are
/// rejected.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CombatError {
    /// Damage or heal magnitude was negative or not a number.
    #[error("Invalid {kind} amount: {amount}")]
    InvalidArgument { kind: &'static str, amount: f32 },
}
