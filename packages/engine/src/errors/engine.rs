//! Engine-level error type returned by every public operation.
//!
//! This error type is transport-agnostic. The room/session collaborator is
//! responsible for turning these into user-facing messages; the engine never
//! panics for an expected failure.

use thiserror::Error;

/// Recoverable rule violations. No state mutation has occurred when one of
/// these is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum RuleViolationKind {
    GameNotActive,
    UnknownPlayer,
    OutOfTurn,
    Disconnected,
    AlreadyFinished,
    CardsNotHeld,
    DuplicateCards,
    DisallowedBomb,
    UnrecognizedCombination,
    FirstPlayNeedsDiamondFour,
    WrongCategory,
    WrongSize,
    DoesNotBeat,
    MustPlay,
    NoLegalPlay,
}

/// Setup/corruption failures. The caller must not treat the game as started
/// when one of these comes back from `start_game`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum SetupIssueKind {
    PlayerCount,
    DeckUnderflow,
    MissingDiamondFour,
    MissingRoleCard,
}

/// Central engine error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Expected rule violation; always recoverable.
    #[error("rule violation {kind:?}: {detail}")]
    Rule {
        kind: RuleViolationKind,
        detail: String,
    },
    /// Corrupt deal or bad roster at game start.
    #[error("setup error {kind:?}: {detail}")]
    Setup {
        kind: SetupIssueKind,
        detail: String,
    },
    /// Structural engine fault; the game is force-ended when one of these
    /// surfaces internally.
    #[error("fatal engine error: {detail}")]
    Fatal { detail: String },
}

impl EngineError {
    pub fn rule(kind: RuleViolationKind, detail: impl Into<String>) -> Self {
        Self::Rule {
            kind,
            detail: detail.into(),
        }
    }

    pub fn setup(kind: SetupIssueKind, detail: impl Into<String>) -> Self {
        Self::Setup {
            kind,
            detail: detail.into(),
        }
    }

    pub fn fatal(detail: impl Into<String>) -> Self {
        Self::Fatal {
            detail: detail.into(),
        }
    }

    /// Kind accessor for tests and callers that branch on rule violations.
    pub fn rule_kind(&self) -> Option<RuleViolationKind> {
        match self {
            Self::Rule { kind, .. } => Some(*kind),
            _ => None,
        }
    }
}
