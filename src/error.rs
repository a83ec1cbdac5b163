//! Error types for the engine.
//!
//! Rule violations and missing cards are internal-consistency faults: they
//! mean discovery offered something execution cannot honour. They surface
//! as `Err` with enough context (player, action, failed precondition) to
//! debug the mismatch. Game-ending conditions are never errors; see
//! [`crate::rules::GameOver`].

use thiserror::Error;

use crate::core::EntityId;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("rule violation by {player} during '{action}': {reason}")]
    RuleViolation {
        player: String,
        action: String,
        reason: String,
    },

    #[error("{card} not found in {player}'s {zone}")]
    CardNotFound {
        player: String,
        card: EntityId,
        zone: &'static str,
    },

    #[error("catalog has no {kind} named '{key}'")]
    MissingCatalogEntry { kind: &'static str, key: String },

    #[error("invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("invalid match setup: {0}")]
    InvalidSetup(String),

    #[error("selection {index} out of range for {len} actions")]
    SelectionOutOfRange { index: usize, len: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl EngineError {
    /// Build a rule violation from anything displayable.
    pub fn rule(
        player: impl Into<String>,
        action: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::RuleViolation {
            player: player.into(),
            action: action.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error is a discovery/execution consistency fault.
    #[must_use]
    pub fn is_consistency_fault(&self) -> bool {
        matches!(
            self,
            EngineError::RuleViolation { .. } | EngineError::CardNotFound { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_violation_message() {
        let err = EngineError::rule("p1", "Retreat Ralts", "not enough energy");
        assert_eq!(
            err.to_string(),
            "rule violation by p1 during 'Retreat Ralts': not enough energy"
        );
        assert!(err.is_consistency_fault());
    }

    #[test]
    fn test_card_not_found_message() {
        let err = EngineError::CardNotFound {
            player: "p2".to_string(),
            card: EntityId(7),
            zone: "hand",
        };
        assert_eq!(err.to_string(), "Entity(7) not found in p2's hand");
        assert!(err.is_consistency_fault());
    }

    #[test]
    fn test_catalog_errors_are_not_consistency_faults() {
        let err = EngineError::MissingCatalogEntry {
            kind: "attack",
            key: "hyper-beam".to_string(),
        };
        assert!(!err.is_consistency_fault());
        assert_eq!(err.to_string(), "catalog has no attack named 'hyper-beam'");
    }
}
