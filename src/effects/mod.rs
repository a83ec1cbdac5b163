//! Card behaviours: attack side effects, trainer effects, abilities.
//!
//! Behaviours are data-tagged enums resolved once when the catalog is
//! loaded. Each module offers two halves that must agree:
//! - action generation (what discovery offers)
//! - application (what execution does, re-checking legality)
//!
//! ## Key Types
//!
//! - `AttackEffect`: side effect run before attack damage
//! - `TrainerKind`: item and supporter behaviours
//! - `AbilityKind`: once-per-turn creature abilities

pub mod ability;
pub mod attack;
pub mod trainer;

pub use ability::AbilityKind;
pub use attack::{compute_damage, perform_attack, AttackEffect, AttackReport, WEAKNESS_BONUS};
pub use trainer::{apply_trainer, trainer_actions, TrainerKind, ERIKA_HEAL, POTION_HEAL};
