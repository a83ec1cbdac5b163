//! Card system: energy, definitions, instances, and the catalog.
//!
//! ## Key Types
//!
//! - `EnergyType`, `EnergyPool`, `EnergyCost`: typed energy and cost checks
//! - `CreatureDef`, `AttackDef`, `TrainerDef`: static catalog data
//! - `Catalog`: validated read-only lookup and card factory
//! - `Card`, `TrainerCard`, `HandCard`: runtime card instances
//! - `Condition`: status conditions on creatures

pub mod condition;
pub mod definition;
pub mod energy;
pub mod instance;
pub mod registry;

pub use condition::{Condition, Conditions};
pub use definition::{AttackDef, CreatureDef, TrainerDef};
pub use energy::{EnergyCost, EnergyPool, EnergyType};
pub use instance::{Card, HandCard, TrainerCard};
pub use registry::{Catalog, CatalogData};
