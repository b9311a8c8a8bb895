// ============================================================================
// STATE MODULE - Estado reconciliado de votación
// ============================================================================

pub mod store;
pub mod voting_state;

pub use store::*;
pub use voting_state::*;
