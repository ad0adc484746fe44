//! The inventory join engine.
//!
//! [`InventoryEngine`] owns the store-scoped view state: it fetches a
//! store's inventory, the full book catalog, and the full author list
//! concurrently, joins them into a searchable, sortable view, and performs
//! mutations reconciled against the gateway. It works against any
//! [`bookstock_core::gateway::Gateway`] implementation and never reads
//! ambient global state — authorization is the caller's concern.

mod engine;

pub mod error;

pub use engine::{
  InventoryEngine, LoadData, LoadOutcome, LoadTicket, Phase, fetch,
};
pub use error::EngineError;

#[cfg(test)]
mod tests;
