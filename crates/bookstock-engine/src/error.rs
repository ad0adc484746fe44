//! Error type for `bookstock-engine`.

use thiserror::Error;

/// A failed engine operation.
///
/// The first three variants are local-consistency failures raised without
/// contacting the gateway; `Gateway` wraps whatever the backend reported.
#[derive(Debug, Error)]
pub enum EngineError {
  #[error("no store inventory is loaded")]
  NoStoreLoaded,

  #[error("book {0} is not in the store inventory")]
  NotInInventory(i64),

  #[error("book {0} carries no inventory id; cannot route a price update")]
  MissingInventoryId(i64),

  #[error("gateway error: {0}")]
  Gateway(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl EngineError {
  pub(crate) fn gateway<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Gateway(Box::new(err))
  }
}
