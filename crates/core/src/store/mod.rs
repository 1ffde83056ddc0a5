//! Store module - the write seam and batched upserts.

mod store_traits;
mod upsert_client;


pub use store_traits::RecordStore;
pub use upsert_client::{BatchFailure, StoreUpsertClient, UpsertReport};
pub(crate) use upsert_client::percent;
