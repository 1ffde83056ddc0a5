//! PostgREST store for OAC records.
//!
//! Implements [`oac_core::RecordStore`] against a Supabase project's REST
//! endpoint: batches are POSTed with `on_conflict` set to the natural key and
//! merge-duplicates resolution, so a re-sent row replaces the stored one.

pub mod client;
pub mod errors;

pub use client::{PostgrestStore, RestStoreSettings};
pub use errors::RestStoreError;
