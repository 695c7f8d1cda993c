//! Error taxonomy: one top-level [`TaxonError`] with per-subsystem sub-enums.

mod discovery_error;
mod input_error;
mod taxon_error;

pub use discovery_error::DiscoveryError;
pub use input_error::InputError;
pub use taxon_error::{TaxonError, TaxonResult};
