//! Model discovery: fetch, filter, normalize, and merge provider catalogs.

mod aggregate;
mod error;
mod fetch;
mod filter;
mod info;
mod normalize;

pub use aggregate::aggregate;
pub use fetch::{ProviderOutcome, build_client, fetch_free_models};
pub use info::NormalizedModel;
