//! ansipix (workspace facade crate).
//!
//! Re-exports the member crates under `ansipix::{core,load,term,types}` so
//! callers depend on one package while the implementation lives in `crates/`.

pub use ansipix_core as core;
pub use ansipix_load as load;
pub use ansipix_term as term;
pub use ansipix_types as types;
