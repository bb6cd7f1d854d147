//! Manifest reconciliation for api-forge
//!
//! Every operation found in a service's OpenAPI document is checked against
//! the service's ApiKeys by operation id:
//! - known operations keep their persisted record untouched
//! - new operations get a gateway route id, the next resource id of the
//!   service, and the manifest's initial implementation status
//!
//! Server service ids are filled in only when empty. Running reconciliation
//! again over its own output changes nothing.
//!
//! # Examples
//!
//! ```no_run
//! use api_forge_common::ForgeConfig;
//! use api_forge_reconciler::Reconciler;
//!
//! let config = ForgeConfig::default();
//! let reconciled = Reconciler::new().run(&config).expect("reconciliation failed");
//! println!("{} new operations", reconciled.summary.added);
//! ```

mod ids;
mod reconciler;

pub use ids::{next_sequence, resource_id, IdGenerator, UuidGenerator, RESOURCE_NAME_WIDTH};
pub use reconciler::{merge_service, ReconcileSummary, Reconciled, Reconciler};
