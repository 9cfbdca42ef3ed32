//! Barcode reconciliation engine for QuickBarcode.
//!
//! Keeps the barcode registry in step with the identifying codes of
//! inventory entities: a part's IPN, a stock item's serial.
//!
//! # Architecture
//!
//! - **Reconciler**: pure diff of the desired identifier against the
//!   barcodes currently linked to the entity
//! - **Supervisor**: applies the resulting actions one by one, recording
//!   each outcome without aborting on failure
//! - **Adapter**: turns host lifecycle events into reconciliations (save)
//!   or full cleanups (delete)
//!
//! ## Flow
//!
//! 1. **Route**: the event name is mapped to an [`EventKind`](quickbarcode_types::EventKind)
//! 2. **Resolve**: the entity is fetched and its identifier extracted
//! 3. **Diff**: registry links are listed and compared with the identifier
//! 4. **Apply**: unlinks run first, then the link
//! 5. **Report**: the caller receives an [`EventReport`]; errors never escape
//!
//! # Example
//!
//! ```
//! use quickbarcode_sync::{reconcile, Action};
//! use quickbarcode_types::{BarcodeRecord, EntityKind, EntityRef};
//!
//! let part = EntityRef::part(7, "IPN-7");
//! let current = vec![BarcodeRecord::new("OLD", EntityKind::Part, 7)];
//!
//! let actions = reconcile(&part, &current, true);
//! assert_eq!(
//!     actions,
//!     vec![Action::Unlink("OLD".into()), Action::Link("IPN-7".into())]
//! );
//! ```

mod adapter;
mod error;
pub mod reconciler;
mod settings;
mod store;
pub mod supervisor;

pub use adapter::{EventAdapter, EventReport};
pub use error::{SyncError, SyncResult};
pub use reconciler::{plan_cleanup, reconcile, Action, ReconcileRequest, SkipReason};
pub use settings::{LogLevel, SyncSettings};
pub use store::EntityStore;
pub use supervisor::{ActionOutcome, BatchOutcome, ExecutionSupervisor};
