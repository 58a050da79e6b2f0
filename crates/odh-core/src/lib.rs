pub mod api;
pub mod config;
pub mod constants;
pub mod delete;
pub mod error;
pub mod models;
pub mod poller;
pub mod toggle;
pub mod tracing_setup;

// Re-export the types every consumer touches at crate root for convenience
pub use api::{ConnectionTypeApi, HttpConnectionTypeApi, ResponseStatus};
pub use config::CoreConfig;
pub use delete::{DeleteConfirmation, DeleteFinish, DeleteTarget};
pub use error::{CoreError, CoreResult};
pub use models::{ConnectionType, FilterData, ResourceSnapshot};
pub use poller::{PollState, Poller, PollerHandle};
pub use toggle::{ToggleBoard, ToggleController, ToggleOutcome, ToggleStatus, ToggleTicket};
