pub mod connection_type;
pub mod filter;
pub mod snapshot;
pub mod time;

pub use connection_type::{ConnectionType, ObjectMeta};
pub use filter::{FilterData, FilterType};
pub use snapshot::ResourceSnapshot;
pub use time::{created_label, relative_time};
