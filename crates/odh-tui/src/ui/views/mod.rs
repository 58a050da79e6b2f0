pub mod connection_types;
pub mod delete_modal;

pub use connection_types::render_connection_types;
pub use delete_modal::render_delete_modal;
