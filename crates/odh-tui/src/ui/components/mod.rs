pub mod modal_frame;
pub mod statusbar;

pub use modal_frame::{modal_area, render_modal_background, render_modal_header};
pub use statusbar::render_statusbar;
