mod delete_mode;
mod edit_mode;
mod editor_utils;
mod link_mode;
mod read_mode;
mod review_mode;
mod study_mode;
mod use_color;
mod write_mode;

pub use delete_mode::delete_mode;
pub use edit_mode::edit_mode;
pub use link_mode::link_mode;
pub use read_mode::{list_mode, show_mode};
pub use review_mode::review_mode;
pub use study_mode::study_mode;
pub use use_color::use_color;
pub use write_mode::write_mode;
