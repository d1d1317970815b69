//! Reusable UI components

pub mod layout;
pub mod pager;
pub mod spinner;

pub use layout::Layout;
pub use pager::Pager;
pub use spinner::LoadingSpinner;
