//! Read entities definitions.

pub mod feedback;
pub mod menu;
pub mod order;
