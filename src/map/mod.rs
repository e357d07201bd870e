//! Self-organizing maps and the data a renderer needs to draw them.

pub mod layout;
pub mod som;
