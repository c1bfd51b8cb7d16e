//! Declarative tree layouts loaded from YAML.

mod layout;

pub use layout::{LayoutApplyError, LayoutCreationError, TreeLayout};
