//! An in-memory hierarchical namespace.
//!
//! A [`Filesystem`] starts with a single root folder. Folders and files are
//! created by slash-delimited path with [`Filesystem::mkdir`] and
//! [`Filesystem::touch`], and [`Filesystem::list`] returns the immediate
//! children of a folder. A [`TreeLayout`] can pre-populate a tree from YAML.
//!
//! The tree has no internal synchronization. Callers sharing one across
//! threads need to serialize access themselves, e.g. with a `Mutex`.

#![allow(clippy::enum_variant_names)]

mod config;
mod filesystem;

pub use config::{LayoutApplyError, LayoutCreationError, TreeLayout};
pub use filesystem::{
    Filesystem, Node, NodeId, NodeKind, Segment, TreeError, join, segments,
};

#[cfg(test)]
pub(crate) fn setup_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .without_time()
        .compact()
        .with_test_writer()
        .try_init();
}
