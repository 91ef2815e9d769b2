//! Extension traits for plugging external capabilities into the diff model.

mod content_provider;

pub use content_provider::{
    ContentError, FileContentProvider, InMemoryContentProvider, NoOpContentProvider,
};
