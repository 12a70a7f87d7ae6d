//! Core of the booktrack library catalog.
//!
//! This crate defines the `Book` model, the `title:author:isbn:copies`
//! record codec, the flat-file catalog store with atomic rewrites, the
//! operation classifier, queries, and the session that ties one run
//! together.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod classify;
pub mod codec;
pub mod error;
pub mod error_log;
pub mod model;
pub mod query;
pub mod report;
pub mod session;
pub mod store;

pub use classify::{classify, Operation};
pub use error::{CatalogError, Result};
pub use error_log::{ErrorSink, FileErrorLog};
pub use model::Book;
pub use session::{RunStatistics, Session, SessionOptions};
pub use store::{LoadResult, TitleOrder};
