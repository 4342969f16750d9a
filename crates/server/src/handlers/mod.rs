//! HTTP request handlers.

pub mod admin;
pub mod common;
pub mod files;
pub mod jobs;
pub mod queue;

pub use admin::*;
pub use common::*;
pub use files::*;
pub use jobs::*;
pub use queue::*;
