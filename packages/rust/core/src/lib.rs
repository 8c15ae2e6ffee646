//! Reference page generation for moduledoc.
//!
//! Turns grouped module descriptors into cross-linked Markdown pages
//! ([`pages::PageBuilder`]) and writes or checks them on disk
//! ([`persist::PagePersister`]).

pub mod labels;
pub mod pages;
pub mod persist;

pub use pages::PageBuilder;
pub use persist::{CheckReport, PagePersister};
