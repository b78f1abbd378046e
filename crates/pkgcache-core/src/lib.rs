//! Content-addressed cache of package source archives.
//!
//! [`scheduler::populate_cache`] walks a package repository and makes sure
//! every declared archive is present in the cache, keyed by its first
//! checksum. [`repo::register_cache_dir`] records the cache in the
//! repository descriptor afterwards.

pub mod config;
pub mod logging;

pub mod cache;
pub mod checksum;
pub mod package;
pub mod repo;
pub mod retry;
pub mod scheduler;
pub mod source;
pub mod storage;
pub mod transport;
pub mod url_model;
