// src/lib.rs

//! KTH Course Catalog Scraper Library

pub mod error;
pub mod models;
pub mod normalize;
pub mod pipeline;
pub mod services;
pub mod session;
pub mod storage;
pub mod utils;
