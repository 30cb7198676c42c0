// src/services/mod.rs

//! Page extractors for the course catalog.
//!
//! Every extractor borrows the configuration and drives a shared
//! [`Navigator`](crate::session::Navigator) passed in by the caller.

pub mod details;
pub mod listing;
pub mod offerings;

pub use details::{CourseDetailExtractor, english_course_name, parse_content_block, parse_course_page};
pub use listing::{ListingExtractor, parse_listing_row};
pub use offerings::{OfferingExtractor, SemesterOption, parse_contacts, parse_key_information, semester_options};
