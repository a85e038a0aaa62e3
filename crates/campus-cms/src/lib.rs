//! Campus CMS: content access layer for the college website.
//!
//! Typed accessors over the CMS REST API. Feed-style content degrades to a
//! static catalog when the CMS is unreachable; lookups and the contact form
//! report failures to the caller.

pub mod accessors;
pub mod catalog;
pub mod client;
pub mod config;
pub mod contact;
pub mod filter;
pub mod text;
pub mod types;

pub use accessors::{ContentService, DEFAULT_POST_LIMIT, FEATURED_LIMIT};
pub use catalog::{default_admissions_faqs, FallbackCatalog};
pub use client::{ContentSource, FetchOptions, RemoteClient};
pub use config::CmsConfig;
pub use contact::{ContactFields, ContactForm, Field, FieldErrors, SubmitError, SubmitStatus};
pub use filter::{ListingState, ProgramFilter, ProgramListing, Selection};
pub use text::{featured_image_url, format_date, strip_html, FeaturedImage, PLACEHOLDER_IMAGE};
pub use types::*;
