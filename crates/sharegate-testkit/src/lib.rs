//! # Sharegate Testkit
//!
//! Testing utilities for the sharegate workspace.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: a pre-seeded in-memory world (owner, members, admin,
//!   files) for scenario tests
//! - **Generators**: proptest strategies for property-based testing
//!
//! ## Test Fixtures
//!
//! ```rust
//! use sharegate_testkit::fixtures::SharingFixture;
//!
//! let fixture = SharingFixture::new();
//! let service = fixture.service();
//! // fixture.alice owns fixture.file; fixture.bob and fixture.carol are
//! // regular members; fixture.root is an admin.
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use sharegate_testkit::generators;
//!
//! proptest! {
//!     #[test]
//!     fn owners_resolve_to_full_capabilities(
//!         user in generators::user(),
//!         mut file in generators::file(),
//!     ) {
//!         file.owner_id = user.id;
//!         // ...
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::SharingFixture;
