//! Credential masking for user-facing output.
//!
//! - [`SecretMasker`] - replaces known secret values (the endpoint password)
//! - [`redact_uri`] - strips `user:password@` userinfo from connection URIs
//!
//! # Example
//!
//! ```
//! use boltrun::graph::Endpoint;
//! use boltrun::secrets::SecretMasker;
//!
//! let endpoint = Endpoint::new("bolt://localhost:7687", "admin", "73@TuGraph", "default");
//! let masker = SecretMasker::for_endpoint(&endpoint);
//! let output = masker.mask("auth failed for admin/73@TuGraph");
//! assert!(!output.contains("73@TuGraph"));
//! ```

pub mod mask;

pub use mask::{redact_uri, SecretMasker};
