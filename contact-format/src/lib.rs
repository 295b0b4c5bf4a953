//! Contact Format Crate
//!
//! Renders the single-contact vCard documents produced by the file
//! export path. Phone normalization lives with the contact types in
//! `shared-types`; this crate only deals with documents.
//!
//! # Example
//!
//! ```rust,ignore
//! use contact_format::VcardFile;
//! use shared_types::ExportEntry;
//!
//! let file = VcardFile::for_entry(&entry)?;
//! assert_eq!(file.filename, "USF Public Safety.vcf");
//! ```

pub mod vcard;

pub use vcard::{render_vcard, VcardError, VcardFile, VCARD_MIME_TYPE};
