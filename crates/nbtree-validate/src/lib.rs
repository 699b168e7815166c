//! Value-domain validators and structural checks for tag trees.
//!
//! Every value typed by a user passes through [`parse_value`] (or
//! [`parse_element`] for typed array slots) before it may reach a tree. A
//! rejection is the whole effect: the caller keeps its previous tree.
//!
//! # Key Items
//!
//! - [`parse_value`] / [`format_value`] -- Per-type textual round trip
//! - [`within_range`] / [`float_within_range`] -- Numeric domains
//! - [`check_structure`] -- Terminator placement, duplicate names, unknown types

pub mod error;
pub mod range;
pub mod structure;
pub mod value;

pub use error::{ValidationError, ValidationResult};
pub use nbtree_types::FLOAT_MAX;
pub use range::{float_within_range, within_range};
pub use structure::{
    check_structure, duplicate_names, IssueKind, Severity, StructureIssue, StructureReport,
};
pub use value::{format_elements, format_value, parse_element, parse_value};
