//! Rule battery, one module per rule family.
//!
//! Families run in a fixed order (required → format → consistency →
//! pricing → dates → structure); the order only pins the resulting
//! finding order, not the semantics. Every check is a pure function of
//! its inputs and never fails: malformed values become findings.

pub mod consistency;
pub mod dates;
pub mod format;
pub mod pricing;
pub mod required;
pub mod structure;

pub use consistency::check_party_consistency;
pub use dates::check_date_plausibility;
pub use format::check_formats;
pub use pricing::check_plan_pricing;
pub use required::check_required_fields;
pub use structure::check_structure;
