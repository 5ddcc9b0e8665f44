//! memsentry — memory watchdog for tagged process groups.
//!
//! Measures the resident memory of a watched process group (or of the
//! running process itself), hands the reading to a run-scoped relay, and
//! mails an alert when the configured threshold is exceeded. An external
//! scheduler drives the `check` and `report` steps; everything in between
//! is synchronous and self-contained.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
