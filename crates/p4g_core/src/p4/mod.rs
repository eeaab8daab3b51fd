mod describe;
mod error;
mod fixes;
mod record;
mod runner;
mod spec;

#[cfg(test)]
mod test_support;

/// `p4 describe` record view and entry point.
pub use describe::{Describe, JobDescription, Revision, run_describe};
/// Error and result aliases.
pub use error::{P4Error, Result};
/// `p4 fixes` record view and entry point.
pub use fixes::{Fix, run_fixes};
/// Error-record recognition.
pub use record::{check_error, parse_error};
/// Command runner abstraction and the subprocess implementation.
pub use runner::{P4, Runner, records_from_output};
/// Spec form type and its text serializer.
pub use spec::{Spec, format_spec};
