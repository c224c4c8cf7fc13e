//! gapticket Core - Gap Report Types
//!
//! Pure data structures plus the two stateless transformations applied to
//! them: input validation and wiki-markup rendering. No I/O happens here.

pub mod error;
pub mod markup;
pub mod report;
pub mod validate;

pub use error::{InputError, InputResult};
pub use markup::render_description;
pub use report::{CurrentState, GapReport, Priority, TaskGroup};
pub use validate::validate;

/// Decode, validate, and type a raw JSON document in one pass.
///
/// Validation runs on the untyped value first so that every missing field is
/// reported together. Only a document that passes validation is decoded into
/// a [`GapReport`].
pub fn parse_report(input: &str) -> InputResult<GapReport> {
    let value: serde_json::Value =
        serde_json::from_str(input).map_err(InputError::InvalidJson)?;

    let errors = validate(&value);
    if !errors.is_empty() {
        return Err(InputError::Invalid(errors));
    }

    serde_json::from_value(value).map_err(InputError::Decode)
}
