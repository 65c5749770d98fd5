pub mod error;
pub mod generic;
pub mod input;
pub mod limits;
pub mod output;

pub use error::DecodeError;
pub use input::StreamInput;
pub use limits::StreamLimits;
pub use output::StreamOutput;

/// A value that knows how to write itself to a [`StreamOutput`].
pub trait Writeable {
    fn write_to(&self, out: &mut StreamOutput);
}

/// A polymorphic value written as its wire tag followed by its body, so the
/// receiving side can pick the matching reader by name.
pub trait NamedWriteable: Writeable {
    fn writeable_name(&self) -> &'static str;
}
