pub mod builder;

pub use builder::{DocumentSink, JsonBuilder};

/// Field names shared by numeric results.
pub mod fields {
    pub const VALUE: &str = "value";
    pub const VALUE_AS_STRING: &str = "value_as_string";
    pub const META: &str = "meta";
}
