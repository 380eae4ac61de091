/// Errors during STL serialization.
///
/// Facets are validated when they are built, so any of these indicates a bug
/// upstream of the serializer rather than bad input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SerializeError {
    #[error("facet {facet} has a non-finite coordinate")]
    NonFinite { facet: usize },

    #[error("facet {facet} does not fit in single-precision binary STL")]
    OutOfRange { facet: usize },
}
