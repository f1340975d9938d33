mod record;

use proc_macro::TokenStream;

// ============================================================================
// #[derive(Record)] derive macro
// ============================================================================

/// Derive macro for the `Record` trait.
///
/// # Usage
///
/// ```ignore
/// #[derive(Clone, Serialize, Deserialize, Record)]
/// #[record(collection = "cables")]
/// struct Cable {
///     #[record(id)]
///     pub id: String,
///     pub name: String,
/// }
/// ```
///
/// - `#[record(collection = "...")]` sets the collection name.
///   If omitted, defaults to snake_case struct name + "s".
/// - `#[record(id)]` marks the field used as the unique identifier.
///   If omitted, defaults to a field named `id`.
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(input: TokenStream) -> TokenStream {
    record::derive_record(input)
}
