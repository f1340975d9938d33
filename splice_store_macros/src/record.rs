use proc_macro::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, LitStr};

pub fn derive_record(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as DeriveInput);
    match expand(&input) {
        Ok(expanded) => TokenStream::from(expanded),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;
    let collection = extract_collection(input)?;
    let id_field = extract_id_field(input)?;

    Ok(quote! {
        impl ::splice_store::Record for #name {
            const COLLECTION: &'static str = #collection;

            fn id(&self) -> &str {
                &self.#id_field
            }
        }
    })
}

fn extract_collection(input: &DeriveInput) -> syn::Result<String> {
    let mut collection = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("record") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("collection") {
                let value: LitStr = meta.value()?.parse()?;
                collection = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported record attribute, expected `collection = \"...\"`"))
            }
        })?;
    }

    // Default: snake_case struct name + "s"
    Ok(collection.unwrap_or_else(|| format!("{}s", to_snake_case(&input.ident.to_string()))))
}

fn extract_id_field(input: &DeriveInput) -> syn::Result<syn::Ident> {
    let Data::Struct(data_struct) = &input.data else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record can only be derived for structs",
        ));
    };
    let Fields::Named(fields) = &data_struct.fields else {
        return Err(syn::Error::new_spanned(
            &input.ident,
            "Record requires a struct with named fields",
        ));
    };

    let mut marked = None;
    for field in &fields.named {
        for attr in &field.attrs {
            if !attr.path().is_ident("record") {
                continue;
            }
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("id") {
                    marked = field.ident.clone();
                    Ok(())
                } else {
                    Err(meta.error("unsupported record field attribute, expected `id`"))
                }
            })?;
        }
    }
    if let Some(ident) = marked {
        return Ok(ident);
    }

    // Default: look for a field named "id"
    fields
        .named
        .iter()
        .filter_map(|field| field.ident.as_ref())
        .find(|ident| *ident == "id")
        .cloned()
        .ok_or_else(|| {
            syn::Error::new_spanned(
                &input.ident,
                "Record derive: no field marked with #[record(id)] and no field named `id`",
            )
        })
}

fn to_snake_case(s: &str) -> String {
    let mut result = String::new();
    for (i, ch) in s.chars().enumerate() {
        if ch.is_uppercase() {
            if i > 0 {
                result.push('_');
            }
            result.extend(ch.to_lowercase());
        } else {
            result.push(ch);
        }
    }
    result
}
