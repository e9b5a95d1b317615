use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, Data, DeriveInput, Field, Fields, LitStr};

/// Derive macro implementing `tagconf::Bind`.
///
/// Every named field is registered in declaration order, with the kind of its
/// type. Fields carrying `#[conf(key = "...")]` with a key other than `""` or
/// `"-"` are looked up; the rest are skipped. Types that do not implement
/// `FieldValue` register as `FieldKind::Other` and are never written.
///
/// ```ignore
/// #[derive(Bind, Default)]
/// pub struct Conf {
///     #[conf(key = "test_env", required, desc = "Current environment")]
///     pub env: String,
///
///     #[conf(key = "test_port", default = "8080")]
///     pub port: u16,
/// }
/// ```
#[proc_macro_derive(Bind, attributes(conf))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match derive_impl(&input) {
        Ok(tokens) => tokens.into(),
        Err(e) => e.to_compile_error().into(),
    }
}

/// Parsed `#[conf(...)]` attribute.
#[derive(Default)]
struct ConfAttr {
    key: Option<String>,
    required: bool,
    default: Option<String>,
    desc: Option<String>,
}

impl ConfAttr {
    fn from_field(field: &Field) -> Result<Option<Self>, syn::Error> {
        let mut parsed = None;

        for attr in &field.attrs {
            if !attr.path().is_ident("conf") {
                continue;
            }
            if parsed.is_some() {
                return Err(syn::Error::new_spanned(attr, "duplicate #[conf] attribute"));
            }

            let mut conf = ConfAttr::default();
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("key") {
                    let value: LitStr = meta.value()?.parse()?;
                    conf.key = Some(value.value());
                } else if meta.path.is_ident("required") {
                    // bare `required`, or `required = "..."` matched literally
                    conf.required = if meta.input.peek(syn::Token![=]) {
                        let value: LitStr = meta.value()?.parse()?;
                        value.value() == "true"
                    } else {
                        true
                    };
                } else if meta.path.is_ident("default") {
                    let value: LitStr = meta.value()?.parse()?;
                    conf.default = Some(value.value());
                } else if meta.path.is_ident("desc") {
                    let value: LitStr = meta.value()?.parse()?;
                    conf.desc = Some(value.value());
                } else {
                    return Err(meta.error("expected one of `key`, `required`, `default`, `desc`"));
                }
                Ok(())
            })?;
            parsed = Some(conf);
        }

        Ok(parsed)
    }

    fn builder_calls(&self) -> TokenStream2 {
        let key = self.key.as_deref().unwrap_or_default();
        let required = self.required;
        let default = self.default.as_ref().map(|d| quote! { .default(#d) });
        let desc = self.desc.as_ref().map(|d| quote! { .desc(#d) });
        quote! { .key(#key).required(#required) #default #desc }
    }
}

fn derive_impl(input: &DeriveInput) -> Result<TokenStream2, syn::Error> {
    let name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "Bind only supports structs with named fields",
                ))
            }
        },
        _ => return Err(syn::Error::new_spanned(name, "Bind only supports structs")),
    };

    let mut registrations = Vec::with_capacity(fields.len());

    for field in fields {
        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected named field"))?;
        let field_name = ident.unraw().to_string();
        let ty = &field.ty;

        let register = quote! {
            (&::tagconf::__private::Registrar::<Self, #ty>::new()).register_field(
                fields,
                #field_name,
                ::core::stringify!(#ty),
                |__dest: &mut Self| &mut __dest.#ident,
            )
        };
        let calls = ConfAttr::from_field(field)?.map(|conf| conf.builder_calls());
        registrations.push(quote! { #register #calls; });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::tagconf::Bind for #name #ty_generics #where_clause {
            #[allow(unused_imports, unused_variables)]
            fn register(fields: &mut ::tagconf::Fields<Self>) {
                use ::tagconf::__private::{RegisterOther as _, RegisterValue as _};
                #(#registrations)*
            }
        }
    })
}
