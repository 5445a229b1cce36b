use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, LitBool, LitInt, LitStr};

/// Derives `MessageContract`.
///
/// `#[message_contract(...)]` on the type declares it a message contract
/// (`wrapper_name`, `wrapper_namespace`, `is_wrapped`). Without it the type is
/// unmarked. Fields may carry `#[message_body_member(name, namespace, order)]`
/// to set the element name, namespace and position of the field in the body.
#[proc_macro_derive(MessageContract, attributes(message_contract, message_body_member))]
pub fn derive_message_contract(input: TokenStream) -> TokenStream {
  let input = parse_macro_input!(input as DeriveInput);
  expand(&input).unwrap_or_else(|err| err.to_compile_error()).into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
  let name = &input.ident;
  let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

  let marker = match find_attribute(&input.attrs, "message_contract") {
    Some(attr) => {
      let contract = parse_contract_attribute(attr)?;
      quote! { ::core::option::Option::Some(#contract) }
    }
    None => quote! { ::core::option::Option::None },
  };
  let members = body_members(input)?;

  Ok(quote! {
      impl #impl_generics ::nexus_envelope_core_rs::description::MessageContract for #name #ty_generics #where_clause {
          fn message_contract() -> ::core::option::Option<::nexus_envelope_core_rs::description::MessageContractAttribute> {
              #marker
          }

          fn body_members() -> ::std::vec::Vec<::nexus_envelope_core_rs::description::BodyMemberDescription> {
              ::std::vec![#(#members),*]
          }
      }
  })
}

fn find_attribute<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
  attrs.iter().find(|attr| attr.path().is_ident(name))
}

fn parse_contract_attribute(attr: &Attribute) -> syn::Result<TokenStream2> {
  let mut wrapper_name = quote! { ::core::option::Option::None };
  let mut wrapper_namespace = quote! { ::core::option::Option::None };
  let mut is_wrapped = true;

  if !matches!(attr.meta, syn::Meta::Path(_)) {
    attr.parse_nested_meta(|meta| {
      if meta.path.is_ident("wrapper_name") {
        let value: LitStr = meta.value()?.parse()?;
        wrapper_name = quote! { ::core::option::Option::Some(::std::string::String::from(#value)) };
        Ok(())
      } else if meta.path.is_ident("wrapper_namespace") {
        let value: LitStr = meta.value()?.parse()?;
        wrapper_namespace = quote! { ::core::option::Option::Some(::std::string::String::from(#value)) };
        Ok(())
      } else if meta.path.is_ident("is_wrapped") {
        let value: LitBool = meta.value()?.parse()?;
        is_wrapped = value.value();
        Ok(())
      } else {
        Err(meta.error("unsupported message_contract property"))
      }
    })?;
  }

  Ok(quote! {
      ::nexus_envelope_core_rs::description::MessageContractAttribute {
          wrapper_name: #wrapper_name,
          wrapper_namespace: #wrapper_namespace,
          is_wrapped: #is_wrapped,
      }
  })
}

fn body_members(input: &DeriveInput) -> syn::Result<Vec<TokenStream2>> {
  let fields = match &input.data {
    Data::Struct(data) => match &data.fields {
      Fields::Named(fields) => fields.named.iter().collect::<Vec<_>>(),
      Fields::Unit => Vec::new(),
      Fields::Unnamed(_) => {
        return Err(syn::Error::new_spanned(
          &input.ident,
          "MessageContract requires named fields",
        ))
      }
    },
    _ => {
      return Err(syn::Error::new_spanned(
        &input.ident,
        "MessageContract can only be derived for structs",
      ))
    }
  };

  fields
    .into_iter()
    .map(|field| {
      let member = field
        .ident
        .as_ref()
        .map(|ident| ident.to_string().trim_start_matches("r#").to_string())
        .unwrap_or_default();
      let mut name = None;
      let mut namespace = None;
      let mut order = 0_i32;

      if let Some(attr) = find_attribute(&field.attrs, "message_body_member") {
        attr.parse_nested_meta(|meta| {
          if meta.path.is_ident("name") {
            name = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
          } else if meta.path.is_ident("namespace") {
            namespace = Some(meta.value()?.parse::<LitStr>()?.value());
            Ok(())
          } else if meta.path.is_ident("order") {
            order = meta.value()?.parse::<LitInt>()?.base10_parse::<i32>()?;
            Ok(())
          } else {
            Err(meta.error("unsupported message_body_member property"))
          }
        })?;
      }

      let ty = &field.ty;
      let with_name = name.map(|name| quote! { .with_name(#name) });
      let with_namespace = namespace.map(|namespace| quote! { .with_namespace(#namespace) });
      Ok(quote! {
          ::nexus_envelope_core_rs::description::BodyMemberDescription::new(#member, ::core::any::type_name::<#ty>())
              .with_order(#order)
              #with_name
              #with_namespace
      })
    })
    .collect()
}
