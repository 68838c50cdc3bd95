//! Source rendering for synthesized members.
//!
//! Lowers method bodies to Rust items over the `runtime` value model so a
//! host can splice them into generated code instead of interpreting them.

mod body;
pub mod ident;

use body::{BodyRenderer, object};
use ident::snake_ident;
use membergen_core::{engine::ClassSynthesis, ir::SynthesizedMethod};
use membergen_schema::node::BuilderDescriptor;
use proc_macro2::{Ident, TokenStream};
use quote::quote;
use std::collections::{BTreeMap, BTreeSet};
use syn::Path;
use thiserror::Error as ThisError;

///
/// RenderError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum RenderError {
    #[error("builder slot '{0}' is declared twice")]
    DuplicateSlot(String),

    #[error("'{first}' and '{second}' both render as '{ident}'")]
    IdentCollision {
        ident: String,
        first: String,
        second: String,
    },

    #[error("default of '{param}' is not a valid expression: {source}")]
    InvalidDefault {
        param: String,
        #[source]
        source: syn::Error,
    },

    #[error("'{0}' is not a valid identifier")]
    InvalidIdent(String),

    #[error("invalid runtime path '{path}': {source}")]
    InvalidRuntimePath {
        path: String,
        #[source]
        source: syn::Error,
    },

    #[error("'{method}' has no trailing return")]
    MissingReturn { method: String },
}

///
/// RenderOptions
///
/// `runtime` names the module holding `Runtime`, `Value`, `ClassId`,
/// `ObjectMethod` and `RuntimeError`. It must be absolute, rendered items
/// may be nested in modules.
///

#[derive(Clone)]
pub struct RenderOptions {
    pub runtime: Path,
}

impl RenderOptions {
    pub fn with_runtime(path: &str) -> Result<Self, RenderError> {
        let runtime = syn::parse_str(path).map_err(|source| RenderError::InvalidRuntimePath {
            path: path.to_string(),
            source,
        })?;

        Ok(Self { runtime })
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            runtime: syn::parse_quote!(::membergen::runtime),
        }
    }
}

// render_method
/// Render one synthesized member as a free function taking the runtime and
/// the receiver ahead of the declared parameters.
pub fn render_method(
    method: &SynthesizedMethod,
    options: &RenderOptions,
) -> Result<TokenStream, RenderError> {
    let rt = &options.runtime;
    let sig = &method.body.signature;

    let name = snake_ident(&sig.name)?;
    let params = sig
        .params
        .iter()
        .map(|param| {
            let ident = snake_ident(&param.name)?;
            Ok(quote!(#ident: #rt::Value))
        })
        .collect::<Result<Vec<_>, RenderError>>()?;
    let body = BodyRenderer::new(rt, &method.body).stmts(&sig.name, &method.body.stmts)?;
    let doc = format!(" Synthesized `{}` of `{}`.", method.target, method.owner);

    Ok(quote! {
        #[doc = #doc]
        #[allow(clippy::all, unused_parens)]
        pub fn #name(
            __rt: &#rt::Runtime,
            __this: &#rt::Value
            #(, #params)*
        ) -> ::core::result::Result<#rt::Value, #rt::RuntimeError> {
            #body
        }
    })
}

// render_builder_slots
/// Constructor for a fresh builder: every value slot null and every
/// was-set flag cleared, in slot order. A flag named like another slot is
/// an error.
pub fn render_builder_slots(
    desc: &BuilderDescriptor,
    options: &RenderOptions,
) -> Result<TokenStream, RenderError> {
    let rt = &options.runtime;

    let mut seen = BTreeSet::new();
    let mut fields = Vec::new();
    for slot in &desc.slots {
        fields.push((slot.value_slot.as_str(), quote!(#rt::Value::Null)));
        if let Some(flag) = &slot.was_set_slot {
            fields.push((flag.as_str(), quote!(#rt::Value::Bool(false))));
        }
    }
    for (name, _) in &fields {
        if !seen.insert(*name) {
            return Err(RenderError::DuplicateSlot((*name).to_string()));
        }
    }
    let value = object(rt, &desc.builder, &fields);
    let doc = format!(" Empty `{}`.", desc.builder.short_name());

    Ok(quote! {
        #[doc = #doc]
        #[must_use]
        pub fn new_builder() -> #rt::Value {
            #value
        }
    })
}

// render_class
/// All members of one synthesis pass as a module named after the class;
/// builder members go in a nested `builder` module. Two members that
/// snake-case to the same fn name in one module are an error.
pub fn render_class(
    synthesis: &ClassSynthesis,
    options: &RenderOptions,
) -> Result<TokenStream, RenderError> {
    let module = snake_ident(synthesis.class.short_name())?;

    let mut members = TokenStream::new();
    let mut member_names = BTreeMap::new();
    let mut builder_members = TokenStream::new();
    let mut builder_names =
        BTreeMap::from([("new_builder".to_string(), "new_builder".to_string())]);
    for method in &synthesis.methods {
        let name = &method.body.signature.name;
        let tokens = render_method(method, options)?;
        if method.owner == synthesis.class {
            claim(&mut member_names, &snake_ident(name)?, name)?;
            members.extend(tokens);
        } else {
            claim(&mut builder_names, &snake_ident(name)?, name)?;
            builder_members.extend(tokens);
        }
    }

    let builder = match &synthesis.builder {
        Some(desc) => {
            let slots = render_builder_slots(desc, options)?;

            Some(quote! {
                pub mod builder {
                    #slots
                    #builder_members
                }
            })
        }
        None => None,
    };

    Ok(quote! {
        pub mod #module {
            #members
            #builder
        }
    })
}

// claim
// one item per ident within a module
fn claim(
    names: &mut BTreeMap<String, String>,
    ident: &Ident,
    source: &str,
) -> Result<(), RenderError> {
    if let Some(first) = names.insert(ident.to_string(), source.to_string()) {
        return Err(RenderError::IdentCollision {
            ident: ident.to_string(),
            first,
            second: source.to_string(),
        });
    }

    Ok(())
}

///
/// TESTS
///

#[cfg(test)]
mod tests;
