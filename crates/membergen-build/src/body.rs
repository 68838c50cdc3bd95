use crate::{RenderError, ident::snake_ident};
use membergen_core::ir::{Expr, Failure, HashKind, MethodBody, Stmt};
use membergen_schema::node::{ClassId, DefaultValue, Literal, ObjectMethod};
use proc_macro2::{Span, TokenStream};
use quote::quote;
use std::collections::BTreeSet;
use syn::{LitStr, Path};

///
/// BodyRenderer
///
/// Lowers one method body to statements over the runtime value model.
/// Every expression renders to an owned `Value`; `__this` and `__rt` are
/// the receiver and runtime bindings of the enclosing fn.
///

pub(crate) struct BodyRenderer<'a> {
    rt: &'a Path,
    mutable: BTreeSet<&'a str>,
}

impl<'a> BodyRenderer<'a> {
    pub(crate) fn new(rt: &'a Path, body: &'a MethodBody) -> Self {
        let mutable = body
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Assign { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();

        Self { rt, mutable }
    }

    // stmts
    // the trailing Return becomes the tail expression
    pub(crate) fn stmts(&self, method: &str, stmts: &[Stmt]) -> Result<TokenStream, RenderError> {
        let Some((Stmt::Return(tail), init)) = stmts.split_last() else {
            return Err(RenderError::MissingReturn {
                method: method.to_string(),
            });
        };

        let mut tokens = TokenStream::new();
        for stmt in init {
            tokens.extend(self.stmt(stmt)?);
        }
        let tail = self.expr(tail)?;
        tokens.extend(quote!(::core::result::Result::Ok(#tail)));

        Ok(tokens)
    }

    fn stmt(&self, stmt: &Stmt) -> Result<TokenStream, RenderError> {
        let rt = self.rt;

        let tokens = match stmt {
            Stmt::Let { name, value } => {
                let ident = snake_ident(name)?;
                let value = self.expr(value)?;
                if self.mutable.contains(name.as_str()) {
                    quote!(let mut #ident = #value;)
                } else {
                    quote!(let #ident = #value;)
                }
            }
            Stmt::Assign { name, value } => {
                let ident = snake_ident(name)?;
                let value = self.expr(value)?;
                quote!(#ident = #value;)
            }
            Stmt::SetField {
                receiver,
                name,
                value,
            } => {
                let receiver = self.place(receiver)?;
                let value = self.expr(value)?;
                quote!(#receiver.set_field(#name, #value)?;)
            }
            Stmt::IfReturn { cond, value } => {
                let cond = self.place(cond)?;
                let value = self.expr(value)?;
                quote! {
                    if #cond.to_bool()? {
                        return ::core::result::Result::Ok(#value);
                    }
                }
            }
            Stmt::ThrowIf { cond, failure } => {
                let cond = self.place(cond)?;
                let error = match failure {
                    Failure::MissingArgument { param } => quote! {
                        #rt::RuntimeError::MissingArgument {
                            param: ::std::string::String::from(#param),
                        }
                    },
                };
                quote! {
                    if #cond.to_bool()? {
                        return ::core::result::Result::Err(#error);
                    }
                }
            }
            Stmt::Return(value) => {
                let value = self.expr(value)?;
                quote!(return ::core::result::Result::Ok(#value);)
            }
        };

        Ok(tokens)
    }

    // place
    // an expression usable as a method receiver without cloning
    fn place(&self, expr: &Expr) -> Result<TokenStream, RenderError> {
        match expr {
            Expr::This => Ok(quote!(__this)),
            Expr::Param(name) | Expr::Local(name) => {
                let ident = snake_ident(name)?;
                Ok(quote!(#ident))
            }
            _ => {
                let value = self.expr(expr)?;
                Ok(quote!((#value)))
            }
        }
    }

    // reference
    // a `&Value` for runtime calls; `__this` is already one
    fn reference(&self, expr: &Expr) -> Result<TokenStream, RenderError> {
        if matches!(expr, Expr::This) {
            return Ok(quote!(__this));
        }
        let place = self.place(expr)?;

        Ok(quote!(&#place))
    }

    #[allow(clippy::too_many_lines)]
    fn expr(&self, expr: &Expr) -> Result<TokenStream, RenderError> {
        let rt = self.rt;

        let tokens = match expr {
            Expr::Null => quote!(#rt::Value::Null),
            Expr::Bool(b) => quote!(#rt::Value::Bool(#b)),
            Expr::Int(i) => quote!(#rt::Value::Int(#i)),
            Expr::Text(text) => quote!(#rt::Value::text(#text)),

            Expr::This => quote!(::core::clone::Clone::clone(__this)),
            Expr::Param(_) | Expr::Local(_) => {
                let place = self.place(expr)?;
                quote!(::core::clone::Clone::clone(&#place))
            }

            Expr::Property { receiver, name, .. } => {
                let receiver = self.place(receiver)?;
                quote!(#receiver.field(#name)?)
            }
            Expr::GuardedProperty {
                receiver,
                name,
                fallback,
                ..
            } => {
                let receiver = self.place(receiver)?;
                let fallback = self.expr(fallback)?;
                quote! {
                    match #receiver.try_field(#name)? {
                        ::core::option::Option::Some(__value) => __value,
                        ::core::option::Option::None => #fallback,
                    }
                }
            }

            Expr::SuperCall {
                superclass,
                method,
                args,
            } => {
                let superclass = match superclass {
                    Some(class) => {
                        let class = self.class_id(class);
                        quote!(::core::option::Option::Some(&#class))
                    }
                    None => quote!(::core::option::Option::None),
                };
                let method = match method {
                    ObjectMethod::Equals => quote!(Equals),
                    ObjectMethod::HashCode => quote!(HashCode),
                    ObjectMethod::ToString => quote!(ToString),
                };
                let args = args
                    .iter()
                    .map(|arg| self.expr(arg))
                    .collect::<Result<Vec<_>, _>>()?;
                quote! {
                    __rt.super_call(
                        __this,
                        #superclass,
                        #rt::ObjectMethod::#method,
                        ::std::vec![#(#args),*],
                    )?
                }
            }

            Expr::Not(inner) => {
                let inner = self.place(inner)?;
                quote!(#rt::Value::Bool(!#inner.to_bool()?))
            }
            Expr::IsNull(inner) => {
                let inner = self.place(inner)?;
                quote!(#rt::Value::Bool(#inner.is_null()))
            }
            Expr::SameRef(a, b) => {
                let a = self.place(a)?;
                let b = self.reference(b)?;
                quote!(#rt::Value::Bool(#a.same_ref(#b)))
            }
            Expr::ValueEq(a, b) => {
                let a = self.reference(a)?;
                let b = self.reference(b)?;
                quote!(#rt::Value::Bool(__rt.equals(#a, #b)?))
            }

            Expr::IsInstance { value, class } => {
                let value = self.reference(value)?;
                let class = self.class_id(class);
                quote!(#rt::Value::Bool(__rt.is_instance(#value, &#class)))
            }
            Expr::Cast { value, class } => {
                let value = self.expr(value)?;
                let class = self.class_id(class);
                quote!(__rt.cast(#value, &#class)?)
            }

            Expr::HashOf { value, kind } => {
                let value = self.reference(value)?;
                match kind {
                    HashKind::Ambient => quote!(#rt::Value::Int(__rt.hash_code(#value)?)),
                    HashKind::ArrayIdentity => {
                        quote!(#rt::Value::Int(__rt.identity_hash_code(#value)?))
                    }
                }
            }
            Expr::Add(a, b) => {
                let a = self.place(a)?;
                let b = self.place(b)?;
                quote!(#rt::Value::Int(#a.to_int()?.wrapping_add(#b.to_int()?)))
            }
            Expr::Mul(a, b) => {
                let a = self.place(a)?;
                let b = self.place(b)?;
                quote!(#rt::Value::Int(#a.to_int()?.wrapping_mul(#b.to_int()?)))
            }

            Expr::Concat(parts) => self.concat(parts)?,
            Expr::Stringify(inner) => {
                let inner = self.reference(inner)?;
                quote!(#rt::Value::Text(__rt.stringify(#inner)?))
            }

            Expr::If {
                cond,
                then,
                otherwise,
            } => {
                let cond = self.place(cond)?;
                let then = self.expr(then)?;
                let otherwise = self.expr(otherwise)?;
                quote! {
                    if #cond.to_bool()? { #then } else { #otherwise }
                }
            }

            Expr::New { class, args } => {
                let fields = args
                    .iter()
                    .map(|(name, arg)| Ok((name.as_str(), self.expr(arg)?)))
                    .collect::<Result<Vec<_>, RenderError>>()?;
                object(rt, class, &fields)
            }
            Expr::DefaultOf { param, value } => default_value(rt, param, value)?,
        };

        Ok(tokens)
    }

    // concat
    // one format! call; literal parts become the format string
    fn concat(&self, parts: &[Expr]) -> Result<TokenStream, RenderError> {
        let rt = self.rt;
        let mut format = String::new();
        let mut args = Vec::new();

        for part in parts {
            match part {
                Expr::Text(text) => format.push_str(&text.replace('{', "{{").replace('}', "}}")),
                Expr::Stringify(inner) => {
                    let inner = self.reference(inner)?;
                    format.push_str("{}");
                    args.push(quote!(__rt.stringify(#inner)?));
                }
                other => {
                    let value = self.reference(other)?;
                    format.push_str("{}");
                    args.push(quote!(__rt.stringify(#value)?));
                }
            }
        }

        let format = LitStr::new(&format, Span::call_site());

        Ok(quote!(#rt::Value::Text(::std::format!(#format #(, #args)*))))
    }

    fn class_id(&self, class: &ClassId) -> TokenStream {
        let rt = self.rt;
        let class = class.as_str();

        quote!(#rt::ClassId::from(#class))
    }
}

/// Object construction with named fields in order.
pub(crate) fn object(rt: &Path, class: &ClassId, fields: &[(&str, TokenStream)]) -> TokenStream {
    let class = class.as_str();
    let names = fields.iter().map(|(name, _)| name);
    let values = fields.iter().map(|(_, value)| value);

    quote! {
        #rt::Value::object(
            #class,
            ::std::vec::Vec::<(&str, #rt::Value)>::from([#((#names, #values)),*]),
        )
    }
}

fn default_value(rt: &Path, param: &str, value: &DefaultValue) -> Result<TokenStream, RenderError> {
    let tokens = match value {
        DefaultValue::Null => quote!(#rt::Value::Null),
        DefaultValue::Literal(Literal::Bool(b)) => quote!(#rt::Value::Bool(#b)),
        DefaultValue::Literal(Literal::Int(i)) => quote!(#rt::Value::Int(#i)),
        DefaultValue::Literal(Literal::Long(l)) => quote!(#rt::Value::Long(#l)),
        DefaultValue::Literal(Literal::Text(t)) => quote!(#rt::Value::text(#t)),
        DefaultValue::Expr(src) => {
            let expr = syn::parse_str::<syn::Expr>(src).map_err(|source| {
                RenderError::InvalidDefault {
                    param: param.to_string(),
                    source,
                }
            })?;
            quote!(#rt::Value::from(#expr))
        }
    };

    Ok(tokens)
}
