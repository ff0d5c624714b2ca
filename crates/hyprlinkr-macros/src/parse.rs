//! Parsing utilities for the controller macro.
//!
//! This module parses the `#[controller]` attribute, the helper attributes
//! on actions and parameters, and the action signatures of an `impl` block.

use syn::{
    ext::IdentExt,
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Expr, ExprLit, ExprPath, FnArg, GenericArgument, Ident, ImplItem, ImplItemFn,
    ItemImpl, Lit, LitStr, Meta, Pat, PatIdent, PatType, Path, PathArguments, Token, Type,
    Visibility,
};

/// Parsed `#[controller(...)]` arguments.
#[derive(Debug, Default)]
pub struct ControllerAttrs {
    /// Controller route template.
    pub route: Option<String>,
    /// Controller route name.
    pub route_name: Option<String>,
    /// Base controller whose actions are inherited.
    pub inherit: Option<Path>,
}

impl Parse for ControllerAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in meta_list {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new(meta.span(), "expected name = value"));
            };
            let ident = nv
                .path
                .get_ident()
                .ok_or_else(|| syn::Error::new(nv.path.span(), "expected identifier"))?
                .to_string();

            match ident.as_str() {
                "route" => attrs.route = Some(string_value(&nv.value)?),
                "route_name" => attrs.route_name = Some(string_value(&nv.value)?),
                "inherit" => match &nv.value {
                    Expr::Path(ExprPath { path, .. }) => attrs.inherit = Some(path.clone()),
                    other => {
                        return Err(syn::Error::new(other.span(), "expected a controller type"))
                    }
                },
                _ => {
                    return Err(syn::Error::new(
                        nv.path.span(),
                        format!("unknown attribute: {ident}"),
                    ))
                }
            }
        }

        Ok(attrs)
    }
}

/// Parsed `#[route("template", name = "...")]` on an action.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct RouteAttrs {
    /// Route template.
    pub template: Option<String>,
    /// Route name.
    pub name: Option<String>,
}

impl Parse for RouteAttrs {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let mut attrs = Self::default();

        if input.peek(LitStr) {
            let template: LitStr = input.parse()?;
            attrs.template = Some(template.value());
            if input.is_empty() {
                return Ok(attrs);
            }
            input.parse::<Token![,]>()?;
        }

        let meta_list: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;
        for meta in meta_list {
            let Meta::NameValue(nv) = meta else {
                return Err(syn::Error::new(meta.span(), "expected name = value"));
            };
            if nv.path.is_ident("name") {
                attrs.name = Some(string_value(&nv.value)?);
            } else if nv.path.is_ident("template") {
                attrs.template = Some(string_value(&nv.value)?);
            } else {
                return Err(syn::Error::new(nv.path.span(), "expected `name` or `template`"));
            }
        }

        if attrs.template.is_none() && attrs.name.is_none() {
            return Err(input.error("route attribute needs a template or a name"));
        }

        Ok(attrs)
    }
}

/// Parsed `#[optional(default = "...")]` on a parameter.
#[derive(Debug)]
struct OptionalAttr {
    default: String,
}

impl Parse for OptionalAttr {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let nv: syn::MetaNameValue = input.parse()?;
        if !nv.path.is_ident("default") {
            return Err(syn::Error::new(nv.path.span(), "expected `default = \"...\"`"));
        }
        Ok(Self {
            default: string_value(&nv.value)?,
        })
    }
}

fn string_value(expr: &Expr) -> syn::Result<String> {
    match expr {
        Expr::Lit(ExprLit {
            lit: Lit::Str(s), ..
        }) => Ok(s.value()),
        _ => Err(syn::Error::new(expr.span(), "expected string literal")),
    }
}

/// Route representation of a parameter type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Integer,
    Float,
    Boolean,
    Text,
    Complex,
}

impl Kind {
    /// Returns the `ParameterKind` variant name.
    pub const fn variant(self) -> &'static str {
        match self {
            Self::Integer => "Integer",
            Self::Float => "Float",
            Self::Boolean => "Boolean",
            Self::Text => "Text",
            Self::Complex => "Complex",
        }
    }

    fn of(ty: &Type) -> Self {
        let ty = match ty {
            Type::Reference(reference) => &*reference.elem,
            other => other,
        };
        let Some(ident) = last_ident(ty) else {
            return Self::Complex;
        };
        match ident.to_string().as_str() {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => Self::Integer,
            "f32" | "f64" => Self::Float,
            "bool" => Self::Boolean,
            "String" | "str" | "char" => Self::Text,
            _ => Self::Complex,
        }
    }
}

fn last_ident(ty: &Type) -> Option<&Ident> {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => {
            type_path.path.segments.last().map(|s| &s.ident)
        }
        _ => None,
    }
}

/// Returns `T` if `ty` is `Option<T>`.
fn option_inner(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}

/// Returns the owned type a recorder accepts for `ty`.
///
/// `&str` becomes `String`, `&T` becomes `T`, and the same applies inside
/// `Option<...>`.
fn owned_type(ty: &Type) -> Type {
    if let Some(inner) = option_inner(ty) {
        let inner = owned_type(inner);
        return syn::parse_quote!(::core::option::Option<#inner>);
    }
    match ty {
        Type::Reference(reference) => {
            if last_ident(&reference.elem).is_some_and(|ident| ident == "str") {
                syn::parse_quote!(::std::string::String)
            } else {
                (*reference.elem).clone()
            }
        }
        Type::Group(group) => owned_type(&group.elem),
        other => other.clone(),
    }
}

/// Renders a type the way it is compared in action signatures.
fn type_name(ty: &Type) -> String {
    if let Some(inner) = option_inner(ty) {
        return format!("Option<{}>", type_name(inner));
    }
    match ty {
        Type::Reference(reference) if last_ident(&reference.elem).is_some_and(|i| i == "str") => {
            "String".to_string()
        }
        Type::Reference(reference) => type_name(&reference.elem),
        Type::Path(type_path) if type_path.qself.is_none() => {
            let segment = type_path.path.segments.last();
            segment.map_or_else(String::new, |segment| {
                let args = match &segment.arguments {
                    PathArguments::AngleBracketed(args) => {
                        let rendered: Vec<String> = args
                            .args
                            .iter()
                            .map(|arg| match arg {
                                GenericArgument::Type(ty) => type_name(ty),
                                other => quote::quote!(#other).to_string(),
                            })
                            .collect();
                        format!("<{}>", rendered.join(","))
                    }
                    _ => String::new(),
                };
                format!("{}{}", segment.ident, args)
            })
        }
        other => quote::quote!(#other).to_string().replace(' ', ""),
    }
}

/// A parsed action parameter.
#[derive(Debug)]
pub struct ActionParam {
    /// The parameter name.
    pub name: Ident,
    /// The type the recorder accepts.
    pub owned_ty: Type,
    /// The type as compared in signatures.
    pub type_name: String,
    /// How the value is represented in routes.
    pub kind: Kind,
    /// Whether the parameter is `Option<T>`.
    pub nullable: bool,
    /// Default value text from `#[optional(default = "...")]`.
    pub default: Option<String>,
}

impl ActionParam {
    fn from_pat_type(pat_type: &PatType) -> syn::Result<Self> {
        let name = match &*pat_type.pat {
            Pat::Ident(PatIdent { ident, .. }) => ident.unraw(),
            other => {
                return Err(syn::Error::new(
                    other.span(),
                    "action parameters must be plain identifiers",
                ))
            }
        };

        let ty = &*pat_type.ty;
        let nullable = option_inner(ty).is_some();
        let kind = Kind::of(option_inner(ty).unwrap_or(ty));

        let mut default = None;
        for attr in &pat_type.attrs {
            if attr.path().is_ident("optional") {
                default = Some(attr.parse_args::<OptionalAttr>()?.default);
            }
        }

        Ok(Self {
            name,
            owned_ty: owned_type(ty),
            type_name: type_name(ty),
            kind,
            nullable,
            default,
        })
    }
}

/// A parsed action method.
#[derive(Debug)]
pub struct ActionFn {
    /// The method name.
    pub name: Ident,
    /// The parameters after the receiver.
    pub params: Vec<ActionParam>,
    /// Action route attribute.
    pub route: Option<RouteAttrs>,
    /// Whether the method is async.
    pub is_async: bool,
}

impl ActionFn {
    /// Parses a method if it is an action.
    ///
    /// Actions are public methods taking `&self` that are not marked
    /// `#[non_action]`. Returns `Ok(None)` for anything else.
    pub fn parse(method: &ImplItemFn) -> syn::Result<Option<Self>> {
        if !matches!(method.vis, Visibility::Public(_)) || has_attr(&method.attrs, "non_action") {
            return Ok(None);
        }
        let Some(FnArg::Receiver(receiver)) = method.sig.inputs.first() else {
            return Ok(None);
        };
        if receiver.reference.is_none() || receiver.mutability.is_some() {
            return Err(syn::Error::new(
                receiver.span(),
                "actions must take `&self`; mark other methods #[non_action]",
            ));
        }
        if !method.sig.generics.params.is_empty() {
            return Err(syn::Error::new(
                method.sig.generics.span(),
                "actions cannot be generic",
            ));
        }

        let params = method
            .sig
            .inputs
            .iter()
            .skip(1)
            .map(|arg| match arg {
                FnArg::Typed(pat_type) => ActionParam::from_pat_type(pat_type),
                FnArg::Receiver(r) => Err(syn::Error::new(r.span(), "unexpected receiver")),
            })
            .collect::<syn::Result<Vec<_>>>()?;

        let route = method
            .attrs
            .iter()
            .find(|attr| attr.path().is_ident("route"))
            .map(Attribute::parse_args::<RouteAttrs>)
            .transpose()?;

        Ok(Some(Self {
            name: method.sig.ident.unraw(),
            params,
            route,
            is_async: method.sig.asyncness.is_some(),
        }))
    }
}

fn has_attr(attrs: &[Attribute], name: &str) -> bool {
    attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// A parsed controller `impl` block.
#[derive(Debug)]
pub struct ControllerImpl {
    /// The controller type's name.
    pub ident: Ident,
    /// The controller type as written.
    pub self_ty: Type,
    /// The actions in declaration order.
    pub actions: Vec<ActionFn>,
    /// The `impl` block with helper attributes removed.
    pub item: ItemImpl,
}

impl ControllerImpl {
    /// Parses an inherent, non-generic `impl` block.
    pub fn parse(mut item: ItemImpl) -> syn::Result<Self> {
        if let Some((_, path, _)) = &item.trait_ {
            return Err(syn::Error::new(
                path.span(),
                "#[controller] goes on an inherent impl block",
            ));
        }
        if !item.generics.params.is_empty() {
            return Err(syn::Error::new(
                item.generics.span(),
                "controllers cannot be generic",
            ));
        }
        let ident = last_ident(&item.self_ty)
            .cloned()
            .ok_or_else(|| syn::Error::new(item.self_ty.span(), "expected a named type"))?;

        let mut actions = Vec::new();
        for impl_item in &item.items {
            if let ImplItem::Fn(method) = impl_item {
                if let Some(action) = ActionFn::parse(method)? {
                    actions.push(action);
                }
            }
        }

        strip_helper_attrs(&mut item);

        Ok(Self {
            ident,
            self_ty: (*item.self_ty).clone(),
            actions,
            item,
        })
    }
}

fn strip_helper_attrs(item: &mut ItemImpl) {
    for impl_item in &mut item.items {
        if let ImplItem::Fn(method) = impl_item {
            method
                .attrs
                .retain(|attr| !attr.path().is_ident("route") && !attr.path().is_ident("non_action"));
            for input in &mut method.sig.inputs {
                if let FnArg::Typed(pat_type) = input {
                    pat_type.attrs.retain(|attr| !attr.path().is_ident("optional"));
                }
            }
        }
    }
}
