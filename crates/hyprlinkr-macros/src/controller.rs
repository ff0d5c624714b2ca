//! Controller macro implementation.
//!
//! This module contains the core logic for expanding `#[controller]`
//! attributes.

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{Ident, ItemImpl, LitStr};

use crate::parse::{ActionFn, ActionParam, ControllerAttrs, ControllerImpl, RouteAttrs};

/// Expands the `#[controller]` attribute macro.
///
/// 1. Parse the attributes and the `impl` block
/// 2. Re-emit the `impl` block without helper attributes
/// 3. Generate the call recorder
/// 4. Generate the `Controller` implementation and its descriptor
pub fn expand_controller(attr: TokenStream, item: TokenStream) -> syn::Result<TokenStream> {
    let attrs: ControllerAttrs = syn::parse2(attr)?;
    let item_impl: ItemImpl = syn::parse2(item)?;
    let controller = ControllerImpl::parse(item_impl)?;

    Ok(generate_controller_code(&attrs, &controller))
}

fn generate_controller_code(attrs: &ControllerAttrs, controller: &ControllerImpl) -> TokenStream {
    let item = &controller.item;
    let self_ty = &controller.self_ty;
    let type_name = controller.ident.to_string();
    let recorder = format_ident!("{}Actions", controller.ident);
    let recorder_doc = format!("Call recorder for the actions of `{type_name}`.");

    let recorder_methods = controller
        .actions
        .iter()
        .map(|action| generate_recorder_method(self_ty, &type_name, action));

    let action_descriptors = controller
        .actions
        .iter()
        .map(|action| generate_action_descriptor(self_ty, &type_name, action));

    let controller_route = route_attribute(attrs.route.as_deref(), attrs.route_name.as_deref())
        .map(|route| quote! { .route(#route) });

    let (recorder_fields, recorder_deref, inherit) = match &attrs.inherit {
        Some(base) => (
            quote! {
                {
                    base: <#base as ::hyprlinkr_core::Controller>::Actions,
                }
            },
            quote! {
                impl ::core::ops::Deref for #recorder {
                    type Target = <#base as ::hyprlinkr_core::Controller>::Actions;

                    fn deref(&self) -> &Self::Target {
                        &self.base
                    }
                }
            },
            quote! { .inherit(<#base as ::hyprlinkr_core::Controller>::descriptor()) },
        ),
        None => (quote! { ; }, quote! {}, quote! {}),
    };

    quote! {
        #item

        #[doc = #recorder_doc]
        #[derive(Debug, Default, Clone)]
        pub struct #recorder #recorder_fields

        #[allow(clippy::unused_self)]
        impl #recorder {
            #(#recorder_methods)*
        }

        #recorder_deref

        impl ::hyprlinkr_core::Controller for #self_ty {
            type Actions = #recorder;

            fn descriptor() -> &'static ::hyprlinkr_core::ControllerDescriptor {
                static DESCRIPTOR: ::std::sync::OnceLock<::hyprlinkr_core::ControllerDescriptor> =
                    ::std::sync::OnceLock::new();
                DESCRIPTOR.get_or_init(|| {
                    ::hyprlinkr_core::ControllerDescriptor::new::<#self_ty>(#type_name)
                        #controller_route
                        #(.action(#action_descriptors))*
                        #inherit
                })
            }
        }
    }
}

/// Generates one recorder method returning the call expression.
fn generate_recorder_method(
    self_ty: &syn::Type,
    type_name: &str,
    action: &ActionFn,
) -> TokenStream {
    let name = &action.name;
    let action_name = name.to_string();
    let doc = format!("Records a call to `{type_name}::{action_name}`.");

    let params = action.params.iter().map(|param| {
        let param_name = &param.name;
        let ty = &param.owned_ty;
        quote! { #param_name: impl ::core::convert::Into<::hyprlinkr_core::Arg<#ty>> }
    });
    let arguments = action.params.iter().map(|param| {
        let param_name = &param.name;
        let ty = &param.owned_ty;
        quote! { ::core::convert::Into::<::hyprlinkr_core::Arg<#ty>>::into(#param_name).erase() }
    });

    quote! {
        #[doc = #doc]
        pub fn #name(&self, #(#params),*) -> ::hyprlinkr_core::Expression {
            ::hyprlinkr_core::Expression::call(
                <#self_ty as ::hyprlinkr_core::Controller>::descriptor(),
                #action_name,
                ::std::vec![#(#arguments),*],
            )
        }
    }
}

/// Generates the `ActionMethod` builder expression for one action.
fn generate_action_descriptor(
    self_ty: &syn::Type,
    type_name: &str,
    action: &ActionFn,
) -> TokenStream {
    let action_name = action.name.to_string();
    let parameters = action.params.iter().map(generate_parameter_descriptor);
    let route = action
        .route
        .as_ref()
        .and_then(|RouteAttrs { template, name }| {
            route_attribute(template.as_deref(), name.as_deref())
        })
        .map(|route| quote! { .route(#route) });
    let asynchronous = action.is_async.then(|| quote! { .asynchronous() });

    quote! {
        ::hyprlinkr_core::ActionMethod::new::<#self_ty>(#type_name, #action_name)
            #(.parameter(#parameters))*
            #route
            #asynchronous
    }
}

fn generate_parameter_descriptor(param: &ActionParam) -> TokenStream {
    let name = param.name.to_string();
    let type_name = &param.type_name;
    let kind = Ident::new(param.kind.variant(), Span::call_site());
    let nullable = param.nullable.then(|| quote! { .nullable() });
    let default = param.default.as_ref().map(|value| {
        let value = LitStr::new(value, Span::call_site());
        quote! { .with_default(#value) }
    });

    quote! {
        ::hyprlinkr_core::ParameterDescriptor::new(
            #name,
            #type_name,
            ::hyprlinkr_core::ParameterKind::#kind,
        )
        #nullable
        #default
    }
}

fn route_attribute(template: Option<&str>, name: Option<&str>) -> Option<TokenStream> {
    if template.is_none() && name.is_none() {
        return None;
    }
    let template = template.map(|t| quote! { .with_template(#t) });
    let name = name.map(|n| quote! { .with_name(#n) });
    Some(quote! {
        ::hyprlinkr_core::RouteAttribute::new() #template #name
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_basic_controller() {
        let attr = quote! {};
        let item = quote! {
            impl FooController {
                pub fn get_by_id(&self, id: i32) -> String {
                    id.to_string()
                }
            }
        };

        let result = expand_controller(attr, item);
        assert!(result.is_ok(), "expansion failed: {:?}", result.err());
        let expanded = result.unwrap().to_string();
        assert!(expanded.contains("FooControllerActions"));
        assert!(expanded.contains("\"get_by_id\""));
    }

    #[test]
    fn test_expand_controller_with_route() {
        let attr = quote! { route = "api/{controller}/{id}", route_name = "Custom" };
        let item = quote! {
            impl RouteAttributeController {
                #[route("api/route/{id}", name = "Action Route")]
                pub fn get(&self, id: i32) {}
            }
        };

        let expanded = expand_controller(attr, item).unwrap().to_string();
        assert!(expanded.contains("with_template"));
        assert!(expanded.contains("\"Action Route\""));
        assert!(!expanded.contains("# [route"));
    }

    #[test]
    fn test_expand_controller_with_inherit() {
        let attr = quote! { inherit = BaseController };
        let item = quote! {
            impl DerivedController {}
        };

        let expanded = expand_controller(attr, item).unwrap().to_string();
        assert!(expanded.contains("Deref"));
        assert!(expanded.contains("inherit"));
    }

    #[test]
    fn test_expand_controller_rejects_generic() {
        let item = quote! {
            impl<T> Wrapper<T> {
                pub fn get(&self) {}
            }
        };
        assert!(expand_controller(quote! {}, item).is_err());
    }
}
