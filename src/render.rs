//! Declaration text for definitions and endpoints.
//!
//! Only the text of type declarations is produced here. Per-endpoint source
//! comes from a [`Template`]; [`DeclarationTemplate`] is the built-in one used
//! by `swag show`.

use crate::model::resolve::{body_type, DEFS_NAMESPACE, GENERIC_OPEN};
use crate::model::{Definition, Interface, Module, ParamLocation, Parameter};

/// An endpoint with its derived type strings, as handed to a [`Template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EndpointView<'a> {
    /// The endpoint being rendered.
    pub interface: &'a Interface,
    /// Upper-cased HTTP method.
    pub method: String,
    /// The endpoint summary.
    pub description: &'a str,
    /// Intersection of body parameter types; empty without body parameters.
    pub body_params: String,
    /// `class Params { ... }` declaration of the non-body parameters.
    pub params_type: String,
    /// Response type expression.
    pub response_type: String,
    /// Initial value of the response, `undefined` when it has none.
    pub initial_value: String,
}

impl<'a> EndpointView<'a> {
    /// Derives the view for `interface`.
    #[must_use]
    pub fn from_interface(interface: &'a Interface) -> Self {
        Self {
            interface,
            method: interface.method.to_uppercase(),
            description: &interface.summary,
            body_params: body_type(&interface.parameters),
            params_type: params_class(&interface.parameters),
            response_type: interface.response.final_type(),
            initial_value: interface
                .response
                .initial_value()
                .unwrap_or_else(|| "undefined".to_string()),
        }
    }
}

/// Renders per-endpoint source text.
pub trait Template {
    /// Implementation source of one endpoint.
    fn implement(&self, view: &EndpointView<'_>) -> String;
    /// Declaration source of one endpoint.
    fn header(&self, view: &EndpointView<'_>) -> String;
    /// Text emitted once before all endpoint declarations.
    fn common_header(&self) -> String;
}

/// Plain declaration template: a `Params` class plus a typed request signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclarationTemplate;

impl Template for DeclarationTemplate {
    fn implement(&self, view: &EndpointView<'_>) -> String {
        let body = if view.body_params.is_empty() { "" } else { ", body" };
        [
            format!("export async function request(params{body}) {{"),
            format!(
                "  return fetch(`{}`, {{ method: '{}' }});",
                view.interface.path, view.method
            ),
            "}".to_string(),
        ]
        .join("\n")
    }

    fn header(&self, view: &EndpointView<'_>) -> String {
        let body = if view.body_params.is_empty() {
            String::new()
        } else {
            format!(", body: {}", view.body_params)
        };
        [
            view.params_type.clone(),
            format!("export type Response = {};", view.response_type),
            "export const init: Response;".to_string(),
            format!("export function request(params: Params{body}): Promise<Response>;"),
        ]
        .join("\n")
    }

    fn common_header(&self) -> String {
        String::new()
    }
}

/// `class Params { ... }` for the non-body parameters of an endpoint.
#[must_use]
pub fn params_class(params: &[Parameter]) -> String {
    let mut lines = vec!["class Params {".to_string()];
    for param in params.iter().filter(|p| p.location != ParamLocation::Body) {
        if !param.description.is_empty() {
            lines.push(format!("  /** {} */", param.description));
        }
        lines.push(format!("  {}{}: {};", param.name, optional(param.required), param.final_type()));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Type declaration of a definition.
///
/// With `qualified` false the `defs.` namespace is stripped from property
/// types, for declarations emitted inside that namespace.
#[must_use]
pub fn definition_class(def: &Definition, qualified: bool) -> String {
    let namespace = format!("{DEFS_NAMESPACE}.");
    let mut lines = vec![format!("class {} {{", class_name(&def.name))];
    for prop in &def.properties {
        let final_type = prop.final_type();
        let final_type = if qualified {
            final_type.as_str()
        } else {
            final_type.strip_prefix(&namespace).unwrap_or(&final_type)
        };
        if !prop.description.is_empty() {
            lines.push(format!("  /** {} */", prop.description));
        }
        lines.push(format!("  {}{}: {final_type};", prop.name, optional(prop.required)));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Value class of a definition: every property that has an initial value.
///
/// A property referencing its own class is initialised with `{} as Name`
/// instead of recursing.
#[must_use]
pub fn value_class(def: &Definition) -> String {
    let name = class_name(&def.name);
    let self_init = format!("new {name}()");
    let mut lines = vec![format!("class {name} {{")];
    for prop in &def.properties {
        let Some(initial) = prop.initial_value() else {
            continue;
        };
        let initial = if initial == self_init { format!("{{}} as {name}") } else { initial };
        if !prop.description.is_empty() {
            lines.push(format!("  /** {} */", prop.description));
        }
        lines.push(format!("  {} = {initial};", prop.name));
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Namespace declaration of a module, one nested namespace per endpoint.
#[must_use]
pub fn module_declaration(module: &Module, template: &dyn Template) -> String {
    let mut lines = Vec::new();
    let common = template.common_header();
    if !common.is_empty() {
        lines.push(common);
    }
    lines.push("/**".to_string());
    lines.push(format!(" * {}", module.description));
    if let Some(first) = module.interfaces.first() {
        lines.push(format!(" * {}", first.same_path));
    }
    lines.push(" */".to_string());
    lines.push(format!("export namespace {} {{", module.name));
    for interface in &module.interfaces {
        let view = EndpointView::from_interface(interface);
        lines.push(format!("  /** {} {} */", view.description, interface.path));
        lines.push(format!("  export namespace {} {{", interface.name));
        for line in template.header(&view).lines() {
            lines.push(format!("    {line}"));
        }
        lines.push("  }".to_string());
    }
    lines.push("}".to_string());
    lines.join("\n")
}

/// Implementation source of every endpoint in `module`, one block per
/// `<module>/<endpoint>.ts` file.
#[must_use]
pub fn module_implementation(module: &Module, template: &dyn Template) -> String {
    module
        .interfaces
        .iter()
        .map(|interface| {
            let view = EndpointView::from_interface(interface);
            format!("// {}/{}.ts\n{}", module.name, interface.name, template.implement(&view))
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn class_name(name: &str) -> &str {
    name.find(GENERIC_OPEN).map_or(name, |idx| &name[..idx])
}

fn optional(required: bool) -> &'static str {
    if required {
        ""
    } else {
        "?"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ItemShape, PrimitiveType, Property, Schema};

    fn param(name: &str, location: ParamLocation, kind: PrimitiveType) -> Parameter {
        Parameter {
            name: name.into(),
            location,
            description: String::new(),
            required: false,
            kind: Some(kind),
            items: None,
            schema: None,
        }
    }

    fn interface() -> Interface {
        let mut id = param("id", ParamLocation::Path, PrimitiveType::Integer);
        id.required = true;
        id.description = "user id".into();
        let mut body = param("user", ParamLocation::Body, PrimitiveType::Object);
        body.schema = Some(Schema {
            kind: None,
            items: None,
            reference: Some("#/definitions/User".into()),
        });
        Interface {
            name: "updateById".into(),
            method: "put".into(),
            path: "/user/{id}".into(),
            same_path: "/user".into(),
            summary: "update a user".into(),
            description: String::new(),
            tags: vec![],
            consumes: vec![],
            operation_id: None,
            parameters: vec![id, body, param("dryRun", ParamLocation::Query, PrimitiveType::Boolean)],
            response: Schema {
                kind: None,
                items: None,
                reference: Some("#/definitions/ResultDTO«User»".into()),
            },
        }
    }

    #[test]
    fn endpoint_view_derives_type_strings() {
        let inter = interface();
        let view = EndpointView::from_interface(&inter);
        assert_eq!(view.method, "PUT");
        assert_eq!(view.description, "update a user");
        assert_eq!(view.body_params, "defs.User");
        assert_eq!(view.response_type, "defs.User");
        assert_eq!(view.initial_value, "new defs.User()");
        assert_eq!(
            view.params_type,
            "class Params {\n  /** user id */\n  id: number;\n  dryRun?: boolean;\n}"
        );
    }

    #[test]
    fn missing_response_initial_value_is_undefined() {
        let mut inter = interface();
        inter.response = Schema { kind: Some(PrimitiveType::Boolean), items: None, reference: None };
        assert_eq!(EndpointView::from_interface(&inter).initial_value, "undefined");
    }

    fn user() -> Definition {
        Definition {
            name: "User«T»".into(),
            description: String::new(),
            properties: vec![
                Property {
                    name: "id".into(),
                    kind: Some(PrimitiveType::Integer),
                    required: true,
                    ..Property::default()
                },
                Property {
                    name: "tags".into(),
                    kind: Some(PrimitiveType::Array),
                    items: Some(ItemShape { kind: Some(PrimitiveType::String), reference: None }),
                    ..Property::default()
                },
                Property {
                    name: "address".into(),
                    description: "home".into(),
                    reference: Some("#/definitions/Address".into()),
                    ..Property::default()
                },
                Property {
                    name: "parent".into(),
                    reference: Some("#/definitions/User".into()),
                    ..Property::default()
                },
            ],
        }
    }

    #[test]
    fn definition_class_truncates_generic_name() {
        let text = definition_class(&user(), true);
        assert!(text.starts_with("class User {"));
        assert!(text.contains("  id: number;"));
        assert!(text.contains("  tags?: string[];"));
        assert!(text.contains("  /** home */\n  address?: defs.Address;"));
    }

    #[test]
    fn unqualified_class_drops_namespace() {
        let text = definition_class(&user(), false);
        assert!(text.contains("  address?: Address;"));
    }

    #[test]
    fn value_class_skips_uninitialised_and_breaks_self_reference() {
        let text = value_class(&user());
        assert!(!text.contains("id ="));
        assert!(text.contains("  tags = [];"));
        assert!(text.contains("  address = new Address();"));
        assert!(text.contains("  parent = {} as User;"));
    }

    #[test]
    fn module_declaration_nests_endpoint_headers() {
        let module = Module {
            name: "user".into(),
            description: "用户".into(),
            interfaces: vec![interface()],
        };
        let text = module_declaration(&module, &DeclarationTemplate);
        assert!(text.contains(" * /user\n"));
        assert!(text.contains("export namespace user {"));
        assert!(text.contains("  export namespace updateById {"));
        assert!(text.contains(
            "    export function request(params: Params, body: defs.User): Promise<Response>;"
        ));
    }

    #[test]
    fn module_implementation_names_each_endpoint_file() {
        let module = Module {
            name: "user".into(),
            description: "用户".into(),
            interfaces: vec![interface()],
        };
        let text = module_implementation(&module, &DeclarationTemplate);
        assert!(text.starts_with(
            "// user/updateById.ts\nexport async function request(params, body) {"
        ));
    }

    #[test]
    fn declaration_template_implements_request() {
        let inter = interface();
        let text = DeclarationTemplate.implement(&EndpointView::from_interface(&inter));
        assert!(text.contains("method: 'PUT'"));
        assert!(text.starts_with("export async function request(params, body) {"));
    }
}
