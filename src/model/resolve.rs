//! Type-expression resolution for properties, parameters and response schemas.
//!
//! Every field resolves to three things: the type expression written into
//! generated declarations, an optional initial value, and an optional
//! dependency on another definition.

use std::num::FpCategory;

use super::{ItemShape, ParamLocation, Parameter, PrimitiveType, Property, Schema};

/// Prefix every definition reference starts with.
pub const REF_PREFIX: &str = "#/definitions/";

/// Namespace that referenced definitions are emitted under.
pub const DEFS_NAMESPACE: &str = "defs";

/// Marker opening a generic parameter list in definition names.
pub const GENERIC_OPEN: char = '«';

const GENERIC_CLOSE: char = '»';

/// Generic wrappers that are peeled away when resolving a reference.
const RESULT_ENVELOPES: &[&str] = &["ResultDTO"];

/// Maps a possibly parameterized definition name to its base name.
///
/// `Page«User»` becomes `Page`; names without a generic marker are unchanged.
#[must_use]
pub fn canonical_name(raw: &str) -> &str {
    raw.split_once(GENERIC_OPEN).map_or(raw, |(base, _)| base)
}

/// Resolves a `$ref` to the name of the definition it points at.
///
/// One level of result envelope is unwrapped, so `#/definitions/ResultDTO«User»`
/// resolves to `User`. Other generic references are truncated to their base name.
#[must_use]
pub fn ref_name(reference: &str) -> String {
    let name = reference.strip_prefix(REF_PREFIX).unwrap_or(reference);

    match name.split_once(GENERIC_OPEN) {
        Some((outer, rest)) if RESULT_ENVELOPES.contains(&outer) => {
            let inner = rest.strip_suffix(GENERIC_CLOSE).unwrap_or(rest);
            canonical_name(inner).to_string()
        }
        Some((outer, _)) => outer.to_string(),
        None => name.to_string(),
    }
}

fn ref_type(reference: &str) -> String {
    format!("{DEFS_NAMESPACE}.{}", ref_name(reference))
}

fn array_type(items: Option<&ItemShape>) -> String {
    let Some(items) = items else {
        return "any[]".to_string();
    };
    match items.kind {
        Some(PrimitiveType::Boolean) => "boolean[]".to_string(),
        Some(PrimitiveType::Number | PrimitiveType::Integer) => "number[]".to_string(),
        Some(PrimitiveType::String) => "string[]".to_string(),
        _ => match &items.reference {
            Some(reference) => format!("{}[]", ref_type(reference)),
            None => "any[]".to_string(),
        },
    }
}

fn scalar_type(kind: Option<PrimitiveType>) -> String {
    match kind {
        Some(PrimitiveType::Integer) => "number".to_string(),
        Some(kind) => kind.as_str().to_string(),
        None => "any".to_string(),
    }
}

/// Reads an enum member as a number with JS `Number(str)` rules and prints it
/// the way JS stringifies numbers. `None` stands for `NaN`.
fn numeric_literal(value: &str) -> Option<String> {
    js_number(value).map(js_number_string)
}

fn js_number(text: &str) -> Option<f64> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0X", 16), ("0o", 8), ("0O", 8), ("0b", 2), ("0B", 2)] {
        if let Some(digits) = trimmed.strip_prefix(prefix) {
            if digits.is_empty() {
                return None;
            }
            return digits.chars().try_fold(0.0_f64, |acc, c| {
                c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
            });
        }
    }
    let unsigned = trimmed.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(trimmed);
    if unsigned == "Infinity" {
        return Some(if trimmed.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    // Rust also accepts `inf` and `nan`; JS does not.
    if !unsigned.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '+' | '-')) {
        return None;
    }
    trimmed.parse().ok()
}

/// JS `Number.prototype.toString()` for a non-NaN value.
fn js_number_string(number: f64) -> String {
    if number.classify() == FpCategory::Zero {
        return "0".to_string();
    }
    if number.is_infinite() {
        return if number > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    let sign = if number < 0.0 { "-" } else { "" };
    let scientific = format!("{:e}", number.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return number.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return number.to_string();
    };
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let n = exponent + 1;
    let zeros = |count: i32| "0".repeat(usize::try_from(count).unwrap_or(0));

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", zeros(n - k))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(usize::try_from(n).unwrap_or(0));
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", zeros(-n))
    } else {
        let (first, rest) = digits.split_at(1);
        let exp_sign = if n > 0 { '+' } else { '-' };
        let fraction = if rest.is_empty() { String::new() } else { format!(".{rest}") };
        format!("{first}{fraction}e{exp_sign}{}", (n - 1).abs())
    };
    format!("{sign}{body}")
}

/// Union of numeric literals for parseable members, then every member quoted.
fn enum_union(values: &[String]) -> String {
    values
        .iter()
        .filter_map(|v| numeric_literal(v))
        .chain(values.iter().map(|v| format!("'{v}'")))
        .collect::<Vec<_>>()
        .join(" | ")
}

impl Property {
    /// Type expression for this property.
    #[must_use]
    pub fn final_type(&self) -> String {
        if let Some(values) = self.enum_values.as_deref().filter(|v| !v.is_empty()) {
            return enum_union(values);
        }
        if let Some(reference) = &self.reference {
            return ref_type(reference);
        }
        if self.kind == Some(PrimitiveType::Array) {
            return array_type(self.items.as_ref());
        }
        scalar_type(self.kind)
    }

    /// Initial value expression for generated value classes.
    #[must_use]
    pub fn initial_value(&self) -> Option<String> {
        if let Some(reference) = &self.reference {
            return Some(format!("new {}()", ref_name(reference)));
        }
        match self.kind {
            Some(PrimitiveType::Array) => Some("[]".to_string()),
            Some(PrimitiveType::String) => Some("''".to_string()),
            _ => None,
        }
    }

    /// Definition this property depends on, ignoring references back to `owner`.
    #[must_use]
    pub fn dep(&self, owner: &str) -> Option<String> {
        let item_ref = self.items.as_ref().and_then(|items| items.reference.as_deref());
        [self.reference.as_deref(), item_ref]
            .into_iter()
            .flatten()
            .map(ref_name)
            .find(|name| name != owner)
    }
}

impl Parameter {
    /// Type expression for this parameter.
    #[must_use]
    pub fn final_type(&self) -> String {
        let schema = self.schema.as_ref();
        if let Some(reference) = schema.and_then(|s| s.reference.as_deref()) {
            return ref_type(reference);
        }
        if let Some(kind) = schema.and_then(|s| s.kind).filter(|k| *k != PrimitiveType::Array) {
            return kind.as_str().to_string();
        }
        match self.kind {
            Some(PrimitiveType::Array) => return array_type(self.items.as_ref()),
            Some(PrimitiveType::Integer) => return "number".to_string(),
            _ => {}
        }
        if let Some(schema) = schema.filter(|s| s.kind == Some(PrimitiveType::Array)) {
            return match schema.items.as_ref().and_then(|items| items.kind) {
                Some(PrimitiveType::Number | PrimitiveType::Integer) => "number[]".to_string(),
                Some(PrimitiveType::String) => "string[]".to_string(),
                _ => "any[]".to_string(),
            };
        }
        scalar_type(self.kind)
    }
}

/// Intersection of all body parameter types, e.g. `defs.User & defs.Audit`.
///
/// Empty when the endpoint has no body parameters.
#[must_use]
pub fn body_type(params: &[Parameter]) -> String {
    params
        .iter()
        .filter(|p| p.location == ParamLocation::Body)
        .map(Parameter::final_type)
        .collect::<Vec<_>>()
        .join(" & ")
}

impl Schema {
    /// Type expression for this schema.
    #[must_use]
    pub fn final_type(&self) -> String {
        if let Some(reference) = &self.reference {
            return ref_type(reference);
        }
        if self.kind == Some(PrimitiveType::Array) {
            return array_type(self.items.as_ref());
        }
        scalar_type(self.kind)
    }

    /// Initial value for a response of this shape.
    #[must_use]
    pub fn initial_value(&self) -> Option<String> {
        if let Some(reference) = &self.reference {
            return Some(format!("new {}()", ref_type(reference)));
        }
        (self.kind == Some(PrimitiveType::Array)).then(|| "[]".to_string())
    }

    /// Definition this schema depends on.
    #[must_use]
    pub fn dep(&self) -> Option<String> {
        self.reference
            .as_deref()
            .or_else(|| self.items.as_ref().and_then(|items| items.reference.as_deref()))
            .map(ref_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prop(kind: Option<PrimitiveType>) -> Property {
        Property { name: "field".into(), kind, ..Property::default() }
    }

    fn param(location: ParamLocation, kind: Option<PrimitiveType>) -> Parameter {
        Parameter {
            name: "p".into(),
            location,
            description: String::new(),
            required: false,
            kind,
            items: None,
            schema: None,
        }
    }

    #[test]
    fn canonical_name_truncates_generic_suffix() {
        assert_eq!(canonical_name("Page«User»"), "Page");
        assert_eq!(canonical_name("User"), "User");
    }

    #[test]
    fn ref_name_unwraps_result_envelope() {
        assert_eq!(ref_name("#/definitions/ResultDTO«User»"), "User");
        assert_eq!(ref_name("#/definitions/ResultDTO«Page«User»»"), "Page");
        assert_eq!(ref_name("#/definitions/Page«User»"), "Page");
        assert_eq!(ref_name("#/definitions/ResultDTO"), "ResultDTO");
    }

    #[test]
    fn enum_union_lists_numbers_then_quoted_members() {
        let mut p = prop(Some(PrimitiveType::String));
        p.enum_values = Some(vec!["1".into(), "active".into()]);
        assert_eq!(p.final_type(), "1 | 'active' | '1'");
    }

    #[test]
    fn enum_union_normalizes_numeric_spelling() {
        let mut p = prop(Some(PrimitiveType::Integer));
        p.enum_values = Some(vec!["1e3".into(), "2.50".into()]);
        assert_eq!(p.final_type(), "1000 | 2.5 | '1e3' | '2.50'");
    }

    #[test]
    fn enum_union_follows_js_number_conversion() {
        let mut p = prop(Some(PrimitiveType::String));
        p.enum_values = Some(vec![
            "-0".into(),
            "1e21".into(),
            "0x10".into(),
            "Infinity".into(),
            "inf".into(),
            "0.0000001".into(),
        ]);
        assert_eq!(
            p.final_type(),
            concat!(
                "0 | 1e+21 | 16 | Infinity | 1e-7 | ",
                "'-0' | '1e21' | '0x10' | 'Infinity' | 'inf' | '0.0000001'"
            )
        );
    }

    #[test]
    fn js_number_string_switches_to_exponent_at_js_thresholds() {
        assert_eq!(js_number_string(123_456.0), "123456");
        assert_eq!(js_number_string(1e20), "100000000000000000000");
        assert_eq!(js_number_string(0.000_001), "0.000001");
        assert_eq!(js_number_string(-1.5e-7), "-1.5e-7");
        assert_eq!(js_number_string(2.5e25), "2.5e+25");
    }

    #[test]
    fn empty_enum_falls_back_to_primitive() {
        let mut p = prop(Some(PrimitiveType::Integer));
        p.enum_values = Some(vec![]);
        assert_eq!(p.final_type(), "number");
    }

    #[test]
    fn reference_wins_over_primitive_kind() {
        let mut p = prop(Some(PrimitiveType::Object));
        p.reference = Some("#/definitions/ResultDTO«User»".into());
        assert_eq!(p.final_type(), "defs.User");
        assert_eq!(p.initial_value().as_deref(), Some("new User()"));
        assert_eq!(p.dep("Order").as_deref(), Some("User"));
    }

    #[test]
    fn array_items_dispatch() {
        let mut p = prop(Some(PrimitiveType::Array));
        assert_eq!(p.final_type(), "any[]");

        p.items = Some(ItemShape { kind: Some(PrimitiveType::Integer), reference: None });
        assert_eq!(p.final_type(), "number[]");

        p.items = Some(ItemShape { kind: Some(PrimitiveType::Boolean), reference: None });
        assert_eq!(p.final_type(), "boolean[]");

        p.items = Some(ItemShape { kind: None, reference: Some("#/definitions/Tag".into()) });
        assert_eq!(p.final_type(), "defs.Tag[]");
        assert_eq!(p.initial_value().as_deref(), Some("[]"));
        assert_eq!(p.dep("Post").as_deref(), Some("Tag"));

        p.items = Some(ItemShape { kind: Some(PrimitiveType::Object), reference: None });
        assert_eq!(p.final_type(), "any[]");
    }

    #[test]
    fn scalar_kinds() {
        assert_eq!(prop(Some(PrimitiveType::Integer)).final_type(), "number");
        assert_eq!(prop(Some(PrimitiveType::Boolean)).final_type(), "boolean");
        assert_eq!(prop(None).final_type(), "any");
        assert_eq!(prop(Some(PrimitiveType::String)).initial_value().as_deref(), Some("''"));
        assert_eq!(prop(Some(PrimitiveType::Number)).initial_value(), None);
    }

    #[test]
    fn self_reference_is_not_a_dependency() {
        let mut p = prop(None);
        p.reference = Some("#/definitions/Category".into());
        assert_eq!(p.dep("Category"), None);
        assert_eq!(p.dep("Product").as_deref(), Some("Category"));
    }

    #[test]
    fn parameter_schema_reference_and_arrays() {
        let mut body = param(ParamLocation::Body, None);
        body.schema = Some(Schema {
            kind: None,
            items: None,
            reference: Some("#/definitions/UserForm«Create»".into()),
        });
        assert_eq!(body.final_type(), "defs.UserForm");

        let mut ids = param(ParamLocation::Body, None);
        ids.schema = Some(Schema {
            kind: Some(PrimitiveType::Array),
            items: Some(ItemShape { kind: Some(PrimitiveType::Integer), reference: None }),
            reference: None,
        });
        assert_eq!(ids.final_type(), "number[]");

        let query = param(ParamLocation::Query, Some(PrimitiveType::Array));
        assert_eq!(query.final_type(), "any[]");

        assert_eq!(param(ParamLocation::Path, Some(PrimitiveType::Integer)).final_type(), "number");
        assert_eq!(param(ParamLocation::Query, None).final_type(), "any");
    }

    #[test]
    fn body_parameters_are_intersected() {
        let mut user = param(ParamLocation::Body, None);
        user.schema =
            Some(Schema { kind: None, items: None, reference: Some("#/definitions/User".into()) });
        let mut audit = param(ParamLocation::Body, None);
        audit.schema =
            Some(Schema { kind: None, items: None, reference: Some("#/definitions/Audit".into()) });
        let page = param(ParamLocation::Query, Some(PrimitiveType::Integer));

        assert_eq!(body_type(&[user, page.clone(), audit]), "defs.User & defs.Audit");
        assert_eq!(body_type(&[page]), "");
    }

    #[test]
    fn response_schema_resolution() {
        let schema = Schema {
            kind: None,
            items: None,
            reference: Some("#/definitions/ResultDTO«Order»".into()),
        };
        assert_eq!(schema.final_type(), "defs.Order");
        assert_eq!(schema.initial_value().as_deref(), Some("new defs.Order()"));
        assert_eq!(schema.dep().as_deref(), Some("Order"));

        let list = Schema {
            kind: Some(PrimitiveType::Array),
            items: Some(ItemShape { kind: None, reference: Some("#/definitions/Order".into()) }),
            reference: None,
        };
        assert_eq!(list.final_type(), "defs.Order[]");
        assert_eq!(list.dep().as_deref(), Some("Order"));

        assert_eq!(Schema::default().final_type(), "any");
        assert_eq!(Schema::default().dep(), None);
    }
}
