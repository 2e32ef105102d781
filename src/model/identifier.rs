//! Endpoint identifiers derived from paths, methods and operation ids.

/// Words that cannot be used as identifiers in generated code, and their replacements.
const RESERVED_WORDS: &[(&str, &str)] = &[("delete", "remove")];

/// Returns the longest leading run of path segments shared by every path.
///
/// Paths are given without their leading slash. The result is written with
/// a leading slash per segment (`/a/b`), or is empty when nothing is shared.
/// Peeling stops as soon as any path has no further `/`.
#[must_use]
pub fn max_same_path<S: AsRef<str>>(paths: &[S]) -> String {
    let mut same_path = String::new();
    let mut rests: Vec<&str> = paths.iter().map(AsRef::as_ref).collect();

    while !rests.is_empty() && rests.iter().all(|p| p.contains('/')) {
        let split: Vec<(&str, &str)> = rests.iter().filter_map(|p| p.split_once('/')).collect();
        let Some(&(first, _)) = split.first() else {
            break;
        };
        if split.iter().any(|(segment, _)| *segment != first) {
            break;
        }
        same_path.push('/');
        same_path.push_str(first);
        rests = split.into_iter().map(|(_, rest)| rest).collect();
    }

    same_path
}

/// Builds an endpoint name from its path, relative to the module's shared prefix.
///
/// `{param}` segments become `By<Param>`, other segments are capitalized,
/// and the method is prepended: `("/user/{id}/profile", "get", "/user")`
/// yields `getByIdProfile`.
#[must_use]
pub fn identifier_from_url(url: &str, method: &str, same_path: &str) -> String {
    let rest = url.strip_prefix(same_path).unwrap_or(url);
    let mut identifier = method.to_string();
    for segment in rest.split('/') {
        match segment.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
            Some(param) if !param.is_empty() => {
                identifier.push_str("By");
                identifier.push_str(&upper_first(param));
            }
            _ => identifier.push_str(&upper_first(segment)),
        }
    }
    identifier
}

/// Builds an endpoint name from a generated operation id such as `getUserUsingGET`.
#[must_use]
pub fn identifier_from_operation_id(operation_id: &str) -> String {
    let identifier = match operation_id.rfind("Using") {
        Some(idx) if idx > 0 && idx + "Using".len() < operation_id.len() => &operation_id[..idx],
        _ => operation_id,
    };
    RESERVED_WORDS
        .iter()
        .find(|(word, _)| *word == identifier)
        .map_or_else(|| identifier.to_string(), |(_, replacement)| (*replacement).to_string())
}

/// Upper-cases the first character.
#[must_use]
pub fn upper_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
