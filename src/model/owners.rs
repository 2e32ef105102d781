//! Owner markers embedded in tag descriptions.
//!
//! Tags may carry `前端:[alice,bob]` (front-end owners) and `后端:carol,dave;`
//! (back-end owners). Either marker may be missing.

const FE_MARKER: &str = "前端:";
const BE_MARKER: &str = "后端:";

/// Owners parsed from a module description.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Owners {
    /// Front-end owners, `None` when the marker is absent.
    pub fe: Option<Vec<String>>,
    /// Back-end owners, `None` when the marker is absent.
    pub be: Option<Vec<String>>,
}

/// Parses both owner markers out of `description`.
#[must_use]
pub fn parse_owners(description: &str) -> Owners {
    Owners { fe: parse_fe(description), be: parse_be(description) }
}

fn parse_fe(description: &str) -> Option<Vec<String>> {
    let (_, rest) = description.split_once(FE_MARKER)?;
    let rest = rest.trim_start();
    let rest = rest.strip_prefix('[').unwrap_or(rest);
    let (list, _) = rest.split_once(']')?;
    Some(split_names(list))
}

fn parse_be(description: &str) -> Option<Vec<String>> {
    let (_, rest) = description.split_once(BE_MARKER)?;
    let (list, _) = rest.split_once(';')?;
    Some(split_names(list))
}

fn split_names(list: &str) -> Vec<String> {
    list.split([',', '，'])
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
