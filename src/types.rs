use serde::{Deserialize, Serialize};

/// A path through the contact graph: node names starting at the query source,
/// each consecutive pair joined by an edge.
pub type ContactPath = Vec<String>;

/// Which set of paths `get_paths` should return.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SearchType {
    /// Every path produced by the shared-visited-set expansion.
    #[default]
    #[serde(rename = "allPaths")]
    AllPaths,
    /// Only the paths reaching the destination in the fewest rounds.
    #[serde(rename = "shortestPath")]
    ShortestPath,
}

#[allow(clippy::should_implement_trait)]
impl SearchType {
    /// Returns the wire name of this search type.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::AllPaths => "allPaths",
            SearchType::ShortestPath => "shortestPath",
        }
    }

    /// Parses a wire name, returning `None` for unrecognized values.
    pub fn from_str(s: &str) -> Option<SearchType> {
        match s {
            "allPaths" => Some(SearchType::AllPaths),
            "shortestPath" => Some(SearchType::ShortestPath),
            _ => None,
        }
    }

    /// Resolves an optional wire name, falling back to `AllPaths` when the
    /// value is absent or unrecognized.
    pub fn resolve(s: Option<&str>) -> SearchType {
        s.and_then(SearchType::from_str).unwrap_or_default()
    }
}

/// Parameters for a `get_paths` query.
///
/// `source` and `destination` are optional because callers at the
/// presentation boundary may omit them or send non-string values; the engine
/// reports such requests instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConditions {
    pub source: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "searchType", default)]
    pub search_type: Option<String>,
}

impl SearchConditions {
    /// Builds conditions for a query between two named nodes.
    pub fn new(source: &str, destination: &str, search_type: SearchType) -> Self {
        Self {
            source: Some(source.to_string()),
            destination: Some(destination.to_string()),
            search_type: Some(search_type.as_str().to_string()),
        }
    }

    /// Returns the effective search type, defaulting to `AllPaths`.
    pub fn search_type(&self) -> SearchType {
        SearchType::resolve(self.search_type.as_deref())
    }
}

/// Renders a path as `A->B->C`.
pub fn render_path(path: &[String]) -> String {
    path.join("->")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_type_roundtrip() {
        for kind in [SearchType::AllPaths, SearchType::ShortestPath] {
            assert_eq!(SearchType::from_str(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unrecognized_search_type_defaults_to_all_paths() {
        assert_eq!(SearchType::resolve(None), SearchType::AllPaths);
        assert_eq!(SearchType::resolve(Some("fastest")), SearchType::AllPaths);
        assert_eq!(SearchType::resolve(Some("ShortestPath")), SearchType::AllPaths);
        assert_eq!(
            SearchType::resolve(Some("shortestPath")),
            SearchType::ShortestPath
        );
    }

    #[test]
    fn conditions_deserialize_with_wire_names() {
        let conditions: SearchConditions = serde_json::from_str(
            r#"{"source":"A","destination":"M","searchType":"shortestPath"}"#,
        )
        .unwrap();
        assert_eq!(conditions.source.as_deref(), Some("A"));
        assert_eq!(conditions.search_type(), SearchType::ShortestPath);

        let conditions: SearchConditions =
            serde_json::from_str(r#"{"source":"A"}"#).unwrap();
        assert!(conditions.destination.is_none());
        assert_eq!(conditions.search_type(), SearchType::AllPaths);
    }

    #[test]
    fn render_joins_with_arrows() {
        let path = vec!["A".to_string(), "B".to_string(), "M".to_string()];
        assert_eq!(render_path(&path), "A->B->M");
        assert_eq!(render_path(&["A".to_string()]), "A");
    }
}
