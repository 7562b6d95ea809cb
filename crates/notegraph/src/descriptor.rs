//! Loading diagram descriptors from JSON.
//!
//! The analysis service returns diagrams in one of three shapes, all of which
//! are accepted:
//!
//! ```text
//! { "title": ..., "type": ..., "nodes": [...] }      a single descriptor
//! [ { ... }, { ... } ]                                a list of descriptors
//! { "graphDiagrams": [ { ... }, { ... } ] }          the analysis payload
//! ```
//!
//! Loading only checks the shape of the data. Dangling edges and repeated node
//! ids are reported as warnings and left for layout and rendering to tolerate.

use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

use notegraph_core::semantic::Diagram;

const PAYLOAD_KEY: &str = "graphDiagrams";

#[derive(Deserialize)]
struct Payload {
    #[serde(rename = "graphDiagrams")]
    graph_diagrams: Vec<Diagram>,
}

/// Parse every diagram descriptor contained in `source`.
///
/// # Errors
///
/// Returns the JSON decoder error, which carries the line and column of the
/// first problem, when `source` is not valid JSON or does not match any of the
/// accepted shapes.
pub fn parse_diagrams(source: &str) -> Result<Vec<Diagram>, serde_json::Error> {
    // The untyped pass only picks the shape; the typed pass below keeps
    // positions in its errors.
    let value: Value = serde_json::from_str(source)?;

    let diagrams = match &value {
        Value::Array(_) => serde_json::from_str::<Vec<Diagram>>(source)?,
        Value::Object(map) if map.contains_key(PAYLOAD_KEY) => {
            serde_json::from_str::<Payload>(source)?.graph_diagrams
        }
        _ => vec![serde_json::from_str::<Diagram>(source)?],
    };

    debug!(diagrams_count = diagrams.len(); "Descriptors parsed");
    for diagram in &diagrams {
        report_irregularities(diagram);
    }

    Ok(diagrams)
}

/// Log descriptor problems that rendering silently works around.
fn report_irregularities(diagram: &Diagram) {
    for edge in diagram.dangling_edges() {
        warn!(
            title = diagram.title(),
            source:% = edge.source(),
            target:% = edge.target();
            "Edge references a missing node and will not be drawn"
        );
    }

    for id in diagram.duplicate_node_ids() {
        warn!(
            title = diagram.title(),
            id:% = id;
            "Node id is used more than once, the last occurrence decides its position"
        );
    }
}

#[cfg(test)]
mod tests {
    use notegraph_core::semantic::DiagramKind;

    use super::*;

    const SINGLE: &str = r#"{
        "title": "Stack",
        "type": "linked-list",
        "nodes": [{"id": "top", "label": "Top"}, {"id": "bottom", "label": "Bottom"}],
        "edges": [{"from": "top", "to": "bottom"}]
    }"#;

    #[test]
    fn test_single_descriptor() {
        let diagrams = parse_diagrams(SINGLE).unwrap();
        assert_eq!(diagrams.len(), 1);
        assert_eq!(diagrams[0].title(), "Stack");
        assert_eq!(diagrams[0].kind(), DiagramKind::LinkedList);
    }

    #[test]
    fn test_descriptor_list() {
        let source = format!("[{SINGLE}, {SINGLE}]");
        assert_eq!(parse_diagrams(&source).unwrap().len(), 2);
        assert!(parse_diagrams("[]").unwrap().is_empty());
    }

    #[test]
    fn test_analysis_payload() {
        let source = format!(r#"{{"summary": "ignored", "graphDiagrams": [{SINGLE}]}}"#);
        let diagrams = parse_diagrams(&source).unwrap();
        assert_eq!(diagrams.len(), 1);
        assert_eq!(diagrams[0].edges().len(), 1);
    }

    #[test]
    fn test_dangling_edges_are_accepted() {
        let source = r#"{
            "title": "Broken",
            "type": "directed",
            "nodes": [{"id": "a", "label": "A"}],
            "edges": [{"from": "a", "to": "nowhere"}]
        }"#;
        let diagrams = parse_diagrams(source).unwrap();
        assert_eq!(diagrams[0].dangling_edges().count(), 1);
    }

    #[test]
    fn test_syntax_error_has_position() {
        let err = parse_diagrams("{\n  \"title\": \"x\",\n  oops\n}").unwrap_err();
        assert!(err.is_syntax());
        assert_eq!(err.line(), 3);
    }

    #[test]
    fn test_missing_field_is_a_data_error() {
        let err = parse_diagrams(r#"{"title": "No nodes", "type": "graph"}"#).unwrap_err();
        assert!(err.is_data());
        assert!(err.to_string().contains("nodes"), "{err}");
    }

    #[test]
    fn test_scalar_is_rejected() {
        assert!(parse_diagrams("42").is_err());
    }
}
