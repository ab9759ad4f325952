use serde::Deserialize;
use std::sync::OnceLock;

/// Entry in the region catalog mirrored from the HeadHunter areas API.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaNode {
    pub id: String,
    pub parent_id: Option<String>,
    pub name: String,
    #[serde(default)]
    pub areas: Vec<AreaNode>,
}

static AREA_TREE_JSON: &str = include_str!("areas.json");

fn directory() -> &'static AreaNode {
    static DIRECTORY: OnceLock<AreaNode> = OnceLock::new();
    DIRECTORY.get_or_init(|| {
        serde_json::from_str(AREA_TREE_JSON).expect("embedded area directory parses")
    })
}

/// Match a location name against the immediate children of the directory root.
///
/// Names in the catalog are Cyrillic, so the comparison goes through full
/// Unicode lowercasing. Only direct children are scanned; the first match
/// wins and a miss means the caller skips the HeadHunter side.
pub fn resolve_area(location: &str) -> Option<&'static str> {
    let wanted = location.to_lowercase();
    directory()
        .areas
        .iter()
        .find(|area| area.name.to_lowercase() == wanted)
        .map(|area| area.id.as_str())
}
