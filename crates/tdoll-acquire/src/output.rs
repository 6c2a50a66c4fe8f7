use anyhow::Result;
use serde::Serialize;
use std::fs;
use tdoll_model::TDoll;

/// Render the catalog as output JSON: an array of objects with 4-space
/// indentation and no trailing newline.
pub fn render_catalog(dolls: &[TDoll]) -> Result<String> {
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    dolls.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the catalog JSON, overwriting `path`.
pub fn write_catalog(dolls: &[TDoll], path: &str) -> Result<()> {
    let json = render_catalog(dolls)?;
    fs::write(path, &json)?;
    tracing::info!(path = %path, dolls = dolls.len(), "Wrote catalog JSON");
    Ok(())
}

/// Save the raw fetched HTML so the page can be re-examined without
/// re-fetching.
pub fn cache_html(path: &str, html: &str) -> Result<()> {
    fs::write(path, html)?;
    tracing::info!(path = %path, bytes = html.len(), "Cached raw HTML");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<TDoll> {
        vec![
            TDoll {
                id: "119".into(),
                name: "AR-15".into(),
                kind: "AR".into(),
                rarity: "3".into(),
            },
            TDoll {
                id: String::new(),
                name: "UMP45".into(),
                kind: "SMG".into(),
                rarity: "5".into(),
            },
        ]
    }

    #[test]
    fn test_render_four_space_indent() {
        let json = render_catalog(&sample()).unwrap();
        let expected = r#"[
    {
        "id": "119",
        "name": "AR-15",
        "type": "AR",
        "rarity": "3"
    },
    {
        "id": "",
        "name": "UMP45",
        "type": "SMG",
        "rarity": "5"
    }
]"#;
        assert_eq!(json, expected);
    }

    #[test]
    fn test_render_no_trailing_newline() {
        let json = render_catalog(&sample()).unwrap();
        assert!(json.ends_with(']'));
    }

    #[test]
    fn test_render_empty_catalog() {
        assert_eq!(render_catalog(&[]).unwrap(), "[]");
    }

    #[test]
    fn test_render_round_trips() {
        let json = render_catalog(&sample()).unwrap();
        let parsed: Vec<TDoll> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }
}
