//! JSON renderer: structured output for tooling integration.
//!
//! Serializes the unit model directly with serde.

use crate::error::Result;
use crate::model::*;
use crate::render::{ordered, DocOptions, Renderer};
use serde::Serialize;

pub struct JsonRenderer;

#[derive(Serialize)]
struct HeaderRow<'a> {
    module: &'a str,
    description: &'a str,
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    header_text: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    modules: Option<Vec<HeaderRow<'a>>>,
    units: Vec<&'a Unit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    footer_text: Option<&'a str>,
}

fn non_empty(text: &str) -> Option<&str> {
    (!text.is_empty()).then_some(text)
}

fn header_rows<'a>(units: &[&'a Unit]) -> Vec<HeaderRow<'a>> {
    units
        .iter()
        .map(|u| HeaderRow {
            module: &u.name,
            description: &u.comment.text,
        })
        .collect()
}

impl Renderer for JsonRenderer {
    fn write_header_table(&self, units: &[&Unit]) -> Result<String> {
        Ok(serde_json::to_string_pretty(&header_rows(units))?)
    }

    fn write_unit(&self, unit: &Unit) -> Result<String> {
        Ok(serde_json::to_string_pretty(unit)?)
    }

    fn write_units(&self, units: &[&Unit]) -> Result<String> {
        Ok(serde_json::to_string_pretty(units)?)
    }

    fn write_text(&self, text: &str) -> Result<String> {
        Ok(serde_json::to_string(text)?)
    }

    fn write_document(&self, units: &[Unit], options: &DocOptions) -> Result<String> {
        let units = ordered(units, &options.module_list);
        let doc = JsonDocument {
            header_text: non_empty(&options.header_text),
            modules: options.write_header_table.then(|| header_rows(&units)),
            units,
            footer_text: non_empty(&options.footer_text),
        };
        let mut out = serde_json::to_string_pretty(&doc)?;
        out.push('\n');
        Ok(out)
    }

    fn file_extension(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn units() -> Vec<Unit> {
        vec![
            Unit {
                name: "a".into(),
                ..Default::default()
            },
            Unit {
                name: "b".into(),
                comment: Comment {
                    text: "Module b.".into(),
                    annotations: vec![],
                },
                declarations: vec![Declaration::Variable(Variable {
                    name: "x".into(),
                    ..Default::default()
                })],
                ..Default::default()
            },
        ]
    }

    #[test]
    fn document_follows_module_list() {
        let options = DocOptions {
            module_list: vec!["b".into()],
            ..Default::default()
        };
        let out = JsonRenderer.write_document(&units(), &options).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["units"][0]["name"], "b");
        assert_eq!(v["units"][1]["name"], "a");
        assert_eq!(v["units"][0]["declarations"][0]["kind"], "variable");
        assert!(v.get("modules").is_none());
        assert!(v.get("header_text").is_none());
    }

    #[test]
    fn header_table_and_texts() {
        let options = DocOptions {
            write_header_table: true,
            header_text: "Top".into(),
            footer_text: "Bottom".into(),
            module_list: vec![],
        };
        let out = JsonRenderer.write_document(&units(), &options).unwrap();
        let v: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(v["header_text"], "Top");
        assert_eq!(v["footer_text"], "Bottom");
        assert_eq!(v["modules"][1]["module"], "b");
        assert_eq!(v["modules"][1]["description"], "Module b.");
    }
}
