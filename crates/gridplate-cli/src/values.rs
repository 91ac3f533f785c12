//! JSON value files

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use gridplate::{CellValue, Substitutions};
use serde::Deserialize;
use serde_json::Value;

/// Substitution groups: a list of rows, or named rows (applied in key order)
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GroupFile {
    Rows(Vec<Vec<Value>>),
    Named(BTreeMap<String, Vec<Value>>),
}

/// Load substitution groups from a JSON file
pub fn load_groups(path: &Path) -> Result<Substitutions> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    parse_groups(&text).with_context(|| format!("Invalid value file '{}'", path.display()))
}

/// Load `name → value` pairs from a JSON object
pub fn load_vars(path: &Path) -> Result<Vec<(String, String)>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read '{}'", path.display()))?;
    parse_vars(&text).with_context(|| format!("Invalid variable file '{}'", path.display()))
}

pub fn parse_groups(text: &str) -> Result<Substitutions> {
    let file: GroupFile =
        serde_json::from_str(text).context("expected an array of arrays or an object of arrays")?;

    let groups: Vec<(String, Vec<Value>)> = match file {
        GroupFile::Rows(rows) => rows
            .into_iter()
            .enumerate()
            .map(|(i, row)| (i.to_string(), row))
            .collect(),
        GroupFile::Named(named) => named.into_iter().collect(),
    };

    let mut subs = Substitutions::new();
    for (key, values) in groups {
        let values = values
            .iter()
            .map(cell_value)
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("in group '{key}'"))?;
        subs.push(key, values);
    }
    Ok(subs)
}

pub fn parse_vars(text: &str) -> Result<Vec<(String, String)>> {
    let vars: BTreeMap<String, Value> =
        serde_json::from_str(text).context("expected an object of name/value pairs")?;

    vars.into_iter()
        .map(|(name, value)| {
            let text = match value {
                Value::Null => String::new(),
                Value::String(s) => s,
                Value::Bool(_) | Value::Number(_) => value.to_string(),
                Value::Array(_) | Value::Object(_) => {
                    bail!("variable '{name}' must be a string, number or boolean")
                }
            };
            Ok((name, text))
        })
        .collect()
}

/// Split a `key=value` argument
pub fn parse_assignment(arg: &str) -> Result<(String, String)> {
    match arg.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => bail!("expected key=value, got '{arg}'"),
    }
}

fn cell_value(value: &Value) -> Result<CellValue> {
    Ok(match value {
        Value::Null => CellValue::Blank,
        Value::Bool(b) => CellValue::Boolean(*b),
        Value::Number(n) => match n.as_f64() {
            Some(n) => CellValue::Number(n),
            None => bail!("number {n} is out of range"),
        },
        Value::String(s) => CellValue::string(s.as_str()),
        Value::Array(_) | Value::Object(_) => bail!("nested values are not supported"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_row_list() {
        let subs = parse_groups(r#"[["Tea", 2, true], ["Jam", null]]"#).unwrap();

        assert_eq!(subs.len(), 2);
        assert_eq!(
            subs.get("0").unwrap(),
            &[CellValue::from("Tea"), CellValue::Number(2.0), CellValue::Boolean(true)][..]
        );
        assert_eq!(subs.get("1").unwrap()[1], CellValue::Blank);
    }

    #[test]
    fn test_named_groups_are_sorted() {
        let subs = parse_groups(r#"{"b": ["second"], "a": ["first"]}"#).unwrap();

        let keys: Vec<_> = subs.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_nested_values_are_rejected() {
        assert!(parse_groups(r#"[[["x"]]]"#).is_err());
        assert!(parse_groups(r#""text""#).is_err());
    }

    #[test]
    fn test_parse_vars() {
        let vars = parse_vars(r#"{"n": 7, "name": "Ana", "ok": false, "none": null}"#).unwrap();

        assert_eq!(
            vars,
            vec![
                ("n".to_string(), "7".to_string()),
                ("name".to_string(), "Ana".to_string()),
                ("none".to_string(), String::new()),
                ("ok".to_string(), "false".to_string()),
            ]
        );
        assert!(parse_vars(r#"{"x": [1]}"#).is_err());
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let groups = dir.path().join("groups.json");
        let vars = dir.path().join("vars.json");
        std::fs::write(&groups, r#"[["a"], ["b"]]"#).unwrap();
        std::fs::write(&vars, r#"{"customer": "ACME"}"#).unwrap();

        assert_eq!(load_groups(&groups).unwrap().len(), 2);
        assert_eq!(
            load_vars(&vars).unwrap(),
            vec![("customer".to_string(), "ACME".to_string())]
        );

        let err = load_groups(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            parse_assignment("total=1=2").unwrap(),
            ("total".to_string(), "1=2".to_string())
        );
        assert!(parse_assignment("=x").is_err());
        assert!(parse_assignment("novalue").is_err());
    }
}
