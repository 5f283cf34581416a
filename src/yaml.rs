//! YAML codec for the nested side, built on `serde_yaml`.
//!
//! Nested mappings are emitted with a two-space indent. Parsing yields a
//! `serde_yaml::Value` that [`flatten`](crate::flatten::flatten) walks
//! directly, so numbers, booleans and nulls keep their YAML meaning until
//! they are turned into text.
//!
//! Parsed documents are resolved before they are returned: merge keys
//! (`<<: *anchor`) are applied and local tags (`!Ref name`) are dropped in
//! favor of the value they annotate.

use std::path::Path;

use serde_yaml::Value;

use crate::error::PropymlError;
use crate::tree::Tree;

/// Parse YAML text. `path` is only used for error reporting.
pub fn from_str(text: &str, path: &Path) -> Result<Value, PropymlError> {
    let parse_error = |e: serde_yaml::Error| PropymlError::ParseError {
        path: path.to_path_buf(),
        source: e,
    };
    let mut value: Value = serde_yaml::from_str(text).map_err(parse_error)?;
    strip_tags(&mut value);
    value.apply_merge().map_err(parse_error)?;
    Ok(value)
}

fn strip_tags(value: &mut Value) {
    match value {
        Value::Tagged(tagged) => {
            let inner = std::mem::replace(&mut tagged.value, Value::Null);
            *value = inner;
            strip_tags(value);
        }
        Value::Mapping(mapping) => mapping.values_mut().for_each(strip_tags),
        Value::Sequence(items) => items.iter_mut().for_each(strip_tags),
        _ => {}
    }
}

/// Read and parse a YAML file.
pub fn read(path: &Path) -> Result<Value, PropymlError> {
    let text = std::fs::read_to_string(path).map_err(|e| PropymlError::IoError {
        action: "read",
        path: path.to_path_buf(),
        source: e,
    })?;
    from_str(&text, path)
}

/// Serialize a tree as a YAML document.
pub fn to_string(tree: &Tree) -> Result<String, PropymlError> {
    Ok(serde_yaml::to_string(tree)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::test::store;
    use crate::nest;

    fn render(pairs: &[(&str, &str)]) -> String {
        to_string(&nest::build(&store(pairs)).unwrap()).unwrap()
    }

    #[test]
    fn nested_mappings_use_two_space_indent() {
        let out = render(&[("db.host", "localhost"), ("app.name", "demo")]);
        assert_eq!(out, "app:\n  name: demo\ndb:\n  host: localhost\n");
    }

    #[test]
    fn numeric_looking_values_stay_strings() {
        let out = render(&[("db.port", "5432"), ("debug", "true")]);
        let value = from_str(&out, Path::new("out.yml")).unwrap();
        assert_eq!(value["db"]["port"], Value::String("5432".into()));
        assert_eq!(value["debug"], Value::String("true".into()));
    }

    #[test]
    fn deep_nesting_indents_per_level() {
        let out = render(&[("a.b.c", "x")]);
        assert_eq!(out, "a:\n  b:\n    c: x\n");
    }

    #[test]
    fn parse_error_carries_path() {
        let err = from_str("key: [unclosed\n", Path::new("bad.yml")).unwrap_err();
        match err {
            PropymlError::ParseError { path, .. } => assert_eq!(path, Path::new("bad.yml")),
            other => panic!("Expected ParseError, got {other:?}"),
        }
    }

    fn parse(text: &str) -> Value {
        from_str(text, Path::new("in.yml")).unwrap()
    }

    #[test]
    fn merge_keys_are_applied() {
        let value = parse("base: &b\n  host: h\n  port: 1\nprod:\n  <<: *b\n  port: 2\n");
        assert_eq!(value["prod"]["host"], Value::String("h".into()));
        assert_eq!(value["prod"]["port"].as_u64(), Some(2));
        assert!(value["prod"].get("<<").is_none());
    }

    #[test]
    fn invalid_merge_is_parse_error() {
        let err = from_str("a:\n  <<: 5\n", Path::new("merge.yml")).unwrap_err();
        assert!(matches!(err, PropymlError::ParseError { ref path, .. } if path == Path::new("merge.yml")));
    }

    #[test]
    fn tags_are_dropped() {
        let value = parse("bucket: !Ref MyBucket\nnested: !Env\n  name: x\n");
        assert_eq!(value["bucket"], Value::String("MyBucket".into()));
        assert_eq!(value["nested"]["name"], Value::String("x".into()));
    }

    #[test]
    fn read_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("app.yml");
        std::fs::write(&path, "server:\n  port: 8080\n").unwrap();
        let value = read(&path).unwrap();
        assert_eq!(value["server"]["port"].as_u64(), Some(8080));
    }
}
