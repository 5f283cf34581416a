#[cfg(test)]
pub mod test {
    use crate::store::FlatStore;

    pub const SAMPLE_PROPERTIES: &str = "\
# Sample application settings
server.port=8080
server.tls.enabled=true

db.host = localhost
app.name=demo
";

    pub const SAMPLE_YAML: &str = "\
server:
  port: 8080
  tls:
    enabled: true
db:
  host: localhost
  port: 5432
app:
  name: demo
";

    pub fn store(pairs: &[(&str, &str)]) -> FlatStore {
        pairs.iter().copied().collect()
    }

    pub fn yaml(text: &str) -> serde_yaml::Value {
        crate::yaml::from_str(text, std::path::Path::new("fixture.yml")).unwrap()
    }

    #[test]
    fn sample_properties_parse() {
        let s = crate::properties::parse(SAMPLE_PROPERTIES);
        assert_eq!(s.len(), 4);
        assert_eq!(s.get("db.host"), Some("localhost"));
    }

    #[test]
    fn sample_yaml_is_a_mapping() {
        assert!(yaml(SAMPLE_YAML).is_mapping());
    }
}
