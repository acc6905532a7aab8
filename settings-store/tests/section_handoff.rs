use std::sync::Arc;

use settings_store::{Result, Section, Settings};

/// A subsystem that only ever sees its own section.
struct DatabaseSettings {
    host: String,
    port: i64,
    replicas: Vec<String>,
    read_only: bool,
}

impl DatabaseSettings {
    fn from_section(section: &Section) -> Result<Self> {
        Ok(Self {
            host: section.get("host")?,
            port: section.get_int("port")?,
            replicas: section.get_string_list("replicas")?,
            read_only: section.get_bool("read_only")?,
        })
    }
}

#[test]
fn subsystem_reads_its_section_directly() {
    let settings: Settings = "\
name = app

[ database ]
host = db.internal
port = 5432
replicas = r1, r2
read_only = 0
"
    .parse()
    .unwrap();

    let section: Arc<Section> = settings.get_section("database").unwrap();
    let db = DatabaseSettings::from_section(&section).unwrap();
    assert_eq!(db.host, "db.internal");
    assert_eq!(db.port, 5432);
    assert_eq!(db.replicas, ["r1", "r2"]);
    assert!(!db.read_only);
}

#[test]
fn subsystem_sees_missing_key_error() {
    let settings = Settings::new();
    let section = settings.add_section("database").unwrap();
    section.set("host", "localhost");

    let err = DatabaseSettings::from_section(&section)
        .err()
        .expect("port is missing");
    assert_eq!(err.to_string(), "key `port` not found in this settings section");
}
