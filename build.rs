use std::fs;

/// Sections `Config` reads from the bundled defaults.
const SECTIONS: &[&str] = &["page", "font", "lists", "meta"];

fn main() {
    let config_path = "src/default_config.toml";
    println!("cargo:rerun-if-changed={}", config_path);

    let content = fs::read_to_string(config_path).expect("Failed to read default_config.toml");

    let table = match content.parse::<toml::Table>() {
        Ok(table) => table,
        Err(e) => panic!("Invalid default_config.toml: {}", e),
    };

    for section in SECTIONS {
        if !table.get(*section).is_some_and(toml::Value::is_table) {
            panic!("default_config.toml is missing the [{}] table", section);
        }
    }

    let keep_together = table
        .get("lists")
        .and_then(|lists| lists.get("keep_together"));
    if !keep_together.is_some_and(|value| value.as_integer().is_some_and(|n| n >= 0)) {
        panic!("default_config.toml: lists.keep_together must be a non-negative integer");
    }
}
