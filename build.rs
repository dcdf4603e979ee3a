use std::path::Path;

const STRATEGIES: [&str; 4] = ["merger", "parser", "patcher", "passthrough"];

fn main() {
    let table_path = Path::new("config/organism_strategies.json");
    validate_strategy_file(table_path);
    set_build_dependencies();
}

fn validate_strategy_file(table_path: &Path) {
    // Ensure the strategy table exists at build time
    assert!(
        table_path.exists(),
        "\n\nSTRATEGY TABLE BUILD ERROR: File not found\n\
         Path: {}\n\
         Please create the strategy table before building.\n",
        table_path.display()
    );

    let contents = std::fs::read_to_string(table_path).unwrap_or_else(|e| {
        panic!(
            "\n\nSTRATEGY TABLE BUILD ERROR: Failed to read file\n\
             Path: {}\n\
             Error: {e}\n",
            table_path.display()
        );
    });

    let table: serde_json::Value = serde_json::from_str(&contents).unwrap_or_else(|e| {
        panic!(
            "\n\nSTRATEGY TABLE BUILD ERROR: Invalid JSON\n\
             Path: {}\n\
             Error: {e}\n\
             Hint: Check for missing commas, brackets, or invalid syntax.\n",
            table_path.display()
        );
    });

    validate_table_structure(&table);
}

fn validate_table_structure(table: &serde_json::Value) {
    assert!(
        table.is_object(),
        "\n\nSTRATEGY TABLE BUILD ERROR: Root must be a JSON object\n\
         Got: {table}\n"
    );

    let default = table
        .get("default")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_else(|| {
            panic!(
                "\n\nSTRATEGY TABLE BUILD ERROR: Missing 'default' field\n\
                 The table must name a default strategy.\n"
            );
        });
    validate_strategy_name(default, "default");

    let organisms = table
        .get("organisms")
        .and_then(serde_json::Value::as_object)
        .unwrap_or_else(|| {
            panic!(
                "\n\nSTRATEGY TABLE BUILD ERROR: 'organisms' must be an object\n\
                 Map each organism identifier to a strategy name.\n"
            );
        });

    for (organism, strategy) in organisms {
        let name = strategy.as_str().unwrap_or_else(|| {
            panic!(
                "\n\nSTRATEGY TABLE BUILD ERROR: Strategy for '{organism}' must be a string\n\
                 Got: {strategy}\n"
            );
        });
        validate_strategy_name(name, organism);
    }

    println!(
        "cargo:warning=Validated strategy table: {} organism overrides",
        organisms.len()
    );
}

fn validate_strategy_name(name: &str, context: &str) {
    assert!(
        STRATEGIES.contains(&name),
        "\n\nSTRATEGY TABLE BUILD ERROR: Unknown strategy '{name}' for '{context}'\n\
         Expected one of: {}\n",
        STRATEGIES.join(", ")
    );
}

fn set_build_dependencies() {
    // Tell cargo to rerun if the strategy table changes
    println!("cargo:rerun-if-changed=config/organism_strategies.json");

    // Tell cargo to rerun if build.rs changes
    println!("cargo:rerun-if-changed=build.rs");
}
