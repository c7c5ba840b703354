//! Basic usage of the comparison engine

use prepost_core::{compare_lines, CompareConfig, CompareEngine, TextReport};

const LINE: &str = "----------------------------------------";

fn main() {
    env_logger::init();

    println!("=== Export Dump Comparison Examples ===\n");

    // Example 1: Keyed table rows
    example_table_rows();

    // Example 2: Payroll schema groups
    example_schema_groups();

    // Example 3: Keycut resolution from TOML
    example_config_resolution();

    // Example 4: Noise that is not a change
    example_noise_tolerance();
}

fn example_table_rows() {
    println!("Example 1: Keyed Table Rows");
    println!("{}", LINE);

    let before = vec![
        "A001 FOO   1,00".to_string(),
        "B002 BAR   5,50".to_string(),
    ];
    let after = vec![
        "A001 FOO   2,00".to_string(),
        "B002 BAR   5,50".to_string(),
        "C003 BAZ   9,99".to_string(),
    ];

    let config = CompareConfig::new().with_keycut("t512w", 4);
    match compare_lines("t512w", &before, &after, Some(config)) {
        Some(result) => {
            println!("{}", result);
            print!(
                "{}",
                TextReport::new().with_color(false).render_result(&result)
            );
        }
        None => println!("No changes found"),
    }
    println!();
}

fn example_schema_groups() {
    println!("Example 2: Payroll Schema Groups");
    println!("{}", LINE);

    let before = vec![
        "ZX01 001 D AMT=100".to_string(),
        "ZX01 002 D OUT".to_string(),
    ];
    let after = vec![
        "ZX01 001 D AMT=200".to_string(),
        "ZX01 002 D OUT".to_string(),
        "ZY10 010 D NEW".to_string(),
    ];

    let engine = CompareEngine::new(CompareConfig::new().with_schema_keycut(9));
    match engine.compare_record("payroll schema", &before, &after) {
        Some(result) => {
            println!("{}", result);
            print!(
                "{}",
                TextReport::new().with_color(false).render_result(&result)
            );
        }
        None => println!("No changes found"),
    }
    println!();
}

fn example_config_resolution() {
    println!("Example 3: Keycut Resolution");
    println!("{}", LINE);

    let toml = r#"
        schema_keycut = 9

        [keycuts]
        t512w = 4

        [[generic_rules]]
        pattern = "t5"
        keycut = 6
    "#;
    let config = CompareConfig::from_toml_str(toml).expect("valid config");

    for record in ["t512w", "t510", "t799", "payroll schema"] {
        let is_schema = config.is_schema_record(record);
        println!(
            "  {:<16} schema: {:<5} keycut: {}",
            record,
            is_schema,
            config.resolve_keycut(record, is_schema)
        );
    }
    println!();
}

fn example_noise_tolerance() {
    println!("Example 4: Reordering and Duplication Are Not Changes");
    println!("{}", LINE);

    let before = vec![
        "B002 BAR\t5,50".to_string(),
        "A001  FOO  1,00".to_string(),
        "B002 BAR   5,50".to_string(),
    ];
    let after = vec![
        "A001 FOO 1,00".to_string(),
        "B002 BAR 5,50".to_string(),
    ];

    match compare_lines("t512w", &before, &after, None) {
        Some(result) => println!("{}", result),
        None => println!("No changes found"),
    }
    println!();
}
