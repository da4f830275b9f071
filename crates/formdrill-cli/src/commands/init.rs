//! The `formdrill init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create formdrill.toml
    if std::path::Path::new("formdrill.toml").exists() {
        println!("formdrill.toml already exists, skipping.");
    } else {
        std::fs::write("formdrill.toml", SAMPLE_CONFIG)?;
        println!("Created formdrill.toml");
    }

    // Create sample formula file
    let formulas_path = std::path::Path::new("formulas.txt");
    if formulas_path.exists() {
        println!("formulas.txt already exists, skipping.");
    } else {
        std::fs::write(formulas_path, SAMPLE_FORMULAS)?;
        println!("Created formulas.txt");
    }

    println!("\nNext steps:");
    println!("  1. Add your own formulas to formulas.txt (topic|name|answer)");
    println!("  2. Run: formdrill topics");
    println!("  3. Run: formdrill drill");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# formdrill configuration

formulas = "formulas.txt"
history_capacity = 1000
hardest_limit = 3
# stats_window = 20
report_format = "text"
"#;

const SAMPLE_FORMULAS: &str = "# topic|name|answer
Algebra|Quadratic formula|x = (-b ± √(b² - 4ac)) / 2a
Algebra|Square of a sum|(a + b)² = a² + 2ab + b²
Algebra|Difference of squares|a² - b² = (a - b)(a + b)
Geometry|Area of a circle|S = πr²
Geometry|Circumference|C = 2πr
Geometry|Pythagorean theorem|a² + b² = c²
Trigonometry|Pythagorean identity|sin²x + cos²x = 1
Trigonometry|Double angle sine|sin 2x = 2 sin x cos x
";
