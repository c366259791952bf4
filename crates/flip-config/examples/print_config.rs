/// Example program to print the loaded configuration
///
/// Run with: cargo run -p flip-config --example print_config

fn main() {
    let config = flip_config::FlipConfig::load();

    println!("=== Flip Configuration ===\n");

    println!("Animation Settings:");
    println!("  Duration (ms): {}", config.animation.duration_ms);
    println!("  Ease: {}", config.animation.ease);
    println!();

    println!("Viewport Settings:");
    println!("  Width: {}", config.viewport.width);
    println!("  Height: {}", config.viewport.height);
    println!();

    match toml::to_string_pretty(&config) {
        Ok(toml_str) => {
            println!("=== Serialized Configuration ===");
            println!("{}", toml_str);
        }
        Err(e) => {
            eprintln!("Failed to serialize config: {}", e);
        }
    }
}
