//! `codeloom doctor` — Show configuration and wiring diagnostics.

use codeloom_config::AppConfig;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("  CodeLoom doctor");
    println!();

    let config_path = AppConfig::config_dir().join("config.toml");
    println!(
        "  Config file:   {} ({})",
        config_path.display(),
        if config_path.exists() {
            "present"
        } else {
            "absent, using defaults"
        }
    );

    match AppConfig::load() {
        Ok(config) => {
            println!("  Backend:       {}", config.backend);
            println!("  Classifier:    {}", config.classifier);
            println!("  Model timeout: {}s", config.model_timeout_secs);
            println!("  Preview chars: {}", config.preview_chars);

            match super::build_session(&config) {
                Ok(_) => println!("  Wiring:        ok"),
                Err(e) => println!("  Wiring:        FAILED ({e})"),
            }
        }
        Err(e) => println!("  Config:        FAILED ({e})"),
    }

    println!();
    Ok(())
}
