// Inyecta la configuración del cliente (.env) como variables de compilación,
// que `config.rs` lee con option_env!.

use std::env;
use std::fs;
use std::path::Path;

/// Claves que entiende `AppConfig::from_env`
const CONFIG_KEYS: [&str; 8] = [
    "CONTRACT_ADDRESS",
    "ENVIRONMENT",
    "ENABLE_LOGGING",
    "LOG_LEVEL",
    "REFRESH_INTERVAL_MS",
    "RECEIPT_POLL_INTERVAL_MS",
    "RECEIPT_POLL_ATTEMPTS",
    "MOUNT_ELEMENT_ID",
];

/// Pares KEY=VALUE del fichero; comillas opcionales, `#` para comentarios
fn parse_dotenv(contents: &str) -> Vec<(String, String)> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| line.split_once('='))
        .map(|(key, value)| {
            (
                key.trim().to_string(),
                value.trim().trim_matches('"').to_string(),
            )
        })
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env");
    for key in CONFIG_KEYS {
        println!("cargo:rerun-if-env-changed={}", key);
    }

    let dotenv = Path::new(".env");
    let Ok(contents) = fs::read_to_string(dotenv) else {
        println!(
            "cargo:warning=.env not found: the ballot client will target the zero contract address. \
             Copy .env.example to .env and set CONTRACT_ADDRESS."
        );
        return;
    };

    for (key, value) in parse_dotenv(&contents) {
        if !CONFIG_KEYS.contains(&key.as_str()) {
            println!("cargo:warning=.env: unknown key {} ignored", key);
            continue;
        }
        // Una variable ya exportada en el entorno gana a .env
        if env::var(&key).is_err() {
            println!("cargo:rustc-env={}={}", key, value);
        }
    }
}
