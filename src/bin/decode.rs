//! Standalone decoder binary for axm
//!
//! Minimal binary that turns a saved cipher file back into plain text
//! on stdout. Designed to be handed to recipients who only ever decode.
//!
//! Usage:
//!   decode <cipher-file> [--key <key>] [--profile <name>]
//!
//! Key lookup:
//!   1. --key <key> (if given)
//!   2. --profile <name> -> ~/.config/axm/keys.yaml
//!   3. $AXM_KEY

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process;

/// Key store structure (subset of the full store for minimal deps)
#[derive(serde::Deserialize)]
struct KeyStore {
    keys: HashMap<String, String>,
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: decode <cipher-file> [--key <key>] [--profile <name>]");
        process::exit(1);
    }

    let file_path = PathBuf::from(&args[1]);

    // Parse --key / --profile argument
    let key = if args.len() >= 4 && args[2] == "--key" {
        args[3].clone()
    } else if args.len() >= 4 && args[2] == "--profile" {
        stored_key(&args[3])?
    } else {
        env_key()?
    };

    // Read cipher file
    let cipher = fs::read_to_string(&file_path)
        .map_err(|e| format!("Failed to read cipher file {:?}: {}", file_path, e))?;

    // Decode (file content carries trailing newlines that are not cipher)
    let text = axm::decode(cipher.trim(), &key)
        .map_err(|e| format!("Decryption failed: invalid cipher text or key ({})", e))?;

    // Output to stdout
    print!("{}", text);

    Ok(())
}

/// Look up a stored key by profile name
/// Reads the same store the main binary writes: ~/.config/axm/keys.yaml
fn stored_key(name: &str) -> Result<String, String> {
    let config_dir = dirs::config_dir().ok_or("Could not determine config directory")?;
    let store_path = config_dir.join("axm").join("keys.yaml");

    let content = fs::read_to_string(&store_path)
        .map_err(|e| format!("Failed to read key store {:?}: {}", store_path, e))?;

    let store: KeyStore =
        serde_yaml::from_str(&content).map_err(|e| format!("Failed to parse key store: {}", e))?;

    store
        .keys
        .get(name)
        .cloned()
        .ok_or_else(|| format!("No stored key named '{}' in {:?}", name, store_path))
}

/// Resolve the key from the environment
/// Used when neither --key nor --profile is given
fn env_key() -> Result<String, String> {
    match env::var("AXM_KEY") {
        Ok(key) if !key.is_empty() => Ok(key),
        _ => Err("No key given. Pass --key <key>, --profile <name>, or set AXM_KEY.".to_string()),
    }
}
