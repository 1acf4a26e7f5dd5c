use anyhow::{Context, Result};
use axm::{decode, encode};
use clap::{Parser, Subcommand};
use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

/// axm - key-driven text obfuscation
///
/// Obfuscate text with a secret key, or reverse it with the same key.
#[derive(Parser)]
#[command(name = "axm")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Obfuscate text with a secret key
    Encrypt {
        /// Text to obfuscate (falls back to --file, then stdin)
        text: Option<String>,

        /// Secret key
        #[arg(long, short)]
        key: Option<String>,

        /// Stored key profile to use instead of --key
        #[arg(long)]
        profile: Option<String>,

        /// Read the text from a file
        #[arg(long, short)]
        file: Option<PathBuf>,

        /// Also save the cipher text to a file
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Reverse a cipher text with its secret key
    Decrypt {
        /// Cipher text to reverse (falls back to --file, then stdin)
        text: Option<String>,

        /// Secret key
        #[arg(long, short)]
        key: Option<String>,

        /// Stored key profile to use instead of --key
        #[arg(long)]
        profile: Option<String>,

        /// Read the cipher text from a file
        #[arg(long, short)]
        file: Option<PathBuf>,
    },

    /// Manage stored key profiles
    Key {
        /// Profile name to add or manage
        name: Option<String>,

        /// Key to store under the profile
        key: Option<String>,

        /// Generate a random key instead of passing one
        #[arg(long, default_value_t = false)]
        random: bool,

        /// Length of a generated key
        #[arg(long, default_value_t = 16)]
        length: usize,

        /// Remove the profile
        #[arg(long, default_value_t = false)]
        remove: bool,

        /// List all profiles (no args needed)
        #[arg(long, default_value_t = false)]
        list: bool,
    },

    /// Show version information
    Version,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct KeyStore {
    keys: HashMap<String, String>,
}

impl KeyStore {
    fn load() -> Result<Self> {
        let path = Self::store_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read key store from {:?}", path))?;
            serde_yaml::from_str(&content).context("Failed to parse key store")
        } else {
            Ok(Self::default())
        }
    }

    fn save(&self) -> Result<()> {
        let path = Self::store_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }
        let content = serde_yaml::to_string(self).context("Failed to serialize key store")?;
        fs::write(&path, content)
            .with_context(|| format!("Failed to write key store to {:?}", path))?;
        Ok(())
    }

    fn store_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(config_dir.join("axm").join("keys.yaml"))
    }
}

/// Short SHA-256 fingerprint, for listing keys without revealing them.
fn key_fingerprint(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())[..12].to_string()
}

/// Generate a random alphanumeric key.
fn random_key(length: usize) -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Resolve the secret key: --key, then --profile, then $AXM_KEY.
fn resolve_key(key: Option<String>, profile: Option<String>) -> Result<String> {
    if let Some(key) = key {
        if key.is_empty() {
            anyhow::bail!("Key cannot be empty");
        }
        return Ok(key);
    }

    if let Some(name) = profile {
        let store = KeyStore::load()?;
        return store
            .keys
            .get(&name)
            .cloned()
            .with_context(|| format!("No stored key named '{}'", name));
    }

    if let Ok(key) = env::var("AXM_KEY") {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    anyhow::bail!("Key cannot be empty (use --key, --profile, or set AXM_KEY)")
}

/// Resolve the input text: positional argument, then --file, then stdin.
fn resolve_text(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }

    if let Some(path) = file {
        return fs::read_to_string(&path)
            .with_context(|| format!("Failed to read input from {:?}", path));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read input from stdin")?;
    Ok(buffer)
}

fn handle_encrypt(
    text: Option<String>,
    key: Option<String>,
    profile: Option<String>,
    file: Option<PathBuf>,
    out: Option<PathBuf>,
) -> Result<()> {
    let text = resolve_text(text, file)?;
    if text.is_empty() {
        anyhow::bail!("Please enter some text to encrypt");
    }
    let key = resolve_key(key, profile)?;

    let cipher = encode(&text, &key);
    println!("{}", cipher);

    if let Some(out_path) = out {
        fs::write(&out_path, &cipher)
            .with_context(|| format!("Failed to write cipher text to {:?}", out_path))?;
        println!("✓ Cipher text saved: {:?}", out_path);
    }

    Ok(())
}

fn handle_decrypt(
    text: Option<String>,
    key: Option<String>,
    profile: Option<String>,
    file: Option<PathBuf>,
) -> Result<()> {
    let raw = resolve_text(text, file)?;
    // File and stdin input carry trailing newlines that are not cipher
    let cipher = raw.trim();
    if cipher.is_empty() {
        anyhow::bail!("Please enter a cipher text to decrypt");
    }
    let key = resolve_key(key, profile)?;

    match decode(cipher, &key) {
        Ok(text) => {
            println!("{}", text);
            Ok(())
        }
        Err(e) => anyhow::bail!("Decryption failed: invalid cipher text or key ({})", e),
    }
}

fn handle_key(
    name: Option<String>,
    key: Option<String>,
    random: bool,
    length: usize,
    remove: bool,
    list: bool,
) -> Result<()> {
    let mut store = KeyStore::load()?;

    if list {
        if store.keys.is_empty() {
            println!("No keys stored.");
        } else {
            println!("Stored keys:");
            let mut names: Vec<&String> = store.keys.keys().collect();
            names.sort();
            for name in names {
                println!("  {}  {}", key_fingerprint(&store.keys[name]), name);
            }
        }
        return Ok(());
    }

    let name = name.context("NAME is required (unless using --list)")?;

    if remove {
        if store.keys.remove(&name).is_some() {
            store.save()?;
            println!("Removed key: {}", name);
        } else {
            println!("No stored key named: {}", name);
        }
        return Ok(());
    }

    let key = if random {
        if length == 0 {
            anyhow::bail!("Key length must be at least 1");
        }
        let key = random_key(length);
        println!("Generated key: {}", key);
        key
    } else {
        key.context("KEY is required when adding (or use --random)")?
    };

    if key.is_empty() {
        anyhow::bail!("Key cannot be empty");
    }

    store.keys.insert(name.clone(), key.clone());
    store.save()?;
    println!("✓ Stored key: {} ({})", name, key_fingerprint(&key));

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt {
            text,
            key,
            profile,
            file,
            out,
        } => handle_encrypt(text, key, profile, file, out),
        Commands::Decrypt {
            text,
            key,
            profile,
            file,
        } => handle_decrypt(text, key, profile, file),
        Commands::Key {
            name,
            key,
            random,
            length,
            remove,
            list,
        } => handle_key(name, key, random, length, remove, list),
        Commands::Version => {
            println!("axm {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
