use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

// Include default signatures at compile time
const DEFAULT_SIGNATURES: &str = include_str!("../default_signatures.txt");

/// File picked up from the working directory when `--signatures` is not given.
pub const LOCAL_SIGNATURE_FILE: &str = "hubscan_signatures.txt";

/// Substring matcher over lowercased homepage markup.
#[derive(Debug, Clone)]
pub struct Classifier {
    signatures: Vec<String>,
}

impl Classifier {
    pub fn new(signatures: Vec<String>) -> Self {
        let signatures = signatures
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();
        Self { signatures }
    }

    pub fn signatures(&self) -> &[String] {
        &self.signatures
    }

    /// True iff the body contains any signature. The caller lowercases the
    /// body once; signatures are already lowercase.
    pub fn classify(&self, body_lowercased: &str) -> bool {
        self.first_match(body_lowercased).is_some()
    }

    pub fn first_match(&self, body_lowercased: &str) -> Option<&str> {
        self.signatures
            .iter()
            .find(|signature| body_lowercased.contains(signature.as_str()))
            .map(String::as_str)
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::new(parse_signatures(DEFAULT_SIGNATURES))
    }
}

/// One signature per line; blank lines and `#` comments are skipped.
pub fn parse_signatures(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_lowercase)
        .collect()
}

pub fn load_signatures(signature_file_path: Option<&Path>) -> Result<Classifier> {
    let start_time = Instant::now();
    info!(
        action = "start",
        component = "signature_loading",
        "Starting signature loading"
    );

    let mut signatures = Vec::new();

    if let Some(path) = signature_file_path {
        info!(action = "load", component = "signature_file", file_path = ?path, "Loading signatures from specified file");
        if !path.exists() {
            anyhow::bail!("Signature file not found: {:?}", path);
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read signature file {:?}", path))?;
        signatures = parse_signatures(&content);
        if signatures.is_empty() {
            anyhow::bail!("Signature file {:?} contains no signatures", path);
        }
        info!(action = "loaded", component = "signature_file", signature_count = signatures.len(), file_path = ?path, "Loaded signatures from file");
    } else {
        let local_file = Path::new(LOCAL_SIGNATURE_FILE);
        if local_file.exists() {
            info!(action = "load", component = "local_signature_file", file_path = ?local_file, "Loading signatures from local file");
            match fs::read_to_string(local_file) {
                Ok(content) => signatures = parse_signatures(&content),
                Err(e) => {
                    warn!(action = "read", component = "local_signature_file", error = %e, "Failed to read local signature file")
                }
            }
            info!(action = "loaded", component = "local_signature_file", signature_count = signatures.len(), file_path = ?local_file, "Loaded signatures from local file");
        }

        if signatures.is_empty() {
            info!(
                action = "load",
                component = "embedded_signatures",
                "Using embedded default signatures"
            );
            signatures = parse_signatures(DEFAULT_SIGNATURES);
        }
    }

    info!(
        action = "complete",
        component = "signature_loading",
        signature_count = signatures.len(),
        duration_ms = start_time.elapsed().as_millis(),
        "Signatures ready"
    );
    Ok(Classifier::new(signatures))
}

pub fn init_default_signatures() -> Result<()> {
    init_signatures_at(Path::new(LOCAL_SIGNATURE_FILE))?;
    println!("Created {} with default signatures", LOCAL_SIGNATURE_FILE);
    Ok(())
}

pub fn init_signatures_at(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!(
            "{} already exists. Remove it first if you want to reinitialize.",
            path.display()
        );
    }

    fs::write(path, DEFAULT_SIGNATURES)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
