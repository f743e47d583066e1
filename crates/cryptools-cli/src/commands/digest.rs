use std::path::PathBuf;

use cryptools_codec::{encode, Encoding};
use cryptools_crypto::digest::{digest_batch, digest_hex};

use super::parse_hash;
use crate::error::{CliError, CliResult};

pub fn handle(files: Vec<PathBuf>, algorithm: String, text: Option<String>) -> CliResult<()> {
    let hash = parse_hash(&algorithm)?;

    if let Some(text) = text {
        println!("{}", digest_hex(text.as_bytes(), hash));
        return Ok(());
    }

    if files.is_empty() {
        return Err(CliError::InvalidInput(
            "provide files to digest or --text".to_string(),
        ));
    }

    // Each file succeeds or fails on its own
    let mut failures = 0;
    for result in digest_batch(&files, hash) {
        match result.outcome {
            Ok(bytes) => println!(
                "{}  {}",
                encode(&bytes, Encoding::Hexadecimal)?,
                result.path.display()
            ),
            Err(e) => {
                failures += 1;
                eprintln!("{}: {e}", result.path.display());
            }
        }
    }

    if failures > 0 {
        return Err(CliError::InvalidInput(format!(
            "{failures} file(s) could not be digested"
        )));
    }
    Ok(())
}
