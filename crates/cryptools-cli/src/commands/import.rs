use std::fs;
use std::path::{Path, PathBuf};

use cryptools_key::{classify, import, ImportHints, RsaHint, RsaVariant};

use super::{open_ring, parse_algorithm, parse_hash};
use crate::error::{CliError, CliResult};

#[allow(clippy::too_many_arguments)]
pub fn handle(
    store: &Path,
    name: String,
    text: Option<String>,
    file: Option<PathBuf>,
    raw_algorithm: Option<String>,
    length: u32,
    hash: String,
    curve: String,
    rsa_scheme: Option<String>,
    persist: bool,
) -> CliResult<()> {
    let input = match (text, file) {
        (Some(text), _) => text,
        (None, Some(path)) => {
            if !path.exists() {
                return Err(CliError::FileNotFound(path.display().to_string()));
            }
            fs::read_to_string(path)?
        }
        (None, None) => {
            return Err(CliError::InvalidInput(
                "provide either --text or --file".to_string(),
            ))
        }
    };

    let hints = ImportHints {
        raw_algorithm: raw_algorithm
            .map(|a| parse_algorithm(&a, length, &hash, &curve))
            .transpose()?,
        rsa: rsa_scheme
            .map(|s| {
                Ok::<_, CliError>(RsaHint {
                    variant: parse_rsa_scheme(&s)?,
                    hash: parse_hash(&hash)?,
                })
            })
            .transpose()?,
    };

    let params = classify(input.trim(), &hints)?;
    let material = import(&params)?;

    let mut ring = open_ring(store)?;
    let record = ring.add(&name, params.algorithm, params.usages, material, persist)?;

    println!(
        "Imported {} key \"{}\" ({})",
        params.class, record.name, record.algorithm
    );
    if record.persisted {
        println!("Stored in {}", store.display());
    }
    Ok(())
}

fn parse_rsa_scheme(name: &str) -> CliResult<RsaVariant> {
    match name.to_lowercase().as_str() {
        "oaep" => Ok(RsaVariant::Oaep),
        "pkcs1" => Ok(RsaVariant::Pkcs1V15),
        "pss" => Ok(RsaVariant::Pss),
        _ => Err(CliError::InvalidInput(format!(
            "unknown RSA scheme \"{name}\", expected oaep, pkcs1 or pss"
        ))),
    }
}
