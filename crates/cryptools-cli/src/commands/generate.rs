use std::path::Path;

use cryptools_key::{
    conventional_usages, generate, KeyAlgorithm, KeyClass, KeyGenParams, KeyUsage,
};

use super::{open_ring, parse_curve, parse_hash};
use crate::error::{CliError, CliResult};

#[allow(clippy::too_many_arguments)]
pub fn handle(
    store: &Path,
    name: String,
    algorithm: String,
    length: u32,
    hash: String,
    curve: String,
    modulus_length: usize,
    exponent: u64,
    persist: bool,
) -> CliResult<()> {
    let params = parse_gen_params(&algorithm, length, &hash, &curve, modulus_length, exponent)?;
    let key_algorithm = params.algorithm();
    let material = generate(&params)?;

    let mut ring = open_ring(store)?;
    let record = ring.add(
        &name,
        key_algorithm,
        generated_usages(&key_algorithm),
        material,
        persist,
    )?;

    println!("Generated key \"{}\" ({})", record.name, record.algorithm);
    if record.persisted {
        println!("Stored in {}", store.display());
    }
    Ok(())
}

fn parse_gen_params(
    algorithm: &str,
    length: u32,
    hash: &str,
    curve: &str,
    modulus_length: usize,
    exponent: u64,
) -> CliResult<KeyGenParams> {
    match algorithm.to_lowercase().as_str() {
        "aes-cbc" => Ok(KeyGenParams::AesCbc { length }),
        "aes-ctr" => Ok(KeyGenParams::AesCtr { length }),
        "aes-gcm" => Ok(KeyGenParams::AesGcm { length }),
        "hmac" => Ok(KeyGenParams::Hmac {
            hash: parse_hash(hash)?,
        }),
        "rsa-oaep" => rsa_params(
            cryptools_key::RsaVariant::Oaep,
            hash,
            modulus_length,
            exponent,
        ),
        "rsa-pkcs1" => rsa_params(
            cryptools_key::RsaVariant::Pkcs1V15,
            hash,
            modulus_length,
            exponent,
        ),
        "rsa-pss" => rsa_params(
            cryptools_key::RsaVariant::Pss,
            hash,
            modulus_length,
            exponent,
        ),
        "ecdsa" => Ok(KeyGenParams::Ecdsa {
            curve: parse_curve(curve)?,
        }),
        _ => Err(CliError::InvalidInput(format!(
            "unknown algorithm \"{algorithm}\""
        ))),
    }
}

fn rsa_params(
    variant: cryptools_key::RsaVariant,
    hash: &str,
    modulus_length: usize,
    exponent: u64,
) -> CliResult<KeyGenParams> {
    Ok(KeyGenParams::Rsa {
        variant,
        hash: parse_hash(hash)?,
        modulus_length,
        public_exponent: exponent,
    })
}

/// A generated pair carries both halves' conventional usages
fn generated_usages(algorithm: &KeyAlgorithm) -> Vec<KeyUsage> {
    if algorithm.is_symmetric() {
        conventional_usages(algorithm, KeyClass::Secret)
    } else {
        let mut usages = conventional_usages(algorithm, KeyClass::Private);
        usages.extend(conventional_usages(algorithm, KeyClass::Public));
        usages
    }
}
