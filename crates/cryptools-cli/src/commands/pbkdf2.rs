use cryptools_codec::{encode, Encoding};
use cryptools_crypto::kdf;

use super::parse_hash;
use crate::error::CliResult;

pub fn handle(
    password: String,
    salt: String,
    iterations: u32,
    hash: String,
    length: usize,
) -> CliResult<()> {
    let derived = kdf::pbkdf2(
        password.as_bytes(),
        salt.as_bytes(),
        iterations,
        parse_hash(&hash)?,
        length,
    )?;
    println!("{}", encode(&derived, Encoding::Hexadecimal)?);
    Ok(())
}
