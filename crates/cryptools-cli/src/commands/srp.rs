use cryptools_codec::{encode, Encoding};
use cryptools_crypto::srp;

use crate::error::CliResult;

pub fn register(username: String, password: String) -> CliResult<()> {
    let registration = srp::register(&username, &password)?;
    println!("Salt: {}", encode(&registration.salt, Encoding::Hexadecimal)?);
    println!(
        "Verifier: {}",
        encode(&registration.verifier, Encoding::Hexadecimal)?
    );
    Ok(())
}
