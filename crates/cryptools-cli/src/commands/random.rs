use cryptools_codec::{encode, Encoding};
use cryptools_crypto::random;

use crate::error::{CliError, CliResult};

pub fn handle(length: usize, encoding: String, uuid: bool) -> CliResult<()> {
    if uuid {
        println!("{}", random::uuid_v4());
        return Ok(());
    }

    let encoding = match encoding.to_lowercase().as_str() {
        "hex" => Encoding::Hexadecimal,
        "base64" => Encoding::Base64,
        _ => {
            return Err(CliError::InvalidInput(format!(
                "unknown encoding \"{encoding}\", expected hex or base64"
            )))
        }
    };

    let bytes = random::bytes(length)?;
    println!("{}", encode(&bytes, encoding)?);
    Ok(())
}
