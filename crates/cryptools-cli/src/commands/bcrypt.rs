use cryptools_crypto::password;

use crate::error::CliResult;

pub fn hash(pass: String, cost: u32) -> CliResult<()> {
    println!("{}", password::hash(&pass, cost)?);
    Ok(())
}

pub fn verify(pass: String, hashed: String) -> CliResult<()> {
    if password::verify(&pass, &hashed)? {
        println!("Password matches");
    } else {
        println!("Password does NOT match");
    }
    Ok(())
}
