use std::path::Path;

use cryptools_codec::{decode, Encoding};
use cryptools_key::ops;

use super::{open_ring, print_items};
use crate::error::CliResult;

pub fn handle(store: &Path, key: String, input: String, iv: Option<String>) -> CliResult<()> {
    let ciphertext = decode(&input, Encoding::Base64)?;
    let iv = iv
        .map(|v| decode(&v, Encoding::Hexadecimal))
        .transpose()?;

    let ring = open_ring(store)?;
    let record = ring.get(&key)?;
    let items = ops::decrypt(record, &ciphertext, iv.as_deref())?;
    print_items(&items)
}
