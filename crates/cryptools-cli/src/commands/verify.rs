use std::path::{Path, PathBuf};

use cryptools_codec::{decode, Encoding};
use cryptools_key::ops;

use super::{open_ring, print_items, read_message};
use crate::error::CliResult;

pub fn handle(
    store: &Path,
    key: String,
    text: Option<String>,
    file: Option<PathBuf>,
    signature: String,
    salt_length: Option<usize>,
) -> CliResult<()> {
    let message = read_message(text, file)?;
    let signature = decode(&signature, Encoding::Base64)?;

    let ring = open_ring(store)?;
    let record = ring.get(&key)?;
    let items = ops::verify(record, &message, &signature, salt_length)?;
    print_items(&items)
}
