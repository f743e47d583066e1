use std::path::{Path, PathBuf};

use cryptools_key::ops;

use super::{open_ring, print_items, read_message};
use crate::error::CliResult;

pub fn handle(
    store: &Path,
    key: String,
    text: Option<String>,
    file: Option<PathBuf>,
) -> CliResult<()> {
    let plaintext = read_message(text, file)?;
    let ring = open_ring(store)?;
    let record = ring.get(&key)?;
    let items = ops::encrypt(record, &plaintext)?;
    print_items(&items)
}
