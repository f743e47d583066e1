use std::path::Path;

use super::open_ring;
use crate::error::CliResult;

pub fn handle(store: &Path, name: String) -> CliResult<()> {
    let mut ring = open_ring(store)?;
    ring.remove(&name)?;
    println!("Deleted key \"{name}\"");
    Ok(())
}
