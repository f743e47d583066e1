use std::path::Path;

use cryptools_key::export;

use super::{open_ring, print_items};
use crate::error::CliResult;

pub fn handle(store: &Path, name: String) -> CliResult<()> {
    let ring = open_ring(store)?;
    let record = ring.get(&name)?;
    let items = export(&record.name, record.algorithm, &record.material)?;
    print_items(&items)
}
