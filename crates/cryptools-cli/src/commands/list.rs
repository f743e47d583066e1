use std::path::Path;

use super::open_ring;
use crate::error::CliResult;

pub fn handle(store: &Path) -> CliResult<()> {
    let ring = open_ring(store)?;
    let records = ring.list();
    if records.is_empty() {
        println!("No keys on the ring");
        return Ok(());
    }

    for record in records {
        let usages: Vec<&str> = record.usages.iter().map(|u| u.name()).collect();
        println!(
            "{}  {}  [{}]{}",
            record.name,
            record.algorithm,
            usages.join(", "),
            if record.persisted { "  (persisted)" } else { "" }
        );
    }
    Ok(())
}
