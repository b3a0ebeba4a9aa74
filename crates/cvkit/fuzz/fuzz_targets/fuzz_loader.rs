//! Fuzz target for the table loader.
//!
//! Loading arbitrary bytes must never panic, and anything that loads must
//! survive the enrichment stages.

#![no_main]

use cvkit::{EnrichmentPipeline, TableLoader};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only process reasonable-sized inputs to avoid OOM
    if data.len() > 100_000 {
        return;
    }

    if let Ok(mut table) = TableLoader::new().parse_bytes(data) {
        let _ = EnrichmentPipeline::default().apply(&mut table);
    }
});
