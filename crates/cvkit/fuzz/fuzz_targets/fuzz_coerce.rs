//! Fuzz target for numeric coercion.

#![no_main]

use cvkit::Cell;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(token) = std::str::from_utf8(data) {
        let cell = Cell::coerce(token);
        // Numbers must survive being written and read back.
        if matches!(cell, Cell::Int(_) | Cell::Float(_)) {
            let again = Cell::coerce(&cell.to_field());
            assert!(cell == again || cell.as_f64().is_some_and(f64::is_nan));
        }
    }
});
