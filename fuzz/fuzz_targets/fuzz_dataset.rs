#![no_main]

use colcomplete::dataset::Dataset;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsers must reject bad input with an error, never a panic
    for parsed in [
        Dataset::from_delimited(data, b','),
        Dataset::from_delimited(data, b'\t'),
        Dataset::from_json(data),
    ] {
        if let Ok(dataset) = parsed {
            for column in 0..dataset.columns().len() {
                let _ = dataset.distinct_values(column);
            }
        }
    }
});
