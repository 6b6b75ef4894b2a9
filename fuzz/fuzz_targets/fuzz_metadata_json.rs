#![no_main]

use fontsheet_spec::{BuildManifest, SheetMetadata};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(metadata) = SheetMetadata::from_json(text) {
            // Anything accepted must survive re-encoding.
            if let Ok(json) = metadata.to_json(false) {
                let _ = SheetMetadata::from_json(&json);
            }
        }
        let _ = BuildManifest::from_json(text);
    }
});
