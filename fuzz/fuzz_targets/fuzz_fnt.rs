#![no_main]

use fontsheet_spec::SheetMetadata;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(metadata) = SheetMetadata::from_fnt(text) {
            let rendered = metadata.to_fnt();
            assert!(SheetMetadata::from_fnt(&rendered).is_ok());
        }
    }
});
