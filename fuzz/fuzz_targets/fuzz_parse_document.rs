#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Feed arbitrary text through the document parser; parsing must never
    // panic, only return ParseError for ill-formed input
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = hestia::tariff::TariffDocument::parse(text);
    }
});
