#![no_main]

use libfuzzer_sys::fuzz_target;
use pdfpick::selection::{format_ranges, parse_ranges};

fuzz_target!(|input: (u16, &str)| {
    let (page_count, text) = input;
    let page_count = u32::from(page_count);

    let pages = parse_ranges(text, page_count);

    // Strictly ascending and inside the document
    assert!(pages.windows(2).all(|w| w[0] < w[1]));
    assert!(pages.iter().all(|&p| p >= 1 && p <= page_count));

    // The compact form parses back to the same pages
    assert_eq!(parse_ranges(&format_ranges(&pages), page_count), pages);
});
