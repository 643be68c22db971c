#![no_main]

use gitlogfeed_render::{colorize, render_page, render_page_lossy};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let lines: Vec<&[u8]> = data.split(|b| *b == b'\n').collect();

    assert_eq!(colorize(&lines).count(), lines.len());

    let lossy = render_page_lossy("fuzz", &lines);
    if let Ok(strict) = render_page("fuzz", &lines) {
        assert_eq!(strict, lossy);
    }
});
