#![no_main]

use gitlogfeed_git::parse_log;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    for commit in parse_log(data) {
        let _ = std::hint::black_box(commit);
    }
});
