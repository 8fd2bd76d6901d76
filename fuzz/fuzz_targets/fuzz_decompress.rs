#![no_main]
use libfuzzer_sys::fuzz_target;
use lzw_stream::DecodeOptions;

fuzz_target!(|data: &[u8]| {
    // Cap output to avoid OOM on highly repetitive inputs
    let options = DecodeOptions {
        max_output: Some(16 * 1024 * 1024),
        ..DecodeOptions::default()
    };
    let _ = lzw_stream::decompress_with(data, options);
});
