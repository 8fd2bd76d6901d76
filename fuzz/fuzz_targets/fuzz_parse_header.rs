#![no_main]
use libfuzzer_sys::fuzz_target;
use lzw_stream::parsing::HeaderParser;

fuzz_target!(|data: &[u8]| {
    if let Ok(header) = HeaderParser::parse(data) {
        assert!((9..=16).contains(&header.max_bits));
        assert_eq!(HeaderParser::parse(&header.to_bytes()).ok(), Some(header));
    }
});
