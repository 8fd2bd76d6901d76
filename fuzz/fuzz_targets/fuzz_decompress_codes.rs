#![no_main]
use libfuzzer_sys::fuzz_target;
use lzw_stream::{DecodeOptions, Header, LzwDecoder};

fuzz_target!(|data: &[u8]| {
    let Some((&control, codes)) = data.split_first() else {
        return;
    };

    // First byte picks the header and alignment mode
    let Ok(header) = Header::new(9 + (control & 0x07), control & 0x80 != 0) else {
        return;
    };
    let options = DecodeOptions {
        align_code_groups: control & 0x40 != 0,
        max_output: Some(16 * 1024 * 1024),
        ..DecodeOptions::default()
    };

    let mut decoder = LzwDecoder::with_header(codes, header, options);
    let mut out = Vec::new();
    while let Ok(true) = decoder.step(&mut out) {}
    assert_eq!(decoder.summary().bytes_out, out.len() as u64);
});
