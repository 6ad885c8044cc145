#![no_main]

use bmc_cache::rle::decompress;
use bmc_cache::CacheDecoder;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut decoder = CacheDecoder::new(data);
    let _ = decoder.decode();

    for bbp in [1, 2, 4] {
        let _ = decompress(data, bbp, 64, 64);
    }
});
