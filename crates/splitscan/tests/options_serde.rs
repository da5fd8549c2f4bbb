#![expect(missing_docs)]

use serde::{
    Deserialize,
    de::value::{Error, MapDeserializer},
};
use splitscan::{DEFAULT_INITIAL_CAPACITY, ScanOptions, Scanner};

#[test]
fn missing_fields_take_defaults() {
    let fields = [("max_token_size", 1024_usize)];
    let options = ScanOptions::deserialize(MapDeserializer::<_, Error>::new(fields.into_iter())).unwrap();
    assert_eq!(
        options,
        ScanOptions {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            max_token_size: 1024,
        }
    );

    let scanner = Scanner::with_options(&b""[..], options).unwrap();
    assert_eq!(scanner.options().initial_capacity, 1024, "clamped to the maximum");
}
