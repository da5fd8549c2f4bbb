#![no_main]
use std::cell::RefCell;

use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use splitscan::{ByteSource, Scanner, Step, chunk_utils::Chunked, split};

/// Bytes consumed by `Plan` in front of the payload.
const HEADER: usize = 8;

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

static WS_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"\r\n",
    "\u{85}".as_bytes(),
    "\u{a0}".as_bytes(),
    "\u{1680}".as_bytes(),
    "\u{2000}".as_bytes(),
    "\u{200A}".as_bytes(),
    "\u{2028}".as_bytes(),
    "\u{2029}".as_bytes(),
    "\u{202F}".as_bytes(),
    "\u{205F}".as_bytes(),
    "\u{3000}".as_bytes(),
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

/// Lets libFuzzer mutate, then now and then plants a separator (possibly
/// truncated) somewhere in the payload so multi-byte boundaries get hit.
fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    let size = fuzzer_mutate(data, size, max_size);
    if size <= HEADER || seed % 4 != 0 {
        return size;
    }
    with_rng(|rng| {
        let sep = WS_TABLE[rng.random_range(0..WS_TABLE.len())];
        let sep = &sep[..rng.random_range(1..=sep.len())];
        let at = rng.random_range(HEADER..size);
        let n = sep.len().min(size - at);
        data[at..at + n].copy_from_slice(&sep[..n]);
    });
    size
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug, Arbitrary)]
struct Plan {
    splitter: u8,
    initial: u8,
    max: u16,
    split_seed: u32,
}

fn splitter(which: u8) -> fn(&[u8], bool) -> Step<'_> {
    match which % 4 {
        0 => split::bytes,
        1 => split::code_points,
        2 => split::words,
        _ => split::lines,
    }
}

fn run<S: ByteSource>(
    source: S,
    split: fn(&[u8], bool) -> Step<'_>,
    initial: usize,
    max: usize,
) -> (Vec<Vec<u8>>, Option<&'static str>) {
    let mut scanner = Scanner::new(source).with_split(split);
    scanner.set_limits(initial, max).expect("limits are valid");
    let tokens = scanner.tokens_owned().collect();
    let kind = scanner.error().map(|err| err.kind());
    (tokens, kind)
}

/// Cut `payload` into chunks whose sizes follow from `split_seed`.
fn split_into_chunks(payload: &[u8], split_seed: u32) -> Vec<&[u8]> {
    let mut rng = SmallRng::seed_from_u64(u64::from(split_seed));
    let mut chunks = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let (head, tail) = rest.split_at(rng.random_range(1..=rest.len()));
        chunks.push(head);
        rest = tail;
    }
    chunks
}

fn scan(data: &[u8]) {
    let mut u = Unstructured::new(data);
    let Ok(plan) = Plan::arbitrary(&mut u) else {
        return;
    };
    let payload = u.take_rest();

    let split = splitter(plan.splitter);
    let initial = usize::from(plan.initial) + 1;
    let max = usize::from(plan.max).max(splitscan::MIN_MAX_TOKEN_SIZE);

    let whole = run(payload, split, initial, max);
    let chunked = run(
        Chunked::new(split_into_chunks(payload, plan.split_seed)),
        split,
        initial,
        max,
    );
    assert_eq!(whole, chunked, "chunking changed the scan");

    if plan.splitter % 4 == 0 && whole.1.is_none() {
        assert_eq!(whole.0.concat(), payload);
    }
}

fuzz_target!(|data: &[u8]| scan(data));
