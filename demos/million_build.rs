//! Timing harness for building and looking up a large key set.

use rand::Rng;
use rand::SeedableRng;
use static_mph_dispatch::Mph;
use std::collections::HashSet;
use std::time::Instant;

const N_KEYS: usize = 1_000_000;
const GEN_SEED: u64 = 42;

fn main() {
    println!("--- static_mph_dispatch build/lookup timing ---");
    println!("n = {N_KEYS}");

    let t0 = Instant::now();
    let keys = gen_unique_keys(N_KEYS, GEN_SEED);
    let gen_s = t0.elapsed().as_secs_f64();
    println!("gen:    {:>8.3} s   ({:.1} M keys/s)", gen_s, N_KEYS as f64 / gen_s / 1e6);

    let t1 = Instant::now();
    let mph = Mph::build(&keys);
    let build_s = t1.elapsed().as_secs_f64();
    println!("build:  {:>8.3} s   ({:.1} M keys/s)", build_s, N_KEYS as f64 / build_s / 1e6);
    println!("backend: {}", if matches!(mph, Mph::Direct(_)) { "LLUT" } else { "FKS" });

    let t2 = Instant::now();
    let mut acc: u64 = 0;
    for &k in &keys {
        acc = acc.wrapping_add(mph.lookup(k) as u64);
    }
    let lookup_s = t2.elapsed().as_secs_f64();
    println!("lookup: {:>8.3} s   ({:.1} M lookups/s)   [acc={acc}]", lookup_s, N_KEYS as f64 / lookup_s / 1e6);
}

fn gen_unique_keys(n: usize, seed: u64) -> Vec<u32> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut seen = HashSet::with_capacity(n);
    let mut keys = Vec::with_capacity(n);
    while keys.len() < n {
        let k: u32 = rng.r#gen();
        if seen.insert(k) {
            keys.push(k);
        }
    }
    keys
}
