//! Print a fixed public matrix as a Rust array literal.
//!
//! Usage: `cargo run --example fixed_matrix [set] [seed-hex]`
//! where `set` is one of `nonring-l1`, `nonring-l3`, `nonring-l5`
//! (default `nonring-l1`) and the seed defaults to all zero bytes.

use std::env;
use std::process;

use round2_kem::{derive_fixed_matrix, ParameterSetId};

fn parse_set(name: &str) -> Option<ParameterSetId> {
    match name {
        "nonring-l1" => Some(ParameterSetId::NonRingL1),
        "nonring-l3" => Some(ParameterSetId::NonRingL3),
        "nonring-l5" => Some(ParameterSetId::NonRingL5),
        _ => None,
    }
}

fn hex_digit(c: u8) -> Option<u8> {
    (c as char).to_digit(16).map(|d| d as u8)
}

fn parse_hex(hex: &str) -> Option<Vec<u8>> {
    let bytes = hex.as_bytes();
    if bytes.len() % 2 != 0 {
        return None;
    }
    bytes
        .chunks_exact(2)
        .map(|pair| Some((hex_digit(pair[0])? << 4) | hex_digit(pair[1])?))
        .collect()
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let set_name = args.get(1).map(String::as_str).unwrap_or("nonring-l1");
    let Some(id) = parse_set(set_name) else {
        eprintln!("unknown or non-ring-incompatible parameter set: {}", set_name);
        process::exit(2);
    };

    let params = match id.parameters() {
        Ok(params) => params,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let seed = match args.get(2) {
        Some(hex) => match parse_hex(hex) {
            Some(seed) => seed,
            None => {
                eprintln!("seed must be hex");
                process::exit(2);
            }
        },
        None => vec![0u8; params.ss_size],
    };

    let bytes = match derive_fixed_matrix(&seed, &params) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    let values: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|c| u16::from_le_bytes([c[0], c[1]]))
        .collect();

    println!("// {} fixed matrix, d = {}", id, params.d);
    println!("pub const A_FIXED: [u16; {}] = [", values.len());
    for row in values.chunks(params.d) {
        let line: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        println!("    {},", line.join(", "));
    }
    println!("];");
}
