//! Generate a throwaway Ed25519 keypair in Solana CLI format.
//!
//! Run with: cargo run --example keygen > id.json
//!
//! The JSON array goes to stdout so it can be fed straight back into
//! `bondcurve keypair --file id.json`. The public key is echoed on stderr.

fn main() {
    use ed25519_dalek::SigningKey;
    use rand_core::OsRng;

    let signing_key = SigningKey::generate(&mut OsRng);
    let keypair_bytes = signing_key.to_keypair_bytes();

    eprintln!(
        "public key: {}",
        bs58::encode(signing_key.verifying_key().to_bytes()).into_string()
    );

    let formatted: Vec<String> = keypair_bytes.iter().map(|b| b.to_string()).collect();
    println!("[{}]", formatted.join(","));
}
