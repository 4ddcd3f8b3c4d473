//! Build script for the storefront crate.
//!
//! Hashes `static/css/main.css` so the stylesheet can be served under a
//! content-addressed URL with immutable caching.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

fn main() {
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap_or_default();
    let css = Path::new(&manifest_dir).join("static/css/main.css");
    println!("cargo:rerun-if-changed={}", css.display());

    // `env!("CSS_HASH")` in `routes/assets.rs` needs a value even when the
    // stylesheet is missing.
    let hash = fs::read(&css).map_or_else(
        |e| {
            println!("cargo:warning=main.css not hashed: {e}");
            "dev".to_string()
        },
        |bytes| {
            let digest = format!("{:x}", Sha256::digest(&bytes));
            digest.chars().take(8).collect()
        },
    );
    println!("cargo:rustc-env=CSS_HASH={hash}");
}
