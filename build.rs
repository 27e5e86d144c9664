use std::env;
use std::path::PathBuf;

fn main() {
    println!("cargo:rerun-if-env-changed=DINO_EXPLORER_ROOT_HINT");
    println!("cargo:rerun-if-changed=data/dinosaurs.json");
    println!("cargo:rerun-if-changed=schema/catalog.schema.json");

    let hint = env::var("DINO_EXPLORER_ROOT_HINT")
        .ok()
        .or_else(|| env::var("CARGO_MANIFEST_DIR").ok());

    if let Some(raw_hint) = hint {
        let candidate = PathBuf::from(raw_hint);
        let canonical = candidate.canonicalize().unwrap_or(candidate);

        println!(
            "cargo:rustc-env=DINO_EXPLORER_ROOT_HINT={}",
            canonical.display()
        );
    }
}
