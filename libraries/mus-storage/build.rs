//! Build script for mus-storage.
//!
//! Embedded migrations are read at compile time, so rebuild when they change.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}
