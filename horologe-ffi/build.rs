use std::env;
use std::path::PathBuf;

fn main() {
    let crate_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let include_dir = PathBuf::from(&crate_dir).join("include");

    println!("cargo:rerun-if-changed=src");
    println!("cargo:rerun-if-changed=cbindgen.toml");

    let config = cbindgen::Config::from_file(PathBuf::from(&crate_dir).join("cbindgen.toml"))
        .expect("Unable to read cbindgen.toml");

    let bindings = cbindgen::Builder::new()
        .with_crate(&crate_dir)
        .with_config(config)
        .generate()
        .expect("Unable to generate C bindings");

    bindings.write_to_file(out_dir.join("horologe_ffi.h"));

    // Copy under include/ for C/C++ consumers.
    std::fs::create_dir_all(&include_dir).expect("Unable to create include directory");
    bindings.write_to_file(include_dir.join("horologe_ffi.h"));
}
