// build.rs for kaldi-client-sys
//
// The engine library is a prebuilt shared object distributed alongside the
// Triton Kaldi backend; it is never built from this workspace. When
// KALDI_CLIENT_LIB_DIR points at a directory containing
// libkaldi-asr-parallel-client.so, link directives are emitted. Without it
// the bindings still compile, and anything that calls into them must be
// enabled explicitly (the core crate gates its FFI engine behind the
// `ffi-engine` feature).

use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=KALDI_CLIENT_LIB_DIR");

    match env::var("KALDI_CLIENT_LIB_DIR") {
        Ok(dir) => {
            println!("cargo:rustc-link-search=native={dir}");
            println!("cargo:rustc-link-lib=dylib=kaldi-asr-parallel-client");
        }
        Err(_) => {
            println!(
                "cargo:warning=KALDI_CLIENT_LIB_DIR not set; \
                 kaldi-client-sys compiled without linking the engine library"
            );
        }
    }
}
