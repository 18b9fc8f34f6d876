//! Compiles the payload schema and every service definition under `proto/`.
//!
//! Every generated trait method has a default answering `UNIMPLEMENTED`, so
//! adding an RPC never breaks an existing implementation.

const PROTOS: &[&str] = &[
    "proto/vald/v1/insert.proto",
    "proto/vald/v1/update.proto",
    "proto/vald/v1/upsert.proto",
    "proto/vald/v1/remove.proto",
    "proto/vald/v1/search.proto",
    "proto/vald/v1/object.proto",
    "proto/vald/v1/index.proto",
    "proto/vald/v1/flush.proto",
    "proto/vald/v1/filter.proto",
    "proto/meta/v1/insert.proto",
    "proto/meta/v1/update.proto",
    "proto/meta/v1/upsert.proto",
    "proto/meta/v1/remove.proto",
    "proto/meta/v1/search.proto",
    "proto/meta/v1/object.proto",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=proto");
    tonic_prost_build::configure()
        .build_server(true)
        .build_client(true)
        .generate_default_stubs(true)
        .compile_protos(PROTOS, &["proto"])?;
    Ok(())
}
