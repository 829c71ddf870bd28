use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path()?;
        // build scripts run single threaded, nothing else reads the environment concurrently
        unsafe { std::env::set_var("PROTOC", protoc) };
    }
    std::fs::create_dir_all("src/generated")?;
    tonic_build::configure()
        .out_dir("src/generated/")
        .build_client(true)
        .build_server(true)
        .compile_protos(
            &[
                "client_namenode.proto",
                "client_datanode.proto",
                "datanode_datanode.proto",
                "namenode_datanode.proto",
                "namenode_namenode.proto",
            ],
            &["."],
        )?;
    Ok(())
}
