fn main() {
    // Linker setup is only needed when building the Node addon.
    if std::env::var_os("CARGO_FEATURE_NODE").is_some() {
        napi_build::setup();
    }
}
