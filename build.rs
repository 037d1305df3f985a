fn main() {
    // ESP-IDF build metadata is only relevant when cross-compiling for
    // the device; host test builds skip it entirely.
    #[cfg(feature = "espidf")]
    if std::env::var("CARGO_CFG_TARGET_OS").as_deref() == Ok("espidf") {
        embuild::espidf::sysenv::output();
    }
}
