use std::env;

fn main() {
    // Only the firmware build links against ESP-IDF; host builds (tests) skip it.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os == "espidf" {
        embuild::espidf::sysenv::output();
    }
}
