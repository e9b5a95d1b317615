use std::collections::HashMap;

use tagconf::{describe, lookup, Bind};

#[derive(Debug, Default, Bind)]
struct AppConf {
    #[conf(key = "APP_ENV", required, desc = "Current environment")]
    env: String,
    #[conf(key = "APP_VERSION", default = "1.0.0", desc = "Version")]
    version: String,
    #[conf(key = "APP_PORTS", default = "8080")]
    ports: Vec<u16>,
    #[conf(key = "APP_WEIGHTS", default = "primary=1.0")]
    weights: HashMap<String, f64>,
    #[conf(key = "APP_DEBUG", desc = "Enable debug output")]
    debug: bool,
}

fn main() -> Result<(), tagconf::Error> {
    for field in describe::<AppConf>() {
        println!(
            "{:<12} {:<16} {}",
            field.key(),
            field.kind().to_string(),
            field.desc().unwrap_or_default()
        );
    }

    // APP_ENV=dev cargo run --example env
    let conf: AppConf = tagconf::load(lookup::env)?;
    println!("{conf:#?}");

    Ok(())
}
