use crate::{s3::get_bucket, upload::send_file};
use chrono::Utc;
use std::env::args;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub mod naming;
pub mod s3;
pub mod sniff;
mod upload;

#[macro_use]
extern crate tracing;

pub fn setup() {
    if cfg!(debug_assertions) {
        for (key, value) in &[
            ("RUST_SPANTRACE", "full"),
            ("RUST_LIB_BACKTRACE", "full"),
            ("RUST_BACKTRACE", "full"),
            ("RUST_LOG", "info"),
        ] {
            match std::env::var(key) {
                Err(_) => {
                    trace!(%key, %value, "Setting env var");
                    //safety: nothing else is running yet
                    unsafe {
                        std::env::set_var(key, value);
                    }
                }
                Ok(found) => {
                    trace!(%key, %found, "Found existing env var");
                }
            }
        }
    }

    if let Err(e) = dotenvy::dotenv() {
        eprintln!("Error finding env vars: {e:?}")
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    color_eyre::install().expect("unable to install color-eyre");
}

fn main() -> color_eyre::Result<()> {
    //an absent argument is an empty path - it fails at the read stage like
    //any other unreadable file
    let path = args().nth(1).unwrap_or_default();

    setup();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .expect("unable to build runtime");

    runtime.block_on(async move {
        let bucket = get_bucket()?;
        let receipt = send_file(&path, &bucket, Utc::now()).await?;

        println!("{}", serde_json::to_string(&receipt)?);

        Ok(())
    })
}
