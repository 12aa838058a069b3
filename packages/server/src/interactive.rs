//! Interactive mode for the server.
//!
//! Prompts for bind address, port, and data directory before starting the
//! server.

use std::path::PathBuf;

use dialoguer::{Confirm, Input};

use crate::ServerConfig;

/// Runs the server in interactive mode, prompting for configuration.
///
/// Each prompt defaults to the matching field of `defaults`.
///
/// # Errors
///
/// Returns an `std::io::Result` error if the underlying server fails to
/// start.
#[allow(clippy::future_not_send)]
pub async fn run(defaults: ServerConfig) -> std::io::Result<()> {
    println!("City Explorer Server");
    println!();

    let bind_addr: String = Input::new()
        .with_prompt("Bind address")
        .default(defaults.bind_addr.clone())
        .interact_text()
        .unwrap_or(defaults.bind_addr);

    let port: u16 = Input::new()
        .with_prompt("Port")
        .default(defaults.port)
        .interact_text()
        .unwrap_or(defaults.port);

    let data_dir: String = Input::new()
        .with_prompt("Data directory")
        .default(defaults.data_dir.display().to_string())
        .interact_text()
        .unwrap_or_else(|_| defaults.data_dir.display().to_string());

    let missing: Vec<String> = city_explorer_store::StoreKey::all()
        .iter()
        .map(|key| key.file_name())
        .filter(|name| !PathBuf::from(&data_dir).join(name).exists())
        .collect();
    if !missing.is_empty() {
        println!("Not yet present in {data_dir}: {}", missing.join(", "));
    }

    if !Confirm::new()
        .with_prompt(format!("Start server on {bind_addr}:{port}?"))
        .default(true)
        .interact()
        .unwrap_or(true)
    {
        println!("Cancelled.");
        return Ok(());
    }

    super::run_server(ServerConfig {
        bind_addr,
        port,
        data_dir: PathBuf::from(data_dir),
    })
    .await
}
