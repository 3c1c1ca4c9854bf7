//! Server configuration

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::Arc;

use axum_server::tls_rustls::RustlsConfig;
use citydash::prelude::{DEFAULT_DATASET_URL, DataSource, Variant};
use clap::Parser;
use rustls::pki_types::CertificateDer;

/// US city population dashboard server
#[derive(Parser, Clone, Debug)]
#[command(name = "citydash-server")]
#[command(about = "Serves the 2014 US city population dashboard")]
pub struct Config {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8050")]
    pub port: u16,

    /// URL of the city CSV (columns name, pop, lat, lon)
    #[arg(long, default_value = DEFAULT_DATASET_URL)]
    pub dataset_url: String,

    /// Read the city CSV from disk instead of fetching it
    #[arg(long)]
    pub dataset_file: Option<PathBuf>,

    /// Which dashboard to serve: checklist, maps or explorer
    #[arg(long, default_value = "checklist")]
    pub variant: Variant,

    /// Path to static files directory
    #[arg(long, default_value = "citydash-server/static")]
    pub static_dir: String,

    /// Maximum number of requests handled at once
    #[arg(long, default_value = "256")]
    pub max_concurrent: usize,

    /// TLS certificate path (PEM format)
    #[arg(long)]
    pub tls_cert: Option<String>,

    /// TLS private key path (PEM format)
    #[arg(long)]
    pub tls_key: Option<String>,
}

impl Config {
    /// A local file wins over the URL when both are given
    pub fn data_source(&self) -> DataSource {
        match &self.dataset_file {
            Some(path) => DataSource::File(path.clone()),
            None => DataSource::Url(self.dataset_url.clone()),
        }
    }
}

/// Load TLS configuration from cert and key files
pub fn load_tls_config(cert_path: &str, key_path: &str) -> anyhow::Result<RustlsConfig> {
    let cert_file = File::open(cert_path)?;
    let key_file = File::open(key_path)?;

    let mut cert_reader = BufReader::new(cert_file);
    let mut key_reader = BufReader::new(key_file);

    let certs: Vec<CertificateDer<'static>> =
        rustls_pemfile::certs(&mut cert_reader).collect::<Result<Vec<_>, _>>()?;

    let key = rustls_pemfile::private_key(&mut key_reader)?
        .ok_or_else(|| anyhow::anyhow!("No private key found in {}", key_path))?;

    let config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certs, key)?;

    Ok(RustlsConfig::from_config(Arc::new(config)))
}
