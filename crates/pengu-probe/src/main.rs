use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::sync::Arc;

use pengu_app::{usecases::DEFAULT_CHUNK_SIZE, SchemeHandlerFactory, ServeAssetUseCase};
use pengu_core::config::AppConfig;
use pengu_platform::DirsAppDirsAdapter;
use pengu_tauri::bootstrap::{build_scheme_factory, load_config, tracing::init_tracing_subscriber};

#[derive(Parser)]
#[command(name = "pengu-probe")]
#[command(about = "Resolve and fetch pengu:// URLs outside the webview", long_about = None)]
struct Cli {
    /// TOML config file; its [scheme] section supplies the defaults
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Asset root (overrides the config file)
    #[arg(short, long, global = true)]
    root: Option<PathBuf>,

    /// Reject URL segments that would leave the root
    #[arg(long, global = true)]
    confine: bool,

    /// Attach Cache-Control and Etag headers
    #[arg(long, global = true)]
    cache_headers: bool,

    /// Emit handler debug events
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved path, sniffed MIME type and whether it would be served
    Resolve {
        /// pengu:// URL
        url: String,
    },
    /// Process the request and print the response head
    Head {
        /// pengu:// URL
        url: String,
    },
    /// Fetch the body to stdout or a file
    Fetch {
        /// pengu:// URL
        url: String,
        /// Bytes requested per read
        #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
        chunk: usize,
        /// Output file path
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_dirs = DirsAppDirsAdapter::new();

    if cli.verbose {
        init_tracing_subscriber(&app_dirs)?;
    }

    let mut config = match &cli.config {
        Some(path) => load_config(path.clone())?,
        None => AppConfig::empty(),
    };
    if let Some(root) = cli.root {
        config.asset_root = root;
    }
    if cli.confine {
        config.confine_to_root = true;
    }
    if cli.cache_headers {
        config.cache_headers = true;
    }

    let factory = build_scheme_factory(&config, &app_dirs)?;

    match cli.command {
        Commands::Resolve { url } => run_resolve(&factory, &url),
        Commands::Head { url } => run_head(&factory, &url),
        Commands::Fetch { url, chunk, out } => run_fetch(factory, &url, chunk, out),
    }
}

fn run_resolve(factory: &SchemeHandlerFactory, url: &str) -> Result<()> {
    let mut handler = factory.create(factory.scheme_name(), url);
    let outcome = handler.process_request(url, Box::new(|| {}));

    println!("url:  {url}");
    println!("root: {}", factory.root().as_path().display());
    match handler.resolved_path() {
        Some(path) => println!("path: {}", path.as_path().display()),
        None => println!("path: <unresolved>"),
    }
    println!("mime: {}", display_mime(handler.mime_type().as_str()));
    match outcome {
        Ok(()) => println!("result: accepted"),
        Err(reason) => println!("result: rejected ({reason})"),
    }

    handler.cancel();
    Ok(())
}

fn run_head(factory: &SchemeHandlerFactory, url: &str) -> Result<()> {
    let mut handler = factory.create(factory.scheme_name(), url);
    handler
        .process_request(url, Box::new(|| {}))
        .map_err(|reason| anyhow!("{url}: {reason}"))?;

    let head = handler.response_headers();
    println!("status: {}", head.status);
    println!("content-type: {}", display_mime(head.mime_type.as_str()));
    println!("content-length: {}", head.content_length);
    for (name, value) in &head.headers {
        println!("{}: {}", name.to_ascii_lowercase(), value);
    }

    handler.cancel();
    Ok(())
}

fn run_fetch(
    factory: SchemeHandlerFactory,
    url: &str,
    chunk: usize,
    out: Option<PathBuf>,
) -> Result<()> {
    let use_case = ServeAssetUseCase::new(Arc::new(factory)).with_chunk_size(chunk);

    match out {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            let (head, _) = use_case.stream_into(url, &mut writer)?;
            writer.flush().context("Failed to flush output file")?;
            eprintln!(
                "wrote {} bytes ({}) to {}",
                head.content_length,
                display_mime(head.mime_type.as_str()),
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut writer = stdout.lock();
            use_case.stream_into(url, &mut writer)?;
            writer.flush()?;
        }
    }

    Ok(())
}

fn display_mime(mime: &str) -> &str {
    if mime.is_empty() {
        "<unknown>"
    } else {
        mime
    }
}
