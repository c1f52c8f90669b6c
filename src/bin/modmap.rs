//! Prints the discovered module file map as JSON.
//!
//! This binary is the operational entry point for cache maintenance: it
//! scans a modules root (or loads a JSON config), writes the map to stdout,
//! and optionally persists it as the class-map cache so subsequent boots
//! with caching enabled skip traversal. `--check` additionally verifies
//! that every configured category has a registered handler.

use anyhow::{Context, Result, bail};
use modhost::{ClassMapCache, Explorer, LoaderConfig, in_memory_loader};
use std::env;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(err) = run() {
        eprintln!("{err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse()?;
    let config = cli.load_config()?;

    let explorer = Explorer::new(&config);
    let map = explorer
        .collect_files(&config.category_dirs())
        .with_context(|| format!("scanning modules under {}", config.path.display()))?;

    if cli.check {
        let mut loader = in_memory_loader(config.clone())?;
        loader.build_file_map()?;
        loader.dispatch().context("verifying dispatch wiring")?;
    }

    if cli.write_cache {
        let cache = ClassMapCache::new(config.cache_path());
        cache.store(&map).with_context(|| {
            format!("writing file map cache to {}", config.cache_path().display())
        })?;
    }

    let rendered = if cli.pretty {
        serde_json::to_string_pretty(&map)?
    } else {
        serde_json::to_string(&map)?
    };
    println!("{rendered}");
    Ok(())
}

struct Cli {
    config_path: Option<PathBuf>,
    root: Option<PathBuf>,
    namespace: Option<String>,
    write_cache: bool,
    check: bool,
    pretty: bool,
}

impl Cli {
    fn parse() -> Result<Self> {
        let mut cli = Cli {
            config_path: None,
            root: None,
            namespace: None,
            write_cache: false,
            check: false,
            pretty: false,
        };

        let mut args = env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    let value = args.next().context("--config requires a file path")?;
                    cli.config_path = Some(PathBuf::from(value));
                }
                "--root" => {
                    let value = args.next().context("--root requires a directory path")?;
                    cli.root = Some(PathBuf::from(value));
                }
                "--namespace" => {
                    let value = args.next().context("--namespace requires a value")?;
                    cli.namespace = Some(value);
                }
                "--write-cache" => cli.write_cache = true,
                "--check" => cli.check = true,
                "--pretty" => cli.pretty = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => bail!("unknown argument: {other}"),
            }
        }

        if cli.config_path.is_none() && cli.root.is_none() {
            bail!("either --config or --root is required (see --help)");
        }
        Ok(cli)
    }

    fn load_config(&self) -> Result<LoaderConfig> {
        let mut config = match &self.config_path {
            Some(path) => LoaderConfig::from_path(path)
                .with_context(|| format!("loading config from {}", path.display()))?,
            None => LoaderConfig::new(self.root.clone().expect("root checked at parse")),
        };
        if let Some(root) = &self.root {
            config.path = root.clone();
        }
        if let Some(namespace) = &self.namespace {
            config.namespace = namespace.clone();
        }
        config.validate()?;
        Ok(config)
    }
}

fn print_usage() {
    println!(
        "usage: modmap (--config FILE | --root DIR) [options]

options:
  --config FILE     JSON loader configuration
  --root DIR        modules root (overrides the config's path)
  --namespace NS    identifier root namespace (overrides the config)
  --write-cache     persist the scanned map as the class-map cache
  --check           dispatch against the built-in handlers to verify wiring
  --pretty          pretty-print the JSON output"
    );
}
