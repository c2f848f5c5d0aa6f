use crate::{
    config::Config,
    executor::DownloadJob,
    fetch::HttpFetcher,
    host::TracingHost,
    sink::resolve_sink_path,
    util::{derive_job_id, ensure_dir, now_rfc3339},
};
use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

#[derive(Parser, Debug)]
#[command(name = "download-worker")]
#[command(about = "Download one image and report success, retry or failure")]
pub struct Args {
    #[command(subcommand)]
    pub cmd: Command,

    /// Path to config TOML. If omitted, uses ./download-worker.toml if present.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override log level (trace/debug/info/warn/error).
    #[arg(long)]
    pub log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a single download attempt.
    Run {
        #[arg(long)]
        endpoint: Option<String>,
        #[arg(long)]
        job_id: Option<String>,
        #[arg(long)]
        cache_dir: Option<PathBuf>,
    },
    /// Print the effective configuration.
    Config {},
}

/// Runs the selected command and returns the process exit code.
pub fn dispatch(args: Args) -> Result<i32> {
    let mut cfg = Config::resolve(args.config.as_deref())?;

    match &args.cmd {
        Command::Config {} => {
            print!("{}", toml::to_string(&cfg).with_context(|| "serializing config")?);
            Ok(0)
        }
        Command::Run {
            endpoint,
            job_id,
            cache_dir,
        } => {
            if let Some(e) = endpoint {
                cfg.job.endpoint = e.clone();
            }
            if let Some(d) = cache_dir {
                cfg.paths.cache_dir = d.display().to_string();
            }
            let _guard = init_logging(&args, &cfg, resolve_log_path(&cfg).as_deref())?;
            run(&cfg, job_id.as_deref())
        }
    }
}

fn init_logging(args: &Args, cfg: &Config, file_path: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let level = args
        .log_level
        .as_deref()
        .unwrap_or(cfg.logging.level.as_str());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let stdout_layer = if cfg.logging.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .boxed()
    };

    let (file_layer, guard) = if let Some(path) = file_path {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        ensure_dir(parent)?;
        let file = std::fs::File::create(path)
            .with_context(|| format!("create log file: {}", path.display()))?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        let layer = tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_ansi(false)
            .with_target(true)
            .boxed();
        (Some(layer), Some(guard))
    } else {
        (None, None)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| anyhow!("failed to init logging: {e}"))?;

    Ok(guard)
}

fn run(cfg: &Config, job_id: Option<&str>) -> Result<i32> {
    let job_id = match job_id {
        Some(id) => id.to_string(),
        None => derive_job_id(&cfg.job.endpoint, &now_rfc3339()),
    };

    if cfg.debug.dump_effective_config {
        cfg.write_effective(Path::new(&cfg.debug.effective_config_path))?;
    }

    let fetcher = HttpFetcher::new(cfg)?;
    info!(
        "job={} job_id={job_id} endpoint={}",
        cfg.global.job_name,
        fetcher.endpoint()
    );
    let host = TracingHost::new(cfg);
    let job = DownloadJob::new(cfg, fetcher, host, resolve_sink_path(cfg, &job_id));
    info!("sink={}", job.sink_path().display());

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .with_context(|| "building tokio runtime")?;
    let report = runtime.block_on(job.run(&job_id));

    if cfg.global.print_summary {
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    Ok(report.result.exit_code())
}

fn resolve_log_path(cfg: &Config) -> Option<PathBuf> {
    if !cfg.logging.write_to_file {
        return None;
    }

    if !cfg.logging.file_path.is_empty() {
        return Some(PathBuf::from(&cfg.logging.file_path));
    }

    Some(PathBuf::from(&cfg.paths.cache_dir).join("download-worker.log"))
}
