use anyhow::Result;
use clap::Parser;
use short_url::config::Config;
use short_url::server;
use tracing_subscriber::EnvFilter;

/// Short link service with password-protected deletion.
#[derive(Parser)]
#[command(name = "short-url")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Redis connection string (redis://<user>:<pass>@localhost:6379/<db>)
    #[arg(long)]
    redis: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = Config::from_env()?.with_redis_url(cli.redis);
    init_tracing(&config);
    config.validate()?;
    config.print_summary();

    let metrics = server::install_metrics_recorder()?;

    server::run(config, metrics).await
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    if config.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}
