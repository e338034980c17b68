use clap::Parser;
use xdraft::cli::Config;

#[tokio::main]
async fn main() {
    let config = Config::parse();
    xdraft::cli::run(config).await
}
