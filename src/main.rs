use clap::Parser;

use podcast_studio::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    podcast_studio::init_logging();

    if let Err(e) = podcast_studio::run(cli).await {
        tracing::error!("{e}");
        std::process::exit(1);
    }
}
