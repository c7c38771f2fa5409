use clap::Parser;
use promptimg::config::setup_logging;
use promptimg::render::CaptionFont;
use tracing::error;

#[tokio::main(flavor = "multi_thread")]
async fn main() {
    let cli = promptimg::cli::CliOptions::parse();

    if let Err(err) = setup_logging(cli.debug) {
        eprintln!("Failed to initialize logger: {}", err);
        return;
    }

    let font = CaptionFont::load(cli.font_path.as_deref());

    if let Err(err) =
        promptimg::web::setup_server(&cli.listen_address, cli.port, &cli.static_dir, font).await
    {
        error!("Application error: {}", err);
    }
}
