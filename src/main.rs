use clap::Parser;

use construct::core::app::App;
use construct::core::config::Config;
use construct::core::constants::WEBHOOK_URL;
use construct::ui::chat_loop::run_chat;
use construct::utils::logging::LoggingState;

#[derive(Parser)]
#[command(name = "construct")]
#[command(version)]
#[command(about = "A Matrix-styled terminal chat client for a webhook automation endpoint")]
#[command(
    long_about = "Construct is a full-screen terminal chat client. Each message you send is \
posted to an automation webhook, and the reply is appended to the transcript. While a \
request is in flight the transcript rains.\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/Mouse     Scroll through chat history\n\
  Ctrl+C            Quit the application\n\
  Backspace         Delete characters in the input field"
)]
struct Args {
    /// Webhook endpoint to post messages to (overrides the config file)
    #[arg(short, long, value_name = "URL")]
    endpoint: Option<String>,

    /// Append the transcript to the given log file
    #[arg(short, long, value_name = "FILE")]
    log: Option<String>,
}

fn init_tracing() {
    // Only wire up the subscriber when asked for; stray stderr output would
    // tear up the alternate screen.
    if std::env::var_os("RUST_LOG").is_some() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_tracing();

    let config = Config::load().unwrap_or_else(|err| {
        eprintln!("Warning: ignoring unreadable config: {err}");
        Config::default()
    });

    let endpoint = args
        .endpoint
        .or(config.endpoint)
        .unwrap_or_else(|| WEBHOOK_URL.to_string());

    let mut logging = LoggingState::new();
    if let Some(path) = args.log.or(config.log_file) {
        // Fail fast on an unwritable log file, before entering raw mode.
        logging.set_log_file(path)?;
    }

    let app = App::new(endpoint);
    run_chat(app, logging).await
}
