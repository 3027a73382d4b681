use dictionary::Dictionary;
use tracing_subscriber::EnvFilter;
use utilities::{input, input_lines};
use word_lookup::screen::{render, Command, HELP};
use word_lookup::{CommandPlayer, LookupConfig, LookupController, PlayerConfig};

mod utilities;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("word_lookup=info,dictionary=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let controller = LookupController::new(
        Dictionary::new()?,
        CommandPlayer::new(PlayerConfig::default()),
        LookupConfig::default(),
    );

    // redraw whenever a lookup resolves or an error expires
    let mut changes = controller.subscribe();
    let renderer = controller.clone();
    tokio::spawn(async move {
        while changes.changed().await.is_ok() {
            println!("{}", render(&renderer.screen()));
        }
    });

    println!("{HELP}");
    println!("{}", render(&controller.screen()));
    let mut lines = input_lines();
    while let Some(line) = input(&mut lines, ">> ").await? {
        match Command::parse(&line) {
            Command::Query(text) => controller.set_query(text),
            Command::Search(word) => {
                if let Some(word) = word {
                    controller.set_query(word);
                }
                let lookup = controller.clone();
                tokio::spawn(async move { lookup.perform_lookup().await });
            }
            Command::Play => {
                let playback = controller.clone();
                tokio::spawn(async move { playback.request_playback().await });
            }
            Command::Clear => controller.clear().await,
            Command::Quit => break,
            Command::Unknown(command) => {
                println!("Unknown command {command}.");
                println!("{HELP}");
            }
        }
    }

    controller.clear().await;
    Ok(())
}
