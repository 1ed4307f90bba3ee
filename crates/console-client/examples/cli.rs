use std::time::{Duration, Instant};

use vigil_console_client::ConsoleClient;
use vigil_console_interface::{ConsoleEvent, Role};
use vigil_console_state::ConsoleState;
use vigil_viz::MotionConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let endpoint = std::env::var("CONSOLE_ENDPOINT").unwrap_or_else(|_| {
        eprintln!("Usage: CONSOLE_ENDPOINT=... CONSOLE_API_KEY=... cargo run --example cli");
        eprintln!();
        eprintln!("  CONSOLE_ENDPOINT   agent event-channel URL (required)");
        eprintln!("  CONSOLE_API_KEY    bearer token (default: none)");
        std::process::exit(1);
    });

    let mut builder = ConsoleClient::builder()
        .endpoint(endpoint)
        .keep_alive(Duration::from_secs(5));
    if let Ok(api_key) = std::env::var("CONSOLE_API_KEY") {
        builder = builder.api_key(api_key);
    }

    let client = builder.build().expect("invalid endpoint");
    let (subscription, mut events) = client.subscribe().await.expect("failed to subscribe");

    eprintln!("Connected to {}.", client.endpoint());
    eprintln!("Press Ctrl+C to stop.");
    eprintln!();

    let mut state = ConsoleState::new();
    let motion_config = MotionConfig::default();
    let started = Instant::now();

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            event = events.recv() => {
                let Some(event) = event else {
                    eprintln!();
                    eprintln!("Channel closed.");
                    break;
                };

                if let ConsoleEvent::NewMessage { message } = &event {
                    let speaker = match message.role {
                        Role::User => "operator",
                        Role::Agent => "agent",
                    };
                    println!("[{}] {speaker}: {}", message.timestamp, message.text);
                }

                state.apply(event);

                let frame = state.frame();
                let params = vigil_viz::compute_frame(
                    started.elapsed().as_secs_f32(),
                    &frame.spectral,
                    frame.speaking,
                    &motion_config,
                );
                eprint!(
                    "\r[console] speaking={} messages={} scale={:.3}   ",
                    frame.speaking,
                    frame.messages.len(),
                    params.scale,
                );
            }
        }
    }

    eprintln!();
    eprintln!("Stopping subscription...");
    subscription.stop().await;
    eprintln!("Done.");
}
