//! Terminal chat client for a running guardian-proxy server.
//!
//! Reads one message per line from stdin, sends it to `GET /api/generate`
//! and prints the reply. The transcript lives only in memory.

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};

use guardian_proxy::client::{GenerateClient, Transcript};

#[derive(Debug, Parser)]
#[command(name = "guardian-chat", version, about = "Chat with a guardian-proxy server")]
struct Args {
    /// Base URL of the proxy server.
    #[arg(long, env = "GUARDIAN_BASE_URL", default_value = "http://127.0.0.1:8080")]
    base_url: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let client = GenerateClient::new(args.base_url);
    let mut transcript = Transcript::new();

    println!("Message Group Guardian (Ctrl-D to quit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let message = line.trim();
        if message.is_empty() {
            continue;
        }
        transcript.push_user(message);

        match client.generate(message).await {
            Ok(reply) => {
                let had_link = transcript.join_link().is_some();
                let assistant = transcript.record_reply(&reply);
                println!("\nGuardian> {}\n", assistant.content);

                if !had_link {
                    if let Some(link) = transcript.join_link() {
                        println!("Join the community: {}\n", link);
                    }
                }
            }
            // The user message stays in the transcript.
            Err(e) => eprintln!("Connection failed: {}", e),
        }
    }

    Ok(())
}
