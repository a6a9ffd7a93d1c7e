use clap::{Parser, Subcommand};
use salvo::transport::tcp::connect_stream;
use salvo::{
    client::run_client, init_logging, Server, ServerConfig, DEFAULT_BIND, MAX_FRAME_SIZE,
    OUTBOUND_QUEUE_LEN,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the match server.
    Serve {
        #[arg(long, default_value = DEFAULT_BIND)]
        bind: String,
        #[arg(long, default_value_t = MAX_FRAME_SIZE, help = "Largest accepted frame in bytes")]
        max_frame_size: u32,
        #[arg(long, default_value_t = OUTBOUND_QUEUE_LEN, help = "Queued messages per connection before it is dropped")]
        outbound_queue: usize,
    },
    /// Connect to a server and play from the terminal.
    Play {
        #[arg(long, default_value = "127.0.0.1:8080")]
        connect: String,
        #[arg(long, default_value_t = MAX_FRAME_SIZE, help = "Largest accepted frame in bytes")]
        max_frame_size: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            bind,
            max_frame_size,
            outbound_queue,
        } => {
            let server = Server::new(ServerConfig {
                bind,
                max_frame_size,
                outbound_queue,
            });
            server.bind_and_run().await?;
        }
        Commands::Play {
            connect,
            max_frame_size,
        } => {
            println!("Connecting to {}...", connect);
            let stream = connect_stream(&connect).await?;
            run_client(stream, max_frame_size).await?;
        }
    }
    Ok(())
}
