// Module declarations
mod assembler;
mod builder;
mod cli;
mod config;
mod content;
mod front_matter;
mod report;
mod server;
mod utils;

#[tokio::main]
async fn main() {
    // Run the CLI
    let code = cli::run().await;
    std::process::exit(code);
}
