//! `bhojan` binary entry point.

use clap::Parser;

use bhojan_register::cli::Cli;

#[tokio::main]
async fn main() {
    bhojan_register::init_tracing();

    match bhojan_register::run(Cli::parse()).await {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
