use clap::{CommandFactory, Parser};
use std::process;

use cgm_harmonizer::cli::{args::Args, commands};

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // No subcommand: show help and exit cleanly
    if args.command.is_none() {
        let mut command = Args::command();
        let _ = command.print_help();
        println!();
        return;
    }

    match commands::run(args).await {
        Ok(summary) => {
            if !summary.all_succeeded() {
                process::exit(1);
            }
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
