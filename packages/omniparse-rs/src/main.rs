use clap::Parser;
use omniparse_rs::cli::{Args, Commands};
use omniparse_rs::commands::{self, CommandStatus};
use omniparse_rs::{init_logging, serve};

#[tokio::main]
async fn main() {
  let args = Args::parse();

  let outcome = match args.command {
    Commands::Version => {
      println!("omniparse {}", env!("CARGO_PKG_VERSION"));
      return;
    }
    Commands::Serve(serve_args) => {
      init_logging(args.log_format, "info");
      serve(serve_args.into_config()).await.map(|()| CommandStatus::Done)
    }
    Commands::Detect { path, backend } => {
      init_logging(args.log_format, "warn");
      commands::detect(path, &backend).await
    }
    Commands::Find { path, selector, backend } => {
      init_logging(args.log_format, "warn");
      commands::find(path, &selector, &backend).await
    }
    Commands::Click { path, selector, backend } => {
      init_logging(args.log_format, "warn");
      commands::click(path, &selector, &backend).await
    }
  };

  match outcome {
    Ok(CommandStatus::Done) => {}
    Ok(CommandStatus::NoMatch) => {
      eprintln!("Element not found");
      std::process::exit(1);
    }
    Err(e) => {
      eprintln!("Error: {:#}", e);
      std::process::exit(1);
    }
  }
}
