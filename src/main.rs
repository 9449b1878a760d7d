use opmcoil::args::Command;

fn main() {

    // 1. Parse commandline arguments and set up logging
    let cli = opmcoil::args::parse_cli_args();

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(cli.log_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Command::Config(example_args) => opmcoil::example_config(example_args),

        // 2. Build the stage targets, then run them
        Command::Run(run_args) => opmcoil::build_targets(run_args)
            .and_then(opmcoil::run_process),
    };

    if let Err(error) = result {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}
