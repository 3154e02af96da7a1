use clap::Parser;
use kiku::app::{App, Cli};

fn main() {
    let cli = Cli::parse();
    let app = App::new();
    match app.run(&cli) {
        Ok(value) => println!("{}", app.render(&value, cli.compact)),
        Err(err) => {
            eprintln!("kiku: {}", err);
            std::process::exit(1);
        }
    }
}
