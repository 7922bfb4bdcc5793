//! spark-hello - greeting and counter in the terminal.
//!
//! Click `[ + ]`, or Tab to it and press Enter/Space. `+` increments from
//! anywhere. `q`, Esc or Ctrl+C quits. `--once` prints a single frame.

use std::process::ExitCode;
use std::sync::atomic::Ordering;

use clap::Parser;

use spark_hello::components::App;
use spark_hello::config::{Cli, Config};
use spark_hello::pipeline::{mount, render_to_string, MountOptions};
use spark_hello::state::keyboard;
use spark_hello::{logging, Result};

fn main() -> ExitCode {
    let config = Config::from(Cli::parse());
    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("spark-hello: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: Config) -> Result<()> {
    config.validate()?;
    logging::init(&config)?;

    let app = App::with_name(config.name.clone());

    if config.once {
        let (width, height) = config.size.unwrap_or((80, 24));
        println!("{}", render_to_string(|| app.render(), width, height));
        return Ok(());
    }

    let options = MountOptions {
        mode: config.mode,
        size: config.size,
    };
    let handle = mount(|| app.render(), options)?;

    let increment = app.counter().incrementer();
    let plus = keyboard::on_key("+", move || {
        increment();
        true
    });

    let running = handle.running_flag();
    let quit = keyboard::on(move |event| {
        if event.key == "q" || event.key == "Escape" {
            running.store(false, Ordering::SeqCst);
            return true;
        }
        false
    });

    let result = handle.run();

    plus();
    quit();
    handle.unmount()?;
    tracing::info!(count = app.counter().count(), "exiting");
    result
}
