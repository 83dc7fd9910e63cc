mod app;
mod command;
mod pages;
mod paths;
mod render;
mod settings;

use std::fs::{self, File};
use std::io;

use chrono::Local;
use simplelog::{Config, LevelFilter, WriteLogger};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::{App, Flow};
use crate::settings::SettingsProvider;

fn init_logging() {
    let problems = paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        eprintln!("No cache directory; logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let logger = File::create(&path)
        .map_err(|e| e.to_string())
        .and_then(|file| {
            WriteLogger::init(LevelFilter::Debug, Config::default(), file).map_err(|e| e.to_string())
        });
    if let Err(e) = logger {
        eprintln!("Failed to initialize logger at {}: {}", path.display(), e);
        for problem in problems {
            eprintln!("Log rotation: {}", problem);
        }
        return;
    }

    for problem in problems {
        log::warn!("log rotation: {}", problem);
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let mut app = match App::new(SettingsProvider::in_memory(), Local::now().date_naive()).await {
        Ok(app) => app,
        Err(e) => {
            eprintln!("Error: {}", e);
            return;
        }
    };

    let mut stdout = io::stdout();
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    if let Err(e) = render::write_lines(&mut stdout, &app.frame()) {
        eprintln!("Error: {}", e);
        return;
    }

    loop {
        let line = match input.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                log::error!("failed to read input: {}", e);
                break;
            }
        };

        if app.execute(&line).await == Flow::Quit {
            break;
        }
        if let Err(e) = render::write_lines(&mut stdout, &app.frame()) {
            log::error!("failed to write output: {}", e);
            break;
        }
    }
    log::info!("dashboard closed");
}
