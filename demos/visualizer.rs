//! Terminal A* visualizer using crossterm.
//!
//! Run: cargo run --bin visualizer -- [--dimension N] [--delay MS]

use std::time::Duration;

use pathgrid_core::GridConfig;
use pathgrid_crossterm::{Input, TerminalDriver};
use pathgrid_demos::{Command, Editor, HELP_TEXT, config_from_args, describe};
use pathgrid_paths::{Control, Progress};

const IDLE_POLL: Duration = Duration::from_millis(50);

fn main() {
    let config = match config_from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("usage: visualizer [--dimension N] [--delay MS]");
            std::process::exit(2);
        }
    };

    if let Err(e) = run(&config) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(config: &GridConfig) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = Editor::new(config, rand::random())?;
    let mut driver = TerminalDriver::new(config.dimension);
    driver.init()?;
    let result = event_loop(&mut editor, &mut driver, config);
    driver.close();
    result
}

fn event_loop(
    editor: &mut Editor,
    driver: &mut TerminalDriver,
    config: &GridConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    driver.draw_grid(editor.grid())?;
    driver.draw_status(HELP_TEXT)?;

    loop {
        let Some(input) = driver.poll(IDLE_POLL)? else {
            continue;
        };
        match editor.apply(input)? {
            Command::None => {}
            Command::Repaint(cells) => driver.draw_cells(&cells)?,
            Command::RepaintAll => {
                driver.draw_grid(editor.grid())?;
                driver.draw_status(HELP_TEXT)?;
            }
            Command::Quit => return Ok(()),
            Command::Search { start, end } => {
                driver.draw_grid(editor.grid())?;
                driver.draw_status("searching... (q: quit, /: reset)")?;

                let delay = Duration::from_millis(config.step_delay_ms);
                let mut interrupt = None;
                let mut failure = None;
                let outcome = editor.search(start, end, |progress: &Progress<'_>| {
                    if let Err(e) = driver.draw_cells(progress.changes()) {
                        failure = Some(e);
                        return Control::Cancel;
                    }
                    match driver.poll(delay) {
                        Ok(Some(i @ (Input::Quit | Input::Reset))) => {
                            interrupt = Some(i);
                            Control::Cancel
                        }
                        Ok(_) => Control::Continue,
                        Err(e) => {
                            failure = Some(e);
                            Control::Cancel
                        }
                    }
                })?;
                if let Some(e) = failure {
                    return Err(e.into());
                }
                log::info!("{}", describe(&outcome));

                match interrupt {
                    Some(Input::Quit) => return Ok(()),
                    Some(Input::Reset) => {
                        editor.apply(Input::Reset)?;
                        driver.draw_grid(editor.grid())?;
                        driver.draw_status(HELP_TEXT)?;
                    }
                    _ => {
                        driver.draw_grid(editor.grid())?;
                        driver.draw_status(&describe(&outcome))?;
                    }
                }
            }
        }
    }
}
