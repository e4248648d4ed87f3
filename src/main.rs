use std::env;
use std::io::{self, Write};
use std::process;
use crossterm::{
    cursor::{Hide, Show},
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    terminal::{disable_raw_mode, enable_raw_mode, size, supports_keyboard_enhancement},
};
use log::{error, info};

use rock_splitter::audio::{LoggedSoundtrack, Soundtrack};
use rock_splitter::config::GameConfig;
use rock_splitter::game::Game;
use rock_splitter::rendering::{GameGrid, OutputTarget, ScreenBuffer};
use rock_splitter::terminal_io::ScriptedInput;
use rock_splitter::world::World;

const DEBUG_SEED: u64 = 0x5eed;

struct Args {
    debug: Option<(u16, u16, Option<u64>)>,
    config_path: Option<String>,
}

/// `[--config <path>] [--debug [width height [frames]]]`
fn parse_args(args: &[String]) -> Args {
    let mut parsed = Args { debug: None, config_path: None };
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                parsed.config_path = args.get(i + 1).cloned();
                i += 2;
            }
            "--debug" => {
                let rest = &args[i + 1..];
                let width = rest.first().and_then(|a| a.parse::<u16>().ok());
                let height = width.and(rest.get(1)).and_then(|a| a.parse::<u16>().ok());
                let frames = height.and(rest.get(2)).and_then(|a| a.parse::<u64>().ok());
                parsed.debug = Some((width.unwrap_or(80), height.unwrap_or(24), frames));
                i += 1 + [width.is_some(), height.is_some(), frames.is_some()]
                    .into_iter()
                    .filter(|&given| given)
                    .count();
            }
            other => {
                info!("Ignoring unknown argument {}", other);
                i += 1;
            }
        }
    }
    parsed
}

fn load_config(path: Option<&str>) -> GameConfig {
    let loaded = match path {
        Some(path) => GameConfig::load(path),
        None => Ok(GameConfig::default()),
    };
    match loaded.and_then(|config| config.validate().map(|()| config)) {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            eprintln!("rock-splitter: {}", e);
            process::exit(1);
        }
    }
}

fn main() -> io::Result<()> {
    simple_logging::log_to_file("rock-splitter.log", log::LevelFilter::Info)?;
    info!("Starting rock-splitter.");

    let args: Vec<String> = env::args().collect();
    let args = parse_args(&args);
    let config = load_config(args.config_path.as_deref());

    let mut soundtrack = LoggedSoundtrack::new();
    soundtrack.play_looping(&config.background_music);

    if let Some((width, height, max_frames)) = args.debug {
        info!("Debug mode enabled at {}x{}", width, height);
        let mut world = World::with_seed(config, DEBUG_SEED);
        let mut game = Game::new(
            width,
            height,
            OutputTarget::ScreenBuffer(ScreenBuffer::new(width, height)),
            Some(ScriptedInput::demo()),
            true,
            max_frames,
        );
        return game.run(&mut world);
    }

    info!("Attempting to enable raw mode.");
    enable_raw_mode().map_err(|e| { error!("Failed to enable raw mode: {}", e); e })?;
    let (width, height) = size().map_err(|e| { error!("Failed to get terminal size: {}", e); e })?;
    info!("Terminal size: {}x{}", width, height);

    let mut stdout_target = OutputTarget::Stdout(io::stdout());
    GameGrid::new(width, height, 1.0, 1.0)
        .clear_screen_manual(&mut stdout_target)
        .map_err(|e| { error!("Failed to clear screen manually: {}", e); e })?;
    stdout_target.execute_other_command(Hide).map_err(|e| { error!("Failed to hide cursor: {}", e); e })?;
    // Without event types, auto-repeat arrives as plain presses.
    let enhanced = supports_keyboard_enhancement().unwrap_or(false);
    if enhanced {
        stdout_target
            .execute_other_command(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
            .map_err(|e| { error!("Failed to enable key event types: {}", e); e })?;
        info!("Terminal reports key event types.");
    }
    stdout_target.flush()?;

    let mut world = World::new(config);
    let mut game = Game::new(width, height, stdout_target, None, false, None);
    let outcome = game.run(&mut world);
    if let Err(e) = &outcome {
        error!("Game loop failed: {}", e);
    }

    if enhanced {
        game.stdout_target
            .execute_other_command(PopKeyboardEnhancementFlags)
            .map_err(|e| { error!("Failed to restore keyboard flags on exit: {}", e); e })?;
    }
    game.stdout_target.execute_other_command(Show).map_err(|e| { error!("Failed to show cursor on exit: {}", e); e })?;
    disable_raw_mode().map_err(|e| { error!("Failed to disable raw mode on exit: {}", e); e })?;
    info!("Exiting rock-splitter.");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Args {
        let args: Vec<String> = line.split_whitespace().map(String::from).collect();
        parse_args(&args)
    }

    #[test]
    fn debug_takes_optional_size_and_frames() {
        assert_eq!(parse("rock-splitter --debug").debug, Some((80, 24, None)));
        assert_eq!(parse("rock-splitter --debug 100 30 5").debug, Some((100, 30, Some(5))));

        let args = parse("rock-splitter --debug 100 --config game.toml");
        assert_eq!(args.debug, Some((100, 24, None)));
        assert_eq!(args.config_path.as_deref(), Some("game.toml"));
    }

    #[test]
    fn oversized_debug_dimensions_do_not_wrap() {
        assert_eq!(parse("rock-splitter --debug 70000 24").debug, Some((80, 24, None)));
        assert_eq!(parse("rock-splitter --debug 100 65536 9").debug, Some((100, 24, None)));
    }
}
