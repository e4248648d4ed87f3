use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};
use crossterm::{
    cursor::MoveTo,
    event::{self, Event},
};
use log::{error, info};

use crate::input::{InputFrame, Key};
use crate::rendering::{GameGrid, OutputTarget};
use crate::terminal_io::{KeyTracker, ScriptedInput};
use crate::world::World;

const TITLE_ART: [&str; 5] = [
    r"  ___  ___   ___ _  __  ___ ___ _    ___ _____ _____ ___ ___ ",
    r" | _ \/ _ \ / __| |/ / / __| _ \ |  |_ _|_   _|_   _| __| _ \",
    r" |   / (_) | (__| ' <  \__ \  _/ |__ | |  | |   | | | _||   /",
    r" |_|_\\___/ \___|_|\_\ |___/_| |____|___| |_|   |_| |___|_|_\",
    r"",
];

const CONTROLS: &str = "Arrows/WASD steer  Space/Enter/F/J fire  Q/Esc quit";

/// Drives a [`World`] in the terminal: input, tick, render, pace.
pub struct Game {
    pub terminal_width: u16,
    pub terminal_height: u16,
    pub stdout_target: OutputTarget,
    scripted_input: Option<ScriptedInput>,
    debug_mode_active: bool,
    max_frames: Option<u64>,
}

impl Game {
    pub fn new(
        terminal_width: u16,
        terminal_height: u16,
        stdout_target: OutputTarget,
        scripted_input: Option<ScriptedInput>,
        debug_mode_active: bool,
        max_frames: Option<u64>,
    ) -> Self {
        Game {
            terminal_width,
            terminal_height,
            stdout_target,
            scripted_input,
            debug_mode_active,
            max_frames,
        }
    }

    pub fn run(&mut self, world: &mut World) -> io::Result<()> {
        if !self.debug_mode_active {
            self.show_title_screen()?;
        }

        let (world_width, world_height) = (world.config().screen_width, world.config().screen_height);
        let frame_time = Duration::from_millis(1000 / world.config().frames_per_second.max(1) as u64);
        let mut game_grid = GameGrid::new(self.terminal_width, self.terminal_height, world_width, world_height);
        let mut tracker = KeyTracker::new();
        let mut frame_count: u64 = 0;

        while self.max_frames.is_none_or(|max| frame_count < max) {
            let started = Instant::now();

            let input = self.poll_input(&mut tracker, frame_count)?;
            if input.was_pressed(Key::Quit) {
                info!("Quit requested on frame {}", frame_count);
                break;
            }
            if game_grid.width != self.terminal_width || game_grid.height != self.terminal_height {
                game_grid = GameGrid::new(self.terminal_width, self.terminal_height, world_width, world_height);
            }

            world.tick(&input);
            world.render(&mut game_grid);
            self.render(&game_grid, world)?;

            frame_count += 1;
            if !self.debug_mode_active {
                if let Some(remaining) = frame_time.checked_sub(started.elapsed()) {
                    thread::sleep(remaining);
                }
            }
        }

        self.show_game_over_screen(world)
    }

    /// Collects every key event of this frame into one [`InputFrame`].
    fn poll_input(&mut self, tracker: &mut KeyTracker, frame_count: u64) -> io::Result<InputFrame> {
        if self.debug_mode_active {
            if let Some(script) = &mut self.scripted_input {
                for event in script.take(frame_count) {
                    tracker.record(&event);
                }
            }
            return Ok(tracker.finish_frame());
        }

        while event::poll(Duration::ZERO).map_err(|e| { error!("Failed to poll event: {}", e); e })? {
            let event = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })?;
            if let Event::Resize(new_width, new_height) = event {
                self.terminal_width = new_width;
                self.terminal_height = new_height;
                info!("Terminal resized to {}x{}", new_width, new_height);
            }
            tracker.record(&event);
        }
        Ok(tracker.finish_frame())
    }

    fn render(&mut self, game_grid: &GameGrid, world: &World) -> io::Result<()> {
        game_grid.render(&mut self.stdout_target)?;

        self.stdout_target.execute_move_to(MoveTo(0, 0))?;
        write!(self.stdout_target, "{}", status_line(world))?;
        self.stdout_target.execute_move_to(MoveTo(0, self.terminal_height.saturating_sub(1)))?;
        write!(self.stdout_target, "{}", CONTROLS)?;
        self.stdout_target.flush()?;

        if let OutputTarget::ScreenBuffer(sb) = &self.stdout_target {
            sb.print_to_log();
        }
        Ok(())
    }

    fn write_centered(&mut self, y: u16, text: &str) -> io::Result<()> {
        let x = (self.terminal_width / 2).saturating_sub(text.len() as u16 / 2);
        self.stdout_target.execute_move_to(MoveTo(x, y))?;
        write!(self.stdout_target, "{}", text)
    }

    fn show_title_screen(&mut self) -> io::Result<()> {
        let title_start_y = (self.terminal_height / 2).saturating_sub(TITLE_ART.len() as u16 / 2 + 2);
        for (i, line) in TITLE_ART.iter().enumerate() {
            self.write_centered(title_start_y + i as u16, line)?;
        }
        self.write_centered(title_start_y + TITLE_ART.len() as u16, CONTROLS)?;
        self.write_centered(self.terminal_height.saturating_sub(5), "Press any key to start...")?;
        self.stdout_target.flush()?;
        info!("Title screen displayed. Waiting for key press.");

        wait_for_key()?;

        let blank = GameGrid::new(self.terminal_width, self.terminal_height, 1.0, 1.0);
        blank.clear_screen_manual(&mut self.stdout_target)?;
        self.stdout_target.flush()?;
        thread::sleep(Duration::from_millis(100));
        Ok(())
    }

    fn show_game_over_screen(&mut self, world: &World) -> io::Result<()> {
        let blank = GameGrid::new(self.terminal_width, self.terminal_height, 1.0, 1.0);
        blank.clear_screen_manual(&mut self.stdout_target)?;

        let middle = self.terminal_height / 2;
        self.write_centered(middle.saturating_sub(2), "GAME OVER!")?;
        self.write_centered(
            middle,
            &format!("Asteroids destroyed: {}  Waves: {}", world.total_destroyed(), world.waves_spawned()),
        )?;
        if !self.debug_mode_active {
            self.write_centered(middle + 2, "Press any key to exit...")?;
        }
        self.stdout_target.flush()?;
        info!(
            "Game over after {} ticks with {} asteroids destroyed",
            world.ticks(),
            world.total_destroyed()
        );

        if !self.debug_mode_active {
            wait_for_key()?;
        }
        Ok(())
    }
}

pub fn status_line(world: &World) -> String {
    let ship = &world.ship;
    let state = if !ship.is_active() {
        "  RESPAWNING"
    } else if ship.shielded {
        "  SHIELD"
    } else {
        ""
    };
    format!(
        "Level: {}  Kills: {}  Asteroids: {}{}",
        ship.upgrade_level,
        world.total_destroyed(),
        world.live_asteroids(),
        state
    )
}

fn wait_for_key() -> io::Result<()> {
    loop {
        if let Event::Key(_) = event::read().map_err(|e| { error!("Failed to read event: {}", e); e })? {
            return Ok(());
        }
    }
}
