use std::io::{self, Write};
use log::info;
use crossterm::{
    cursor::MoveTo,
    execute, queue,
    style::{self, ResetColor, SetBackgroundColor, SetForegroundColor},
};

use crate::types::{Color, Point};

/// Sink for one frame of draw calls.
pub trait Renderer {
    fn clear(&mut self, color: Color);
    fn draw_polygon(&mut self, points: &[Point], color: Color);
    fn draw_circle(&mut self, center: Point, radius: f64, color: Color);
}

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Polygon { points: Vec<Point>, color: Color },
    Circle { center: Point, radius: f64, color: Color },
}

/// Records draw calls in order. Handy for headless runs and tests.
#[derive(Clone, Debug, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl Renderer for DrawList {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        self.commands.push(DrawCommand::Polygon { points: points.to_vec(), color });
    }

    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        self.commands.push(DrawCommand::Circle { center, radius, color });
    }
}

// --- ScreenBuffer for simulated rendering ---
pub struct ScreenBuffer {
    pub buffer: Vec<Vec<char>>,
    pub width: u16,
    pub height: u16,
    pub cursor_x: u16,
    pub cursor_y: u16,
}

impl ScreenBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        ScreenBuffer {
            buffer: vec![vec![' '; width as usize]; height as usize],
            width,
            height,
            cursor_x: 0,
            cursor_y: 0,
        }
    }

    pub fn move_to(&mut self, x: u16, y: u16) {
        self.cursor_x = x;
        self.cursor_y = y;
    }

    pub fn write_str(&mut self, s: &str) {
        for c in s.chars() {
            if self.cursor_y < self.height && self.cursor_x < self.width {
                self.buffer[self.cursor_y as usize][self.cursor_x as usize] = c;
            }
            self.cursor_x = self.cursor_x.saturating_add(1);
        }
    }

    pub fn row(&self, y: u16) -> String {
        self.buffer.get(y as usize).map(|r| r.iter().collect()).unwrap_or_default()
    }

    pub fn print_to_log(&self) {
        info!("--- Screen Buffer ---");
        for y in 0..self.height {
            info!("{}", self.row(y));
        }
        info!("---------------------");
    }
}

// --- OutputTarget enum to handle stdout or ScreenBuffer ---
pub enum OutputTarget {
    Stdout(io::Stdout),
    ScreenBuffer(ScreenBuffer),
}

impl OutputTarget {
    pub fn execute_move_to(&mut self, command: MoveTo) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, command),
            OutputTarget::ScreenBuffer(sb) => {
                sb.move_to(command.0, command.1);
                Ok(())
            },
        }
    }

    pub fn execute_other_command(&mut self, command: impl crossterm::Command) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => execute!(s, command),
            OutputTarget::ScreenBuffer(_) => Ok(()), // No terminal state in debug mode
        }
    }

    /// Switches the foreground color; colors are dropped in debug mode.
    pub fn set_color(&mut self, color: Color) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(
                s,
                SetForegroundColor(style::Color::Rgb { r: color.r, g: color.g, b: color.b })
            ),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn set_background(&mut self, color: Color) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(
                s,
                SetBackgroundColor(style::Color::Rgb { r: color.r, g: color.g, b: color.b })
            ),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }

    pub fn reset_color(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => queue!(s, ResetColor),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            OutputTarget::Stdout(s) => s.write(buf),
            OutputTarget::ScreenBuffer(sb) => {
                let s = String::from_utf8_lossy(buf);
                sb.write_str(&s);
                Ok(buf.len())
            },
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            OutputTarget::Stdout(s) => s.flush(),
            OutputTarget::ScreenBuffer(_) => Ok(()),
        }
    }
}

// --- GameGrid: rasterizes world-space shapes onto terminal cells ---
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub color: Color,
}

const POLYGON_GLYPH: char = '#';
const DISC_GLYPH: char = 'o';
const BRIGHT_POINT_GLYPH: char = '*';
const DIM_POINT_GLYPH: char = '.';

pub struct GameGrid {
    pub grid: Vec<Vec<Option<Cell>>>,
    pub width: u16,
    pub height: u16,
    background: Color,
    scale_x: f64,
    scale_y: f64,
}

impl GameGrid {
    /// A `width` x `height` cell grid showing a `world_width` x `world_height` screen.
    pub fn new(width: u16, height: u16, world_width: f64, world_height: f64) -> Self {
        GameGrid {
            grid: vec![vec![None; width as usize]; height as usize],
            width,
            height,
            background: Color::BLACK,
            scale_x: width as f64 / world_width,
            scale_y: height as f64 / world_height,
        }
    }

    pub fn set_char(&mut self, x: i64, y: i64, glyph: char, color: Color) {
        if (0..self.width as i64).contains(&x) && (0..self.height as i64).contains(&y) {
            self.grid[y as usize][x as usize] = Some(Cell { glyph, color });
        }
    }

    pub fn char_at(&self, x: u16, y: u16) -> char {
        self.grid
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .and_then(|cell| cell.map(|c| c.glyph))
            .unwrap_or(' ')
    }

    fn to_cell(&self, p: Point) -> (f64, f64) {
        (p.x * self.scale_x, p.y * self.scale_y)
    }

    fn trace_line(&mut self, from: Point, to: Point, color: Color) {
        let (x0, y0) = self.to_cell(from);
        let (x1, y1) = self.to_cell(to);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let x = (x0 + (x1 - x0) * t).floor() as i64;
            let y = (y0 + (y1 - y0) * t).floor() as i64;
            self.set_char(x, y, POLYGON_GLYPH, color);
        }
    }

    pub fn render(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        stdout.set_background(self.background)?;
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            let mut current: Option<Color> = None;
            for cell in &self.grid[y as usize] {
                match cell {
                    Some(cell) => {
                        if current != Some(cell.color) {
                            stdout.set_color(cell.color)?;
                            current = Some(cell.color);
                        }
                        write!(stdout, "{}", cell.glyph)?;
                    }
                    None => write!(stdout, " ")?,
                }
            }
        }
        stdout.reset_color()
    }

    pub fn clear_screen_manual(&self, stdout: &mut OutputTarget) -> io::Result<()> {
        for y in 0..self.height {
            stdout.execute_move_to(MoveTo(0, y))?;
            write!(stdout, "{}", " ".repeat(self.width as usize))?;
        }
        stdout.execute_move_to(MoveTo(0, 0))?;
        Ok(())
    }
}

impl Renderer for GameGrid {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.grid = vec![vec![None; self.width as usize]; self.height as usize];
    }

    fn draw_polygon(&mut self, points: &[Point], color: Color) {
        for (i, &from) in points.iter().enumerate() {
            let to = points[(i + 1) % points.len()];
            self.trace_line(from, to, color);
        }
    }

    fn draw_circle(&mut self, center: Point, radius: f64, color: Color) {
        let (cx, cy) = self.to_cell(center);
        let (rx, ry) = (radius * self.scale_x, radius * self.scale_y);
        if rx < 1.0 && ry < 1.0 {
            let glyph = if color.brightness() > 127 { BRIGHT_POINT_GLYPH } else { DIM_POINT_GLYPH };
            self.set_char(cx.floor() as i64, cy.floor() as i64, glyph, color);
            return;
        }
        let (x_min, x_max) = ((cx - rx).floor() as i64, (cx + rx).ceil() as i64);
        let (y_min, y_max) = ((cy - ry).floor() as i64, (cy + ry).ceil() as i64);
        for y in y_min..=y_max {
            for x in x_min..=x_max {
                let dx = (x as f64 + 0.5 - cx) / rx.max(f64::EPSILON);
                let dy = (y as f64 + 0.5 - cy) / ry.max(f64::EPSILON);
                if dx * dx + dy * dy <= 1.0 {
                    self.set_char(x, y, DISC_GLYPH, color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_list_clear_starts_a_new_frame() {
        let mut list = DrawList::default();
        list.draw_circle(Point::ORIGIN, 1.0, Color::BLACK);
        list.clear(Color::gray(3));
        assert_eq!(list.commands, vec![DrawCommand::Clear(Color::gray(3))]);
    }

    #[test]
    fn grid_scales_world_to_cells() {
        let mut grid = GameGrid::new(80, 24, 800.0, 600.0);
        grid.clear(Color::BLACK);
        grid.draw_circle(Point::new(400.0, 300.0), 2.0, Color::gray(255));
        assert_eq!(grid.char_at(40, 12), '*');
        grid.draw_circle(Point::new(15.0, 15.0), 2.0, Color::gray(10));
        assert_eq!(grid.char_at(1, 0), '.');
    }

    #[test]
    fn grid_traces_polygon_outline() {
        let mut grid = GameGrid::new(80, 24, 80.0, 24.0);
        grid.clear(Color::BLACK);
        let square = [
            Point::new(10.0, 5.0),
            Point::new(20.0, 5.0),
            Point::new(20.0, 15.0),
            Point::new(10.0, 15.0),
        ];
        grid.draw_polygon(&square, Color::gray(200));
        assert_eq!(grid.char_at(15, 5), '#');
        assert_eq!(grid.char_at(20, 10), '#');
        assert_eq!(grid.char_at(15, 10), ' ');
    }

    #[test]
    fn large_circle_fills_a_disc() {
        let mut grid = GameGrid::new(40, 40, 40.0, 40.0);
        grid.clear(Color::BLACK);
        grid.draw_circle(Point::new(20.0, 20.0), 5.0, Color::gray(90));
        assert_eq!(grid.char_at(20, 20), 'o');
        assert_eq!(grid.char_at(20, 16), 'o');
        assert_eq!(grid.char_at(28, 20), ' ');
    }

    #[test]
    fn grid_renders_into_screen_buffer() {
        let mut grid = GameGrid::new(10, 3, 10.0, 3.0);
        grid.clear(Color::BLACK);
        grid.set_char(2, 1, 'x', Color::gray(255));
        let mut target = OutputTarget::ScreenBuffer(ScreenBuffer::new(10, 3));
        grid.render(&mut target).unwrap();
        let OutputTarget::ScreenBuffer(sb) = target else { unreachable!() };
        assert_eq!(sb.row(1), "  x       ");
        assert_eq!(sb.row(0), " ".repeat(10));
    }
}
