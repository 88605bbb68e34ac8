use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::Print,
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::warn;
use std::io::{self, Stdout, Write};

pub const NORMAL_SIZE: (u16, u16) = (80, 24);
pub const EXTENDED_SIZE: (u16, u16) = (160, 48);

/// Which fields get drawn, decided by terminal size alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Error,
    Normal,
    Extended,
}

impl DisplayMode {
    pub fn from_size(cols: u16, rows: u16) -> Self {
        if cols < NORMAL_SIZE.0 || rows < NORMAL_SIZE.1 {
            DisplayMode::Error
        } else if cols < EXTENDED_SIZE.0 || rows < EXTENDED_SIZE.1 {
            DisplayMode::Normal
        } else {
            DisplayMode::Extended
        }
    }
}

/// Text positioned at row/column.
pub trait Screen {
    /// (columns, rows)
    fn size(&self) -> io::Result<(u16, u16)>;
    fn print_at(&mut self, row: u16, col: u16, text: &str) -> io::Result<()>;
    fn erase(&mut self) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

/// Maps `value` in `min..=max` to a cell in `0..cells`, clamping outliers.
pub fn scale(value: i32, min: i32, max: i32, cells: u16) -> u16 {
    if cells == 0 || max <= min {
        return 0;
    }
    let value = value.clamp(min, max) as i64 - min as i64;
    let span = max as i64 - min as i64;
    ((value * (cells as i64 - 1) + span / 2) / span) as u16
}

/// A `width` wide gauge of `value` in `-range..=range` with a center tick.
pub fn bar(value: i32, range: i32, width: u16) -> String {
    let mut cells = vec!['.'; width as usize];
    if width == 0 {
        return String::new();
    }
    cells[width as usize / 2] = '|';
    cells[scale(value, -range, range, width) as usize] = '#';
    cells.into_iter().collect()
}

/// crossterm backed terminal: raw mode, alternate screen, hidden cursor.
/// Restores the terminal when dropped.
pub struct Terminal {
    out: Stdout,
}

impl Terminal {
    pub fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let mut out = io::stdout();
        execute!(out, EnterAlternateScreen, Hide, Clear(ClearType::All))?;
        Ok(Self { out })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let res = execute!(self.out, Show, LeaveAlternateScreen)
            .and_then(|_| terminal::disable_raw_mode());
        if let Err(e) = res {
            warn!("cannot restore terminal: {e}");
        }
    }
}

impl Screen for Terminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }
    fn print_at(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row), Print(text))
    }
    fn erase(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All))
    }
    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// In-memory screen, text outside the grid is cut off.
#[derive(Debug, Clone)]
pub struct BufferScreen {
    cols: u16,
    rows: Vec<Vec<char>>,
}

impl BufferScreen {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            cols,
            rows: vec![vec![' '; cols as usize]; rows as usize],
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        *self = Self::new(cols, rows);
    }

    /// Row contents with trailing blanks trimmed.
    pub fn line(&self, row: u16) -> String {
        self.rows
            .get(row as usize)
            .map(|r| r.iter().collect::<String>().trim_end().to_owned())
            .unwrap_or_default()
    }

    pub fn contains(&self, text: &str) -> bool {
        (0..self.rows.len() as u16).any(|r| self.line(r).contains(text))
    }
}

impl Screen for BufferScreen {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.cols, self.rows.len() as u16))
    }
    fn print_at(&mut self, row: u16, col: u16, text: &str) -> io::Result<()> {
        if let Some(line) = self.rows.get_mut(row as usize) {
            for (cell, c) in line.iter_mut().skip(col as usize).zip(text.chars()) {
                *cell = c;
            }
        }
        Ok(())
    }
    fn erase(&mut self) -> io::Result<()> {
        self.rows.iter_mut().for_each(|r| r.fill(' '));
        Ok(())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
