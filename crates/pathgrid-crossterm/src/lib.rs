//! Crossterm terminal driver for the pathgrid visualizer.
//!
//! Provides a [`TerminalDriver`] that paints a [`Grid`] as coloured blocks
//! and decodes mouse and keyboard events into editor [`Input`]s.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use pathgrid_core::{Grid, Pos, Role};

/// A user action, already resolved to grid coordinates.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Input {
    /// Left click or drag on a cell.
    Primary(Pos),
    /// Right click or drag on a cell.
    Secondary(Pos),
    /// Start a search.
    Run,
    /// Rebuild an empty grid.
    Reset,
    /// Throw random barriers on the grid.
    Scatter,
    Quit,
}

/// Colour of each role on screen.
pub fn role_color(role: Role) -> Color {
    match role {
        Role::Empty => Color::Rgb {
            r: 248,
            g: 248,
            b: 255,
        },
        Role::Barrier => Color::Rgb {
            r: 41,
            g: 36,
            b: 33,
        },
        Role::Start => Color::Rgb {
            r: 138,
            g: 43,
            b: 226,
        },
        Role::End => Color::Rgb {
            r: 255,
            g: 125,
            b: 64,
        },
        Role::Frontier => Color::Rgb { r: 0, g: 201, b: 87 },
        Role::Visited => Color::Rgb {
            r: 220,
            g: 20,
            b: 60,
        },
        Role::Path => Color::Rgb {
            r: 255,
            g: 185,
            b: 15,
        },
    }
}

/// Where the grid sits on the terminal: each cell is `cell_width` columns
/// wide and one row tall, with the top-left cell at the screen origin.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub dimension: i32,
    pub cell_width: u16,
}

impl Layout {
    pub fn new(dimension: i32) -> Self {
        Self {
            dimension,
            cell_width: 2,
        }
    }

    /// The grid cell under terminal position (`column`, `row`).
    pub fn cell_at(&self, column: u16, row: u16) -> Option<Pos> {
        if self.cell_width == 0 {
            return None;
        }
        let pos = Pos::new(row as i32, (column / self.cell_width) as i32);
        (pos.row < self.dimension && pos.col < self.dimension).then_some(pos)
    }

    /// Terminal position of the left edge of `pos`.
    pub fn screen_pos(&self, pos: Pos) -> (u16, u16) {
        (pos.col as u16 * self.cell_width, pos.row as u16)
    }

    /// First terminal row below the grid.
    pub fn status_row(&self) -> u16 {
        self.dimension as u16
    }
}

/// Maps a crossterm key event to an [`Input`].
fn key_input(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Some(Input::Quit),
        KeyCode::Char(' ') => Some(Input::Run),
        KeyCode::Char('/') => Some(Input::Reset),
        KeyCode::Char('r') => Some(Input::Scatter),
        KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

/// Maps a crossterm mouse event to an [`Input`]. Presses and drags act
/// alike, so holding a button paints a stroke.
fn mouse_input(me: MouseEvent, layout: &Layout) -> Option<Input> {
    let button = match me.kind {
        MouseEventKind::Down(b) | MouseEventKind::Drag(b) => b,
        _ => return None,
    };
    let pos = layout.cell_at(me.column, me.row)?;
    match button {
        MouseButton::Left => Some(Input::Primary(pos)),
        MouseButton::Right => Some(Input::Secondary(pos)),
        MouseButton::Middle => None,
    }
}

/// Decode any terminal event.
pub fn to_input(ev: Event, layout: &Layout) -> Option<Input> {
    match ev {
        Event::Key(key) => key_input(key),
        Event::Mouse(me) => mouse_input(me, layout),
        _ => None,
    }
}

/// A terminal back-end for the visualizer using crossterm.
pub struct TerminalDriver {
    layout: Layout,
}

impl TerminalDriver {
    /// Create a driver for a `dimension × dimension` grid.
    pub fn new(dimension: i32) -> Self {
        Self {
            layout: Layout::new(dimension),
        }
    }

    #[inline]
    pub fn layout(&self) -> Layout {
        self.layout
    }

    /// Enter raw mode and the alternate screen, with mouse capture.
    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All),
            event::EnableMouseCapture
        )?;
        Ok(())
    }

    /// Wait up to `timeout` for the first event that maps to an [`Input`].
    /// Events that do not map are dropped.
    pub fn poll(&mut self, timeout: Duration) -> io::Result<Option<Input>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }
        while event::poll(Duration::ZERO)? {
            if let Some(input) = to_input(event::read()?, &self.layout) {
                return Ok(Some(input));
            }
        }
        Ok(None)
    }

    fn queue_cell(&self, out: &mut impl Write, pos: Pos, role: Role) -> io::Result<()> {
        let (x, y) = self.layout.screen_pos(pos);
        let blank = " ".repeat(self.layout.cell_width as usize);
        queue!(
            out,
            cursor::MoveTo(x, y),
            SetBackgroundColor(role_color(role)),
            Print(blank)
        )
    }

    /// Repaint every cell.
    pub fn draw_grid(&mut self, grid: &Grid) -> io::Result<()> {
        let mut stdout = io::stdout();
        for (pos, role) in grid.roles() {
            self.queue_cell(&mut stdout, pos, role)?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    /// Repaint only the given cells.
    pub fn draw_cells(&mut self, cells: &[(Pos, Role)]) -> io::Result<()> {
        let mut stdout = io::stdout();
        for &(pos, role) in cells {
            self.queue_cell(&mut stdout, pos, role)?;
        }
        queue!(stdout, ResetColor)?;
        stdout.flush()
    }

    /// Replace the status line under the grid.
    pub fn draw_status(&mut self, text: &str) -> io::Result<()> {
        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::MoveTo(0, self.layout.status_row()),
            terminal::Clear(ClearType::CurrentLine),
            SetForegroundColor(Color::Grey),
            Print(text),
            ResetColor
        )?;
        stdout.flush()
    }

    /// Restore the terminal.
    pub fn close(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
