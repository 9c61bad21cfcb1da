//! Keyboard input handling and interactive loop.
//!
//! The menu is drawn on stderr so stdout stays free for the confirmed paths.

use std::io::{self, Write};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::debug;

use super::menu::{TreeAction, TreeMenu};
use super::render::RenderOptions;

/// Convert a keyboard event to a TreeAction
pub fn key_to_action(key: KeyEvent) -> Option<TreeAction> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('d') => Some(TreeAction::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(TreeAction::Up),
        KeyCode::Down | KeyCode::Char('j') => Some(TreeAction::Down),
        KeyCode::Home | KeyCode::Char('g') => Some(TreeAction::First),
        KeyCode::End | KeyCode::Char('G') => Some(TreeAction::Last),
        KeyCode::Char(' ') => Some(TreeAction::Toggle),
        KeyCode::Right | KeyCode::Char('l') => Some(TreeAction::Expand),
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Backspace => Some(TreeAction::Collapse),
        KeyCode::Char('a') => Some(TreeAction::SelectAll),
        KeyCode::Char('n') => Some(TreeAction::SelectNone),
        KeyCode::Char('i') => Some(TreeAction::Invert),
        KeyCode::Enter => Some(TreeAction::Confirm),
        KeyCode::Char('q') | KeyCode::Esc => Some(TreeAction::Quit),
        _ => None,
    }
}

/// Restores the terminal even when the loop exits through an error.
struct RawModeGuard;

impl RawModeGuard {
    fn enter(out: &mut impl Write) -> io::Result<Self> {
        use crossterm::{cursor, execute, terminal};

        terminal::enable_raw_mode()?;
        execute!(out, terminal::EnterAlternateScreen, cursor::Hide)?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        use crossterm::{cursor, execute, terminal};

        let _ = execute!(io::stderr(), cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

fn draw(out: &mut impl Write, menu: &TreeMenu, options: &RenderOptions) -> io::Result<()> {
    use crossterm::{
        cursor, queue,
        terminal::{self, ClearType},
    };

    queue!(out, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))?;

    write!(out, "Select files for snapshot\r\n\r\n")?;

    if menu.rows().is_empty() {
        write!(out, "  (no changes)\r\n")?;
    }
    for line in menu.render(options).lines() {
        write!(out, "{}\r\n", line)?;
    }

    let rule_width = options.width.unwrap_or(63).min(63);
    write!(out, "{}\r\n", options.icons.rule().repeat(rule_width))?;

    for line in menu.render_status_bar(&options.icons).lines() {
        write!(out, "{}\r\n", line)?;
    }
    write!(out, "\r\n")?;
    for line in menu.render_help_bar().lines() {
        write!(out, "{}\r\n", line)?;
    }

    out.flush()
}

/// Run the tree menu interactively.
///
/// Returns the selected paths when confirmed, `None` when the user quits.
pub fn run_interactive(
    mut menu: TreeMenu,
    options: &RenderOptions,
) -> io::Result<Option<Vec<String>>> {
    use crossterm::event::{self, Event, KeyEventKind};

    let mut out = io::stderr();
    let guard = RawModeGuard::enter(&mut out)?;
    draw(&mut out, &menu, options)?;

    let confirmed = loop {
        match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                let Some(action) = key_to_action(key) else {
                    continue;
                };
                debug!(?action, "menu action");
                match action {
                    TreeAction::Confirm => break true,
                    TreeAction::Quit => break false,
                    _ => {
                        menu.handle_action(action);
                        draw(&mut out, &menu, options)?;
                    }
                }
            }
            Event::Resize(..) => draw(&mut out, &menu, options)?,
            _ => {}
        }
    };
    drop(guard);

    if confirmed {
        Ok(Some(menu.confirm()))
    } else {
        menu.cancel();
        Ok(None)
    }
}
