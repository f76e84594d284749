//! Interactive terminal browser.

use std::io::stdout;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use paddock_core::{Page, SectionId};
use paddock_protocol::{HitTarget, Interaction, ThemeMode, Viewport};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect,
    style::{Color, Style},
    widgets::Block,
};

use crate::config::DisplayConfig;
use crate::renderer::{CELL_H, CELL_W, HitRegion, Rasterizer, highlight, hit_test};

/// Poll interval while nothing moves.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub struct App {
    page: Page,
    mode: ThemeMode,
    tick: Duration,
    started: Instant,
    /// Logical pixels scrolled from the top of the page.
    scroll: f64,
    page_height: f64,
    viewport: Viewport,
    hits: Vec<HitRegion>,
    focus: Option<HitTarget>,
    hover: Option<HitTarget>,
    quit: bool,
}

impl App {
    pub fn new(display: &DisplayConfig, mode: ThemeMode) -> Self {
        Self {
            page: Page::new(0.0).with_reduced_motion(display.reduced_motion),
            mode,
            tick: Duration::from_millis(display.tick_ms),
            started: Instant::now(),
            scroll: 0.0,
            page_height: 0.0,
            viewport: Viewport::new(0.0, 0.0),
            hits: Vec::new(),
            focus: None,
            hover: None,
            quit: false,
        }
    }

    fn now(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    /// Take over the terminal until the user quits. The terminal is
    /// restored even when the loop fails.
    pub fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        tracing::info!("browser started");

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        tracing::info!("browser closed");
        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>) -> Result<()> {
        while !self.quit {
            terminal.draw(|frame| self.draw(frame))?;

            let wait = if self.page.is_animating(self.now()) {
                self.tick
            } else {
                IDLE_POLL
            };
            if event::poll(wait)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key(key),
                    Event::Mouse(mouse) => self.on_mouse(mouse),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let now = self.now();

        let header_area = Rect::new(area.x, area.y, area.width, area.height.min(1));
        let header = Block::default()
            .title(" paddock · F1 for Dummies | Tab focus · Enter select · Esc close · t theme · q quit ")
            .style(Style::default().fg(Color::White).bg(Color::Rgb(0xdc, 0x26, 0x26)));
        frame.render_widget(header, header_area);

        let content = Rect::new(
            area.x,
            area.y + header_area.height,
            area.width,
            area.height.saturating_sub(header_area.height),
        );
        let viewport = Viewport::new(
            f64::from(content.width) * CELL_W,
            f64::from(content.height) * CELL_H,
        );
        let rendered = self.page.render(&viewport, now);
        self.page_height = rendered.height;
        self.viewport = viewport;
        self.clamp_scroll();

        let buf = frame.buffer_mut();
        self.hits = Rasterizer::new(buf, content, self.scroll, self.mode).draw(&rendered.commands);

        let focused = self
            .focus
            .as_ref()
            .and_then(|f| self.hits.iter().rev().find(|r| &r.target == f))
            .map(|r| r.area);
        match focused {
            Some(cells) => highlight(buf, cells),
            // Scrolled away or closed.
            None => self.focus = None,
        }
    }

    fn clamp_scroll(&mut self) {
        let max = (self.page_height - self.viewport.height).max(0.0);
        self.scroll = self.scroll.clamp(0.0, max);
    }

    fn scroll_by(&mut self, dy: f64) {
        self.scroll += dy;
        self.clamp_scroll();
    }

    fn dispatch(&mut self, interaction: Interaction) {
        let now = self.now();
        if self.page.dispatch(&interaction, now) {
            tracing::debug!(?interaction, "state changed");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        let page_step = (self.viewport.height - CELL_H * 2.0).max(CELL_H);
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit = true,
            KeyCode::Esc => {
                self.dispatch(Interaction::Click(HitTarget::DriverClose));
                self.dispatch(Interaction::Click(HitTarget::PartClose));
            }
            KeyCode::Tab => self.move_focus(1),
            KeyCode::BackTab => self.move_focus(-1),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(target) = self.focus.clone() {
                    self.dispatch(Interaction::Click(target));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => self.scroll_by(CELL_H),
            KeyCode::Up | KeyCode::Char('k') => self.scroll_by(-CELL_H),
            KeyCode::PageDown => self.scroll_by(page_step),
            KeyCode::PageUp => self.scroll_by(-page_step),
            KeyCode::Home => self.scroll = 0.0,
            KeyCode::End => self.scroll_by(f64::MAX / 2.0),
            KeyCode::Char(c @ '1'..='6') => self.jump_to(usize::from(c as u8 - b'1')),
            KeyCode::Char('t') => {
                self.mode = match self.mode {
                    ThemeMode::Dark => ThemeMode::Light,
                    ThemeMode::Light => ThemeMode::Dark,
                };
            }
            KeyCode::Char('m') => {
                let reduced = !self.page.reduced_motion();
                self.page.set_reduced_motion(reduced);
            }
            _ => {}
        }
    }

    fn jump_to(&mut self, index: usize) {
        let Some(section) = SectionId::ALL.get(index).copied() else {
            return;
        };
        if let Some(slot) = self
            .page
            .layout(&self.viewport, self.now())
            .into_iter()
            .find(|s| s.id == section)
        {
            self.scroll = slot.top;
            self.clamp_scroll();
        }
    }

    /// Cycle keyboard focus through the visible targets. Focus doubles as
    /// hover, so the tyre picker and essentials cards respond to it.
    fn move_focus(&mut self, step: isize) {
        let mut targets: Vec<&HitTarget> = Vec::new();
        for region in &self.hits {
            let focusable = !matches!(
                region.target,
                HitTarget::ModalSurface | HitTarget::PartBackdrop | HitTarget::DriverBackdrop
            );
            if focusable && !targets.contains(&&region.target) {
                targets.push(&region.target);
            }
        }
        if targets.is_empty() {
            return;
        }
        let len = targets.len() as isize;
        let next = match self.focus.as_ref().and_then(|f| targets.iter().position(|t| *t == f)) {
            Some(i) => (i as isize + step).rem_euclid(len),
            None if step >= 0 => 0,
            None => len - 1,
        };
        let target = targets[next as usize].clone();
        self.set_hover(Some(target.clone()));
        self.focus = Some(target);
    }

    fn set_hover(&mut self, target: Option<HitTarget>) {
        if self.hover == target {
            return;
        }
        if let Some(old) = self.hover.take() {
            self.dispatch(Interaction::HoverLeave(old));
        }
        if let Some(new) = &target {
            self.dispatch(Interaction::HoverEnter(new.clone()));
        }
        self.hover = target;
    }

    fn on_mouse(&mut self, mouse: MouseEvent) {
        let target = hit_test(&self.hits, mouse.column, mouse.row).cloned();
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(target) = target {
                    self.dispatch(Interaction::Click(target));
                }
            }
            MouseEventKind::Moved => self.set_hover(target),
            MouseEventKind::ScrollDown => self.scroll_by(CELL_H * 3.0),
            MouseEventKind::ScrollUp => self.scroll_by(-CELL_H * 3.0),
            _ => {}
        }
    }
}
