use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use parish_bulletin_engine::document::{
    self as doc, Container, Document, Inline, ParagraphStyle, RunStyle,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use std::io::stdout;

const SHEET_NAMES: [&str; 2] = ["front sheet", "readings sheet"];

/// The non-blank paragraphs of one container, ready to draw.
pub struct Pane {
    pub label: String,
    pub lines: Vec<Line<'static>>,
}

/// Every container in the document that holds visible text, outermost first.
pub fn panes(document: &Document) -> Vec<Pane> {
    let mut out = Vec::new();
    for (i, section) in document.sections.iter().enumerate() {
        let label = SHEET_NAMES.get(i).copied().unwrap_or("sheet").to_string();
        collect(&section.body, label, &mut out);
    }
    out
}

fn collect(container: &Container, label: String, out: &mut Vec<Pane>) {
    let lines: Vec<Line<'static>> = container
        .paragraphs()
        .filter(|p| !p.is_blank())
        .map(paragraph_line)
        .collect();
    if !lines.is_empty() {
        out.push(Pane {
            label: label.clone(),
            lines,
        });
    }
    for table in container.tables() {
        for (r, row) in table.rows.iter().enumerate() {
            for (c, cell) in row.cells.iter().enumerate() {
                collect(cell, format!("{label} › {r},{c}"), out);
            }
        }
    }
}

fn paragraph_line(paragraph: &doc::Paragraph) -> Line<'static> {
    let mut spans = Vec::new();
    if paragraph.style == ParagraphStyle::ListBullet {
        spans.push(Span::raw("• "));
    }
    for inline in &paragraph.content {
        match inline {
            Inline::Run(run) => {
                spans.push(Span::styled(
                    run.text.replace('\t', "    "),
                    run_style(run.style),
                ));
            }
            Inline::Image(image) => spans.push(Span::styled(
                format!("[image {}]", image.path.display()),
                Style::default().fg(Color::Cyan),
            )),
        }
    }

    let line = Line::from(spans);
    if paragraph.alignment == doc::Alignment::Center {
        line.centered()
    } else {
        line
    }
}

fn run_style(style: RunStyle) -> Style {
    let mut out = Style::default();
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.underline {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    // terminals have no superscript
    if style.superscript {
        out = out.add_modifier(Modifier::DIM);
    }
    out
}

struct App {
    title: String,
    panes: Vec<Pane>,
    list_state: ListState,
}

impl App {
    fn new(title: String, document: &Document) -> Self {
        let panes = panes(document);
        let mut list_state = ListState::default();
        if !panes.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            title,
            panes,
            list_state,
        }
    }

    fn next_pane(&mut self) {
        if self.panes.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.panes.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    fn previous_pane(&mut self) {
        if self.panes.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.panes.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    fn selected(&self) -> Option<&Pane> {
        self.list_state.selected().and_then(|i| self.panes.get(i))
    }
}

/// Runs the preview until the user quits.
pub fn run(title: String, document: &Document) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(title, document);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_pane(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_pane(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    let items: Vec<ListItem> = app
        .panes
        .iter()
        .map(|pane| ListItem::new(Line::from(pane.label.clone())))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(app.title.clone()),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(list, chunks[0], &mut app.list_state);

    let lines = match app.selected() {
        Some(pane) => pane.lines.clone(),
        None => vec![Line::from("Nothing to preview")],
    };
    let preview = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("Preview"))
        .wrap(Wrap { trim: false });

    f.render_widget(preview, chunks[1]);

    let help = Paragraph::new(vec![Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next"),
    ])])
    .block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
