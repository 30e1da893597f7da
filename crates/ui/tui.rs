use crate::app::{App, Bound};
use crate::data::Data;
use rental::aggregate::CategoryTable;
use rental::{Dataset, DateRange};
use std::{error::Error, io};

use ratatui::{
    backend::{Backend, CrosstermBackend},
    crossterm::{
        event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
        execute,
        terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    },
    layout::{Constraint, Layout, Margin, Rect},
    style::{self, Color, Modifier, Style, Stylize},
    text::{Line, Span, Text},
    Frame, Terminal,
    widgets::{
        Bar, BarChart, BarGroup, Block, BorderType, Cell, HighlightSpacing, Paragraph, Row,
        Scrollbar, ScrollbarOrientation, ScrollbarState, Table, TableState,
    },
};
use style::palette::tailwind;
use unicode_width::UnicodeWidthStr;

const PALETTES: [tailwind::Palette; 4] = [
    tailwind::BLUE,
    tailwind::EMERALD,
    tailwind::INDIGO,
    tailwind::RED,
];
const INFO_TEXT: &str = "(Esc) quit | (Tab) start/end | (←/→) ±1 day | (PgUp/PgDn) ±30 days | (r) reset | (↑/↓) scroll | (c) color";

const ITEM_HEIGHT: usize = 1;
const MONTH_STEP: i64 = 30;

struct Colors {
    buffer_bg: Color,
    header_bg: Color,
    header_fg: Color,
    row_fg: Color,
    selected_style_fg: Color,
    normal_row_color: Color,
    alt_row_color: Color,
    footer_border_color: Color,
    bar_fg: Color,
    alt_bar_fg: Color,
    focus_fg: Color,
}

impl Colors {
    const fn new(color: &tailwind::Palette) -> Self {
        Self {
            buffer_bg: tailwind::SLATE.c950,
            header_bg: color.c900,
            header_fg: tailwind::SLATE.c200,
            row_fg: tailwind::SLATE.c200,
            selected_style_fg: color.c400,
            normal_row_color: tailwind::SLATE.c950,
            alt_row_color: tailwind::SLATE.c900,
            footer_border_color: color.c400,
            bar_fg: color.c500,
            alt_bar_fg: tailwind::AMBER.c500,
            focus_fg: color.c300,
        }
    }
}

struct Dashboard<'a> {
    app: App<'a>,
    state: TableState,
    longest_item_lens: (u16, u16, u16, u16),
    scroll_state: ScrollbarState,
    colors: Colors,
    color_index: usize,
}

impl<'a> Dashboard<'a> {
    fn new(app: App<'a>) -> Self {
        let mut dashboard = Self {
            state: TableState::default().with_selected(0),
            longest_item_lens: (0, 0, 0, 0),
            scroll_state: ScrollbarState::new(0),
            colors: Colors::new(&PALETTES[0]),
            color_index: 0,
            app,
        };
        dashboard.sync_items();
        dashboard
    }

    /// Rows change with the range; keep selection and widths in step.
    fn sync_items(&mut self) {
        let len = self.app.items.len();
        self.longest_item_lens = constraint_len_calculator(&self.app.items);
        self.scroll_state = ScrollbarState::new(len.saturating_sub(1) * ITEM_HEIGHT);
        let selected = match self.state.selected() {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
        self.state.select(selected);
        self.scroll_state = self
            .scroll_state
            .position(selected.unwrap_or(0) * ITEM_HEIGHT);
    }

    pub fn next(&mut self) {
        if self.app.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i >= self.app.items.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i * ITEM_HEIGHT);
    }

    pub fn previous(&mut self) {
        if self.app.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    self.app.items.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
        self.scroll_state = self.scroll_state.position(i * ITEM_HEIGHT);
    }

    fn shift(&mut self, days: i64) {
        self.app.shift(days);
        self.sync_items();
    }

    fn reset(&mut self) {
        self.app.reset();
        self.sync_items();
    }

    pub fn next_color(&mut self) {
        self.color_index = (self.color_index + 1) % PALETTES.len();
    }

    pub fn previous_color(&mut self) {
        let count = PALETTES.len();
        self.color_index = (self.color_index + count - 1) % count;
    }

    pub fn set_colors(&mut self) {
        self.colors = Colors::new(&PALETTES[self.color_index]);
    }
}

/// Run the interactive dashboard until the user quits.
pub fn run(dataset: &Dataset, title: &str, range: DateRange) -> Result<(), Box<dyn Error>> {
    // setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // create app and run it
    let dashboard = Dashboard::new(App::new(dataset, title, range));
    let res = run_app(&mut terminal, dashboard);

    // restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res.map_err(Into::into)
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut dashboard: Dashboard) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, &mut dashboard))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Char('j') | KeyCode::Down => dashboard.next(),
                    KeyCode::Char('k') | KeyCode::Up => dashboard.previous(),
                    KeyCode::Char('l') | KeyCode::Right => dashboard.shift(1),
                    KeyCode::Char('h') | KeyCode::Left => dashboard.shift(-1),
                    KeyCode::PageDown => dashboard.shift(MONTH_STEP),
                    KeyCode::PageUp => dashboard.shift(-MONTH_STEP),
                    KeyCode::Tab | KeyCode::BackTab => dashboard.app.toggle_focus(),
                    KeyCode::Char('r') => dashboard.reset(),
                    KeyCode::Char('c') => dashboard.next_color(),
                    KeyCode::Char('C') => dashboard.previous_color(),
                    _ => {}
                }
            }
        }
    }
}

fn ui(f: &mut Frame, dashboard: &mut Dashboard) {
    let rects = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Min(10),
        Constraint::Length(3),
    ])
    .split(f.area());

    dashboard.set_colors();
    f.render_widget(Block::new().bg(dashboard.colors.buffer_bg), f.area());

    render_header(f, dashboard, rects[0]);
    render_metrics(f, dashboard, rects[1]);

    let middle =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(rects[2]);
    render_monthly(f, dashboard, middle[0]);
    render_seasons(f, dashboard, middle[1]);

    let lower = Layout::horizontal([
        Constraint::Percentage(20),
        Constraint::Percentage(25),
        Constraint::Percentage(20),
        Constraint::Percentage(35),
    ])
    .split(rects[3]);
    let flags = Layout::vertical([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(lower[2]);
    let summaries = &dashboard.app.summaries;
    render_category(f, dashboard, lower[0], "Weatherly Rentals", &summaries.weathersit);
    render_category(f, dashboard, lower[1], "Weekday", &summaries.weekday);
    render_category(f, dashboard, flags[0], "Working Day", &summaries.workingday);
    render_category(f, dashboard, flags[1], "Holiday", &summaries.holiday);

    render_table(f, dashboard, lower[3]);
    render_scrollbar(f, dashboard, lower[3]);

    render_footer(f, dashboard, rects[4]);
}

fn bordered(title: &str, dashboard: &Dashboard) -> Block<'static> {
    Block::bordered()
        .title(title.to_string())
        .border_style(Style::new().fg(dashboard.colors.footer_border_color))
}

fn render_header(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let app = &dashboard.app;
    let bound_style = |bound: Bound| {
        if app.focus == bound {
            Style::new()
                .fg(dashboard.colors.focus_fg)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::new().fg(dashboard.colors.row_fg)
        }
    };
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", app.title),
            Style::new().add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(app.range.start.to_string(), bound_style(Bound::Start)),
        Span::raw(" → "),
        Span::styled(app.range.end.to_string(), bound_style(Bound::End)),
        Span::raw(format!(" | {} days, {} rows", app.range.days(), app.selected_rows)),
    ]);
    let header = Paragraph::new(line)
        .style(Style::new().fg(dashboard.colors.row_fg))
        .block(bordered("Bicycle Rental Dashboard", dashboard));
    f.render_widget(header, area);
}

fn render_metrics(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let headline = dashboard.app.summaries.headline;
    let cols = Layout::horizontal([
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
        Constraint::Ratio(1, 3),
    ])
    .split(area);
    let metrics = [
        ("Casual User", headline.casual),
        ("Registered User", headline.registered),
        ("Total Rent", headline.total),
    ];
    for (i, (label, value)) in metrics.into_iter().enumerate() {
        let p = Paragraph::new(value.to_string())
            .style(
                Style::new()
                    .fg(dashboard.colors.row_fg)
                    .add_modifier(Modifier::BOLD),
            )
            .centered()
            .block(bordered(label, dashboard));
        f.render_widget(p, cols[i]);
    }
}

/// Bars of width that fit `n` bars (plus gaps) into `area`.
fn bar_width(area: Rect, n: usize, gap: u16) -> u16 {
    if n == 0 {
        return 1;
    }
    let inner = area.width.saturating_sub(2);
    let per_bar = inner / u16::try_from(n).unwrap_or(u16::MAX);
    per_bar.saturating_sub(gap).clamp(1, 12)
}

fn render_monthly(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let monthly = &dashboard.app.summaries.monthly;
    let bars: Vec<Bar> = monthly
        .rows()
        .iter()
        .map(|(month, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(month.as_str()))
                .text_value(value.to_string())
        })
        .collect();
    let chart = BarChart::default()
        .block(bordered("Monthly Rentals", dashboard))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, bars.len(), 1))
        .bar_gap(1)
        .bar_style(Style::new().fg(dashboard.colors.bar_fg))
        .value_style(
            Style::new()
                .fg(dashboard.colors.header_fg)
                .bg(dashboard.colors.bar_fg),
        )
        .label_style(Style::new().fg(dashboard.colors.row_fg));
    f.render_widget(chart, area);
}

fn render_seasons(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let season = &dashboard.app.summaries.season;
    let registered = Style::new().fg(dashboard.colors.bar_fg);
    let casual = Style::new().fg(dashboard.colors.alt_bar_fg);
    let title = Line::from(vec![
        Span::raw("Seasons Rentals "),
        Span::styled("■ registered ", registered),
        Span::styled("■ casual", casual),
    ]);
    let mut chart = BarChart::default()
        .block(
            Block::bordered()
                .title(title)
                .border_style(Style::new().fg(dashboard.colors.footer_border_color)),
        )
        .bar_width(bar_width(area, season.len() * 2, 1))
        .bar_gap(0)
        .group_gap(2)
        .label_style(Style::new().fg(dashboard.colors.row_fg))
        .value_style(Style::new().fg(dashboard.colors.header_fg));
    for (name, split) in season.rows() {
        let group = BarGroup::default()
            .label(Line::from(name.as_str()).centered())
            .bars(&[
                Bar::default()
                    .value(split.registered)
                    .text_value(split.registered.to_string())
                    .style(registered),
                Bar::default()
                    .value(split.casual)
                    .text_value(split.casual.to_string())
                    .style(casual),
            ]);
        chart = chart.data(group);
    }
    f.render_widget(chart, area);
}

fn render_category(
    f: &mut Frame,
    dashboard: &Dashboard,
    area: Rect,
    title: &str,
    table: &CategoryTable,
) {
    let bars: Vec<Bar> = table
        .rows()
        .iter()
        .map(|(key, value)| {
            Bar::default()
                .value(*value)
                .label(Line::from(key.as_str()))
                .text_value(value.to_string())
        })
        .collect();
    let chart = BarChart::default()
        .block(bordered(title, dashboard))
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(area, bars.len(), 1))
        .bar_gap(1)
        .bar_style(Style::new().fg(dashboard.colors.bar_fg))
        .value_style(
            Style::new()
                .fg(dashboard.colors.header_fg)
                .bg(dashboard.colors.bar_fg),
        )
        .label_style(Style::new().fg(dashboard.colors.row_fg));
    f.render_widget(chart, area);
}

fn render_table(f: &mut Frame, dashboard: &mut Dashboard, area: Rect) {
    let header_style = Style::default()
        .fg(dashboard.colors.header_fg)
        .bg(dashboard.colors.header_bg);
    let selected_style = Style::default()
        .add_modifier(Modifier::REVERSED)
        .fg(dashboard.colors.selected_style_fg);

    let header = ["group", "key", "rentals", "share"]
        .into_iter()
        .map(Cell::from)
        .collect::<Row>()
        .style(header_style)
        .height(1);
    let rows = dashboard.app.items.iter().enumerate().map(|(i, data)| {
        let color = match i % 2 {
            0 => dashboard.colors.normal_row_color,
            _ => dashboard.colors.alt_row_color,
        };
        let item = data.ref_array();
        item.into_iter()
            .map(|content| Cell::from(Text::from(content.as_str())))
            .collect::<Row>()
            .style(Style::new().fg(dashboard.colors.row_fg).bg(color))
            .height(1)
    });
    let bar = " █ ";
    let lens = dashboard.longest_item_lens;
    let t = Table::new(
        rows,
        [
            // + 1 is for padding.
            Constraint::Length(lens.0 + 1),
            Constraint::Min(lens.1 + 1),
            Constraint::Min(lens.2 + 1),
            Constraint::Min(lens.3),
        ],
    )
    .header(header)
    .block(bordered("Breakdown", dashboard))
    .highlight_style(selected_style)
    .highlight_symbol(Text::from(bar))
    .bg(dashboard.colors.buffer_bg)
    .highlight_spacing(HighlightSpacing::Always);
    f.render_stateful_widget(t, area, &mut dashboard.state);
}

fn constraint_len_calculator(items: &[Data]) -> (u16, u16, u16, u16) {
    let group_len = items
        .iter()
        .map(Data::group)
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);
    let key_len = items
        .iter()
        .map(Data::key)
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);
    let rentals_len = items
        .iter()
        .map(Data::rentals)
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);
    let share_len = items
        .iter()
        .map(Data::share)
        .map(UnicodeWidthStr::width)
        .max()
        .unwrap_or(0);

    #[allow(clippy::cast_possible_truncation)]
    (
        group_len as u16,
        key_len as u16,
        rentals_len as u16,
        share_len as u16,
    )
}

fn render_scrollbar(f: &mut Frame, dashboard: &mut Dashboard, area: Rect) {
    f.render_stateful_widget(
        Scrollbar::default()
            .orientation(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
        area.inner(Margin {
            vertical: 1,
            horizontal: 1,
        }),
        &mut dashboard.scroll_state,
    );
}

fn render_footer(f: &mut Frame, dashboard: &Dashboard, area: Rect) {
    let info_footer = Paragraph::new(Line::from(INFO_TEXT))
        .style(
            Style::new()
                .fg(dashboard.colors.row_fg)
                .bg(dashboard.colors.buffer_bg),
        )
        .centered()
        .block(
            Block::bordered()
                .border_type(BorderType::Double)
                .border_style(Style::new().fg(dashboard.colors.footer_border_color)),
        );
    f.render_widget(info_footer, area);
}
