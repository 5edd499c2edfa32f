use crate::admin::{self, AdminStats};
use crate::filters::FilterField;
use crate::models::{ExamRecord, MarkBand, QuestionRef, ResultStatus, PASS_PERCENTAGE};
use crate::orchestrator::ViewPhase;
use crate::query::{QueryField, SubmissionState};
use crate::ui::app::App;
use crate::ui::state::{AdminTab, Focus, NoticeKind, Screen};
use crate::viewer::{DocumentStatus, PagerItem, ViewMode};
use std::borrow::Cow;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Cell, Clear, Gauge, List, ListItem, Paragraph, Row, Table, Tabs, Wrap,
    },
    Frame,
};

pub fn render_ui(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, app, chunks[0]);
    match app.ui.screen {
        Screen::Portal => render_portal(frame, app, chunks[1]),
        Screen::Admin => render_admin(frame, app, chunks[1]),
    }
    render_status_bar(frame, app, chunks[2]);

    if app.form.is_open() {
        render_query_dialog(frame, app);
    }
}

fn bold<'a>(text: impl Into<Cow<'a, str>>) -> Span<'a> {
    Span::styled(text, Style::default().add_modifier(Modifier::BOLD))
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::Cyan)
    }
}

fn band_color(band: MarkBand) -> Color {
    match band {
        MarkBand::High => Color::Green,
        MarkBand::Medium => Color::Yellow,
        MarkBand::Low => Color::Red,
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let screen = match app.ui.screen {
        Screen::Portal => "Answer Paper Viewer",
        Screen::Admin => "Admin Dashboard",
    };
    let title = Paragraph::new(Line::from(vec![
        Span::styled(
            app.config.college_name.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("  |  {}", screen)),
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    )
    .alignment(Alignment::Center);

    frame.render_widget(title, area);
}

fn render_portal(frame: &mut Frame, app: &App, area: Rect) {
    // Fullscreen hands the whole body to the document.
    if app.view.record().is_some() && app.viewer.state().fullscreen {
        render_viewer(frame, app, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(6)])
        .split(area);

    render_filters(frame, app, chunks[0]);

    match app.view.phase() {
        ViewPhase::Welcome | ViewPhase::Stale => render_empty_state(frame, app, chunks[1]),
        ViewPhase::NoRecord {
            student_id,
            subject_code,
        } => render_no_record(frame, app, student_id, subject_code, chunks[1]),
        ViewPhase::Showing(record) => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
                .split(chunks[1]);
            render_viewer(frame, app, body[0]);
            render_sidebar(frame, app, record, body[1]);
        }
    }
}

fn render_filters(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.ui.focus == Focus::Filters;
    let catalog = app.view.catalog();
    let filters = app.view.filters();

    let mut lines: Vec<Line> = FilterField::ALL
        .iter()
        .map(|field| {
            let selected = focused && app.ui.filter_field == *field;
            let value = filters.get(*field);
            let shown = if value.is_empty() {
                Span::styled(field.placeholder(), Style::default().fg(Color::DarkGray))
            } else {
                let label = catalog
                    .label_for(*field, value)
                    .unwrap_or_else(|| value.to_string());
                let detail = catalog
                    .options(*field)
                    .into_iter()
                    .find(|o| o.value == value)
                    .and_then(|o| o.detail)
                    .map(|d| format!(" - {}", d))
                    .unwrap_or_default();
                Span::raw(format!("{}{}", label, detail))
            };

            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(vec![
                Span::styled(format!("{}{:<12}", marker, field.label()), style),
                Span::raw("< "),
                shown,
                Span::raw(" >"),
            ])
        })
        .collect();

    if !filters.is_complete() {
        lines.push(Line::from(Span::styled(
            "  Please select all filters to view the answer paper",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let filters_panel = Paragraph::new(lines).block(
        Block::default()
            .title("Search Answer Paper [↑↓: Field | ←→: Choose | Enter: Search | r: Reset]")
            .borders(Borders::ALL)
            .border_style(focus_style(focused)),
    );

    frame.render_widget(filters_panel, area);
}

fn render_empty_state(frame: &mut Frame, app: &App, area: Rect) {
    let mut text = Vec::new();
    if app.view.panels().welcome {
        text.push(Line::from(Span::styled(
            format!("Welcome to {}", app.config.college_name),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        )));
        text.push(Line::from(
            "View your evaluated answer papers, question-wise marks and raise queries.",
        ));
        text.push(Line::from(""));
    }
    text.push(Line::from(bold("No Answer Paper Selected")));
    text.push(Line::from(if app.view.has_searched() {
        "The filters changed. Press Enter to search again."
    } else {
        "Select the student, semester, exam, subject and fee status above, then press Enter."
    }));

    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_no_record(
    frame: &mut Frame,
    app: &App,
    student_id: &str,
    subject_code: &str,
    area: Rect,
) {
    let catalog = app.view.catalog();
    let student = catalog
        .label_for(FilterField::Student, student_id)
        .unwrap_or_else(|| student_id.to_string());

    let text = vec![
        Line::from(Span::styled(
            "No Evaluated Answer Paper",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!(
            "No evaluated paper was found for {} in {}.",
            student, subject_code
        )),
        Line::from("Check the filters or contact the examination department."),
    ];

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn render_viewer(frame: &mut Frame, app: &App, area: Rect) {
    let viewer = &app.viewer;
    let state = viewer.state();
    let title = app
        .view
        .record()
        .map(|r| r.document_title())
        .unwrap_or_default();

    let block = Block::default()
        .title(format!("Answer Sheet: {}", title))
        .borders(Borders::ALL)
        .border_style(focus_style(app.ui.focus == Focus::Viewer));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

    let toolbar = Paragraph::new(Line::from(vec![
        bold(format!(" Page {} of {} ", state.page_number, state.num_pages.max(1))),
        Span::raw(format!(
            "| Zoom {}% | Rotation {}° | {} | [n/p +/- o f v d R]",
            state.zoom_percent(),
            state.rotation,
            state.view_mode.label()
        )),
    ]))
    .style(Style::default().fg(Color::Gray));
    frame.render_widget(toolbar, chunks[0]);

    match viewer.status() {
        DocumentStatus::Idle => {}
        DocumentStatus::Loading { .. } => {
            let loading = Paragraph::new("Loading answer paper...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Cyan));
            frame.render_widget(loading, chunks[1]);
        }
        DocumentStatus::Failed { reason, .. } => {
            let failed = Paragraph::new(vec![
                Line::from(Span::styled(
                    "Failed to load the answer paper",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )),
                Line::from(reason.as_str()),
                Line::from(""),
                Line::from("Press R to retry"),
            ])
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
            frame.render_widget(failed, chunks[1]);
        }
        DocumentStatus::Ready { .. } => render_pages(frame, app, chunks[1]),
    }

    let pager: Vec<Span> = viewer
        .pager_pages()
        .into_iter()
        .map(|item| match item {
            PagerItem::Page(n) if n == state.page_number => Span::styled(
                format!("[{}]", n),
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
            ),
            PagerItem::Page(n) => Span::raw(format!(" {} ", n)),
            PagerItem::Ellipsis => Span::raw(" ... "),
        })
        .collect();
    frame.render_widget(
        Paragraph::new(Line::from(pager)).alignment(Alignment::Center),
        chunks[2],
    );
}

/// Page placeholders: one sheet in single view, a column of sheets when scrolling.
fn render_pages(frame: &mut Frame, app: &App, area: Rect) {
    let state = app.viewer.state();
    let size_kb = app.document.as_ref().map(|d| d.bytes.len() / 1024).unwrap_or(0);

    let pages: Vec<u32> = match state.view_mode {
        ViewMode::Single => vec![state.page_number],
        ViewMode::Continuous => {
            // Keep the current page in view.
            let visible = (area.height / 4).max(1) as u32;
            let last_first = state.num_pages.saturating_sub(visible) + 1;
            let first = state
                .page_number
                .saturating_sub(visible / 2)
                .max(1)
                .min(last_first);
            (first..=(first + visible - 1).min(state.num_pages)).collect()
        }
    };

    let sheet_width =
        (((area.width as f64) * state.scale() / 1.5).round() as u16).clamp(1, area.width.max(1));

    let constraints: Vec<Constraint> = pages
        .iter()
        .map(|_| match state.view_mode {
            ViewMode::Single => Constraint::Min(3),
            ViewMode::Continuous => Constraint::Length(4),
        })
        .collect();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    for (page, row) in pages.iter().zip(rows.iter()) {
        let x = row.x + row.width.saturating_sub(sheet_width) / 2;
        let sheet = Rect::new(x, row.y, sheet_width.min(row.width), row.height);
        let current = *page == state.page_number;
        let paragraph = Paragraph::new(vec![
            Line::from(bold(format!("Page {}", page))),
            Line::from(format!("{} KB document, rotated {}°", size_kb, state.rotation)),
        ])
        .block(Block::default().borders(Borders::ALL).border_style(if current {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        }))
        .alignment(Alignment::Center);
        frame.render_widget(paragraph, sheet);
    }
}

fn render_sidebar(frame: &mut Frame, app: &App, record: &ExamRecord, area: Rect) {
    let focused = app.ui.focus == Focus::Sidebar;
    let block = Block::default()
        .title("Result [m: Marks | e: Export | c: Raise Query]")
        .borders(Borders::ALL)
        .border_style(focus_style(focused));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let marks_height = if app.ui.marks_open {
        record.question_marks.len() as u16 + record.sections().len() as u16 * 2 + 2
    } else {
        1
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(marks_height),
            Constraint::Length(2),
            Constraint::Min(2),
        ])
        .split(inner);

    let status_color = match record.status {
        ResultStatus::Pass => Color::Green,
        ResultStatus::Fail => Color::Red,
    };
    let score = Paragraph::new(vec![
        Line::from(vec![
            bold(format!("{}/{}", record.marks_obtained, record.total_marks)),
            Span::raw(format!("  Grade {}  ", record.grade)),
            Span::styled(
                record.status.label(),
                Style::default().fg(status_color).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(Span::styled(
            format!("Pass: {}%", PASS_PERCENTAGE),
            Style::default().fg(Color::DarkGray),
        )),
    ]);
    frame.render_widget(score, chunks[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(status_color))
        .percent(record.percentage().min(100) as u16)
        .label(format!("{}%", record.percentage()));
    frame.render_widget(gauge, chunks[1]);

    let info = Paragraph::new(vec![
        Line::from(vec![bold("Student: "), Span::raw(&record.student_name)]),
        Line::from(vec![bold("Roll No: "), Span::raw(&record.roll_number)]),
        Line::from(vec![
            bold("Subject: "),
            Span::raw(format!("{} - {}", record.subject_code, record.subject_name)),
        ]),
        Line::from(vec![
            bold("Exam: "),
            Span::raw(format!("{} {} ({})", record.exam_date, record.exam_time, record.semester)),
        ]),
    ]);
    frame.render_widget(info, chunks[2]);

    render_marks(frame, app, record, chunks[3]);

    let evaluation = Paragraph::new(vec![
        Line::from(vec![
            bold("Evaluated by: "),
            Span::raw(record.evaluated_by.as_deref().unwrap_or("-")),
        ]),
        Line::from(vec![
            bold("Evaluated on: "),
            Span::raw(record.evaluated_date.as_deref().unwrap_or("-")),
        ]),
    ]);
    frame.render_widget(evaluation, chunks[4]);

    let notice = Paragraph::new(
        "Queries can be raised within 7 days of result declaration. \
         Press c to raise a query about this paper.",
    )
    .style(Style::default().fg(Color::DarkGray))
    .wrap(Wrap { trim: true });
    frame.render_widget(notice, chunks[5]);
}

fn render_marks(frame: &mut Frame, app: &App, record: &ExamRecord, area: Rect) {
    if !app.ui.marks_open {
        frame.render_widget(
            Paragraph::new("▸ Question-wise Marks (press m)"),
            area,
        );
        return;
    }

    let mut rows = Vec::new();
    for section in record.sections() {
        rows.push(
            Row::new(vec![Cell::from(section.name.clone())])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        );
        for q in &section.questions {
            rows.push(
                Row::new(vec![
                    Cell::from(format!("  Q{}", q.question_no)),
                    Cell::from(format!("{}/{}", q.obtained_marks, q.max_marks)),
                    Cell::from(format!("{}%", q.percentage())),
                ])
                .style(Style::default().fg(band_color(q.band()))),
            );
        }
        rows.push(
            Row::new(vec![
                Cell::from("  Section total"),
                Cell::from(format!("{}/{}", section.obtained, section.max)),
                Cell::from(format!("{}%", section.percentage())),
            ])
            .style(Style::default().fg(Color::Gray)),
        );
    }

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(50),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ],
    )
    .header(
        Row::new(vec!["▾ Question", "Marks", "Score"])
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(table, area);
}

fn render_query_dialog(frame: &mut Frame, app: &App) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.form;
    let context = form.context();
    let submitting = form.is_submitting();

    let block = Block::default()
        .title(if submitting {
            "Raise Query - Submitting..."
        } else {
            "Raise Query [Tab: Field | ←→: Choose | Enter: Submit | Esc: Cancel]"
        })
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let field_line = |field: QueryField, label: &str, value: String| {
        let selected = app.ui.query_field == field;
        let style = if selected {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        let cursor = if selected && field.is_text() { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{}{:<14}", if selected { "> " } else { "  " }, label), style),
            Span::raw(format!("{}{}", value, cursor)),
        ])
    };

    let question = match form.question {
        None => "Select question".to_string(),
        Some(QuestionRef::All) => "All Questions".to_string(),
        Some(QuestionRef::Question(no)) => context
            .questions
            .iter()
            .find(|(n, _)| *n == no)
            .map(|(_, section)| format!("Q{} ({})", no, section))
            .unwrap_or_else(|| format!("Q{}", no)),
    };

    let mut lines = vec![
        Line::from(vec![
            bold("Paper: "),
            Span::raw(format!(
                "{} ({}) - {} {}",
                context.student_name,
                context.roll_number,
                context.subject_code,
                context.subject_name
            )),
        ]),
        Line::from(""),
        field_line(
            QueryField::QueryType,
            "Query Type *",
            form.query_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| "Select query type".to_string()),
        ),
        field_line(QueryField::Question, "Question", question),
        field_line(QueryField::PageNumber, "Page Number", form.page_number.clone()),
        field_line(QueryField::SubjectLine, "Subject", form.subject_line.clone()),
        field_line(QueryField::Description, "Description *", form.description.clone()),
        Line::from(""),
    ];

    match form.state() {
        SubmissionState::Failed(reason) => lines.push(Line::from(Span::styled(
            format!("Submission failed: {} (Enter to resubmit)", reason),
            Style::default().fg(Color::Red),
        ))),
        SubmissionState::Submitting => lines.push(Line::from(Span::styled(
            "Sending to the examination department...",
            Style::default().fg(Color::Cyan),
        ))),
        SubmissionState::Idle | SubmissionState::Succeeded => {}
    }
    lines.push(Line::from(Span::styled(
        "Queries are reviewed within 3-5 working days.",
        Style::default().fg(Color::DarkGray),
    )));

    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}

fn render_admin(frame: &mut Frame, app: &App, area: Rect) {
    let catalog = app.view.catalog();
    let admin = &app.ui.admin;
    let stats = AdminStats::calculate(&catalog.results, &catalog.queries);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(6),
        ])
        .split(area);

    let stat_line = Paragraph::new(Line::from(vec![
        bold("Students: "),
        Span::raw(format!("{}   ", stats.total_students)),
        bold("Queries: "),
        Span::raw(format!("{}   ", stats.total_queries)),
        bold("Pending: "),
        Span::styled(
            format!("{}   ", stats.pending_queries),
            Style::default().fg(Color::Yellow),
        ),
        bold("Resolved: "),
        Span::styled(
            stats.resolved_queries.to_string(),
            Style::default().fg(Color::Green),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .alignment(Alignment::Center);
    frame.render_widget(stat_line, chunks[0]);

    let selected_tab = match admin.tab {
        AdminTab::Students => 0,
        AdminTab::Queries => 1,
    };
    let tabs = Tabs::new(vec!["Student Results", "Queries"])
        .select(selected_tab)
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
    frame.render_widget(tabs, chunks[1]);

    let status_label = match admin.tab {
        AdminTab::Students => admin.student_status.label(),
        AdminTab::Queries => admin.query_status.label(),
    };
    let search = Paragraph::new(Line::from(vec![
        bold("Search: "),
        Span::raw(format!(
            "{}{}",
            admin.search,
            if admin.searching { "_" } else { "" }
        )),
        Span::raw("   "),
        bold("Status: "),
        Span::raw(status_label),
    ]))
    .block(
        Block::default()
            .title("[/: Search | s: Status | ←→: Tab | ↑↓: Select | a: Portal]")
            .borders(Borders::ALL)
            .border_style(focus_style(admin.searching)),
    );
    frame.render_widget(search, chunks[2]);

    match admin.tab {
        AdminTab::Students => {
            let results =
                admin::filter_results(&catalog.results, &admin.search, admin.student_status);
            let rows: Vec<Row> = results
                .into_iter()
                .enumerate()
                .map(|(i, r)| {
                    let status_color = match r.status {
                        ResultStatus::Pass => Color::Green,
                        ResultStatus::Fail => Color::Red,
                    };
                    let row = Row::new(vec![
                        Cell::from(r.roll_number.clone()),
                        Cell::from(r.name.clone()),
                        Cell::from(format!("{} {}", r.subject_code, r.subject)),
                        Cell::from(format!("{}/{}", r.marks_obtained, r.total_marks)),
                        Cell::from(r.grade.as_str()),
                        Cell::from(r.status.label()).style(Style::default().fg(status_color)),
                        Cell::from(if r.has_query { "Yes" } else { "" }),
                    ]);
                    if i == admin.selected_index {
                        row.style(Style::default().add_modifier(Modifier::REVERSED))
                    } else {
                        row
                    }
                })
                .collect();

            let table = Table::new(
                rows,
                [
                    Constraint::Length(11),
                    Constraint::Length(14),
                    Constraint::Min(20),
                    Constraint::Length(8),
                    Constraint::Length(6),
                    Constraint::Length(8),
                    Constraint::Length(6),
                ],
            )
            .header(
                Row::new(vec!["Roll No", "Name", "Subject", "Marks", "Grade", "Status", "Query"])
                    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().borders(Borders::ALL));
            frame.render_widget(table, chunks[3]);

            let help = Paragraph::new("Enter: View Paper | Queries are handled on the Queries tab")
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(help, chunks[4]);
        }
        AdminTab::Queries => {
            let queries =
                admin::filter_queries(&catalog.queries, &admin.search, admin.query_status);
            let items: Vec<ListItem> = queries
                .iter()
                .enumerate()
                .map(|(i, q)| {
                    let style = if i == admin.selected_index {
                        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    let prefix = if i == admin.selected_index { "> " } else { "  " };
                    ListItem::new(format!(
                        "{}#{} {} ({}) - {} - {} [{}]",
                        prefix,
                        q.id,
                        q.student_name,
                        q.roll_number,
                        q.subject_code,
                        q.query_type.label(),
                        q.status.label()
                    ))
                    .style(style)
                })
                .collect();
            let list = List::new(items).block(Block::default().borders(Borders::ALL));
            frame.render_widget(list, chunks[3]);

            let detail = match queries.get(admin.selected_index) {
                Some(q) => {
                    let mut lines = vec![
                        Line::from(vec![
                            bold("Question: "),
                            Span::raw(format!("{}  ", q.question_no)),
                            bold("Page: "),
                            Span::raw(format!("{}  ", q.page_number)),
                            bold("Submitted: "),
                            Span::raw(&q.submitted_at),
                        ]),
                        Line::from(q.description.as_str()),
                    ];
                    if let Some(resolution) = &q.resolution {
                        lines.push(Line::from(vec![
                            bold("Resolution: "),
                            Span::raw(format!(
                                "{} ({})",
                                resolution,
                                q.resolved_at.as_deref().unwrap_or("-")
                            )),
                        ]));
                    }
                    lines
                }
                None => vec![Line::from("No queries match the current filters")],
            };
            let detail = Paragraph::new(detail)
                .block(Block::default().title("Query Details").borders(Borders::ALL))
                .wrap(Wrap { trim: true });
            frame.render_widget(detail, chunks[4]);
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, color) = match &app.ui.notice {
        Some(notice) => (
            notice.message.clone(),
            match notice.kind {
                NoticeKind::Info => Color::Cyan,
                NoticeKind::Success => Color::Green,
                NoticeKind::Error => Color::Red,
            },
        ),
        None => (
            "[Tab: Focus | a: Admin | Esc: Back | q: Quit]".to_string(),
            Color::Gray,
        ),
    };

    let status = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(color))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
