use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Row, Table};
use ratatui::Frame;
use rusqlite::Connection;

use crate::db::{
    add_course, course_exists, enroll_student, fetch_courses, fetch_student_details,
    register_student, student_exists, StoreError,
};
use crate::models::{CatalogCourse, StudentDetail};

use super::forms::{CourseForm, IdInput, StudentField, StudentForm};
use super::helpers::{centered_rect, surface_error};

/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;

/// The six menu actions, in the order the operator sees them.
const MENU_ITEMS: [&str; 6] = [
    "Student Registration",
    "Course Registration",
    "Add Course",
    "Show Courses",
    "Show Details",
    "Exit",
];

/// High-level navigation states. Keeping this explicit makes it easy to
/// reason about which rendering path runs and what each key should do. The
/// three form states render as modals over the menu; the two listing states
/// replace it.
enum Screen {
    Menu,
    RegisterStudent(StudentForm),
    Enroll(EnrollFlow),
    AddCourse(CourseForm),
    Courses {
        courses: Vec<CatalogCourse>,
        offset: usize,
    },
    Details {
        rows: Vec<StudentDetail>,
        offset: usize,
    },
}

/// Which identifier the enrollment flow is currently collecting.
#[derive(PartialEq, Eq)]
enum EnrollStage {
    Student,
    Course,
}

/// State for the two-step enrollment flow: first the student id is collected
/// and pre-checked, then the catalog is shown and a course id is collected
/// and pre-checked. Only after both checks pass is the write attempted.
struct EnrollFlow {
    stage: EnrollStage,
    student_input: IdInput,
    course_input: IdInput,
    student_id: Option<i64>,
    courses: Vec<CatalogCourse>,
}

impl EnrollFlow {
    fn new() -> Self {
        Self {
            stage: EnrollStage::Student,
            student_input: IdInput::default(),
            course_input: IdInput::default(),
            student_id: None,
            courses: Vec::new(),
        }
    }
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// Central application state shared across the TUI. Owns the single
/// long-lived database connection for the whole process lifetime.
pub struct App {
    conn: Connection,
    screen: Screen,
    selected: usize,
    status: Option<StatusMessage>,
}

impl App {
    pub fn new(conn: Connection) -> Self {
        Self {
            conn,
            screen: Screen::Menu,
            selected: 0,
            status: None,
        }
    }

    fn info(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Info,
        });
    }

    fn error(&mut self, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind: StatusKind::Error,
        });
    }

    /// Render a persistence failure in the footer. Store errors are never
    /// fatal once the menu is running; the loop always continues.
    fn store_error(&mut self, err: StoreError) {
        let text = surface_error(&anyhow::Error::new(err));
        self.error(text);
    }

    /// Dispatch a key press to the active screen. Returns `Ok(true)` when the
    /// operator chose Exit.
    pub(crate) fn handle_key(&mut self, code: KeyCode) -> Result<bool> {
        match self.screen {
            Screen::Menu => return Ok(self.handle_menu_key(code)),
            Screen::RegisterStudent(_) => self.handle_student_form_key(code),
            Screen::Enroll(_) => self.handle_enroll_key(code),
            Screen::AddCourse(_) => self.handle_course_form_key(code),
            Screen::Courses { .. } | Screen::Details { .. } => self.handle_listing_key(code),
        }
        Ok(false)
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
            }
            KeyCode::Down => {
                self.selected = (self.selected + 1).min(MENU_ITEMS.len() - 1);
            }
            KeyCode::Char(ch @ '1'..='6') => {
                let choice = ch as usize - '1' as usize;
                self.selected = choice;
                return self.activate_menu_item(choice);
            }
            KeyCode::Enter => return self.activate_menu_item(self.selected),
            KeyCode::Esc | KeyCode::Char('q') => return true,
            _ => {}
        }
        false
    }

    /// Run the chosen menu action. Listings are fetched eagerly here so the
    /// listing screens only ever render already-loaded rows.
    fn activate_menu_item(&mut self, choice: usize) -> bool {
        self.status = None;
        match choice {
            0 => self.screen = Screen::RegisterStudent(StudentForm::default()),
            1 => self.screen = Screen::Enroll(EnrollFlow::new()),
            2 => self.screen = Screen::AddCourse(CourseForm::default()),
            3 => match fetch_courses(&self.conn) {
                Ok(courses) => self.screen = Screen::Courses { courses, offset: 0 },
                Err(err) => self.store_error(err),
            },
            4 => match fetch_student_details(&self.conn) {
                Ok(rows) => self.screen = Screen::Details { rows, offset: 0 },
                Err(err) => self.store_error(err),
            },
            5 => return true,
            _ => {}
        }
        false
    }

    fn handle_student_form_key(&mut self, code: KeyCode) {
        let Screen::RegisterStudent(form) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(ch) => form.push_char(ch),
            KeyCode::Enter => {
                if !form.on_last_field() {
                    form.next_field();
                    return;
                }
                let Some(fields) = form.submit() else {
                    return;
                };
                match register_student(&self.conn, &fields) {
                    Ok(id) => {
                        self.screen = Screen::Menu;
                        self.info(format!("Student registered with id {id}"));
                    }
                    Err(err) => {
                        self.screen = Screen::Menu;
                        self.store_error(err);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_course_form_key(&mut self, code: KeyCode) {
        let Screen::AddCourse(form) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => form.pop_char(),
            KeyCode::Char(ch) => form.push_char(ch),
            KeyCode::Enter => {
                let Some(name) = form.submit() else {
                    return;
                };
                match add_course(&self.conn, &name) {
                    Ok(course) => {
                        self.screen = Screen::Menu;
                        self.info(format!("Course added with id {}", course.id));
                    }
                    Err(err) => {
                        self.screen = Screen::Menu;
                        self.store_error(err);
                    }
                }
            }
            _ => {}
        }
    }

    fn handle_enroll_key(&mut self, code: KeyCode) {
        let Screen::Enroll(flow) = &mut self.screen else {
            return;
        };
        match code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
            }
            KeyCode::Backspace => match flow.stage {
                EnrollStage::Student => flow.student_input.pop_char(),
                EnrollStage::Course => flow.course_input.pop_char(),
            },
            KeyCode::Char(ch) => match flow.stage {
                EnrollStage::Student => flow.student_input.push_char(ch),
                EnrollStage::Course => flow.course_input.push_char(ch),
            },
            KeyCode::Enter => match flow.stage {
                EnrollStage::Student => self.advance_enroll_student(),
                EnrollStage::Course => self.finish_enroll(),
            },
            _ => {}
        }
    }

    /// First enrollment step: pre-check the student id, then load the catalog
    /// so the operator can pick a course. The write is never attempted for an
    /// unknown student.
    fn advance_enroll_student(&mut self) {
        let Screen::Enroll(flow) = &mut self.screen else {
            return;
        };
        let Some(student_id) = flow.student_input.parse() else {
            return;
        };
        match student_exists(&self.conn, student_id) {
            Ok(true) => {}
            Ok(false) => {
                flow.student_input.error =
                    Some("Student with this id is not registered".to_string());
                return;
            }
            Err(err) => {
                self.screen = Screen::Menu;
                self.store_error(err);
                return;
            }
        }
        match fetch_courses(&self.conn) {
            Ok(courses) if courses.is_empty() => {
                self.screen = Screen::Menu;
                self.error("No courses in the catalog yet");
            }
            Ok(courses) => {
                flow.student_id = Some(student_id);
                flow.courses = courses;
                flow.stage = EnrollStage::Course;
            }
            Err(err) => {
                self.screen = Screen::Menu;
                self.store_error(err);
            }
        }
    }

    /// Second enrollment step: pre-check the course id and perform the write.
    fn finish_enroll(&mut self) {
        let Screen::Enroll(flow) = &mut self.screen else {
            return;
        };
        let Some(student_id) = flow.student_id else {
            return;
        };
        let Some(course_id) = flow.course_input.parse() else {
            return;
        };
        match course_exists(&self.conn, course_id) {
            Ok(true) => {}
            Ok(false) => {
                flow.course_input.error = Some("Course with this id does not exist".to_string());
                return;
            }
            Err(err) => {
                self.screen = Screen::Menu;
                self.store_error(err);
                return;
            }
        }
        match enroll_student(&self.conn, student_id, course_id) {
            Ok(_) => {
                self.screen = Screen::Menu;
                self.info(format!("Course registered for student id {student_id}"));
            }
            Err(err) => {
                self.screen = Screen::Menu;
                self.store_error(err);
            }
        }
    }

    fn handle_listing_key(&mut self, code: KeyCode) {
        match &mut self.screen {
            Screen::Courses { offset, .. } => match code {
                KeyCode::Up => *offset = offset.saturating_sub(1),
                KeyCode::Down => *offset += 1,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.screen = Screen::Menu,
                _ => {}
            },
            Screen::Details { offset, .. } => match code {
                KeyCode::Up => *offset = offset.saturating_sub(1),
                KeyCode::Down => *offset += 1,
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => self.screen = Screen::Menu,
                _ => {}
            },
            _ => {}
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let footer_height = FOOTER_HEIGHT.min(area.height);

        let (content_area, footer_area) = if area.height > footer_height {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(footer_height)])
                .split(area);
            (chunks[0], chunks[1])
        } else {
            (area, area)
        };

        match &self.screen {
            Screen::Courses { courses, offset } => {
                self.draw_courses(frame, content_area, courses, *offset)
            }
            Screen::Details { rows, offset } => {
                self.draw_details(frame, content_area, rows, *offset)
            }
            _ => self.draw_menu(frame, content_area),
        }

        if area.height >= footer_height {
            self.draw_footer(frame, footer_area);
        }

        match &self.screen {
            Screen::RegisterStudent(form) => self.draw_student_form(frame, area, form),
            Screen::AddCourse(form) => self.draw_course_form(frame, area, form),
            Screen::Enroll(flow) => self.draw_enroll(frame, area, flow),
            _ => {}
        }
    }

    fn draw_menu(&self, frame: &mut Frame, area: Rect) {
        let items: Vec<ListItem> = MENU_ITEMS
            .iter()
            .enumerate()
            .map(|(idx, item)| ListItem::new(format!("{}. {item}", idx + 1)))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Student Record Manager"),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("> ");

        let mut state = ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_courses(&self, frame: &mut Frame, area: Rect, courses: &[CatalogCourse], offset: usize) {
        let items: Vec<ListItem> = courses
            .iter()
            .skip(offset)
            .map(|course| ListItem::new(course.to_string()))
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Available Courses"),
        );
        frame.render_widget(list, area);
    }

    fn draw_details(&self, frame: &mut Frame, area: Rect, rows: &[StudentDetail], offset: usize) {
        let header = Row::new([
            "ID",
            "Name",
            "DOB",
            "Gender",
            "Phone",
            "Email",
            "Father's name",
            "Address",
            "Course",
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let body = rows.iter().skip(offset).map(|detail| {
            Row::new([
                detail.student.id.to_string(),
                detail.student.name.clone(),
                detail.student.dob.clone(),
                detail.student.gender.clone(),
                detail.student.phone.clone(),
                detail.student.email.clone(),
                detail.student.father_name.clone(),
                detail.student.address.clone(),
                detail.course_name.clone().unwrap_or_else(|| "-".to_string()),
            ])
        });

        let widths = [
            Constraint::Length(4),
            Constraint::Min(12),
            Constraint::Length(10),
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Min(14),
            Constraint::Min(12),
            Constraint::Min(12),
            Constraint::Min(10),
        ];

        let table = Table::new(body, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Student Details"),
        );
        frame.render_widget(table, area);
    }

    fn draw_student_form(&self, frame: &mut Frame, area: Rect, form: &StudentForm) {
        let rect = centered_rect(60, 70, area);
        frame.render_widget(Clear, rect);

        let mut lines: Vec<Line> = StudentField::ALL
            .iter()
            .map(|field| {
                let label = format!("{}: ", field.label());
                let value = form.value(*field).to_string();
                if *field == form.active {
                    Line::from(vec![
                        Span::styled(label, Style::default().add_modifier(Modifier::BOLD)),
                        Span::styled(value, Style::default().fg(Color::Cyan)),
                        Span::styled("_", Style::default().fg(Color::Cyan)),
                    ])
                } else {
                    Line::from(vec![Span::raw(label), Span::raw(value)])
                }
            })
            .collect();
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Student Registration (Tab: next field, Enter: submit, Esc: cancel)"),
        );
        frame.render_widget(paragraph, rect);
    }

    fn draw_course_form(&self, frame: &mut Frame, area: Rect, form: &CourseForm) {
        let rect = centered_rect(50, 25, area);
        frame.render_widget(Clear, rect);

        let mut lines = vec![Line::from(vec![
            Span::styled("Course name: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(form.name.clone(), Style::default().fg(Color::Cyan)),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ])];
        if let Some(error) = &form.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Add Course (Enter: submit, Esc: cancel)"),
        );
        frame.render_widget(paragraph, rect);
    }

    fn draw_enroll(&self, frame: &mut Frame, area: Rect, flow: &EnrollFlow) {
        let rect = centered_rect(60, 70, area);
        frame.render_widget(Clear, rect);

        let mut lines = vec![input_line(
            "Student id",
            &flow.student_input.value,
            flow.stage == EnrollStage::Student,
        )];
        if let Some(error) = &flow.student_input.error {
            lines.push(Line::from(Span::styled(
                error.clone(),
                Style::default().fg(Color::Red),
            )));
        }

        if flow.stage == EnrollStage::Course {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Available courses:",
                Style::default().add_modifier(Modifier::BOLD),
            )));
            for course in &flow.courses {
                lines.push(Line::from(format!("  {course}")));
            }
            lines.push(Line::from(""));
            lines.push(input_line("Course id", &flow.course_input.value, true));
            if let Some(error) = &flow.course_input.error {
                lines.push(Line::from(Span::styled(
                    error.clone(),
                    Style::default().fg(Color::Red),
                )));
            }
        }

        let paragraph = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Course Registration (Enter: confirm, Esc: cancel)"),
        );
        frame.render_widget(paragraph, rect);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.status {
            Some(status) => Line::from(Span::styled(status.text.clone(), status.kind.style())),
            None => Line::from(match self.screen {
                Screen::Menu => "Up/Down or 1-6 to choose, Enter to confirm, q to quit",
                Screen::Courses { .. } | Screen::Details { .. } => {
                    "Up/Down to scroll, Esc to return to the menu"
                }
                _ => "Esc cancels and returns to the menu",
            }),
        };

        let paragraph = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(paragraph, area);
    }
}

/// Prompt plus the current buffer, highlighted when the field has focus.
fn input_line<'a>(label: &'a str, value: &'a str, active: bool) -> Line<'a> {
    if active {
        Line::from(vec![
            Span::styled(
                format!("{label}: "),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, Style::default().fg(Color::Cyan)),
            Span::styled("_", Style::default().fg(Color::Cyan)),
        ])
    } else {
        Line::from(vec![Span::raw(format!("{label}: ")), Span::raw(value)])
    }
}
