//! The dashboard: pages, settings and command dispatch.

use std::path::PathBuf;
use std::str::FromStr;

use chrono::{NaiveDate, TimeDelta, Timelike};
use clinic_lib::Applied;
use clinic_lib::error::{ExportError, StoreError};
use clinic_lib::export::ExportFormat;
use thiserror::Error;
use trellis::calendar::{CalendarCommand, EventDraft, EventPatch};
use trellis::table::{TableCommand, TableEvent};

use crate::command::{self, Command, CommandError, HELP, PageName};
use crate::pages::{
    AppointmentsPage, InvoicesPage, Listed, Outcome, PatientsPage, TablePage, invoices,
    invoices_page, patients, patients_page,
};
use crate::paths;
use crate::render::{Line, Span, Tone};
use crate::settings::{DashboardSettings, SettingsError, SettingsProvider};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Command(#[from] CommandError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Export(#[from] ExportError),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether the command loop keeps going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Result of a command on a table page.
enum TableStep<K> {
    Events(Vec<TableEvent<K>>),
    Exported(String, ExportFormat),
}

pub struct App {
    page: PageName,
    settings: SettingsProvider,
    config: DashboardSettings,
    patients: PatientsPage,
    invoices: InvoicesPage,
    appointments: AppointmentsPage,
    today: NaiveDate,
    /// Result of the last command.
    notice: Option<Line>,
    /// Longer output such as help text or an export.
    output: Option<String>,
    /// Where exports are written; without one they are only printed.
    export_dir: Option<PathBuf>,
}

impl App {
    pub async fn new(settings: SettingsProvider, today: NaiveDate) -> Result<Self, SettingsError> {
        let config = DashboardSettings::load(&settings).await?;
        log::info!("starting dashboard on {} with {:?}", today, config);

        Ok(Self {
            page: PageName::Appointments,
            patients: patients_page(config.page_size),
            invoices: invoices_page(config.page_size),
            appointments: AppointmentsPage::new(&config, today),
            settings,
            config,
            today,
            notice: None,
            output: None,
            export_dir: paths::export_dir(),
        })
    }

    pub fn page(&self) -> PageName {
        self.page
    }

    pub fn patients(&self) -> &PatientsPage {
        &self.patients
    }

    pub fn invoices(&self) -> &InvoicesPage {
        &self.invoices
    }

    pub fn appointments(&self) -> &AppointmentsPage {
        &self.appointments
    }

    pub fn config(&self) -> &DashboardSettings {
        &self.config
    }

    pub fn output(&self) -> Option<&str> {
        self.output.as_deref()
    }

    pub fn notice(&self) -> Option<String> {
        self.notice.as_ref().map(Line::plain)
    }

    /// Parse and run one input line. Errors become the notice.
    pub async fn execute(&mut self, line: &str) -> Flow {
        self.notice = None;
        self.output = None;

        let result = match command::parse(line) {
            Ok(Some(command)) => self.handle(command).await,
            Ok(None) => Ok(Flow::Continue),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(flow) => flow,
            Err(e) => {
                log::warn!("command '{}' failed: {}", line.trim(), e);
                self.notice = Some(Line::text(e.to_string(), Tone::Danger));
                Flow::Continue
            }
        }
    }

    pub async fn handle(&mut self, command: Command) -> Result<Flow, AppError> {
        log::debug!("{} page: {:?}", self.page.label(), command);

        match command {
            Command::Quit => return Ok(Flow::Quit),
            Command::Help => self.output = Some(HELP.to_string()),
            Command::Go(page) => self.page = page,
            Command::Set { key, value } => self.set(&key, &value).await?,
            command => match self.page {
                PageName::Patients => {
                    match table_step(&mut self.patients, command, PageName::Patients)? {
                        TableStep::Events(events) => {
                            for event in events {
                                let outcome = patients::handle(&mut self.patients, event);
                                self.report(outcome);
                            }
                        }
                        TableStep::Exported(out, format) => {
                            self.exported("patients", out, format).await?
                        }
                    }
                }
                PageName::Invoices => {
                    match table_step(&mut self.invoices, command, PageName::Invoices)? {
                        TableStep::Events(events) => {
                            for event in events {
                                let outcome = invoices::handle(&mut self.invoices, event);
                                self.report(outcome);
                            }
                        }
                        TableStep::Exported(out, format) => {
                            self.exported("invoices", out, format).await?
                        }
                    }
                }
                PageName::Appointments => {
                    let target = match &command {
                        Command::Drag { id, .. } | Command::Rename { id, .. } | Command::Delete(id) => {
                            Some(id.clone())
                        }
                        _ => None,
                    };
                    let mut changed = false;
                    for step in self.calendar_commands(command)? {
                        for change in self.appointments.run(step).await? {
                            changed = true;
                            self.applied(change);
                        }
                    }
                    if let Some(id) = target.filter(|_| !changed) {
                        self.notice = Some(Line::text(format!("No change to {}", id), Tone::Muted));
                    }
                }
                PageName::Settings => return Err(CommandError::WrongPage("settings").into()),
            },
        }
        Ok(Flow::Continue)
    }

    fn calendar_commands(&self, command: Command) -> Result<Vec<CalendarCommand>, CommandError> {
        let commands = match command {
            Command::View(view) => vec![CalendarCommand::SetView(view)],
            Command::Next => vec![CalendarCommand::Next],
            Command::Prev => vec![CalendarCommand::Prev],
            Command::Today => vec![CalendarCommand::Today(self.today)],
            Command::GoTo(date) => vec![CalendarCommand::GoTo(date)],
            Command::Toggle(category) => vec![CalendarCommand::ToggleCategory(category)],
            Command::Drag { id, minutes, days } => vec![
                CalendarCommand::BeginDrag(id.into()),
                CalendarCommand::DragTo { minutes, days },
                CalendarCommand::Drop,
            ],
            Command::Slot { date, time } => vec![CalendarCommand::ClickSlot {
                date,
                minute: time.num_seconds_from_midnight() / 60,
            }],
            Command::New {
                date,
                time,
                minutes,
                category,
                title,
            } => {
                let start = date.and_time(time);
                let end = TimeDelta::try_minutes(minutes)
                    .and_then(|duration| start.checked_add_signed(duration))
                    .ok_or(CommandError::InvalidDuration(minutes))?;
                let draft = EventDraft::new(title, start, end).with_category(category);
                vec![CalendarCommand::Create(draft)]
            }
            Command::Rename { id, title } => vec![CalendarCommand::Edit {
                id: id.into(),
                patch: EventPatch {
                    title: Some(title),
                    ..EventPatch::default()
                },
            }],
            Command::Delete(id) => vec![CalendarCommand::Delete(id.into())],
            _ => return Err(CommandError::WrongPage("appointments")),
        };
        Ok(commands)
    }

    async fn set(&mut self, key: &str, value: &str) -> Result<(), AppError> {
        self.config.set(key, value)?;
        self.config.save(&self.settings).await?;

        let size = self.config.page_size;
        self.patients.update(TableCommand::SetPageSize(size));
        self.invoices.update(TableCommand::SetPageSize(size));
        self.appointments.configure(&self.config);

        self.notice = Some(Line::text(format!("{} = {}", key, value), Tone::Success));
        Ok(())
    }

    async fn exported(&mut self, name: &str, out: String, format: ExportFormat) -> Result<(), AppError> {
        let Some(dir) = self.export_dir.clone() else {
            self.output = Some(out);
            return Ok(());
        };
        tokio::fs::create_dir_all(&dir).await?;

        let extension = match format {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        };
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{}-{}.{}", name, stamp, extension));
        tokio::fs::write(&path, &out).await?;

        log::info!("exported {} to {}", name, path.display());
        self.notice = Some(Line::text(format!("Exported to {}", path.display()), Tone::Success));
        self.output = Some(out);
        Ok(())
    }

    fn applied(&mut self, change: Applied) {
        let message = match change {
            Applied::Created(id) => {
                let title = self
                    .appointments
                    .events()
                    .iter()
                    .find(|e| e.id == id)
                    .map_or(String::new(), |e| e.title.clone());
                format!("Booked {} ({})", title, id)
            }
            Applied::Updated(id) => format!("Updated {}", id),
            Applied::Deleted(event) => format!("Deleted {} ({})", event.title, event.id),
        };
        self.notice = Some(Line::text(message, Tone::Success));
    }

    fn report(&mut self, outcome: Option<Outcome>) {
        match outcome {
            Some(Outcome::Info(text)) => self.notice = Some(Line::text(text, Tone::Normal)),
            Some(Outcome::Done(text)) => self.notice = Some(Line::text(text, Tone::Success)),
            Some(Outcome::Book { patient }) => {
                self.notice = Some(Line::text(
                    format!("Booking for {}: pick a slot with 'slot <date> <HH:MM>'", patient),
                    Tone::Accent,
                ));
                self.appointments.book(patient);
                self.page = PageName::Appointments;
            }
            None => {}
        }
    }

    /// Everything to print after a command.
    pub fn frame(&self) -> Vec<Line> {
        let tabs = [
            PageName::Appointments,
            PageName::Patients,
            PageName::Invoices,
            PageName::Settings,
        ]
        .into_iter()
        .map(|page| {
            if page == self.page {
                Span::new(format!("[{}] ", page.label()), Tone::Accent).bold()
            } else {
                Span::new(format!(" {}  ", page.label()), Tone::Muted)
            }
        })
        .collect();

        let mut lines = vec![Line::new(tabs), Line::default()];
        match self.page {
            PageName::Patients => lines.extend(self.patients.lines()),
            PageName::Invoices => {
                lines.extend(self.invoices.lines());
                lines.push(Line::text(
                    format!("Total: {}", invoices::total(&self.invoices)),
                    Tone::Normal,
                ));
            }
            PageName::Appointments => lines.extend(self.appointments.lines()),
            PageName::Settings => {
                lines.push(Line::new(vec![Span::new("Settings", Tone::Normal).bold()]));
                for (name, value) in self.config.entries() {
                    lines.push(Line::new(vec![
                        Span::new(format!("  {:<18}", name), Tone::Muted),
                        Span::new(value, Tone::Normal),
                    ]));
                }
            }
        }

        if let Some(output) = &self.output {
            lines.push(Line::default());
            lines.extend(output.lines().map(|l| Line::text(l, Tone::Normal)));
        }
        if let Some(notice) = &self.notice {
            lines.push(Line::default());
            lines.push(notice.clone());
        }
        lines
    }
}

/// Run a table-page command: filters and export here, the rest through the
/// table engine.
fn table_step<T: Listed>(
    page: &mut TablePage<T>,
    command: Command,
    name: PageName,
) -> Result<TableStep<T::Key>, AppError>
where
    T::Key: FromStr,
{
    let table_command = match command {
        Command::Search(query) => return Ok(TableStep::Events(page.search(&query))),
        Command::Status(status) => return Ok(TableStep::Events(page.filter_status(status))),
        Command::Export(format) => return Ok(TableStep::Exported(page.export(format)?, format)),
        Command::Sort(key) => TableCommand::Sort(key),
        Command::Unsort => TableCommand::ClearSort,
        Command::Page(number) => TableCommand::GoToPage(number.saturating_sub(1)),
        Command::Next => TableCommand::NextPage,
        Command::Prev => TableCommand::PrevPage,
        Command::First => TableCommand::FirstPage,
        Command::Last => TableCommand::LastPage,
        Command::PageSize(size) => TableCommand::SetPageSize(size),
        Command::Select(raw) => TableCommand::ToggleRow(page.parse_key(&raw)?),
        Command::All => TableCommand::ToggleAll,
        Command::Clear => TableCommand::ClearSelection,
        Command::Open(raw) => TableCommand::ClickRow(page.parse_key(&raw)?),
        Command::Action { action, key } => TableCommand::Invoke {
            action,
            key: page.parse_key(&key)?,
        },
        _ => return Err(CommandError::WrongPage(name.label()).into()),
    };
    Ok(TableStep::Events(page.update(table_command)))
}
