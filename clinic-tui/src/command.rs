//! Parsing of typed command lines.
//!
//! Each line is one command word followed by arguments. Table commands act
//! on the current table page and calendar commands on the appointments
//! page; `next`/`prev` act on whichever is showing.

use std::str::FromStr;

use chrono::{NaiveDate, NaiveTime};
use clinic_lib::export::ExportFormat;
use thiserror::Error;
use trellis::calendar::{CalendarView, ParseViewError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help')")]
    Unknown(String),
    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    #[error("'{0}' minutes is not a usable duration")]
    InvalidDuration(i64),
    #[error("'{0}' is not a date (expected YYYY-MM-DD)")]
    InvalidDate(String),
    #[error("'{0}' is not a time (expected HH:MM)")]
    InvalidTime(String),
    #[error("unknown page '{0}'")]
    InvalidPage(String),
    #[error("unknown export format '{0}' (expected csv or json)")]
    InvalidFormat(String),
    #[error(transparent)]
    InvalidView(#[from] ParseViewError),
    #[error("'{0}' is not a row of this table")]
    InvalidKey(String),
    #[error("this command is not available on the {0} page")]
    WrongPage(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageName {
    Patients,
    Invoices,
    Appointments,
    Settings,
}

impl PageName {
    pub fn label(self) -> &'static str {
        match self {
            PageName::Patients => "patients",
            PageName::Invoices => "invoices",
            PageName::Appointments => "appointments",
            PageName::Settings => "settings",
        }
    }
}

impl FromStr for PageName {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "patients" | "p" => Ok(PageName::Patients),
            "invoices" | "i" => Ok(PageName::Invoices),
            "appointments" | "calendar" | "a" => Ok(PageName::Appointments),
            "settings" | "s" => Ok(PageName::Settings),
            other => Err(CommandError::InvalidPage(other.to_string())),
        }
    }
}

/// One parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Go(PageName),
    Help,
    Quit,

    // Tables
    Sort(String),
    Unsort,
    /// 1-based page number as typed.
    Page(usize),
    First,
    Last,
    PageSize(usize),
    Select(String),
    All,
    Clear,
    Open(String),
    Action { action: String, key: String },
    Search(String),
    Status(Option<String>),
    Export(ExportFormat),

    // Shared by tables and calendar
    Next,
    Prev,

    // Calendar
    View(CalendarView),
    Today,
    GoTo(NaiveDate),
    Toggle(String),
    Drag { id: String, minutes: i64, days: i64 },
    Slot { date: NaiveDate, time: NaiveTime },
    New {
        date: NaiveDate,
        time: NaiveTime,
        minutes: i64,
        category: String,
        title: String,
    },
    Rename { id: String, title: String },
    Delete(String),

    // Settings
    Set { key: String, value: String },
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let arg = |index: usize, command: &'static str, argument: &'static str| {
        args.get(index)
            .copied()
            .ok_or(CommandError::MissingArgument { command, argument })
    };
    let rest = |from: usize| args.get(from..).unwrap_or_default().join(" ");

    let command = match word.to_ascii_lowercase().as_str() {
        "go" => Command::Go(arg(0, "go", "a page name")?.parse()?),
        "patients" | "invoices" | "appointments" | "calendar" | "settings" => {
            Command::Go(word.to_ascii_lowercase().parse()?)
        }
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,

        "sort" => Command::Sort(arg(0, "sort", "a column")?.to_string()),
        "unsort" => Command::Unsort,
        "page" => Command::Page(number(arg(0, "page", "a page number")?)?),
        "first" => Command::First,
        "last" => Command::Last,
        "size" => Command::PageSize(number(arg(0, "size", "a page size")?)?),
        "select" => Command::Select(arg(0, "select", "a row id")?.to_string()),
        "all" => Command::All,
        "clear" => Command::Clear,
        "open" => Command::Open(arg(0, "open", "a row id")?.to_string()),
        "do" => Command::Action {
            action: arg(0, "do", "an action")?.to_string(),
            key: arg(1, "do", "a row id")?.to_string(),
        },
        "search" => Command::Search(rest(0)),
        "status" => Command::Status(args.first().map(|s| s.to_string())),
        "export" => Command::Export(match args.first() {
            Some(format) => format
                .parse()
                .map_err(|_| CommandError::InvalidFormat(format.to_string()))?,
            None => ExportFormat::default(),
        }),

        "next" | "n" => Command::Next,
        "prev" => Command::Prev,

        "view" => Command::View(arg(0, "view", "day, week or month")?.parse()?),
        "day" | "week" | "month" => Command::View(word.parse()?),
        "today" => Command::Today,
        "goto" => Command::GoTo(date(arg(0, "goto", "a date")?)?),
        "toggle" => Command::Toggle(arg(0, "toggle", "a category")?.to_string()),
        "drag" => Command::Drag {
            id: arg(0, "drag", "an appointment id")?.to_string(),
            minutes: signed(arg(1, "drag", "a minute offset")?)?,
            days: args.get(2).map(|d| signed(d)).transpose()?.unwrap_or(0),
        },
        "slot" => Command::Slot {
            date: date(arg(0, "slot", "a date")?)?,
            time: time(arg(1, "slot", "a time")?)?,
        },
        "new" => Command::New {
            date: date(arg(0, "new", "a date")?)?,
            time: time(arg(1, "new", "a start time")?)?,
            minutes: signed(arg(2, "new", "a duration in minutes")?)?,
            category: arg(3, "new", "a category")?.to_string(),
            title: rest(4),
        },
        "rename" => Command::Rename {
            id: arg(0, "rename", "an appointment id")?.to_string(),
            title: rest(1),
        },
        "delete" => Command::Delete(arg(0, "delete", "an appointment id")?.to_string()),

        "set" => Command::Set {
            key: arg(0, "set", "a setting name")?.to_string(),
            value: arg(1, "set", "a value")?.to_string(),
        },

        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

/// Help text, one command per line.
pub const HELP: &str = "\
go <page>                 patients | invoices | appointments | settings
sort <column> / unsort    sort the table, again to reverse
page <n> next prev first last size <n>
select <id> all clear     change the selection
open <id> / do <action> <id>
search <text> / status [<status>]
export [csv|json]         export the selected rows
view day|week|month  next  prev  today  goto <date>
toggle <category>         show or hide a category
drag <id> <minutes> [<days>]
slot <date> <HH:MM>       quick-create in an empty slot
new <date> <HH:MM> <minutes> <category> <title>
rename <id> <title> / delete <id>
set <name> <value>        change a setting
quit";

fn number(raw: &str) -> Result<usize, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn signed(raw: &str) -> Result<i64, CommandError> {
    raw.parse()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

fn date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| CommandError::InvalidDate(raw.to_string()))
}

fn time(raw: &str) -> Result<NaiveTime, CommandError> {
    NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| CommandError::InvalidTime(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parsed(line: &str) -> Command {
        parse(line).unwrap().unwrap()
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(parse("   "), Ok(None));
    }

    #[test]
    fn test_table_commands() {
        assert_eq!(parsed("sort name"), Command::Sort("name".into()));
        assert_eq!(parsed("page 2"), Command::Page(2));
        assert_eq!(parsed("SELECT 3"), Command::Select("3".into()));
        assert_eq!(parsed("search grace  okafor"), Command::Search("grace okafor".into()));
        assert_eq!(parsed("status"), Command::Status(None));
        assert_eq!(parsed("export json"), Command::Export(ExportFormat::Json));
        assert_eq!(parsed("export"), Command::Export(ExportFormat::Csv));
    }

    #[test]
    fn test_calendar_commands() {
        assert_eq!(parsed("view week"), Command::View(CalendarView::Week));
        assert_eq!(parsed("month"), Command::View(CalendarView::Month));
        assert_eq!(
            parsed("drag appt-01 -45"),
            Command::Drag {
                id: "appt-01".into(),
                minutes: -45,
                days: 0
            }
        );
        assert_eq!(
            parsed("new 2025-03-14 15:00 30 Follow-up Blood work review"),
            Command::New {
                date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
                time: NaiveTime::from_hms_opt(15, 0, 0).unwrap(),
                minutes: 30,
                category: "Follow-up".into(),
                title: "Blood work review".into(),
            }
        );
    }

    #[test]
    fn test_errors() {
        assert_eq!(parse("fly"), Err(CommandError::Unknown("fly".into())));
        assert_eq!(
            parse("page"),
            Err(CommandError::MissingArgument {
                command: "page",
                argument: "a page number"
            })
        );
        assert_eq!(parse("page two"), Err(CommandError::InvalidNumber("two".into())));
        assert_eq!(parse("goto 14/03"), Err(CommandError::InvalidDate("14/03".into())));
        assert!(matches!(parse("view year"), Err(CommandError::InvalidView(_))));
        assert_eq!(parse("export xml"), Err(CommandError::InvalidFormat("xml".into())));
        assert_eq!(parse("go lab"), Err(CommandError::InvalidPage("lab".into())));
    }
}
