use std::{
    env,
    io::{self, Write},
    process::{Command, Stdio},
};

use chrono::{Local, NaiveDate};

use mandarina::{
    app::{load_tasks, TaskLoad},
    calendar::{Task, TaskStatus},
    storage::Config,
    ui::{day_view::DayAgenda, month_view::MonthGrid, week_view::WeekGrid, weekday_labels::resolve_locale},
    view_model::{CalendarGrid, CalendarViewModel, ViewMode},
};

use crate::tui::open_store;

pub const USAGE: &str =
    "Usage: mandarina [--agenda [YYYY/MM/DD] | --month [YYYY/MM] | --week [YYYY/MM/DD]] [--json] [--sample]";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrintRequest {
    pub view: ViewMode,
    pub anchor: NaiveDate,
    pub json: bool,
    pub sample: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CliMode {
    Interactive { sample: bool },
    Print(PrintRequest),
}

pub fn parse_cli_mode() -> Result<CliMode, String> {
    parse_args(env::args().skip(1), Local::now().date_naive())
}

fn parse_args<I: Iterator<Item = String>>(args: I, today: NaiveDate) -> Result<CliMode, String> {
    let mut sample = false;
    let mut json = false;
    let mut selected: Option<(ViewMode, NaiveDate)> = None;
    let mut args = args.peekable();

    while let Some(arg) = args.next() {
        let view = match arg.as_str() {
            "--sample" => {
                sample = true;
                continue;
            }
            "--json" => {
                json = true;
                continue;
            }
            "--help" => {
                println!("{}", USAGE);
                std::process::exit(0);
            }
            "--agenda" => ViewMode::Day,
            "--month" => ViewMode::Month,
            "--week" => ViewMode::Week,
            _ => return Err(format!("Unknown argument: {}", arg)),
        };

        if selected.is_some() {
            return Err("Only one of --agenda, --month and --week may be given".to_string());
        }

        let value = args.next_if(|next| !next.starts_with("--"));
        let anchor = match value {
            Some(value) => parse_anchor(view, &value)?,
            None => today,
        };
        selected = Some((view, anchor));
    }

    match selected {
        Some((view, anchor)) => Ok(CliMode::Print(PrintRequest { view, anchor, json, sample })),
        None if json => Err("--json needs one of --agenda, --month or --week".to_string()),
        None => Ok(CliMode::Interactive { sample }),
    }
}

fn parse_anchor(view: ViewMode, value: &str) -> Result<NaiveDate, String> {
    match view {
        ViewMode::Month => NaiveDate::parse_from_str(&format!("{}/01", value), "%Y/%m/%d")
            .map_err(|_| format!("Invalid month '{}'. Use YYYY/MM.", value)),
        ViewMode::Week | ViewMode::Day => NaiveDate::parse_from_str(value, "%Y/%m/%d")
            .map_err(|_| format!("Invalid date '{}'. Use YYYY/MM/DD.", value)),
    }
}

pub async fn run_print_mode(request: PrintRequest) -> anyhow::Result<()> {
    let config = Config::load_or_create()?;
    let (store, identity) = open_store(&config, request.sample)?;

    let calendar = CalendarViewModel::starting_at(request.anchor)
        .with_view_mode(request.view)
        .with_locale(resolve_locale(&config.calendar.locale));

    let tasks = match load_tasks(&store, &identity).await {
        TaskLoad::Loaded(tasks) => tasks,
        TaskLoad::SignedOut => {
            eprintln!(
                "Not signed in: set [user] owner_id in {}",
                Config::config_path().display()
            );
            Vec::new()
        }
        TaskLoad::Failed(e) => {
            tracing::warn!("Print mode could not load tasks: {}", e);
            eprintln!("Failed to load tasks: {}", e);
            Vec::new()
        }
    };

    let grid = calendar.build_grid(&tasks);

    if request.json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    let text = format_grid_text(&calendar.period_title(), &grid);
    display_with_pager(&text)?;
    Ok(())
}

fn format_grid_text(title: &str, grid: &CalendarGrid) -> String {
    let mut lines = vec![title.to_string(), String::new()];

    match grid {
        CalendarGrid::Month(month) => format_month(&mut lines, month),
        CalendarGrid::Week(week) => format_week(&mut lines, week),
        CalendarGrid::Day(agenda) => format_day(&mut lines, agenda),
    }

    lines.join("\n")
}

fn format_month(lines: &mut Vec<String>, grid: &MonthGrid) {
    lines.push(
        grid.weekday_labels
            .iter()
            .map(|label| format!("{:>4}", label.chars().take(3).collect::<String>()))
            .collect::<String>(),
    );

    for row in &grid.rows {
        let row_text: String = row
            .iter()
            .map(|cell| {
                if cell.is_padding {
                    "    ".to_string()
                } else {
                    let marker = if cell.is_today { '<' } else if cell.tasks.is_empty() { ' ' } else { '*' };
                    format!("{:>3}{}", cell.date.format("%-d"), marker)
                }
            })
            .collect();
        lines.push(row_text.trim_end().to_string());
    }

    let busy: Vec<_> = grid.cells().filter(|cell| !cell.tasks.is_empty()).collect();
    if !busy.is_empty() {
        lines.push(String::new());
    }
    for cell in busy {
        lines.push(cell.date.format("%a %b %d").to_string());
        lines.extend(cell.tasks.iter().map(|task| format!("  {}", task_line(task))));
    }
}

fn format_week(lines: &mut Vec<String>, grid: &WeekGrid) {
    for day in &grid.days {
        let today = if day.is_today { " (today)" } else { "" };
        lines.push(format!("{} {}{}", day.label, day.date.format("%b %d"), today));

        let tasks: Vec<&Task> = grid
            .hours
            .iter()
            .filter_map(|row| grid.slot(day.date, row.hour))
            .flat_map(|slot| slot.tasks.iter())
            .collect();

        if tasks.is_empty() {
            lines.push("  -".to_string());
        }
        lines.extend(tasks.into_iter().map(|task| format!("  {}", task_line(task))));
    }
}

fn format_day(lines: &mut Vec<String>, agenda: &DayAgenda) {
    if agenda.task_count() == 0 {
        lines.push("No tasks scheduled.".to_string());
        return;
    }

    for slot in agenda.busy_slots() {
        lines.extend(slot.tasks.iter().map(|task| format!("- {}", task_line(task))));
    }
}

fn task_line(task: &Task) -> String {
    let mut line = format!(
        "{:<6} {} [{}]",
        task.due.format("%H:%M"),
        task.title,
        task.priority.as_str().to_lowercase()
    );
    if task.status == TaskStatus::Completed {
        line.push_str(" (done)");
    }
    line
}

fn display_with_pager(text: &str) -> Result<(), io::Error> {
    let pager_value = env::var("PAGER").unwrap_or_else(|_| "less".to_string());
    let mut parts = pager_value.split_whitespace();
    let Some(cmd) = parts.next() else {
        println!("{text}");
        return Ok(());
    };
    let args: Vec<&str> = parts.collect();

    match Command::new(cmd).args(&args).stdin(Stdio::piped()).spawn() {
        Ok(mut child) => {
            if let Some(stdin) = child.stdin.as_mut() {
                stdin.write_all(text.as_bytes())?;
            }
            let _ = child.wait();
        }
        Err(_) => println!("{text}"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use mandarina::calendar::Priority;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn parse(args: &[&str]) -> Result<CliMode, String> {
        parse_args(args.iter().map(|a| a.to_string()), date(2024, 3, 15))
    }

    fn task(id: i64, due: chrono::NaiveDateTime, title: &str) -> Task {
        Task {
            id,
            owner_id: 1,
            title: title.to_string(),
            description: None,
            due,
            priority: Priority::High,
            status: TaskStatus::Pending,
            completed_at: None,
        }
    }

    #[test]
    fn no_arguments_start_the_tui() {
        assert_eq!(parse(&[]), Ok(CliMode::Interactive { sample: false }));
        assert_eq!(parse(&["--sample"]), Ok(CliMode::Interactive { sample: true }));
    }

    #[test]
    fn agenda_without_date_uses_today() {
        let mode = parse(&["--agenda", "--json"]).unwrap();

        assert_eq!(
            mode,
            CliMode::Print(PrintRequest { view: ViewMode::Day, anchor: date(2024, 3, 15), json: true, sample: false })
        );
    }

    #[test]
    fn month_takes_year_and_month() {
        let mode = parse(&["--month", "2024/02"]).unwrap();

        let CliMode::Print(request) = mode else { panic!("expected print mode") };
        assert_eq!(request.view, ViewMode::Month);
        assert_eq!(request.anchor, date(2024, 2, 1));
    }

    #[test]
    fn week_takes_full_date() {
        let CliMode::Print(request) = parse(&["--week", "2024/12/31", "--sample"]).unwrap() else {
            panic!("expected print mode")
        };

        assert_eq!(request.anchor, date(2024, 12, 31));
        assert!(request.sample);
    }

    #[test]
    fn bad_input_is_rejected() {
        assert!(parse(&["--agenda", "2024-03-15"]).is_err());
        assert!(parse(&["--month", "2024/13"]).is_err());
        assert!(parse(&["--agenda", "--week"]).is_err());
        assert!(parse(&["--json"]).is_err());
        assert!(parse(&["--year"]).is_err());
    }

    #[test]
    fn empty_agenda_says_so() {
        let calendar = CalendarViewModel::starting_at(date(2024, 3, 15)).with_view_mode(ViewMode::Day);
        let grid = calendar.build_grid_on(&[], date(2024, 3, 15));

        let text = format_grid_text(&calendar.period_title(), &grid);

        assert_eq!(text, "Friday, March 15, 2024\n\nNo tasks scheduled.");
    }

    #[test]
    fn agenda_lists_tasks_in_time_order() {
        let calendar = CalendarViewModel::starting_at(date(2024, 3, 15)).with_view_mode(ViewMode::Day);
        let tasks = vec![
            task(1, date(2024, 3, 15).and_hms_opt(14, 0, 0).unwrap(), "Review"),
            task(2, date(2024, 3, 15).and_hms_opt(9, 30, 0).unwrap(), "Standup"),
        ];
        let grid = calendar.build_grid_on(&tasks, date(2024, 3, 1));

        let text = format_grid_text(&calendar.period_title(), &grid);

        assert_eq!(
            text.lines().skip(2).collect::<Vec<_>>(),
            vec!["- 09:30  Standup [high]", "- 14:00  Review [high]"]
        );
    }

    #[test]
    fn month_text_marks_busy_days_and_lists_them() {
        let calendar = CalendarViewModel::starting_at(date(2024, 3, 15));
        let tasks = vec![task(1, date(2024, 3, 15).and_hms_opt(9, 0, 0).unwrap(), "Standup")];
        let grid = calendar.build_grid_on(&tasks, date(2024, 3, 1));

        let text = format_grid_text(&calendar.period_title(), &grid);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "March 2024");
        assert_eq!(lines[2], " Sun Mon Tue Wed Thu Fri Sat");
        assert!(lines.iter().any(|line| line.contains(" 15*")));
        assert!(lines.iter().any(|line| line.contains(" 1<")));
        assert!(text.ends_with("Fri Mar 15\n  09:00  Standup [high]"));
    }

    #[test]
    fn week_text_has_one_heading_per_day() {
        let calendar = CalendarViewModel::starting_at(date(2024, 3, 13)).with_view_mode(ViewMode::Week);
        let grid = calendar.build_grid_on(&[], date(2024, 3, 13));

        let text = format_grid_text(&calendar.period_title(), &grid);

        assert!(text.starts_with("Mar 10 - Mar 16, 2024"));
        assert!(text.contains("Wed Mar 13 (today)"));
        assert_eq!(text.lines().filter(|line| *line == "  -").count(), 7);
    }
}
