use chrono::{Local, NaiveDate};
use completion_estimator::calendar::{weekday_from_index, weekday_index};
use completion_estimator::dates::{format_display_date, parse_calendar_day};
use completion_estimator::{
    Backlog, CompletionEstimator, EstimationReport, Job, JobStatus, WorkCalendar,
    load_backlog_from_json, load_calendar_from_json, load_jobs_from_csv, save_backlog_to_json,
    save_calendar_to_json, save_jobs_to_csv,
};
use std::io::{self, Write};
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

const TODAY_ENV: &str = "COMPLETION_ESTIMATOR_TODAY";
const CALENDAR_ENV: &str = "COMPLETION_ESTIMATOR_CALENDAR";

struct Session {
    jobs: Vec<Job>,
    calendar: WorkCalendar,
    today: NaiveDate,
}

impl Session {
    fn find_mut(&mut self, id: &str) -> Option<&mut Job> {
        self.jobs.iter_mut().find(|job| job.id == id)
    }

    fn estimate(&self) -> Result<EstimationReport, completion_estimator::EstimationError> {
        CompletionEstimator::new(&self.calendar, self.today).execute(&self.jobs)
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn render_text_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.len()).collect();
    for row in rows {
        for (ci, cell) in row.iter().enumerate() {
            if cell.len() > widths[ci] {
                widths[ci] = cell.len();
            }
        }
    }

    let mut sep = String::new();
    sep.push('+');
    for w in &widths {
        sep.push_str(&"-".repeat(*w + 2));
        sep.push('+');
    }

    let mut out = String::new();
    out.push_str(&sep);
    out.push('\n');
    push_row(&mut out, &widths, headers.iter().copied());
    out.push_str(&sep);
    out.push('\n');
    for row in rows {
        push_row(&mut out, &widths, row.iter().map(String::as_str));
    }
    out.push_str(&sep);
    out.push('\n');
    out
}

fn push_row<'a>(out: &mut String, widths: &[usize], cells: impl Iterator<Item = &'a str>) {
    out.push('|');
    for (i, cell) in cells.enumerate() {
        out.push(' ');
        out.push_str(cell);
        out.push_str(&" ".repeat(widths[i].saturating_sub(cell.len())));
        out.push_str(" |");
    }
    out.push('\n');
}

fn render_jobs(jobs: &[Job]) -> String {
    let rows: Vec<Vec<String>> = jobs
        .iter()
        .map(|job| {
            vec![
                job.id.clone(),
                job.status.label().to_string(),
                job.estimated_hours.to_string(),
                job.hours_completed.to_string(),
                job.remaining_hours().to_string(),
                job.progress_percent()
                    .map(|pct| format!("{pct:.0}%"))
                    .unwrap_or_default(),
                job.deadline.map(|d| d.to_string()).unwrap_or_default(),
                job.date_received.to_string(),
            ]
        })
        .collect();
    render_text_table(
        &[
            "id",
            "status",
            "estimated",
            "completed",
            "remaining",
            "progress",
            "deadline",
            "received",
        ],
        &rows,
    )
}

fn render_report(report: &EstimationReport) -> String {
    let rows: Vec<Vec<String>> = report
        .entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let flag = match entry.days_late() {
                Some(days) => format!("LATE +{days}d"),
                None => String::new(),
            };
            vec![
                (idx + 1).to_string(),
                entry.job_id.clone(),
                entry.status.label().to_string(),
                entry.remaining_hours.to_string(),
                entry.deadline.map(|d| d.to_string()).unwrap_or_default(),
                format_display_date(entry.estimated_completion_date),
                flag,
            ]
        })
        .collect();
    render_text_table(
        &["#", "job", "status", "remaining", "deadline", "estimated", "urgent"],
        &rows,
    )
}

fn print_help() {
    println!(
        "Commands:\n  help                               Show this help\n  show                               Show the backlog\n  add <id> <hours> [deadline] [status]\n                                     Upsert a job received today\n  hours    <id> <float>              Set hours completed\n  status   <id> <waiting|started|complete>\n                                     Set job status\n  deadline <id> <YYYY-MM-DD|none>    Set or clear the deadline\n  delete   <id>                      Remove a job\n  today [YYYY-MM-DD]                 Show or pin the simulation start date\n  calendar show                      Display work preferences\n  calendar hours <float>             Set hours per day\n  calendar days <n>                  Set days per week (informational)\n  calendar dayoff <0-6>              Toggle a weekly day off (Sunday=0)\n  calendar custom <YYYY-MM-DD>       Toggle a one-off day off\n  calendar set <json_path>           Load work preferences from JSON file\n  calendar save <json_path>          Save work preferences to JSON file\n  save <json|csv> <path>             Write the backlog to disk\n  load <json|csv> <path>             Read a backlog from disk\n  estimate [json]                    Estimate completion dates (table or JSON)\n  quit|exit                          Exit"
    );
}

fn print_statuses() {
    println!("Statuses:");
    for (key, description) in JobStatus::variants() {
        println!("  {:<10} {}", key, description);
    }
}

fn print_calendar_info(calendar: &WorkCalendar) {
    let config = calendar.to_config();
    let days_off = config
        .days_off
        .iter()
        .filter_map(|idx| weekday_from_index(*idx).ok())
        .map(|wd| wd.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    let custom = config
        .custom_days_off
        .iter()
        .map(|d| d.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    println!(
        "Days per week      : {} ({} working weekdays)",
        calendar.days_per_week(),
        calendar.working_days_per_week()
    );
    println!("Hours per day      : {}", calendar.hours_per_day());
    println!("Days off           : {}", days_off);
    println!("Custom days off    : {}", custom);
}

fn startup_today() -> NaiveDate {
    match std::env::var(TODAY_ENV) {
        Ok(raw) => match parse_calendar_day(&raw) {
            Some(date) => date,
            None => {
                eprintln!("Ignoring {TODAY_ENV}={raw}: expected YYYY-MM-DD");
                Local::now().date_naive()
            }
        },
        Err(_) => Local::now().date_naive(),
    }
}

fn startup_calendar() -> WorkCalendar {
    match std::env::var(CALENDAR_ENV) {
        Ok(path) => match load_calendar_from_json(&path) {
            Ok(calendar) => calendar,
            Err(e) => {
                eprintln!("Ignoring {CALENDAR_ENV}={path}: {e}");
                WorkCalendar::default()
            }
        },
        Err(_) => WorkCalendar::default(),
    }
}

fn main() {
    init_tracing();

    let mut session = Session {
        jobs: Vec::new(),
        calendar: startup_calendar(),
        today: startup_today(),
    };

    println!("Completion Estimator (CLI) - type 'help' for commands\n");

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("> ");
        let _ = io::stdout().flush();
        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let mut parts = input.split_whitespace();
        let cmd = parts.next().unwrap_or("");

        match cmd {
            "help" => {
                print_help();
                print_statuses();
            }
            "quit" | "exit" => break,
            "show" => {
                println!("{}", render_jobs(&session.jobs));
            }
            "add" => {
                let id_s = parts.next();
                let hours_s = parts.next();
                let deadline_s = parts.next();
                let status_s = parts.next();
                match (id_s, hours_s) {
                    (Some(id), Some(hours_s)) => {
                        let hours: f64 = match hours_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid hours");
                                continue;
                            }
                        };
                        let deadline = match deadline_s {
                            None | Some("-") | Some("none") => None,
                            Some(raw) => match parse_calendar_day(raw) {
                                Some(d) => Some(d),
                                None => {
                                    println!("Invalid deadline (YYYY-MM-DD)");
                                    continue;
                                }
                            },
                        };
                        let status = match status_s.map(JobStatus::from_str) {
                            None => JobStatus::Waiting,
                            Some(Ok(status)) => status,
                            Some(Err(_)) => {
                                println!("Invalid status (waiting|started|complete)");
                                continue;
                            }
                        };
                        let mut job = Job::new(id, hours, session.today).with_status(status);
                        job.deadline = deadline;
                        match session.find_mut(id) {
                            Some(existing) => {
                                job.hours_completed = existing.hours_completed;
                                job.date_received = existing.date_received;
                                job.description = existing.description.take();
                                *existing = job;
                            }
                            None => session.jobs.push(job),
                        }
                        println!("Job upserted.");
                        println!("{}", render_jobs(&session.jobs));
                    }
                    _ => println!("Usage: add <id> <hours> [deadline] [status]"),
                }
            }
            "hours" => {
                let id_s = parts.next();
                let val_s = parts.next();
                match (id_s, val_s) {
                    (Some(id), Some(val_s)) => {
                        let val: f64 = match val_s.parse() {
                            Ok(v) => v,
                            Err(_) => {
                                println!("Invalid float");
                                continue;
                            }
                        };
                        match session.find_mut(id) {
                            Some(job) => {
                                job.hours_completed = val;
                                println!("hours_completed set.");
                            }
                            None => println!("Job {id} not found."),
                        }
                    }
                    _ => println!("Usage: hours <id> <float>"),
                }
            }
            "status" => {
                let id_s = parts.next();
                let val_s = parts.next();
                match (id_s, val_s) {
                    (Some(id), Some(val_s)) => {
                        let status = match JobStatus::from_str(val_s) {
                            Ok(s) => s,
                            Err(_) => {
                                println!("Invalid status (waiting|started|complete)");
                                continue;
                            }
                        };
                        match session.find_mut(id) {
                            Some(job) => {
                                job.status = status;
                                println!("Job {id} is now {}.", status.label());
                            }
                            None => println!("Job {id} not found."),
                        }
                    }
                    _ => println!("Usage: status <id> <waiting|started|complete>"),
                }
            }
            "deadline" => {
                let id_s = parts.next();
                let val_s = parts.next();
                match (id_s, val_s) {
                    (Some(id), Some(val_s)) => {
                        let deadline = if val_s == "none" || val_s == "-" {
                            None
                        } else {
                            match parse_calendar_day(val_s) {
                                Some(d) => Some(d),
                                None => {
                                    println!("Invalid date (YYYY-MM-DD)");
                                    continue;
                                }
                            }
                        };
                        match session.find_mut(id) {
                            Some(job) => {
                                job.deadline = deadline;
                                println!("deadline set.");
                            }
                            None => println!("Job {id} not found."),
                        }
                    }
                    _ => println!("Usage: deadline <id> <YYYY-MM-DD|none>"),
                }
            }
            "delete" => match parts.next() {
                Some(id) => {
                    let before = session.jobs.len();
                    session.jobs.retain(|job| job.id != id);
                    if session.jobs.len() < before {
                        println!("Deleted job {id}.");
                    } else {
                        println!("Job {id} not found.");
                    }
                }
                None => println!("Usage: delete <id>"),
            },
            "today" => match parts.next() {
                None => println!("Today is {}.", session.today),
                Some(raw) => match parse_calendar_day(raw) {
                    Some(date) => {
                        session.today = date;
                        println!("Today set to {}.", date);
                    }
                    None => println!("Invalid date (YYYY-MM-DD)"),
                },
            },
            "estimate" => match session.estimate() {
                Ok(report) if matches!(parts.next(), Some("json")) => {
                    match serde_json::to_string_pretty(&report.entries) {
                        Ok(json) => println!("{json}"),
                        Err(e) => println!("Error serializing schedule: {}", e),
                    }
                }
                Ok(report) => {
                    for issue in &report.job_issues {
                        println!("Warning: {issue}");
                    }
                    println!(
                        "Estimated ({})\n{}",
                        report.summary.to_cli_summary(),
                        render_report(&report)
                    );
                }
                Err(e) => println!("Estimation error: {}", e),
            },
            "calendar" => match parts.next() {
                Some("show") | None => print_calendar_info(&session.calendar),
                Some("hours") => match parts.next().map(str::parse::<f64>) {
                    Some(Ok(hours)) if hours.is_finite() && hours > 0.0 => {
                        session.calendar.set_hours_per_day(hours);
                        println!("Hours per day set to {}.", hours);
                    }
                    Some(_) => println!("Hours per day must be a positive number."),
                    None => println!("Usage: calendar hours <float>"),
                },
                Some("days") => match parts.next().map(str::parse::<u8>) {
                    Some(Ok(days)) if (1..=7).contains(&days) => {
                        session.calendar.set_days_per_week(days);
                        println!("Days per week set to {}.", days);
                    }
                    Some(_) => println!("Days per week must be between 1 and 7."),
                    None => println!("Usage: calendar days <n>"),
                },
                Some("dayoff") => {
                    match parts
                        .next()
                        .and_then(|raw| raw.parse::<u8>().ok())
                        .map(weekday_from_index)
                    {
                        Some(Ok(weekday)) => {
                            let off = session.calendar.toggle_day_off(weekday);
                            println!(
                                "{} (index {}) is now {}.",
                                weekday,
                                weekday_index(weekday),
                                if off { "a day off" } else { "a working day" }
                            );
                        }
                        _ => println!("Usage: calendar dayoff <0-6> (Sunday=0)"),
                    }
                }
                Some("custom") => match parts.next().and_then(parse_calendar_day) {
                    Some(date) => {
                        let off = session.calendar.toggle_custom_day_off(date);
                        println!(
                            "{} is now {}.",
                            date,
                            if off { "a day off" } else { "a working day" }
                        );
                    }
                    None => println!("Usage: calendar custom <YYYY-MM-DD>"),
                },
                Some("set") => match parts.next() {
                    Some(path) => match load_calendar_from_json(path) {
                        Ok(calendar) => {
                            session.calendar = calendar;
                            println!("Calendar updated from {}.", path);
                            print_calendar_info(&session.calendar);
                        }
                        Err(e) => println!("Error loading calendar: {}", e),
                    },
                    None => println!("Usage: calendar set <json_path>"),
                },
                Some("save") => match parts.next() {
                    Some(path) => match save_calendar_to_json(&session.calendar, path) {
                        Ok(_) => println!("Calendar saved to {}.", path),
                        Err(e) => println!("Error saving calendar: {}", e),
                    },
                    None => println!("Usage: calendar save <json_path>"),
                },
                Some(other) => {
                    println!("Unknown calendar command '{}'.", other);
                    println!(
                        "Usage: calendar show|hours|days|dayoff|custom|set <json_path>|save <json_path>"
                    );
                }
            },
            "save" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path) {
                    (Some("json"), Some(path)) => {
                        let backlog = Backlog {
                            calendar: Some(session.calendar.to_config()),
                            jobs: session.jobs.clone(),
                        };
                        match save_backlog_to_json(&backlog, path) {
                            Ok(_) => println!("Backlog saved to {}.", path),
                            Err(e) => println!("Error saving backlog: {}", e),
                        }
                    }
                    (Some("csv"), Some(path)) => match save_jobs_to_csv(&session.jobs, path) {
                        Ok(_) => println!("Backlog saved to {}.", path),
                        Err(e) => println!("Error saving backlog: {}", e),
                    },
                    _ => println!("Usage: save <json|csv> <path>"),
                }
            }
            "load" => {
                let fmt = parts.next();
                let path = parts.next();
                match (fmt, path) {
                    (Some("json"), Some(path)) => {
                        match load_backlog_from_json(path)
                            .and_then(|backlog| Ok((backlog.work_calendar()?, backlog)))
                        {
                            Ok((calendar, backlog)) => {
                                if backlog.calendar.is_some() {
                                    session.calendar = calendar;
                                }
                                session.jobs = backlog.jobs;
                                println!("Backlog loaded from {}.", path);
                                println!("{}", render_jobs(&session.jobs));
                            }
                            Err(e) => println!("Error loading backlog: {}", e),
                        }
                    }
                    (Some("csv"), Some(path)) => match load_jobs_from_csv(path) {
                        Ok(jobs) => {
                            session.jobs = jobs;
                            println!("Backlog loaded from {}.", path);
                            println!("{}", render_jobs(&session.jobs));
                        }
                        Err(e) => println!("Error loading backlog: {}", e),
                    },
                    _ => println!("Usage: load <json|csv> <path>"),
                }
            }
            _ => {
                println!("Unknown command. Type 'help'.");
            }
        }
    }
}
