use chrono::{Datelike, Local, NaiveDate};

use crate::api::{ApiClient, auth};
use crate::cli::commands::*;
use crate::cli::output::{BoardJson, CalendarJson, StatsJson, TaskJson, task_line};
use crate::io::config_io;
use crate::model::{ClientConfig, StoredUser, Task, TaskDraft, TaskStatus};
use crate::ops::Workspace;
use crate::util::date::{format_date, is_overdue};
use crate::views;

type CmdResult = Result<(), Box<dyn std::error::Error>>;

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

pub async fn dispatch(cli: Cli) -> CmdResult {
    let json = cli.json;
    let mut config = config_io::read_config()?;
    if let Some(url) = cli.base_url {
        config.base_url = url;
    }

    match cli.command {
        Commands::Login(args) => cmd_login(args, config).await,
        Commands::Register(args) => cmd_register(args, config).await,
        Commands::Tasks(args) => cmd_tasks(args, &config, json).await,
        Commands::Board => cmd_board(&config, json).await,
        Commands::Explorer => cmd_explorer(&config, json).await,
        Commands::Calendar(args) => cmd_calendar(args, &config, json).await,
        Commands::Dashboard => cmd_dashboard(&config, json).await,
        Commands::Categories => cmd_categories(&config, json).await,
        Commands::Add(args) => cmd_add(args, &config, json).await,
        Commands::Edit(args) => cmd_edit(args, &config, json).await,
        Commands::Done(args) => cmd_done(args, &config, json).await,
        Commands::Rm(args) => cmd_rm(args, &config).await,
        Commands::Show(args) => cmd_show(args, &config, json).await,
    }
}

fn client(config: &ClientConfig) -> ApiClient {
    let mut api = ApiClient::new(config.base_url.clone());
    api.set_token(config.token.clone());
    api
}

/// Load the workspace or fail with the user-facing load error
async fn loaded_workspace(api: &ApiClient) -> Result<Workspace, Box<dyn std::error::Error>> {
    let mut ws = Workspace::new();
    ws.load(api).await.map_err(|e| e.user_message())?;
    Ok(ws)
}

// ---------------------------------------------------------------------------
// Auth commands
// ---------------------------------------------------------------------------

async fn cmd_login(args: LoginArgs, mut config: ClientConfig) -> CmdResult {
    let api = client(&config);
    let session = auth::login(&api, &args.email, &args.password)
        .await
        .map_err(|e| e.user_message())?;
    config.token = Some(session.token);
    config.user = session.user.map(|u| StoredUser {
        id: u.id,
        name: u.name,
        email: u.email,
    });
    config_io::write_config(&config)?;
    println!("Signed in as {}", args.email);
    Ok(())
}

async fn cmd_register(args: RegisterArgs, mut config: ClientConfig) -> CmdResult {
    let api = client(&config);
    let session = auth::register(&api, &args.name, &args.email, &args.password)
        .await
        .map_err(|e| e.user_message())?;
    config.token = Some(session.token);
    config.user = session.user.map(|u| StoredUser {
        id: u.id,
        name: u.name,
        email: u.email,
    });
    config_io::write_config(&config)?;
    println!("Account created for {}", args.email);
    Ok(())
}

// ---------------------------------------------------------------------------
// Read commands
// ---------------------------------------------------------------------------

async fn cmd_tasks(args: TasksArgs, config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let ws = loaded_workspace(&api).await?;
    let status: Option<TaskStatus> = args.status.as_deref().map(str::parse).transpose()?;

    let snapshot = ws.store.snapshot();
    let tasks: Vec<&Task> = snapshot
        .iter()
        .filter(|t| status.is_none_or(|s| t.status == s))
        .collect();

    if json {
        let out: Vec<TaskJson> = tasks.iter().copied().map(TaskJson::from).collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else if tasks.is_empty() {
        println!("No tasks yet. Create a task to get started!");
    } else {
        let today = Local::now().date_naive();
        for task in tasks {
            let late = task.status != TaskStatus::Done
                && task.due_date.is_some_and(|d| is_overdue(d, today));
            let suffix = if late { "  (overdue)" } else { "" };
            println!("{}{}", task_line(task), suffix);
        }
    }
    Ok(())
}

async fn cmd_board(config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let ws = loaded_workspace(&api).await?;
    let snapshot = ws.store.snapshot();
    let board = views::board(&snapshot);

    if json {
        println!("{}", serde_json::to_string_pretty(&BoardJson::from(&board))?);
        return Ok(());
    }
    for (title, column) in board.columns() {
        if title == "Unknown" && column.is_empty() {
            continue;
        }
        println!("{} ({})", title, column.len());
        for task in column {
            println!("{}", task_line(task));
        }
        println!();
    }
    Ok(())
}

async fn cmd_explorer(config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let ws = loaded_workspace(&api).await?;
    let snapshot = ws.store.snapshot();
    let groups = views::explorer_groups(&snapshot);

    if json {
        #[derive(serde::Serialize)]
        struct GroupJson {
            id: &'static str,
            title: &'static str,
            tasks: Vec<TaskJson>,
        }
        let out: Vec<GroupJson> = groups
            .iter()
            .map(|g| GroupJson {
                id: g.id,
                title: g.title,
                tasks: g.tasks.iter().copied().map(TaskJson::from).collect(),
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }
    for group in groups {
        println!("{} ({})", group.title, group.tasks.len());
        for task in group.tasks {
            println!("{}", task_line(task));
        }
        println!();
    }
    Ok(())
}

async fn cmd_calendar(args: CalendarArgs, config: &ClientConfig, json: bool) -> CmdResult {
    let (year, month) = match args.month {
        Some(ref ym) => parse_year_month(ym)?,
        None => {
            let today = Local::now().date_naive();
            (today.year(), today.month())
        }
    };
    let api = client(config);
    let ws = loaded_workspace(&api).await?;
    let snapshot = ws.store.snapshot();
    let grid = views::month_grid(&snapshot, year, month)
        .ok_or_else(|| format!("invalid month: {}-{:02}", year, month))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&CalendarJson::from(&grid))?);
        return Ok(());
    }

    println!("{}-{:02}", year, month);
    println!("  Su  Mo  Tu  We  Th  Fr  Sa");
    for week in grid.weeks() {
        let row: Vec<String> = week
            .iter()
            .map(|cell| {
                if !cell.in_month {
                    "   .".to_string()
                } else if cell.tasks.is_empty() {
                    format!("{:>4}", cell.date.day())
                } else {
                    // Trailing star marks days with due tasks
                    format!("{:>3}*", cell.date.day())
                }
            })
            .collect();
        println!("{}", row.join(""));
    }
    println!();
    for cell in grid.cells.iter().filter(|c| !c.tasks.is_empty()) {
        for task in &cell.tasks {
            println!("{}", task_line(task));
        }
        if cell.overflow > 0 {
            println!("        ... and {} more on {}", cell.overflow, format_date(cell.date));
        }
    }
    Ok(())
}

async fn cmd_dashboard(config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let ws = loaded_workspace(&api).await?;
    let snapshot = ws.store.snapshot();
    let today = Local::now().date_naive();

    let recent = views::recent_tasks(&snapshot);
    let stats = views::completion_stats(&snapshot, today);
    let activity = views::weekly_activity(&snapshot, today);
    let totals = views::activity_totals(&snapshot);

    if json {
        #[derive(serde::Serialize)]
        struct DashboardJson {
            recent: Vec<TaskJson>,
            stats: StatsJson,
            weekly_activity: [usize; 7],
            completed: usize,
            incomplete: usize,
        }
        let out = DashboardJson {
            recent: recent.iter().copied().map(TaskJson::from).collect(),
            stats: stats.into(),
            weekly_activity: activity,
            completed: totals.completed,
            incomplete: totals.incomplete,
        };
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("Recent tasks");
    for task in recent {
        println!("{}", task_line(task));
    }
    println!();
    println!(
        "Upcoming: {}   In progress: {}   Done: {}",
        stats.upcoming, stats.in_progress, stats.done
    );
    println!(
        "This week (Su..Sa): {}",
        activity
            .iter()
            .map(usize::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    );
    println!(
        "Completed: {}   Incomplete: {}",
        totals.completed, totals.incomplete
    );
    Ok(())
}

async fn cmd_categories(config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let categories = api.list_categories().await.map_err(|e| e.user_message())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&categories)?);
        return Ok(());
    }
    for cat in categories {
        let color = cat.color.map(|c| format!("  {}", c)).unwrap_or_default();
        println!("  {:>4}  {}{}", cat.id, cat.name, color);
    }
    Ok(())
}

async fn cmd_show(args: IdArg, config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let task = api.get_task(args.id).await.map_err(|e| e.user_message())?;
    if json {
        println!("{}", serde_json::to_string_pretty(&TaskJson::from(&task))?);
        return Ok(());
    }
    println!("{}", task_line(&task));
    println!("        status: {}   priority: {}", task.status, task.priority);
    if let Some(desc) = &task.description {
        println!("        {}", desc);
    }
    for criterion in &task.acceptance_criteria {
        println!("        - {}", criterion);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Write commands
// ---------------------------------------------------------------------------

async fn cmd_add(args: AddArgs, config: &ClientConfig, json: bool) -> CmdResult {
    let draft = TaskDraft {
        title: args.title,
        description: args.description,
        due_date: Some(parse_date(&args.due)?),
        status: args.status.as_deref().map(str::parse).transpose()?.unwrap_or_default(),
        priority: args
            .priority
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default(),
        category_id: args.category,
    };

    let api = client(config);
    let mut ws = Workspace::new();
    let id = ws.create(&api, &draft).await.map_err(|e| e.user_message())?;

    if json {
        let task = ws.store.get(id).expect("created task is in the store");
        println!("{}", serde_json::to_string_pretty(&TaskJson::from(task))?);
    } else {
        println!("Created task {}", id);
    }
    Ok(())
}

async fn cmd_edit(args: EditArgs, config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let mut ws = loaded_workspace(&api).await?;
    let mut task = ws
        .store
        .get(args.id)
        .cloned()
        .ok_or_else(|| format!("task not found: {}", args.id))?;

    if let Some(title) = args.title {
        task.title = title;
    }
    if let Some(due) = args.due {
        task.due_date = Some(parse_date(&due)?);
    }
    if let Some(priority) = args.priority {
        task.priority = priority.parse()?;
    }
    if let Some(status) = args.status {
        task.set_status(status.parse()?);
    }
    if let Some(description) = args.description {
        task.description = Some(description);
    }
    if let Some(category) = args.category {
        task.category_id = if category == 0 { None } else { Some(category) };
    }

    ws.update(&api, &task).await.map_err(|e| e.user_message())?;
    if json {
        let task = ws.store.get(args.id).expect("updated task is in the store");
        println!("{}", serde_json::to_string_pretty(&TaskJson::from(task))?);
    } else {
        println!("Updated task {}", args.id);
    }
    Ok(())
}

async fn cmd_done(args: IdArg, config: &ClientConfig, json: bool) -> CmdResult {
    let api = client(config);
    let mut ws = loaded_workspace(&api).await?;
    ws.set_status(&api, args.id, TaskStatus::Done)
        .await
        .map_err(|e| e.user_message())?;
    if json {
        let task = ws.store.get(args.id).expect("task is in the store");
        println!("{}", serde_json::to_string_pretty(&TaskJson::from(task))?);
    } else {
        println!("Marked task {} done", args.id);
    }
    Ok(())
}

async fn cmd_rm(args: IdArg, config: &ClientConfig) -> CmdResult {
    let api = client(config);
    let mut ws = loaded_workspace(&api).await?;
    ws.delete(&api, args.id).await.map_err(|e| e.user_message())?;
    println!("Deleted task {}", args.id);
    Ok(())
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| format!("invalid date '{}', expected YYYY-MM-DD", raw))
}

fn parse_year_month(raw: &str) -> Result<(i32, u32), String> {
    let err = || format!("invalid month '{}', expected YYYY-MM", raw);
    let (y, m) = raw.split_once('-').ok_or_else(err)?;
    let year = y.parse().map_err(|_| err())?;
    let month: u32 = m.parse().map_err(|_| err())?;
    if !(1..=12).contains(&month) {
        return Err(err());
    }
    Ok((year, month))
}
