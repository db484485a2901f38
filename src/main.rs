// Main entry point
use catalog_admin::application::session::CatalogSession;
use catalog_admin::domain::error::CatalogError;
use catalog_admin::domain::model::{
    CreateProductRequest, FilterState, PageRequest, Pagination, QueryStatus, UpdateProductRequest,
};
use catalog_admin::infrastructure::config::{self, load_config, Logging};
use catalog_admin::interfaces::cli::{Cli, Command, FilterArgs, ListArgs};
use catalog_admin::presentation::render::{format_cache_stats, format_page, format_product};
use catalog_admin::presentation::theme::Theme;
use catalog_admin::state::AppState;
use clap::Parser;
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config()?;

    // Initialize logging
    if config.logging.enable {
        init_logging(&config.logging)?;
    }

    let theme_name = cli.theme.as_deref().unwrap_or(config.theme.as_str());
    let theme = Theme::from_name(theme_name);
    let state = AppState::new(config)?;

    match cli.command {
        Command::List(args) => list_products(&state, &theme, args).await?,
        Command::Get { id, json } => {
            let product = exit_on_not_found(state.controller.get_product(id).await)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&product)?);
            } else {
                print!("{}", format_product(&product, &theme));
            }
        }
        Command::Create {
            name,
            price,
            category,
        } => {
            let request = CreateProductRequest {
                name: name.trim().to_string(),
                price,
                category,
            };
            let product = state.controller.create(&request).await?;
            println!("{}", "✔ Product created".green());
            print!("{}", format_product(&product, &theme));
        }
        Command::Update {
            id,
            name,
            price,
            category,
            status,
        } => {
            let current = exit_on_not_found(state.controller.get_product(id).await)?;
            let mut request = UpdateProductRequest::from(current);
            if let Some(name) = name {
                request.name = name.trim().to_string();
            }
            if let Some(price) = price {
                request.price = price;
            }
            if let Some(category) = category {
                request.category = category;
            }
            if let Some(status) = status {
                request.status = status;
            }
            let product = exit_on_not_found(state.controller.update(id, &request).await)?;
            println!("{}", "✔ Product updated".green());
            print!("{}", format_product(&product, &theme));
        }
        Command::Delete { id, yes } => {
            if !yes && !confirm(&format!("Delete product {}?", id)).await? {
                eprintln!("Cancelled");
                return Ok(());
            }
            exit_on_not_found(state.controller.delete(id).await)?;
            println!("{}", format!("✔ Product {} deleted", id).green());
        }
        Command::Toggle { id } => {
            let product = exit_on_not_found(state.controller.toggle_status(id).await)?;
            println!("{}", format!("✔ Product {} is now {}", id, product.status).green());
        }
        Command::Browse(args) => browse(&state, &theme, args).await?,
        Command::Status => print_status(&state),
        Command::GenerateConfig => config::generate_config_sample()?,
    }

    Ok(())
}

/// Initialize logging with path and level configuration
fn init_logging(logging: &Logging) -> anyhow::Result<()> {
    use tracing_subscriber::EnvFilter;

    let level = match logging.level.as_str() {
        "DEBUG" => "debug",
        "INFO" => "info",
        "WARN" => "warn",
        "ERROR" => "error",
        _ => "warn",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if let Some(path) = &logging.path {
        if !path.is_empty() {
            // Log to file
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(file)
                .init();
            return Ok(());
        }
    }

    // Log to stderr (default)
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    Ok(())
}

/// 404 from a by-id call is a user error: report it and exit 1
fn exit_on_not_found<T>(result: Result<T, CatalogError>) -> Result<T, CatalogError> {
    match result {
        Err(CatalogError::NotFound { id }) => {
            eprintln!("{}", format!("✘ Product {} not found", id).red());
            std::process::exit(1);
        }
        other => other,
    }
}

// 读取失败的列表查询只能从状态里看到
fn report_query_failure(state: &AppState) {
    if let QueryStatus::Failed { reason } = state.controller.status() {
        eprintln!(
            "{}",
            format!("✘ Error loading products: {}", reason).red()
        );
    }
}

async fn list_products(state: &AppState, theme: &Theme, args: ListArgs) -> anyhow::Result<()> {
    let request = match state.controller.pagination() {
        Pagination::Offset => {
            if args.cursor.is_some() {
                eprintln!("{}", "--cursor ignored: offset paging is configured".yellow());
            }
            PageRequest::page(args.page.unwrap_or(0))
        }
        Pagination::Cursor { .. } => {
            if args.page.is_some() {
                eprintln!("{}", "--page ignored: cursor paging is configured".yellow());
            }
            PageRequest::cursor(args.cursor)
        }
    };
    let page_size = args.filter.size.unwrap_or(state.config.page_size);

    let page = state
        .controller
        .query(&args.filter.filters(), &request, page_size, !args.nocache)
        .await;
    report_query_failure(state);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&page)?);
    } else {
        print!("{}", format_page(&page, theme));
    }
    Ok(())
}

async fn confirm(prompt: &str) -> anyhow::Result<bool> {
    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(format!("{} [y/N] ", prompt).as_bytes())
        .await?;
    stdout.flush().await?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(matches!(line.trim(), "y" | "Y" | "yes"))
}

fn print_browse_page(session: &CatalogSession, state: &AppState, theme: &Theme) {
    report_query_failure(state);
    if let Some(page) = session.current() {
        println!("{}", (theme.title)(&format!("Page {}", session.page_number())));
        print!("{}", format_page(page, theme));
    }
    let mut hints = Vec::new();
    if session.has_next() {
        hints.push("[n]ext");
    }
    if session.has_previous() {
        hints.push("[p]revious");
    }
    hints.extend(["[r]efresh", "[f] <name>", "[s]tats", "[q]uit"]);
    println!("{}", (theme.hint)(&hints.join("  ")));
}

async fn browse(state: &AppState, theme: &Theme, args: FilterArgs) -> anyhow::Result<()> {
    let mut session = state.session(args.size);
    session.set_filters(args.filters());
    session.load().await;
    print_browse_page(&session, state, theme);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = tokio::signal::ctrl_c() => {
                eprintln!();
                break;
            }
        };
        let Some(line) = line else { break };
        let input = line.trim();
        let (command, rest) = input.split_once(' ').unwrap_or((input, ""));

        match command {
            "n" | "next" => {
                if session.next_page().await.is_none() {
                    eprintln!("{}", "Already on the last page".yellow());
                    continue;
                }
            }
            "p" | "prev" | "previous" => {
                if session.previous_page().await.is_none() {
                    eprintln!("{}", "Already on the first page".yellow());
                    continue;
                }
            }
            "r" | "refresh" => {
                session.refresh().await;
            }
            "f" | "filter" => {
                let filters = session.filters().clone();
                let name = rest.trim();
                let filters = if name.is_empty() {
                    FilterState { name: None, ..filters }
                } else {
                    filters.with_name(name)
                };
                session.set_filters(filters);
                session.load().await;
            }
            "s" | "stats" => {
                print!("{}", format_cache_stats(&state.controller.cache_stats(), theme));
                continue;
            }
            "q" | "quit" | "exit" => break,
            "" => continue,
            other => {
                eprintln!("{}", format!("✘ Unknown command: {}", other).red());
                continue;
            }
        }
        print_browse_page(&session, state, theme);
    }

    Ok(())
}

fn print_status(state: &AppState) {
    let config = &state.config;
    println!("{}", "catalog Status".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!(
        "Config: {}",
        config::get_config_path()
            .filter(|p| p.exists())
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "Not found (using defaults)".to_string())
    );
    println!("API: {}", config.api_url);
    println!("Pagination: {}", state.controller.pagination().name());
    println!("Page size: {}", config.page_size);
    println!("Cache TTL: {}s", config.cache_ttl_secs);
    println!("Category format: {:?}", config.category_format);
}
