use super::render::{
    print_config, print_message, print_migration, print_next_cursor, print_record,
    print_records, MessageLevel,
};
use super::setup::{Cli, Commands};
use chrono::{Local, NaiveDate};
use clap::Parser;
use daily::config::{self, Backend, DailyConfig};
use daily::error::{DailyError, RecordRef, Result};
use daily::service::RecordService;
use daily::store::document::DocumentStore;
use daily::store::fs::FileStore;
use daily::store::{ListQuery, RecordStore};
use log::{debug, LevelFilter};
use std::path::{Path, PathBuf};

type DynStore = Box<dyn RecordStore>;

struct AppContext {
    service: RecordService<DynStore>,
    config: DailyConfig,
    backend: Backend,
    data_dir: PathBuf,
    config_path: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::New { date, content }) => handle_new(&mut ctx, date, content),
        Some(Commands::List {
            limit,
            cursor,
            from,
            to,
            all,
        }) => handle_list(&ctx, limit, cursor, from, to, all),
        Some(Commands::Show { date }) => handle_show(&ctx, date),
        Some(Commands::Edit { date, content }) => handle_edit(&mut ctx, date, content),
        Some(Commands::Delete { date }) => handle_delete(&mut ctx, date),
        Some(Commands::Migrate { to }) => handle_migrate(&ctx, to),
        Some(Commands::Config) => handle_config(&ctx),
        None => handle_show(&ctx, None),
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    // RUST_LOG, when set, takes precedence over the flag
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format_timestamp_millis()
        .parse_default_env()
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let config_path = config::default_config_path().ok();
    let config = DailyConfig::load(config_path.as_deref())?;

    let backend = cli.backend.unwrap_or_else(|| config.backend());
    let data_dir = match &cli.data_dir {
        Some(dir) => dir.clone(),
        None => config.data_dir()?,
    };
    debug!("using {} backend in {}", backend, data_dir.display());

    let store = open_store(backend, &data_dir)?;
    Ok(AppContext {
        service: RecordService::new(store),
        config,
        backend,
        data_dir,
        config_path,
    })
}

fn open_store(backend: Backend, data_dir: &Path) -> Result<DynStore> {
    Ok(match backend {
        Backend::File => Box::new(FileStore::new(config::entries_dir(data_dir))),
        Backend::Document => Box::new(DocumentStore::open(config::database_path(data_dir))?),
    })
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn handle_new(ctx: &mut AppContext, date: Option<NaiveDate>, content: Vec<String>) -> Result<()> {
    let record = ctx
        .service
        .create(date.unwrap_or_else(today), &content.join(" "))?;
    print_message(
        MessageLevel::Success,
        &format!("Created entry for {}.", record.entry_date),
    );
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    limit: Option<usize>,
    cursor: Option<String>,
    from: Option<NaiveDate>,
    to: Option<NaiveDate>,
    all: bool,
) -> Result<()> {
    let query = ListQuery::new(limit.unwrap_or(ctx.config.page_size))
        .with_cursor(cursor)
        .with_range(from, to);

    if all {
        print_records(&ctx.service.list_all(&query)?);
        return Ok(());
    }

    let page = ctx.service.list(&query)?;
    print_records(&page.records);
    if let Some(next) = &page.next_cursor {
        print_next_cursor(next);
    }
    Ok(())
}

fn handle_show(ctx: &AppContext, date: Option<NaiveDate>) -> Result<()> {
    let date = date.unwrap_or_else(today);
    match ctx.service.get_by_date(date)? {
        Some(record) => {
            print_record(&record);
            Ok(())
        }
        None => Err(DailyError::NotFound(RecordRef::Date(date))),
    }
}

fn handle_edit(ctx: &mut AppContext, date: NaiveDate, content: Vec<String>) -> Result<()> {
    let record = ctx.service.update_by_date(date, &content.join(" "))?;
    print_message(
        MessageLevel::Success,
        &format!("Updated entry for {}.", record.entry_date),
    );
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, date: NaiveDate) -> Result<()> {
    ctx.service.delete_by_date(date)?;
    print_message(MessageLevel::Success, &format!("Deleted entry for {}.", date));
    Ok(())
}

fn handle_migrate(ctx: &AppContext, to: Option<Backend>) -> Result<()> {
    let to = to.unwrap_or_else(|| ctx.backend.other());
    if to == ctx.backend {
        return Err(DailyError::Validation(format!(
            "already using the {} backend",
            to
        )));
    }
    let mut target = open_store(to, &ctx.data_dir)?;
    print_message(
        MessageLevel::Info,
        &format!("Copying entries from {} to {}...", ctx.backend, to),
    );
    let report = ctx
        .service
        .migrate_into(&mut target, ctx.config.page_size)?;
    print_migration(&report);
    Ok(())
}

fn handle_config(ctx: &AppContext) -> Result<()> {
    let mut effective = ctx.config.clone();
    effective.backend = Some(ctx.backend);
    print_config(&effective, &ctx.data_dir, ctx.config_path.as_deref());
    Ok(())
}
