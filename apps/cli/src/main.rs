use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use log::debug;
use uclad_core::EditorSession;
use uclad_project::{scanner, StdFileSystem};
use uclad_search::{
    line_column_to_offset, offset_to_line_column, CancellationToken, SearchConfig, SearchQuery,
    SearchStatus,
};

#[derive(Parser)]
#[command(
    name = "uclad-cli",
    about = "Workspace search and file utilities for Uclad",
    author,
    version
)]
struct Cli {
    /// 指定工作區根目錄；預設為目前目錄。 / Workspace root (defaults to current directory).
    #[arg(long, global = true, value_name = "PATH")]
    workspace: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 在工作區內搜尋文字（不分大小寫）。 / Search the workspace for text, ignoring case.
    Search(SearchArgs),
    /// 以檔案總管順序列出資料夾內容。 / List a directory in explorer order.
    Ls(LsArgs),
    /// 轉換位移與行列位置。 / Convert between byte offsets and line/column positions.
    Locate(LocateArgs),
    /// 建立新的空白檔案。 / Create a new empty file.
    New(NewArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// 搜尋文字。 / Text to search for.
    query: String,

    /// 搜尋的根目錄；預設為工作區。 / Directory to search; defaults to the workspace.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// JSON 搜尋設定檔（排除資料夾、檔案大小上限）。 / JSON search config (excluded directories, size limit).
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct LsArgs {
    /// 要列出的資料夾；預設為工作區。 / Directory to list; defaults to the workspace.
    #[arg(value_name = "DIR")]
    dir: Option<PathBuf>,
}

#[derive(Args)]
struct LocateArgs {
    /// 目標文字檔。 / Text file to inspect.
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// 位元組位移。 / Byte offset into the file.
    #[arg(long, conflicts_with_all = ["line", "column"], required_unless_present = "line")]
    offset: Option<usize>,

    /// 行號（從 1 起算）。 / 1-based line number.
    #[arg(long, requires = "column")]
    line: Option<usize>,

    /// 欄號（從 1 起算，以字元計）。 / 1-based column, counted in characters.
    #[arg(long, requires = "line")]
    column: Option<usize>,
}

#[derive(Args)]
struct NewArgs {
    /// 新檔案所在資料夾。 / Directory that receives the new file.
    #[arg(value_name = "DIR")]
    dir: PathBuf,

    /// 新檔案名稱。 / Name of the new file.
    #[arg(value_name = "NAME")]
    name: String,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let Cli { workspace, command } = Cli::parse();
    let workspace_root = resolve_workspace(workspace)?;
    match command {
        Commands::Search(args) => execute_search(args, &workspace_root),
        Commands::Ls(args) => execute_ls(args, &workspace_root),
        Commands::Locate(args) => execute_locate(args),
        Commands::New(args) => execute_new(args, &workspace_root),
    }
}

fn execute_search(args: SearchArgs, workspace_root: &Path) -> Result<()> {
    let query = SearchQuery::new(args.query)?;
    let config = match args.config {
        Some(path) => {
            let path = resolve_in(workspace_root, path);
            debug!("loading search config from {}", path.display());
            SearchConfig::load(&path)
                .with_context(|| format!("failed to load config {}", path.display()))?
        }
        None => SearchConfig::default(),
    };
    let root = args
        .root
        .map_or_else(|| workspace_root.to_path_buf(), |root| resolve_in(workspace_root, root));

    let mut session = EditorSession::with_config(config);
    session.open_directory(&root);
    let summary = session.search(&StdFileSystem, &query, &CancellationToken::new());
    if let SearchStatus::Failed(err) = summary.status {
        return Err(anyhow!(err));
    }

    let results = session.navigator().results();
    if results.is_empty() {
        println!("No matches found.");
        return Ok(());
    }

    for found in results {
        let position = found.position();
        println!(
            "{}:{}:{}: {}",
            found.relative_path.display(),
            position.line,
            position.column,
            found.line_text().trim_end()
        );
    }
    println!(
        "Search \"{}\" ({} hits in {} files scanned)",
        query.text(),
        summary.total_matches,
        summary.stats.files_scanned
    );
    Ok(())
}

fn execute_ls(args: LsArgs, workspace_root: &Path) -> Result<()> {
    let dir = args
        .dir
        .map_or_else(|| workspace_root.to_path_buf(), |dir| resolve_in(workspace_root, dir));
    let entries = scanner::list_sorted(&StdFileSystem, &dir)
        .with_context(|| format!("failed to list {}", dir.display()))?;
    for entry in entries {
        if entry.is_directory {
            println!("{}/", entry.name);
        } else {
            println!("{}", entry.name);
        }
    }
    Ok(())
}

fn execute_locate(args: LocateArgs) -> Result<()> {
    let text = fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let requested = match (args.offset, args.line, args.column) {
        (Some(offset), _, _) => offset,
        (None, Some(line), Some(column)) => line_column_to_offset(&text, line, column),
        _ => return Err(anyhow!("either --offset or --line with --column is required")),
    };
    let position = offset_to_line_column(&text, requested);
    let offset = line_column_to_offset(&text, position.line, position.column);
    println!("{position} (offset {offset})");
    Ok(())
}

fn execute_new(args: NewArgs, workspace_root: &Path) -> Result<()> {
    let dir = resolve_in(workspace_root, args.dir);
    let mut session = EditorSession::new();
    let path = session
        .create_file(&StdFileSystem, &dir, &args.name)
        .with_context(|| format!("failed to create {}", args.name))?;
    let kind = session
        .active_file_type()
        .map_or_else(String::new, |kind| format!(" [{kind}]"));
    println!("Created {}{kind}", path.display());
    Ok(())
}

fn resolve_workspace(workspace: Option<PathBuf>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("determine current directory")?;
    Ok(match workspace {
        Some(path) => resolve_in(&cwd, path),
        None => cwd,
    })
}

fn resolve_in(base: &Path, path: PathBuf) -> PathBuf {
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
