//! Superprompts - MCP configuration manager
//!
//! Usage:
//!   superprompts config create ...     # Generate a configuration file
//!   superprompts config validate FILE  # Check a configuration file
//!   superprompts config convert FILE   # Re-emit in another format
//!   superprompts config templates      # List available templates
//!   superprompts config import ...     # Derive a server from a project file
//!   superprompts config tools          # List MCP helper tools on PATH

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use superprompts_core::commands::{
    ConfigCommand, ConvertOptions, CreateOptions, ImportCommand, ImportOptions, ValidateReport,
    WriteReport,
};
use superprompts_core::config::{Severity, render_document};
use superprompts_core::format::{FormatChoice, McpFormat};
use superprompts_core::import::ImportSource;
use superprompts_core::mcp::{ServerDefinition, parse_env_pair};
use superprompts_core::tools::detect_tools;

#[derive(Parser)]
#[command(name = "superprompts")]
#[command(about = "MCP configuration manager", long_about = None)]
struct Cli {
    /// Extra templates: a cursor, vscode or generic document whose servers
    /// are added to the built-in templates
    #[arg(long, global = true, value_name = "PATH")]
    templates_file: Option<PathBuf>,

    /// Project directory for default output paths (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    project_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage MCP configuration files
    Config(ConfigArgs),
}

#[derive(Args)]
struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigSubcommand,
}

#[derive(Subcommand)]
enum ConfigSubcommand {
    /// Generate a configuration file from templates and custom servers
    Create(Box<CreateArgs>),

    /// Validate a configuration file
    Validate {
        /// Configuration file to check
        path: PathBuf,

        /// Format to validate against (cursor, vscode, generic, auto)
        #[arg(long, default_value = "auto")]
        format: String,

        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Convert a configuration file to another format
    Convert {
        /// Configuration file to convert
        path: PathBuf,

        /// Source format (cursor, vscode, generic, auto)
        #[arg(long, default_value = "auto")]
        from: String,

        /// Target format (cursor, vscode, generic)
        #[arg(long)]
        to: String,

        /// Write the result here instead of stdout
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,
    },

    /// List available templates
    Templates {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },

    /// Create a server entry from a project file
    Import(ImportArgs),

    /// List MCP helper tools found on this machine
    Tools {
        /// Output format
        #[arg(short, long, default_value = "table")]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum, Default)]
enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Machine-readable JSON
    Json,
    /// Only the exit status (non-zero if problems)
    Quiet,
}

/// Where and how to write a generated document
#[derive(Args)]
struct WriteArgs {
    /// Output format (cursor, vscode, generic)
    #[arg(long, default_value = "cursor")]
    format: String,

    /// Output path (defaults to the format's standard location)
    #[arg(long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Merge into an existing file instead of replacing it
    #[arg(long)]
    merge: bool,

    /// Print the document instead of writing it
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct CreateArgs {
    /// Template to include (repeatable)
    #[arg(long = "template", short = 't', value_name = "NAME")]
    templates: Vec<String>,

    /// Name of a custom server (command after --)
    #[arg(long)]
    name: Option<String>,

    /// Environment variable for the custom server (KEY=VALUE)
    #[arg(long, value_name = "KEY=VALUE")]
    env: Vec<String>,

    /// Working directory for the custom server
    #[arg(long, value_name = "DIR")]
    cwd: Option<String>,

    /// Description for the custom server
    #[arg(long)]
    description: Option<String>,

    /// Custom server command and arguments (after --)
    #[arg(last = true)]
    command: Vec<String>,

    #[command(flatten)]
    write: WriteArgs,
}

#[derive(Args)]
struct ImportArgs {
    #[command(subcommand)]
    command: ImportSubcommand,
}

#[derive(Subcommand)]
enum ImportSubcommand {
    /// Run an npm script from package.json
    Npm {
        /// Script name
        script: String,

        /// package.json to read
        #[arg(long, default_value = "package.json")]
        file: PathBuf,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Exec into a Docker Compose service
    Docker {
        /// Service name
        service: String,

        /// Compose file to read (JSON or YAML)
        #[arg(long, default_value = "docker-compose.yml")]
        file: PathBuf,

        #[command(flatten)]
        write: WriteArgs,
    },

    /// Serve an OpenAPI spec through openapi-mcp-server
    Openapi {
        /// OpenAPI spec file (JSON or YAML)
        file: PathBuf,

        /// Server name
        name: String,

        #[command(flatten)]
        write: WriteArgs,
    },
}

fn main() -> ExitCode {
    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    ExitCode::from(exit_status(run_cli(cli)))
}

/// Success
const EXIT_OK: u8 = 0;
/// Validation found issues
const EXIT_ISSUES: u8 = 1;
/// Any error, reported as one `error:` line on stderr
const EXIT_ERROR: u8 = 2;

fn exit_status(result: Result<u8>) -> u8 {
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("{} {err:#}", style("error:").red().bold());
            EXIT_ERROR
        }
    }
}

fn run_cli(cli: Cli) -> Result<u8> {
    let project_dir = match cli.project_dir {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    match cli.command {
        Commands::Config(args) => match args.command {
            ConfigSubcommand::Create(args) => {
                let cmd = ConfigCommand::with_templates_file(
                    cli.templates_file.as_deref(),
                    project_dir,
                )?;
                run_create(&cmd, *args)
            }
            ConfigSubcommand::Validate {
                path,
                format,
                output,
            } => {
                let cmd = ConfigCommand::with_templates_file(None, project_dir)?;
                run_validate(&cmd, &path, &format, output)
            }
            ConfigSubcommand::Convert {
                path,
                from,
                to,
                output,
            } => {
                let cmd = ConfigCommand::with_templates_file(None, project_dir)?;
                run_convert(&cmd, &path, &from, &to, output)
            }
            ConfigSubcommand::Templates { output } => {
                let cmd = ConfigCommand::with_templates_file(
                    cli.templates_file.as_deref(),
                    project_dir,
                )?;
                run_templates(&cmd, output)
            }
            ConfigSubcommand::Import(args) => run_import(ImportCommand::new(project_dir), args),
            ConfigSubcommand::Tools { output } => run_tools(output),
        },
    }
}

fn run_create(cmd: &ConfigCommand, args: CreateArgs) -> Result<u8> {
    let format = parse_format(&args.write.format)?;
    let mut options = CreateOptions::new(format)
        .with_templates(args.templates)
        .with_merge(args.write.merge)
        .with_dry_run(args.write.dry_run);

    if let Some(output) = args.write.output {
        options = options.with_output(output);
    }

    if let Some(server) = custom_server(
        args.name,
        args.command,
        &args.env,
        args.cwd,
        args.description,
    )? {
        options = options.with_server(server);
    }

    let report = cmd.create(&options)?;
    print_write_report(&report);
    Ok(EXIT_OK)
}

/// Build the custom server from `--name` and the command after `--`.
fn custom_server(
    name: Option<String>,
    command: Vec<String>,
    env: &[String],
    cwd: Option<String>,
    description: Option<String>,
) -> Result<Option<ServerDefinition>> {
    let Some(name) = name else {
        if !command.is_empty() {
            anyhow::bail!("A custom server command requires --name");
        }
        return Ok(None);
    };

    let mut parts = command.into_iter();
    let Some(program) = parts.next() else {
        anyhow::bail!("Custom server '{}' needs a command after --", name);
    };

    let mut server = ServerDefinition::new(name, program)?.with_args(parts);
    for pair in env {
        let (key, value) = parse_env_pair(pair)?;
        server = server.with_env(key, value);
    }
    if let Some(cwd) = cwd {
        server = server.with_cwd(cwd);
    }
    if let Some(description) = description {
        server = server.with_description(description);
    }
    Ok(Some(server))
}

fn run_validate(
    cmd: &ConfigCommand,
    path: &Path,
    format: &str,
    output: OutputFormat,
) -> Result<u8> {
    let choice = FormatChoice::try_from(format)?;
    let report = cmd.validate(path, choice)?;

    match output {
        OutputFormat::Table => print_validate_table(&report),
        OutputFormat::Json => {
            let output = serde_json::json!({
                "path": report.path,
                "format": report.format.map(|f| f.id()),
                "valid": report.is_valid(),
                "issues": report.issues,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Quiet => {}
    }

    Ok(validate_exit_code(&report))
}

fn validate_exit_code(report: &ValidateReport) -> u8 {
    if report.is_valid() {
        EXIT_OK
    } else {
        EXIT_ISSUES
    }
}

fn run_convert(
    cmd: &ConfigCommand,
    path: &Path,
    from: &str,
    to: &str,
    output: Option<PathBuf>,
) -> Result<u8> {
    let mut options =
        ConvertOptions::new(parse_format(to)?).with_source(FormatChoice::try_from(from)?);
    if let Some(output) = output {
        options = options.with_output(output);
    }

    let report = cmd.convert(path, &options)?;

    match &report.output {
        Some(written) => println!(
            "Converted {} -> {}: {}",
            report.source,
            report.target,
            written.display()
        ),
        None => print!("{}", render_document(&report.document)),
    }
    Ok(EXIT_OK)
}

fn run_templates(cmd: &ConfigCommand, output: OutputFormat) -> Result<u8> {
    match output {
        OutputFormat::Table => {
            println!("{:<20} {:<10} Description", "Name", "Version");
            println!("{}", "-".repeat(70));
            for template in cmd.registry().all() {
                println!(
                    "{:<20} {:<10} {}",
                    template.name,
                    template.version.as_deref().unwrap_or("-"),
                    template.description.as_deref().unwrap_or("")
                );
            }
        }
        OutputFormat::Json => {
            let templates: Vec<_> = cmd.registry().all().collect();
            println!("{}", serde_json::to_string_pretty(&templates)?);
        }
        OutputFormat::Quiet => {
            for name in cmd.registry().names() {
                println!("{name}");
            }
        }
    }
    Ok(EXIT_OK)
}

fn run_tools(output: OutputFormat) -> Result<u8> {
    let statuses = detect_tools();

    match output {
        OutputFormat::Table => {
            println!("{:<15} {:<10} Description", "Tool", "Available");
            println!("{}", "-".repeat(80));
            for status in &statuses {
                let available = if status.available {
                    style(format!("{:<10}", "yes")).green()
                } else {
                    style(format!("{:<10}", "no")).red()
                };
                println!("{:<15} {} {}", status.name, available, status.description);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&statuses)?);
        }
        OutputFormat::Quiet => {
            for status in statuses.iter().filter(|s| s.available) {
                println!("{}", status.name);
            }
        }
    }
    Ok(EXIT_OK)
}

fn run_import(cmd: ImportCommand, args: ImportArgs) -> Result<u8> {
    let (file, source, write) = match args.command {
        ImportSubcommand::Npm {
            script,
            file,
            write,
        } => (file, ImportSource::Npm { script }, write),
        ImportSubcommand::Docker {
            service,
            file,
            write,
        } => (file, ImportSource::Docker { service }, write),
        ImportSubcommand::Openapi { file, name, write } => {
            (file, ImportSource::OpenApi { name }, write)
        }
    };

    let mut options = ImportOptions::new(file, source)
        .with_format(parse_format(&write.format)?)
        .with_merge(write.merge)
        .with_dry_run(write.dry_run);
    if let Some(output) = write.output {
        options = options.with_output(output);
    }

    let report = cmd.execute(&options)?;
    print_write_report(&report);
    Ok(EXIT_OK)
}

fn parse_format(s: &str) -> Result<McpFormat> {
    McpFormat::try_from(s)
}

fn print_write_report(report: &WriteReport) {
    if !report.written {
        print!("{}", render_document(&report.document));
        return;
    }

    println!(
        "Wrote {} configuration: {}",
        report.format,
        style(report.path.display()).green()
    );
    for name in &report.added {
        println!("  + {name}");
    }
    for name in &report.replaced {
        println!("  ~ {name} (replaced)");
    }
}

fn print_validate_table(report: &ValidateReport) {
    let format = report.format.map(|f| f.id()).unwrap_or("unknown");
    println!("File: {}", report.path.display());
    println!("Format: {format}");
    println!();

    if report.is_valid() {
        println!("{}", style("Valid configuration").green());
        return;
    }

    println!("{:<10} {:<40} Message", "Severity", "Path");
    println!("{}", "-".repeat(80));
    for issue in &report.issues {
        let severity = match issue.severity {
            Severity::Error => style(format!("{:<10}", issue.severity.name())).red(),
            Severity::Warning => style(format!("{:<10}", issue.severity.name())).yellow(),
        };
        println!("{} {:<40} {}", severity, issue.path, issue.message);
    }
    println!();
    if report.has_errors() {
        println!("Summary: {} issues", report.issues.len());
    } else {
        println!("Summary: {} warnings, no errors", report.issues.len());
    }
}

#[cfg(test)]
mod tests {
    use super::{
        Cli, EXIT_ERROR, EXIT_ISSUES, EXIT_OK, custom_server, exit_status, run_cli,
        validate_exit_code,
    };
    use clap::Parser;
    use std::path::PathBuf;
    use superprompts_core::commands::ValidateReport;
    use superprompts_core::config::ValidationIssue;
    use superprompts_core::format::McpFormat;
    use tempfile::TempDir;

    fn run(args: &[&str]) -> u8 {
        exit_status(run_cli(Cli::try_parse_from(args).unwrap()))
    }

    fn parses(args: &[&str]) -> bool {
        Cli::try_parse_from(args).is_ok()
    }

    #[test]
    fn create_with_templates_parses() {
        assert!(parses(&[
            "superprompts",
            "config",
            "create",
            "--format",
            "vscode",
            "-t",
            "github",
            "--template",
            "filesystem",
            "--merge",
        ]));
    }

    #[test]
    fn create_with_custom_server_parses() {
        assert!(parses(&[
            "superprompts",
            "config",
            "create",
            "--name",
            "local",
            "--env",
            "TOKEN=x",
            "--dry-run",
            "--",
            "node",
            "server.js",
        ]));
    }

    #[test]
    fn validate_with_json_output_parses() {
        assert!(parses(&[
            "superprompts",
            "config",
            "validate",
            "mcp.json",
            "-o",
            "json",
        ]));
    }

    #[test]
    fn convert_requires_target() {
        assert!(!parses(&["superprompts", "config", "convert", "mcp.json"]));
        assert!(parses(&[
            "superprompts",
            "config",
            "convert",
            "mcp.json",
            "--to",
            "generic",
        ]));
    }

    #[test]
    fn global_flags_parse_after_subcommand() {
        assert!(parses(&[
            "superprompts",
            "config",
            "templates",
            "--templates-file",
            "extra.json",
            "--project-dir",
            "/tmp/project",
        ]));
    }

    #[test]
    fn import_subcommands_parse() {
        assert!(parses(&["superprompts", "config", "import", "npm", "mcp"]));
        assert!(parses(&[
            "superprompts",
            "config",
            "import",
            "docker",
            "tools",
            "--file",
            "compose.yaml",
            "--format",
            "generic",
        ]));
        assert!(parses(&[
            "superprompts",
            "config",
            "import",
            "openapi",
            "api.json",
            "pets",
        ]));
    }

    #[test]
    fn custom_server_splits_command_and_env() {
        let server = custom_server(
            Some("local".to_string()),
            vec!["node".to_string(), "server.js".to_string()],
            &["TOKEN=x".to_string()],
            Some("/srv".to_string()),
            None,
        )
        .unwrap()
        .unwrap();

        assert_eq!(server.command, "node");
        assert_eq!(server.args, vec!["server.js"]);
        assert_eq!(server.env.get("TOKEN").map(String::as_str), Some("x"));
        assert_eq!(server.cwd.as_deref(), Some("/srv"));
    }

    #[test]
    fn custom_server_needs_name_and_command() {
        assert!(custom_server(None, vec![], &[], None, None).unwrap().is_none());
        assert!(custom_server(None, vec!["node".to_string()], &[], None, None).is_err());
        assert!(custom_server(Some("x".to_string()), vec![], &[], None, None).is_err());
    }

    #[test]
    fn tools_parses() {
        assert!(parses(&["superprompts", "config", "tools", "-o", "json"]));
    }

    #[test]
    fn validate_exit_code_follows_issue_list() {
        let mut report = ValidateReport {
            path: PathBuf::from("mcp.json"),
            format: Some(McpFormat::Cursor),
            issues: Vec::new(),
        };
        assert_eq!(validate_exit_code(&report), EXIT_OK);

        report
            .issues
            .push(ValidationIssue::warning("mcpServers.x.version", "odd"));
        assert_eq!(validate_exit_code(&report), EXIT_ISSUES);
    }

    #[test]
    fn validate_command_exits_one_on_issues() {
        let dir = TempDir::new().unwrap();
        let good = dir.path().join("good.json");
        let bad = dir.path().join("bad.json");
        std::fs::write(&good, r#"{"mcpServers": {"x": {"command": "echo"}}}"#).unwrap();
        std::fs::write(&bad, r#"{"mcpServers": {"x": {"args": [1]}}}"#).unwrap();

        let good = good.to_str().unwrap();
        let bad = bad.to_str().unwrap();
        assert_eq!(run(&["superprompts", "config", "validate", good, "-o", "quiet"]), EXIT_OK);
        assert_eq!(run(&["superprompts", "config", "validate", bad, "-o", "quiet"]), EXIT_ISSUES);
    }

    #[test]
    fn unknown_template_exits_two_and_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().to_str().unwrap();

        let code = run(&[
            "superprompts",
            "config",
            "create",
            "-t",
            "github",
            "-t",
            "nope",
            "--project-dir",
            project,
        ]);

        assert_eq!(code, EXIT_ERROR);
        assert!(!dir.path().join("mcp.json").exists());
    }

    #[test]
    fn missing_file_exits_two() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("absent.json");

        let code = run(&[
            "superprompts",
            "config",
            "convert",
            missing.to_str().unwrap(),
            "--to",
            "vscode",
        ]);

        assert_eq!(code, EXIT_ERROR);
    }

    #[test]
    fn create_writes_default_path_and_exits_zero() {
        let dir = TempDir::new().unwrap();
        let project = dir.path().to_str().unwrap();

        let code = run(&[
            "superprompts",
            "config",
            "create",
            "--format",
            "generic",
            "--project-dir",
            project,
        ]);

        assert_eq!(code, EXIT_OK);
        assert!(dir.path().join("mcp_config.json").exists());
    }
}
