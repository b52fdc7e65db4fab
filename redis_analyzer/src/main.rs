use redis_analyzer::config::build_info;
use redis_analyzer::config::runtime::{AnalyzerPreferences, RuntimeConfig};
use redis_analyzer::logging::codes;
use redis_analyzer::specs::{self, CommandSpecTable};
use redis_analyzer::utils::SourceMap;
use redis_analyzer::{logging, pipeline, AnalysisReport, ProgramReport, SyntaxError};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

const EXIT_VALID: u8 = 0;
const EXIT_INVALID: u8 = 1;
const EXIT_USAGE: u8 = 2;

#[derive(Debug, Default)]
struct CliOptions {
    json: bool,
    tokens: bool,
    list_commands: bool,
    help: bool,
    file: Option<PathBuf>,
    specs: Option<PathBuf>,
    command: Vec<String>,
}

fn main() -> ExitCode {
    let config = RuntimeConfig::default();

    if let Err(e) = logging::config::init_runtime_preferences(config.logging.clone()) {
        eprintln!("Warning: {}", e);
    }
    if let Err(e) = logging::init_global_logging() {
        eprintln!("Warning: logging unavailable: {}", e);
    }
    if let Err(e) = redis_analyzer::init_analyzer_logging() {
        logging::safe_log_error(codes::system::INITIALIZATION_FAILURE, &e);
        return ExitCode::from(EXIT_USAGE);
    }

    let args: Vec<String> = env::args().collect();
    let program_name = args.first().map(String::as_str).unwrap_or("redis_analyzer");

    let options = match parse_options(&args[1.min(args.len())..]) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("Usage: {} [--json] [--tokens] <command text>", program_name);
            eprintln!("       {} --help", program_name);
            return ExitCode::from(EXIT_USAGE);
        }
    };

    if options.help {
        print_help(program_name);
        return ExitCode::from(EXIT_VALID);
    }

    match run(&options, config.analyzer) {
        Ok(code) => ExitCode::from(code),
        Err(message) => {
            eprintln!("Error: {}", message);
            ExitCode::from(EXIT_USAGE)
        }
    }
}

fn print_help(program_name: &str) {
    println!("Redis command analyzer v{}", env!("CARGO_PKG_VERSION"));
    println!("Tokenizes, parses and validates Redis-style commands without executing them");
    println!();
    println!("USAGE:");
    println!("    {} [options] <command text>     # Analyze one command", program_name);
    println!("    {} --file <path> [options]      # Analyze one command per line", program_name);
    println!("    {} --commands                   # Print the command table", program_name);
    println!();
    println!("OPTIONS:");
    println!("    --help              Show this help message");
    println!("    --json              Print the full report as JSON");
    println!("    --tokens            Include the token stream in the report");
    println!("    --file <path>       Read commands from a file");
    println!("    --specs <path>      Register extra command definitions from TOML");
    println!("    --commands          Print the command specification table as JSON");
    println!();
    println!("EXIT STATUS:");
    println!("    0    every analyzed command is valid");
    println!("    1    at least one command is invalid");
    println!("    2    usage or I/O error");
    println!();
    println!("EXAMPLES:");
    println!("    {} GET mykey", program_name);
    println!("    {} --json 'SET key \"value\" EX 60'", program_name);
    println!("    {} --file commands.txt --specs extra.toml", program_name);
    println!();

    println!("CONFIGURATION:");
    println!("    Build profile: {}", build_info::profile());
    for line in logging::get_system_diagnostics().lines() {
        println!("    {}", line);
    }
}

fn parse_options(args: &[String]) -> Result<CliOptions, String> {
    let mut options = CliOptions::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => options.help = true,
            "--json" => options.json = true,
            "--tokens" => options.tokens = true,
            "--commands" => options.list_commands = true,
            "--file" | "--specs" => {
                let Some(value) = args.get(i + 1) else {
                    return Err(format!("{} requires a path", args[i]));
                };
                if args[i] == "--file" {
                    options.file = Some(PathBuf::from(value));
                } else {
                    options.specs = Some(PathBuf::from(value));
                }
                i += 1;
            }
            flag if flag.starts_with("--") => {
                return Err(format!("Unknown option '{}'", flag));
            }
            word => options.command.push(word.to_string()),
        }
        i += 1;
    }

    let has_input = options.file.is_some() || !options.command.is_empty();
    if !options.help && !options.list_commands && !has_input {
        return Err("no command text or --file given".to_string());
    }
    if options.file.is_some() && !options.command.is_empty() {
        return Err("give either command text or --file, not both".to_string());
    }

    Ok(options)
}

fn run(options: &CliOptions, prefs: AnalyzerPreferences) -> Result<u8, String> {
    let table = load_table(options)?;
    let prefs = AnalyzerPreferences {
        include_tokens: prefs.include_tokens || options.tokens,
        ..prefs
    };

    if options.list_commands {
        let json = serde_json::to_string_pretty(table.command_specs())
            .map_err(|e| format!("Failed to serialize command table: {}", e))?;
        println!("{}", json);
        if options.file.is_none() && options.command.is_empty() {
            return Ok(EXIT_VALID);
        }
    }

    if let Some(path) = &options.file {
        let source =
            pipeline::read_source(path, prefs.max_input_size).map_err(|e| e.to_string())?;
        let report =
            pipeline::analyze_program(&source, &table, &prefs).map_err(|e| e.to_string())?;
        print_program_report(&report, &source, options.json, prefs.pretty_json)?;
        return Ok(if report.valid { EXIT_VALID } else { EXIT_INVALID });
    }

    let text = options.command.join(" ");
    let report = pipeline::analyze(&text, &table, &prefs).map_err(|e| e.to_string())?;
    print_report(&report, &text, options.json, prefs.pretty_json)?;
    Ok(if report.valid { EXIT_VALID } else { EXIT_INVALID })
}

fn load_table(options: &CliOptions) -> Result<CommandSpecTable, String> {
    match &options.specs {
        Some(path) => {
            let text = fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            specs::table_with_extra_specs(&text).map_err(|e| e.to_string())
        }
        None => Ok(CommandSpecTable::builtin()),
    }
}

fn print_report(
    report: &AnalysisReport,
    text: &str,
    json: bool,
    pretty: bool,
) -> Result<(), String> {
    if json {
        let text = report
            .to_json(pretty)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    print_summary(report, "");
    print_syntax_errors(&report.syntax_errors, text);
    Ok(())
}

fn print_program_report(
    report: &ProgramReport,
    source: &str,
    json: bool,
    pretty: bool,
) -> Result<(), String> {
    if json {
        let text = report
            .to_json(pretty)
            .map_err(|e| format!("Failed to serialize report: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    for (index, command) in report.commands.iter().enumerate() {
        print_summary(command, &format!("[{}] ", index + 1));
    }
    print_syntax_errors(&report.syntax_errors, source);
    if let Some(tokens) = &report.tokens {
        for token in tokens {
            println!("  token {}", token);
        }
    }
    println!(
        "Analyzed {} commands, {} invalid",
        report.commands.len(),
        report.invalid_count()
    );
    Ok(())
}

fn print_syntax_errors(errors: &[SyntaxError], source: &str) {
    if errors.is_empty() {
        return;
    }
    let source_map = SourceMap::new(source.to_string());
    for error in errors {
        print!("{}", source_map.format_error(&error.span, &error.message()));
    }
}

fn print_summary(report: &AnalysisReport, prefix: &str) {
    let status = if report.valid { "VALID" } else { "INVALID" };
    match &report.parsed_ast {
        Some(ast) => println!("{}{}: {}", prefix, status, ast),
        None => println!("{}{}", prefix, status),
    }

    if let Some(validation) = &report.validation {
        for error in &validation.errors {
            println!("  {}: {}", error.kind, error.message);
        }
        for warning in &validation.warnings {
            println!("  warning: {}", warning);
        }
    }
    if let Some(tokens) = &report.tokens {
        for token in tokens {
            println!("  token {}", token);
        }
    }
}
