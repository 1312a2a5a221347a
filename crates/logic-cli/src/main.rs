use clap::{Parser, Subcommand, ValueEnum};
use component_logic::{evaluate as component_evaluate, render_text as component_render_text};
use logic_spec::{
    Answer, FormSpec, ValidationResult, answers_from_value, answers_schema, form_schema,
    resolve_blocking_rule_with, resolve_visible_fields, validate_submission,
};
use serde_json::{Value, json};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Environment variable holding the log filter (`tracing_subscriber::EnvFilter` syntax).
const LOG_ENV: &str = "FORM_LOGIC_LOG";

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Evaluate form logic against an answer snapshot",
    long_about = "Resolves visible fields and submit-blocking rules for a form definition and a set of answers"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum SchemaTarget {
    Form,
    Answers,
}

#[derive(Subcommand)]
enum Command {
    /// Print the fields visible for the given answers.
    Visible {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON file containing answers (list or object keyed by field id).
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the first prevent-submit rule matching the answers.
    Blocking {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON file containing answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Check a full submission; exits non-zero when it would be rejected.
    Check {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Path to the answers JSON file.
        #[arg(long, value_name = "ANSWERS")]
        answers: PathBuf,
    },
    /// Print visibility and blocking together.
    Evaluate {
        /// Path to the form definition JSON.
        #[arg(long, value_name = "FORM")]
        form: PathBuf,
        /// Optional JSON file containing answers.
        #[arg(long, value_name = "ANSWERS")]
        answers: Option<PathBuf>,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the JSON Schema of the form or answers format.
    Schema {
        #[arg(long, value_enum, default_value_t = SchemaTarget::Form)]
        target: SchemaTarget,
    },
}

fn main() -> CliResult<()> {
    init_tracing();
    let cli = Cli::parse();
    match cli.command {
        Command::Visible {
            form,
            answers,
            format,
        } => run_visible(form, answers, format),
        Command::Blocking {
            form,
            answers,
            format,
        } => run_blocking(form, answers, format),
        Command::Check { form, answers } => run_check(form, answers),
        Command::Evaluate {
            form,
            answers,
            format,
        } => run_evaluate(form, answers, format),
        Command::Schema { target } => run_schema(target),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn read_form(path: &Path) -> CliResult<FormSpec> {
    let contents = fs::read_to_string(path)
        .map_err(|err| format!("failed to read form {}: {}", path.display(), err))?;
    let form: FormSpec = serde_json::from_str(&contents)
        .map_err(|err| format!("invalid form {}: {}", path.display(), err))?;
    debug!(form = %form.id, fields = form.fields.len(), rules = form.rules.len(), "loaded form");
    Ok(form)
}

fn read_answers_json(path: Option<&Path>) -> CliResult<String> {
    match path {
        Some(path) => fs::read_to_string(path)
            .map_err(|err| format!("failed to read answers {}: {}", path.display(), err).into()),
        None => Ok("{}".to_string()),
    }
}

fn read_answers(path: Option<&Path>) -> CliResult<Vec<Answer>> {
    let contents = read_answers_json(path)?;
    let value: Value = serde_json::from_str(&contents)?;
    Ok(answers_from_value(&value).map_err(|err| err.to_string())?)
}

fn print_json(value: &Value) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn run_visible(
    form_path: PathBuf,
    answers_path: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    let form = read_form(&form_path)?;
    let answers = read_answers(answers_path.as_deref())?;
    let visible = resolve_visible_fields(&answers, &form);
    match format {
        OutputFormat::Text => {
            for field in form.fields.iter().filter(|field| visible.contains(&field.id)) {
                println!("{}", field.id);
            }
            Ok(())
        }
        OutputFormat::Json => print_json(&json!({ "form_id": form.id, "visible": visible })),
    }
}

fn run_blocking(
    form_path: PathBuf,
    answers_path: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    let form = read_form(&form_path)?;
    let answers = read_answers(answers_path.as_deref())?;
    let visible = resolve_visible_fields(&answers, &form);
    let rule = resolve_blocking_rule_with(&answers, &form, &visible);
    match (format, rule) {
        (OutputFormat::Text, Some(rule)) => {
            println!(
                "Blocked by {}: {}",
                rule.id,
                rule.block_message().unwrap_or_default()
            );
            Ok(())
        }
        (OutputFormat::Text, None) => {
            println!("Not blocked");
            Ok(())
        }
        (OutputFormat::Json, Some(rule)) => print_json(&json!({
            "blocked": true,
            "rule_id": rule.id,
            "message": rule.block_message(),
        })),
        (OutputFormat::Json, None) => print_json(&json!({ "blocked": false })),
    }
}

fn run_check(form_path: PathBuf, answers_path: PathBuf) -> CliResult<()> {
    let form = read_form(&form_path)?;
    let answers = read_answers(Some(answers_path.as_path()))?;

    let result = validate_submission(&form, &answers);
    println!(
        "Submission result: {}",
        if result.valid { "accepted" } else { "rejected" }
    );
    describe_validation(&result);

    if result.valid {
        Ok(())
    } else {
        Err("submission rejected".into())
    }
}

fn describe_validation(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("Errors:");
        for error in &result.errors {
            println!("  {} - {}", error.field_id, error.message);
        }
    }
    if !result.unknown_fields.is_empty() {
        println!(
            "Unknown answer fields: {}",
            result.unknown_fields.join(", ")
        );
    }
    if let Some(blocked) = &result.blocked_by {
        println!("Blocked by {}: {}", blocked.rule_id, blocked.message);
    }
}

fn run_evaluate(
    form_path: PathBuf,
    answers_path: Option<PathBuf>,
    format: OutputFormat,
) -> CliResult<()> {
    let form = read_form(&form_path)?;
    let config_json = json!({ "form_json": serde_json::to_string(&form)? }).to_string();
    let answers_json = read_answers_json(answers_path.as_deref())?;

    let output = match format {
        OutputFormat::Text => component_render_text(&form.id, &config_json, &answers_json),
        OutputFormat::Json => component_evaluate(&form.id, &config_json, &answers_json),
    };
    let parsed = serde_json::from_str::<Value>(&output).ok();
    if let Some(error) = parsed
        .as_ref()
        .and_then(|payload| payload.get("error"))
        .and_then(Value::as_str)
    {
        return Err(error.to_string().into());
    }
    match (format, parsed) {
        (OutputFormat::Json, Some(payload)) => print_json(&payload),
        _ => {
            println!("{}", output);
            Ok(())
        }
    }
}

fn run_schema(target: SchemaTarget) -> CliResult<()> {
    let schema = match target {
        SchemaTarget::Form => form_schema(),
        SchemaTarget::Answers => answers_schema(),
    };
    print_json(&schema)
}
