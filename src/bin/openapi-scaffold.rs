//! OpenAPI Scaffold CLI
//!
//! Command-line interface for resolving OpenAPI documents and emitting
//! client artifacts: type declarations, validators, resource models, and
//! form control trees.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use openapi_scaffold::discovery::MIN_SHAPE_HINT;
use openapi_scaffold::emit::forms::build_form;
use openapi_scaffold::emit::types::emit_types;
use openapi_scaffold::emit::validators::emit_validators;
use openapi_scaffold::{
    check_payload, discover_resources, extract_operations, load_document, load_document_auto,
    BooleanControl, CheckError, DateRepr, DiscoveryOptions, EnumNaming, GeneratorOptions,
    ParamLocation, ResolveContext, SchemaStore, TypeKind, ValidatorDialect, Warning,
};

#[derive(Parser)]
#[command(name = "openapi-scaffold")]
#[command(about = "Emit client artifacts from an OpenAPI/Swagger document")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every emitting subcommand.
#[derive(Args)]
struct GenerateArgs {
    /// Date representation: string or temporal
    #[arg(long, default_value = "string")]
    date_repr: String,

    /// Enum member naming: synthesized or description
    #[arg(long, default_value = "synthesized")]
    enum_naming: String,

    /// Validator dialect: zod or yup
    #[arg(long, default_value = "zod")]
    dialect: String,

    /// Boolean control style: toggle or checkbox
    #[arg(long, default_value = "toggle")]
    boolean_control: String,

    /// Reject unknown keys in request bodies
    #[arg(long)]
    strict_body: bool,
}

impl GenerateArgs {
    fn options(&self) -> Result<GeneratorOptions, u8> {
        let date_repr = match self.date_repr.as_str() {
            "string" => DateRepr::String,
            "temporal" => DateRepr::Temporal,
            other => return Err(usage(&format!("unknown date representation: {}", other))),
        };
        let enum_naming = match self.enum_naming.as_str() {
            "synthesized" => EnumNaming::Synthesized,
            "description" => EnumNaming::Description,
            other => return Err(usage(&format!("unknown enum naming mode: {}", other))),
        };
        let dialect = match self.dialect.as_str() {
            "zod" => ValidatorDialect::Zod,
            "yup" => ValidatorDialect::Yup,
            other => return Err(usage(&format!("unknown validator dialect: {}", other))),
        };
        let boolean_control = match self.boolean_control.as_str() {
            "toggle" => BooleanControl::Toggle,
            "checkbox" => BooleanControl::Checkbox,
            other => return Err(usage(&format!("unknown boolean control style: {}", other))),
        };
        Ok(GeneratorOptions::new()
            .date_repr(date_repr)
            .enum_naming(enum_naming)
            .dialect(dialect)
            .boolean_control(boolean_control)
            .strict_body(self.strict_body))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Emit static type declarations for named schemas
    Types {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Schema names to emit (all definitions if omitted)
        names: Vec<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        generate: GenerateArgs,
    },

    /// Emit runtime validator expressions for named schemas
    Validators {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Schema names to emit (all definitions if omitted)
        names: Vec<String>,

        /// Value location: path, query, header, body, or response
        #[arg(long, default_value = "body")]
        location: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        generate: GenerateArgs,
    },

    /// Discover CRUD resources from the document's operations
    Resources {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Output format: text (default) or json
        #[arg(long, default_value = "text")]
        format: String,

        /// Only claim a list role when the response is array-typed
        #[arg(long)]
        require_array_list: bool,

        #[command(flatten)]
        generate: GenerateArgs,
    },

    /// Emit a form control tree for one named object schema
    Forms {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Schema name to build the form from
        schema: String,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        generate: GenerateArgs,
    },

    /// Check an example payload against one named schema
    Check {
        /// Document source: file path or URL (http:// or https://)
        source: String,

        /// Schema name to check against
        schema: String,

        /// Payload file to check
        payload: PathBuf,

        /// Output results as JSON (for automation)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Types {
            source,
            names,
            output,
            generate,
        } => run_types(&source, names, output, &generate),

        Commands::Validators {
            source,
            names,
            location,
            output,
            generate,
        } => run_validators(&source, names, &location, output, &generate),

        Commands::Resources {
            source,
            format,
            require_array_list,
            generate,
        } => run_resources(&source, &format, require_array_list, &generate),

        Commands::Forms {
            source,
            schema,
            output,
            generate,
        } => run_forms(&source, &schema, output, &generate),

        Commands::Check {
            source,
            schema,
            payload,
            json,
        } => run_check(&source, &schema, &payload, json),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

fn usage(msg: &str) -> u8 {
    eprintln!("Error: {}", msg);
    2
}

fn load_store(source: &str) -> Result<(serde_json::Value, SchemaStore), u8> {
    let document = load_document_auto(source).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    let store = SchemaStore::from_document(&document).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;
    Ok((document, store))
}

fn report_warnings(warnings: &[Warning]) {
    for warning in warnings {
        eprintln!("{}", warning);
    }
}

fn write_artifact(output: Option<PathBuf>, artifact: &str) -> Result<(), u8> {
    match output {
        Some(path) => std::fs::write(&path, artifact).map_err(|e| {
            eprintln!("Error writing to {}: {}", path.display(), e);
            3u8
        }),
        None => {
            println!("{}", artifact);
            Ok(())
        }
    }
}

fn run_types(
    source: &str,
    names: Vec<String>,
    output: Option<PathBuf>,
    generate: &GenerateArgs,
) -> Result<(), u8> {
    let options = generate.options()?;
    let (_, store) = load_store(source)?;
    let mut ctx = ResolveContext::new(&store, &options);

    let roots: Vec<&str> = if names.is_empty() {
        store.names().collect()
    } else {
        names.iter().map(String::as_str).collect()
    };

    let declarations = emit_types(&mut ctx, &roots).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    report_warnings(ctx.warnings());
    write_artifact(output, &declarations)
}

fn run_validators(
    source: &str,
    names: Vec<String>,
    location: &str,
    output: Option<PathBuf>,
    generate: &GenerateArgs,
) -> Result<(), u8> {
    let options = generate.options()?;
    let location = match location {
        "path" => ParamLocation::Path,
        "query" => ParamLocation::Query,
        "header" => ParamLocation::Header,
        "body" => ParamLocation::Body,
        "response" => ParamLocation::Response,
        other => return Err(usage(&format!("unknown location: {}", other))),
    };
    let (_, store) = load_store(source)?;
    let mut ctx = ResolveContext::new(&store, &options);

    let roots: Vec<&str> = if names.is_empty() {
        store.names().collect()
    } else {
        names.iter().map(String::as_str).collect()
    };

    let expressions = emit_validators(&mut ctx, &roots, location).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    report_warnings(ctx.warnings());
    write_artifact(output, &expressions)
}

fn run_resources(
    source: &str,
    format: &str,
    require_array_list: bool,
    generate: &GenerateArgs,
) -> Result<(), u8> {
    let options = generate.options()?;
    let (document, store) = load_store(source)?;
    let mut ctx = ResolveContext::new(&store, &options);

    let mut warnings = Vec::new();
    let operations = extract_operations(&document, &mut warnings);
    let discovery = DiscoveryOptions {
        require_array_list_response: require_array_list,
    };
    let resources = discover_resources(&mut ctx, &operations, &discovery);

    report_warnings(&warnings);
    report_warnings(ctx.warnings());

    if format == "json" {
        let rendered = serde_json::to_string_pretty(&resources).map_err(|e| {
            eprintln!("Error serializing output: {}", e);
            2u8
        })?;
        println!("{}", rendered);
        return Ok(());
    }

    if resources.is_empty() {
        // Not an error; state what a viable group looks like.
        println!("No resources discovered: {}", MIN_SHAPE_HINT);
        return Ok(());
    }

    for resource in &resources {
        println!("{} ({})", resource.names.title, resource.names.plural);
        for (role, claimed) in [
            ("create", &resource.create),
            ("list", &resource.list),
            ("read", &resource.read),
            ("update", &resource.update),
            ("delete", &resource.delete),
        ] {
            if let Some(op) = claimed {
                println!("  {:<7} {} {}", role, op.method, op.path);
            }
        }
        for action in &resource.actions {
            println!("  action  {} {} ({})", action.method, action.path, action.name);
        }
        if let Some(model) = &resource.writable_model {
            println!("  form    {} ({} fields)", model, resource.form_properties.len());
        }
        println!();
    }
    Ok(())
}

fn run_forms(
    source: &str,
    schema: &str,
    output: Option<PathBuf>,
    generate: &GenerateArgs,
) -> Result<(), u8> {
    let options = generate.options()?;
    let (_, store) = load_store(source)?;
    let mut ctx = ResolveContext::new(&store, &options);

    if store.get(schema).is_none() {
        eprintln!("Error: no schema named \"{}\" in document", schema);
        return Err(2);
    }

    let descriptor = ctx.resolve_named(schema);
    let properties = match &ctx.dereference(&descriptor).kind {
        TypeKind::Object(properties) => properties.clone(),
        _ => {
            eprintln!("Error: schema \"{}\" is not an object; no form to build", schema);
            return Err(2);
        }
    };

    let form = build_form(&ctx, &properties);
    report_warnings(ctx.warnings());

    let rendered = serde_json::to_string_pretty(&form).map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;
    write_artifact(output, &rendered)
}

fn run_check(
    source: &str,
    schema: &str,
    payload_path: &std::path::Path,
    json_output: bool,
) -> Result<(), u8> {
    let (_, store) = load_store(source)?;

    let payload = load_document(payload_path).map_err(|e| {
        report_error(json_output, &format!("loading payload: {}", e));
        e.exit_code() as u8
    })?;

    match check_payload(&store, schema, &payload) {
        Ok(()) => {
            if json_output {
                println!(r#"{{"valid":true}}"#);
            } else {
                println!("Valid");
            }
            Ok(())
        }
        Err(CheckError::Invalid { errors }) => {
            if json_output {
                let output = serde_json::json!({
                    "valid": false,
                    "errors": errors
                });
                println!("{}", output);
            } else {
                eprintln!("Check failed:");
                for error in errors {
                    eprintln!("  {}", error);
                }
            }
            Err(1)
        }
        Err(CheckError::Scaffold(e)) => {
            report_error(json_output, &e.to_string());
            Err(e.exit_code() as u8)
        }
    }
}

/// Output an error message in plain text or JSON format.
fn report_error(json_output: bool, msg: &str) {
    if json_output {
        println!(r#"{{"valid":false,"error":"{}"}}"#, msg);
    } else {
        eprintln!("Error: {}", msg);
    }
}
