use std::io::{BufRead, Write};
use std::path::Path;
use std::time::Duration;

use tracing::warn;

use crate::cli::config::{AppConfig, Cli, Commands, resolve_journal_path};
use crate::fill::field_spec::FieldSpec;
use crate::fill::image::{HttpImageSource, ImageSource};
use crate::layers::naming::LayerRename;
use crate::node::host::DocumentHost;
use crate::node::memory::MemoryDocument;
use crate::report::console::{format_findings, format_layers, format_match_report, format_texts};
use crate::service::assistant::Assistant;
use crate::service::message::{Payload, Request, Response};
use crate::trace::logger::Journal;

// ============================================================================
// Assistant setup
// ============================================================================

/// Load the document and wire session, journal and image settings from the
/// CLI and config file.
pub fn build_assistant(
    cli: &Cli,
    config: &AppConfig,
) -> Result<Assistant<MemoryDocument, HttpImageSource>, Box<dyn std::error::Error>> {
    let mut document = MemoryDocument::load(Path::new(&cli.doc))?;
    if !cli.select.is_empty() {
        document.set_selection(cli.select.clone());
    }

    let images = HttpImageSource::new(Duration::from_secs(config.image.timeout_secs))?;
    Ok(configure(Assistant::new(document, images), cli, config))
}

/// Apply the optional session, journal and label settings to an assistant.
pub fn configure<H: DocumentHost, S: ImageSource>(
    assistant: Assistant<H, S>,
    cli: &Cli,
    config: &AppConfig,
) -> Assistant<H, S> {
    let mut assistant = assistant
        .with_outline_label(config.outline.default_label.clone())
        .with_image_min_size(config.image.min_size);

    if let Some(path) = config.session.state_path.as_deref() {
        assistant = assistant.with_session(path);
    }
    if let Some(path) = resolve_journal_path(cli, config) {
        assistant = assistant.with_journal(Journal::open(path));
    }
    assistant
}

// ============================================================================
// one-shot subcommands
// ============================================================================

/// Translate a one-shot subcommand into a request. `serve` has none.
pub fn request_for(command: &Commands) -> Result<Option<Request>, Box<dyn std::error::Error>> {
    let request = match command {
        Commands::Exec { words } => Request::ExecuteCommand {
            command: words.join(" "),
        },
        Commands::Info => Request::GetSelectionInfo,
        Commands::Layers => Request::LoadLayers,
        Commands::AutoRename => Request::AutoRename,
        Commands::RenameLayers { plan } => Request::RenameLayers {
            changes: load_renames(plan)?,
        },
        Commands::Rename { naming_type } => Request::RenameSelected {
            naming_type: naming_type.clone(),
        },
        Commands::Fill { value } => Request::ApplyDummyData {
            value: value.clone(),
        },
        Commands::RandomFill { fields } => Request::RandomFill {
            fields: load_fields(fields)?,
        },
        Commands::ImageFill { kind } => Request::ApplyImageFill { kind: kind.clone() },
        Commands::Count { field } => Request::CountMatching {
            field_name: field.clone(),
        },
        Commands::Audit { kind, fix } => Request::ScanDesignSystem {
            kind: *kind,
            fix: *fix,
        },
        Commands::Compare { outline } => Request::CompareWithNotion {
            outline: std::fs::read_to_string(outline)?,
        },
        Commands::SpellCheck => Request::SpellCheck,
        Commands::Serve => return Ok(None),
    };
    Ok(Some(request))
}

/// Load a list of fields from YAML (JSON is accepted as well).
pub fn load_fields(path: &str) -> Result<Vec<FieldSpec>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let fields: Vec<FieldSpec> = serde_yaml::from_str(&content)?;
    Ok(fields)
}

/// Load a rename plan (`[{id, name}]`) from YAML or JSON.
pub fn load_renames(path: &str) -> Result<Vec<LayerRename>, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_yaml::from_str(&content)?)
}

/// Human-readable rendering of a response for the terminal.
pub fn render(response: &Response) -> String {
    let body = match &response.data {
        Some(Payload::Layers(layers)) => format_layers(layers),
        Some(Payload::Findings(findings)) => format_findings(findings),
        Some(Payload::Matches(results)) => format_match_report(results),
        Some(Payload::Texts(texts)) => format_texts(texts),
        Some(Payload::Count(_)) | None => String::new(),
    };
    if body.is_empty() {
        format!("{}\n", response.message)
    } else {
        format!("{}\n{}\n", body, response.message)
    }
}

// ============================================================================
// serve subcommand
// ============================================================================

/// Answer one JSON request per input line with one JSON response per output
/// line. Returns the number of requests handled.
pub fn cmd_serve<H, S, R, W>(
    assistant: &mut Assistant<H, S>,
    input: R,
    mut output: W,
) -> std::io::Result<usize>
where
    H: DocumentHost,
    S: ImageSource,
    R: BufRead,
    W: Write,
{
    let mut handled = 0;
    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(request) => assistant.handle(request),
            Err(e) => {
                warn!(error = %e, "rejecting malformed request");
                Response::error("invalid-request", format!("요청을 해석할 수 없습니다: {e}"))
            }
        };

        let json = serde_json::to_string(&response).map_err(std::io::Error::other)?;
        writeln!(output, "{}", json)?;
        output.flush()?;
        handled += 1;
    }
    Ok(handled)
}
