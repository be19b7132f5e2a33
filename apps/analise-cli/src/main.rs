//! Analise Contratos CLI
//!
//! Runs the full analysis over a contract and prints a JSON report:
//!
//! - PDF mode (needs the `tesseract-ocr` feature plus PDFium and
//!   Tesseract installed): rasterize, recognize and extract page by
//!   page, then validate.
//! - Text mode (`--from-text`): skip OCR and run extraction plus
//!   validation over an already-recognized text file. Works on any
//!   build.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use contract_types::{
    AnalysisResult, ContractTemplate, Finding, PageResult, TemplateKind,
};
use ocr_pipeline::FieldExtractor;
use serde::Serialize;
use tracing::{info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use validation_engine::RuleEngine;

/// Command-line arguments for the contract analyzer
#[derive(Parser, Debug)]
#[command(name = "analise")]
#[command(about = "Contract analysis: OCR extraction and rule validation")]
struct Args {
    /// Contract to analyze (PDF, or plain text with --from-text)
    input: PathBuf,

    /// Template: a builtin code (prestacao_servicos, locacao,
    /// compra_venda, padrao) or a path to a template JSON file
    #[arg(short, long, default_value = "padrao")]
    template: String,

    /// Treat the input as already-recognized text and skip OCR
    #[arg(long)]
    from_text: bool,

    /// Blocking page workers for OCR
    #[arg(long, default_value_t = ocr_pipeline::DEFAULT_PAGE_WORKERS)]
    workers: usize,

    /// Tesseract language code
    #[arg(long, default_value = "por")]
    lang: String,

    /// Explicit tessdata directory (defaults to the system location)
    #[arg(long)]
    tessdata: Option<PathBuf>,

    /// Pretty-print the JSON report
    #[arg(long)]
    pretty: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// JSON report printed to stdout.
#[derive(Serialize)]
struct Report {
    #[serde(skip_serializing_if = "Option::is_none")]
    pages: Option<Vec<PageResult>>,
    findings: Vec<Finding>,
    summary: AnalysisResult,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let template = load_template(&args.template)?;
    info!(template = %template.name, input = %args.input.display(), "starting analysis");

    let started = Instant::now();
    let report = if args.from_text {
        analyze_text(&args, &template)?
    } else {
        analyze_pdf(&args, &template).await?
    };

    info!(
        findings = report.summary.total_errors,
        elapsed_s = started.elapsed().as_secs_f64(),
        "analysis finished"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{json}");

    Ok(())
}

fn load_template(spec: &str) -> anyhow::Result<ContractTemplate> {
    if let Some(kind) = TemplateKind::parse_code(spec) {
        return Ok(ContractTemplate::builtin(kind));
    }
    let path = PathBuf::from(spec);
    if path.exists() {
        let raw = std::fs::read_to_string(&path)?;
        let template: ContractTemplate = serde_json::from_str(&raw)?;
        return Ok(template);
    }
    anyhow::bail!(
        "unknown template {spec:?}: expected a builtin code \
         (prestacao_servicos, locacao, compra_venda, padrao) or a JSON file path"
    )
}

fn analyze_text(args: &Args, template: &ContractTemplate) -> anyhow::Result<Report> {
    let started = Instant::now();
    let text = std::fs::read_to_string(&args.input)?;

    let fields = FieldExtractor::new().extract(&text);
    info!(fields = fields.len(), "extraction complete");

    let findings = RuleEngine::new().validate(&fields, &text, template);
    let summary = AnalysisResult::from_findings(&findings, started.elapsed().as_secs_f64());

    Ok(Report {
        pages: None,
        findings,
        summary,
    })
}

#[cfg(feature = "tesseract-ocr")]
async fn analyze_pdf(args: &Args, template: &ContractTemplate) -> anyhow::Result<Report> {
    use std::sync::Arc;

    use contract_types::Document;
    use ocr_pipeline::{AnalysisPipeline, PdfiumRasterizer, TesseractRecognizer};

    let started = Instant::now();
    let content = std::fs::read(&args.input)?;
    let name = args
        .input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "documento.pdf".to_string());
    let document = Document::new(name, "application/pdf", content);

    let mut recognizer = TesseractRecognizer::new(&args.lang);
    if let Some(dir) = &args.tessdata {
        recognizer = recognizer.with_tessdata(dir);
    }

    let pipeline = AnalysisPipeline::new(
        Arc::new(PdfiumRasterizer::new()?),
        Arc::new(recognizer),
    )
    .with_page_workers(args.workers);

    let sink = |percent: u8| info!(percent, "progress");
    let aggregated = pipeline.process_aggregated(&document, &sink).await?;

    let findings = RuleEngine::new().validate(
        &aggregated.all_fields,
        &aggregated.all_raw_text,
        template,
    );
    let summary = AnalysisResult::from_findings(&findings, started.elapsed().as_secs_f64());

    Ok(Report {
        pages: Some(aggregated.pages),
        findings,
        summary,
    })
}

#[cfg(not(feature = "tesseract-ocr"))]
async fn analyze_pdf(_args: &Args, _template: &ContractTemplate) -> anyhow::Result<Report> {
    anyhow::bail!(
        "this build has no OCR backend; rebuild with --features tesseract-ocr, \
         or pass --from-text to analyze recognized text"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_template_codes_resolve() {
        for code in ["prestacao_servicos", "locacao", "compra_venda", "padrao"] {
            assert!(load_template(code).is_ok(), "{code} should resolve");
        }
    }

    #[test]
    fn unknown_template_is_an_error() {
        let err = load_template("naofaz_sentido").unwrap_err();
        assert!(err.to_string().contains("unknown template"));
    }
}
